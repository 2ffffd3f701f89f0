use chrono::{DateTime, Utc};
use std::fmt;

/// Identifier of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeliveryId(pub u64);

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier shared by an original delivery and all of its redeliveries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryGuid(pub String);

impl fmt::Display for DeliveryGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a delivery attempt as reported by the delivery log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Ok,
    /// Any status other than `"OK"`, kept verbatim (e.g. `"Invalid HTTP Response: 503"`)
    Failed(String),
}

impl DeliveryStatus {
    pub const SUCCESS: &'static str = "OK";

    pub fn from_remote(status: &str) -> Self {
        if status == Self::SUCCESS {
            DeliveryStatus::Ok
        } else {
            DeliveryStatus::Failed(status.to_string())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryStatus::Ok)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Ok => f.write_str(Self::SUCCESS),
            DeliveryStatus::Failed(status) => f.write_str(status),
        }
    }
}

/// One recorded attempt to send a webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub id: DeliveryId,
    pub guid: DeliveryGuid,
    pub delivered_at: DateTime<Utc>,
    pub status: DeliveryStatus,
    /// Event name (`push`, `issues`, ...), informational only
    pub event: Option<String>,
    /// Whether the log marks this attempt as a redelivery
    pub redelivery: bool,
}

impl Delivery {
    pub fn succeeded(&self) -> bool {
        self.status.is_success()
    }
}

/// All deliveries sharing one guid, in fetch order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryGroup<'a> {
    guid: &'a DeliveryGuid,
    deliveries: Vec<&'a Delivery>,
}

impl<'a> DeliveryGroup<'a> {
    pub(crate) fn new(first: &'a Delivery) -> Self {
        Self {
            guid: &first.guid,
            deliveries: vec![first],
        }
    }

    pub(crate) fn push(&mut self, delivery: &'a Delivery) {
        debug_assert_eq!(&delivery.guid, self.guid);
        self.deliveries.push(delivery);
    }

    pub fn guid(&self) -> &DeliveryGuid {
        self.guid
    }

    /// The first delivery of the group in fetch order.
    pub fn first(&self) -> &'a Delivery {
        self.deliveries[0]
    }

    pub fn any_succeeded(&self) -> bool {
        self.deliveries.iter().any(|d| d.succeeded())
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Always false for groups built by `group_by_guid`; present alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Delivery> + '_ {
        self.deliveries.iter().copied()
    }
}
