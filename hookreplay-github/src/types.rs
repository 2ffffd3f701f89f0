use chrono::{DateTime, Utc};
use hookreplay::{Delivery, DeliveryGuid, DeliveryId, DeliveryStatus};
use serde::{Deserialize, Serialize};

/// One entry of `GET /app/hook/deliveries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookDelivery {
    pub id: u64,
    pub guid: String,
    pub delivered_at: DateTime<Utc>,
    #[serde(default)]
    pub redelivery: bool,
    pub status: String,
    /// HTTP status the receiver answered with, 0 when it never answered
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub event: Option<String>,
}

impl From<HookDelivery> for Delivery {
    fn from(d: HookDelivery) -> Self {
        Delivery {
            id: DeliveryId(d.id),
            guid: DeliveryGuid(d.guid),
            delivered_at: d.delivered_at,
            status: DeliveryStatus::from_remote(&d.status),
            event: d.event,
            redelivery: d.redelivery,
        }
    }
}

/// Body GitHub sends with 4xx/5xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub documentation_url: Option<String>,
}
