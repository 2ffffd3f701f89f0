use crate::error::{HookreplayError, Result};
use crate::log::{DeliveryLog, DeliveryPages};
use crate::types::{Delivery, DeliveryGuid, DeliveryId, DeliveryStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Delivery `minutes_ago` minutes before [`t0`].
pub fn delivery(id: u64, guid: &str, minutes_ago: i64, status: &str) -> Delivery {
    Delivery {
        id: DeliveryId(id),
        guid: DeliveryGuid(guid.to_string()),
        delivered_at: t0() - Duration::minutes(minutes_ago),
        status: DeliveryStatus::from_remote(status),
        event: Some("issues".to_string()),
        redelivery: false,
    }
}

/// In-memory delivery log with request accounting and failure injection.
#[derive(Default)]
pub struct MemoryLog {
    pages: Vec<Vec<Delivery>>,
    page_requests: AtomicUsize,
    redelivered: Mutex<Vec<DeliveryId>>,
    fail_redelivery_of: Option<DeliveryId>,
    fail_listing: bool,
}

impl MemoryLog {
    pub fn with_pages(pages: Vec<Vec<Delivery>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn failing_redelivery_of(mut self, id: u64) -> Self {
        self.fail_redelivery_of = Some(DeliveryId(id));
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn page_requests(&self) -> usize {
        self.page_requests.load(Ordering::SeqCst)
    }

    pub fn redelivered(&self) -> Vec<DeliveryId> {
        self.redelivered.lock().unwrap().clone()
    }
}

pub struct MemoryPages<'a> {
    log: &'a MemoryLog,
    next: usize,
}

impl DeliveryPages for MemoryPages<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<Delivery>>> {
        self.log.page_requests.fetch_add(1, Ordering::SeqCst);
        if self.log.fail_listing {
            return Err(HookreplayError::Api {
                status: Some(401),
                message: Some("A JSON web token could not be decoded".to_string()),
                detail: "GET /app/hook/deliveries returned 401".to_string(),
            });
        }
        let page = self.log.pages.get(self.next).cloned();
        self.next += 1;
        Ok(page)
    }
}

impl DeliveryLog for MemoryLog {
    type Pages<'a> = MemoryPages<'a>;

    fn pages(&self) -> Self::Pages<'_> {
        MemoryPages { log: self, next: 0 }
    }

    async fn redeliver(&self, id: DeliveryId) -> Result<()> {
        if self.fail_redelivery_of == Some(id) {
            return Err(HookreplayError::Api {
                status: Some(422),
                message: Some("Validation Failed".to_string()),
                detail: format!("POST /app/hook/deliveries/{}/attempts returned 422", id),
            });
        }
        self.redelivered.lock().unwrap().push(id);
        Ok(())
    }
}
