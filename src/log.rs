//! The remote delivery log this crate works against.
//!
//! Implementations live outside this crate (see `hookreplay-github`); the
//! fetch, redeliver and orchestration stages only see these traits.

use crate::error::Result;
use crate::types::{Delivery, DeliveryId};
use std::future::Future;

/// Number of deliveries requested per page.
pub const PAGE_SIZE: usize = 100;

/// Lazy producer of delivery pages, newest first.
///
/// Each call issues at most one request. Callers stop calling once they have
/// what they need, so pages past that point are never fetched.
pub trait DeliveryPages: Send {
    /// Fetch the next page. `Ok(None)` once the log is exhausted.
    fn next_page(&mut self) -> impl Future<Output = Result<Option<Vec<Delivery>>>> + Send;
}

/// A webhook delivery log that can list deliveries and request redeliveries.
pub trait DeliveryLog: Sync {
    type Pages<'a>: DeliveryPages
    where
        Self: 'a;

    /// Start a fresh pass over the log from the newest delivery.
    fn pages(&self) -> Self::Pages<'_>;

    /// Ask the remote to attempt delivery `id` again.
    fn redeliver(&self, id: DeliveryId) -> impl Future<Output = Result<()>> + Send;
}
