use crate::error::{HookreplayError, Result};
use crate::log::DeliveryLog;
use crate::types::DeliveryId;

/// Request one new attempt of delivery `id`.
pub async fn redeliver_one<L: DeliveryLog>(log: &L, id: DeliveryId) -> Result<()> {
    log.redeliver(id).await?;
    tracing::info!("[REDELIVER] requested redelivery of delivery {}", id);
    Ok(())
}

/// Redeliver `ids` one at a time, in order.
///
/// The first failure stops the loop. The returned error records which delivery
/// failed and how many were redelivered before it.
pub async fn redeliver_all<L: DeliveryLog>(log: &L, ids: &[DeliveryId]) -> Result<usize> {
    for (completed, &id) in ids.iter().enumerate() {
        if let Err(e) = redeliver_one(log, id).await {
            let remaining = ids.len() - completed - 1;
            tracing::warn!(
                "[REDELIVER] delivery {} failed after {} redeliveries, skipping {} remaining: {}",
                id,
                completed,
                remaining,
                e
            );
            return Err(HookreplayError::RedeliveryAborted {
                id,
                completed,
                remaining,
                source: Box::new(e),
            });
        }
    }

    Ok(ids.len())
}
