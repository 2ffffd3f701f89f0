use crate::error::Result;
use crate::log::{DeliveryLog, DeliveryPages};
use crate::types::Delivery;
use crate::window::LookbackBoundary;

/// Collect every delivery newer than `boundary`, newest first.
///
/// The log is returned newest-first, so paging stops at the first page whose
/// oldest delivery is at or before the boundary. That page is scanned in order
/// and cut at the first delivery outside the window.
pub async fn fetch_since<L: DeliveryLog>(
    log: &L,
    boundary: LookbackBoundary,
) -> Result<Vec<Delivery>> {
    let mut pages = log.pages();
    let mut deliveries = Vec::new();
    let mut page_count = 0usize;

    while let Some(page) = pages.next_page().await? {
        page_count += 1;

        let Some(oldest) = page.last() else {
            tracing::debug!("[FETCH] page {} is empty, delivery log exhausted", page_count);
            break;
        };

        tracing::debug!(
            page = page_count,
            size = page.len(),
            oldest = %oldest.delivered_at,
            "[FETCH] received page"
        );

        if boundary.contains(oldest.delivered_at) {
            deliveries.extend(page);
            continue;
        }

        deliveries.extend(
            page.into_iter()
                .take_while(|delivery| boundary.contains(delivery.delivered_at)),
        );
        break;
    }

    tracing::info!(
        "[FETCH] {} deliveries since {} across {} pages",
        deliveries.len(),
        boundary,
        page_count
    );

    Ok(deliveries)
}
