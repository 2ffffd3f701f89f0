use crate::types::{Delivery, DeliveryGroup, DeliveryGuid, DeliveryId};
use indexmap::IndexMap;

/// Group deliveries by guid, groups and members both in fetch order.
pub fn group_by_guid(deliveries: &[Delivery]) -> Vec<DeliveryGroup<'_>> {
    let mut groups: IndexMap<&DeliveryGuid, DeliveryGroup<'_>> = IndexMap::new();

    for delivery in deliveries {
        groups
            .entry(&delivery.guid)
            .and_modify(|group| group.push(delivery))
            .or_insert_with(|| DeliveryGroup::new(delivery));
    }

    groups.into_values().collect()
}

/// Pick one delivery to redeliver for every guid that never succeeded.
///
/// The first delivery seen for such a guid is chosen. Guids with at least one
/// successful attempt in the window are skipped entirely, as are repeated
/// failures of a guid already selected.
pub fn select_for_redelivery(deliveries: &[Delivery]) -> Vec<DeliveryId> {
    group_by_guid(deliveries)
        .into_iter()
        .filter(|group| !group.any_succeeded())
        .map(|group| {
            let first = group.first();
            tracing::debug!(
                guid = %group.guid(),
                attempts = group.len(),
                event = first.event.as_deref().unwrap_or("unknown"),
                redelivery = first.redelivery,
                "[DEDUPE] no successful attempt, selecting delivery {}",
                first.id
            );
            first.id
        })
        .collect()
}
