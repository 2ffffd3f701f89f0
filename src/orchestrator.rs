use crate::dedupe::select_for_redelivery;
use crate::error::Result;
use crate::fetch::fetch_since;
use crate::log::DeliveryLog;
use crate::redeliver::redeliver_all;
use crate::window::LookbackBoundary;
use std::fmt;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Fetch and select, but send no redelivery requests
    pub dry_run: bool,
}

/// Outcome of one successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Redelivery requests sent
    pub redelivered: usize,
    /// Deliveries chosen for redelivery (equals `redelivered` unless dry run)
    pub selected: usize,
    /// Deliveries fetched inside the window
    pub total: usize,
    pub since: LookbackBoundary,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Redelivered {} failed webhook deliveries out of {} total deliveries since {}.",
            self.redelivered, self.total, self.since
        )
    }
}

/// Fetch, dedupe and redeliver everything that failed since `boundary`.
///
/// Errors are logged here and returned unchanged.
pub async fn run<L: DeliveryLog>(
    log: &L,
    boundary: LookbackBoundary,
    options: RunOptions,
) -> Result<RunSummary> {
    match run_stages(log, boundary, options).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            match e.remote_message() {
                Some(message) => tracing::error!(
                    status = ?e.status(),
                    remote_message = message,
                    "Failed to check and redeliver webhooks: {}",
                    e
                ),
                None => tracing::error!("Failed to check and redeliver webhooks: {}", e),
            }
            Err(e)
        }
    }
}

/// [`run`] with the boundary taken from the current time.
pub async fn run_now<L: DeliveryLog>(log: &L, options: RunOptions) -> Result<RunSummary> {
    run(log, LookbackBoundary::now(), options).await
}

async fn run_stages<L: DeliveryLog>(
    log: &L,
    boundary: LookbackBoundary,
    options: RunOptions,
) -> Result<RunSummary> {
    let deliveries = fetch_since(log, boundary).await?;
    let selected = select_for_redelivery(&deliveries);

    tracing::info!(
        "[RUN] {} of {} deliveries need redelivery",
        selected.len(),
        deliveries.len()
    );

    let redelivered = if options.dry_run {
        for id in &selected {
            tracing::info!("[RUN] dry run, would redeliver delivery {}", id);
        }
        0
    } else {
        redeliver_all(log, &selected).await?
    };

    Ok(RunSummary {
        redelivered,
        selected: selected.len(),
        total: deliveries.len(),
        since: boundary,
    })
}
