//! # hookreplay
//!
//! Finds webhook deliveries that never succeeded within the last few hours
//! and asks the delivery log to attempt them again.
//!
//! A run has four linear stages:
//!
//! 1. [`fetch::fetch_since`] pages through the log (newest first) until it
//!    crosses the [`LookbackBoundary`].
//! 2. [`dedupe::select_for_redelivery`] groups deliveries by guid and picks one
//!    delivery from every guid with no successful attempt.
//! 3. [`redeliver::redeliver_all`] requests a redelivery for each pick.
//! 4. [`orchestrator::run`] wires the stages and returns a [`RunSummary`].
//!
//! The remote log is abstracted behind [`DeliveryLog`]; the GitHub App
//! implementation lives in the `hookreplay-github` crate.
//!
//! ```rust,no_run
//! use hookreplay::{run_now, DeliveryLog, RunOptions};
//!
//! # async fn example<L: DeliveryLog>(log: L) -> hookreplay::Result<()> {
//! let summary = run_now(&log, RunOptions::default()).await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

pub mod dedupe;
pub mod error;
pub mod fetch;
pub mod log;
pub mod orchestrator;
pub mod redeliver;
pub mod types;
pub mod window;

#[cfg(test)]
mod testing;

pub use error::{HookreplayError, Result};
pub use log::{DeliveryLog, DeliveryPages, PAGE_SIZE};
pub use orchestrator::{run, run_now, RunOptions, RunSummary};
pub use types::*;
pub use window::LookbackBoundary;
