//! GitHub App implementation of [`hookreplay::DeliveryLog`], backed by the
//! `/app/hook/deliveries` REST endpoints.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use auth::AppJwt;
pub use client::{GithubAppClient, GithubDeliveryPages};
pub use config::AppConfig;
pub use error::{GithubError, Result};
