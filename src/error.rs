use crate::types::DeliveryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookreplayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error: {detail}")]
    Api {
        /// HTTP status of the failed response, `None` for transport failures
        status: Option<u16>,
        /// `message` field of the response body, when the remote sent one
        message: Option<String>,
        detail: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error(
        "Redelivery of delivery {id} failed after {completed} successful redeliveries \
         ({remaining} not attempted): {source}"
    )]
    RedeliveryAborted {
        id: DeliveryId,
        completed: usize,
        remaining: usize,
        #[source]
        source: Box<HookreplayError>,
    },
}

pub type Result<T> = std::result::Result<T, HookreplayError>;

impl HookreplayError {
    /// The remote API's own error message, if the failure carried one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            HookreplayError::Api { message, .. } => message.as_deref(),
            HookreplayError::RedeliveryAborted { source, .. } => source.remote_message(),
            _ => None,
        }
    }

    /// HTTP status of the underlying API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HookreplayError::Api { status, .. } => *status,
            HookreplayError::RedeliveryAborted { source, .. } => source.status(),
            _ => None,
        }
    }
}
