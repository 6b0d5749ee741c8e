//! Traits describing provider capabilities and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{Location, Skip};

/// Reason phrase reported for status codes that have no canonical one.
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown Status";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors that can occur while talking to the skip service or the checkout.
pub enum PortError {
    /// The server answered with a non-success status.
    #[error("API Error: {status} - {status_text}")]
    Server {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase for the status, or [`UNKNOWN_STATUS_TEXT`].
        status_text: String,
    },
    /// No usable response came back (unreachable, timeout, body cut off).
    #[error("Network Error: Unable to reach the server")]
    Network {
        /// Underlying transport detail, kept for logging.
        detail: String,
    },
    /// The request could not be constructed or sent.
    #[error("Request Error: {0}")]
    Request(String),
    /// The server answered successfully but the body is not a skip list.
    #[error("Decode Error: {0}")]
    Decode(String),
    /// The checkout collaborator rejected the hand-off.
    #[error("Checkout Error: {0}")]
    Checkout(String),
}

impl From<ReqwestError> for PortError {
    fn from(err: ReqwestError) -> Self {
        if err.is_builder() {
            return PortError::Request(err.to_string());
        }
        if let Some(status) = err.status() {
            return PortError::Server {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or(UNKNOWN_STATUS_TEXT)
                    .to_owned(),
            };
        }
        // Transport failures while reading a compressed body also report as decode errors.
        if err.is_timeout() || err.is_connect() || err.is_body() || err.is_request() {
            return PortError::Network {
                detail: err.to_string(),
            };
        }
        if err.is_decode() {
            return PortError::Decode(err.to_string());
        }
        PortError::Network {
            detail: err.to_string(),
        }
    }
}

#[async_trait]
/// Trait for backends that list the skips on offer at a location.
pub trait SkipPort: Send + Sync {
    /// Human-friendly name of the backend, used in logs.
    fn name(&self) -> &str;

    /// Fetch the skips offered at `location`, in the order the backend returns them.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the response is unusable.
    async fn skips_by_location(&self, location: &Location) -> Result<Vec<Skip>, PortError>;
}

#[async_trait]
/// Trait for the checkout subsystem that takes over once a skip is confirmed.
pub trait CheckoutPort: Send + Sync {
    /// Hand the confirmed skip over to checkout.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the checkout refuses the hand-off.
    async fn checkout(&self, skip: &Skip) -> Result<(), PortError>;
}

/// Placeholder checkout that accepts every skip and only records the hand-off.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingCheckout;

#[async_trait]
impl CheckoutPort for PendingCheckout {
    async fn checkout(&self, skip: &Skip) -> Result<(), PortError> {
        tracing::info!(
            skip_id = %skip.id,
            size = skip.size,
            "checkout is not wired up yet, accepting skip"
        );
        Ok(())
    }
}
