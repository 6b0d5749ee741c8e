//! High-level service facade combining the skip backend and checkout.

use std::sync::Arc;

use crate::model::{Location, Skip, check_skips};
use crate::ports::{CheckoutPort, PortError, SkipPort};

/// Public entry point for listing skips and handing a choice to checkout.
pub struct SkipService {
    skip_port: Arc<dyn SkipPort>,
    checkout_port: Arc<dyn CheckoutPort>,
}

impl SkipService {
    /// Create a new service bound to the given ports.
    #[must_use]
    pub fn new(skip_port: Arc<dyn SkipPort>, checkout_port: Arc<dyn CheckoutPort>) -> Self {
        Self {
            skip_port,
            checkout_port,
        }
    }

    /// List the skips offered at a location, exactly as the backend returned them.
    ///
    /// Records that break model invariants are logged but kept.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the backend call fails.
    pub async fn skips_by_location(&self, location: &Location) -> Result<Vec<Skip>, PortError> {
        tracing::debug!(backend = self.skip_port.name(), %location, "loading skips");
        let skips = self.skip_port.skips_by_location(location).await?;

        for violation in check_skips(&skips) {
            tracing::warn!(%violation, "backend returned an inconsistent skip");
        }
        tracing::info!(count = skips.len(), %location, "loaded skips");

        Ok(skips)
    }

    /// List the skips for the default location (`NR32`, `Lowestoft`).
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the backend call fails.
    pub async fn default_skips(&self) -> Result<Vec<Skip>, PortError> {
        self.skips_by_location(&Location::default()).await
    }

    /// Hand a confirmed skip to the checkout collaborator.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if checkout rejects the skip.
    pub async fn checkout(&self, skip: &Skip) -> Result<(), PortError> {
        self.checkout_port.checkout(skip).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::model::SkipId;
    use crate::ports::PendingCheckout;

    struct FakeSkipPort {
        response: Result<Vec<Skip>, PortError>,
        queried: Mutex<Vec<Location>>,
    }

    impl FakeSkipPort {
        fn new(response: Result<Vec<Skip>, PortError>) -> Self {
            Self {
                response,
                queried: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SkipPort for FakeSkipPort {
        fn name(&self) -> &str {
            "fake"
        }

        async fn skips_by_location(&self, location: &Location) -> Result<Vec<Skip>, PortError> {
            self.queried
                .lock()
                .expect("lock should not be poisoned")
                .push(location.clone());
            self.response.clone()
        }
    }

    struct RejectingCheckout;

    #[async_trait]
    impl CheckoutPort for RejectingCheckout {
        async fn checkout(&self, _skip: &Skip) -> Result<(), PortError> {
            Err(PortError::Checkout("closed".to_owned()))
        }
    }

    fn skip(id: i64, size: u32) -> Skip {
        Skip {
            id: SkipId::Number(id),
            size,
            area: "Lowestoft".to_owned(),
            postcode: "NR32".to_owned(),
            price_before_vat: 300.0,
            vat: 20.0,
            hire_period_days: 14,
            allowed_on_road: false,
            allows_heavy_waste: false,
        }
    }

    #[tokio::test]
    async fn returns_backend_order_untouched() {
        let port = Arc::new(FakeSkipPort::new(Ok(vec![
            skip(3, 8),
            skip(1, 4),
            skip(2, 0),
        ])));
        let service = SkipService::new(port.clone(), Arc::new(PendingCheckout));

        let skips = service
            .skips_by_location(&Location::new("IP1", "Ipswich"))
            .await
            .expect("fake backend succeeds");

        let ids: Vec<SkipId> = skips.into_iter().map(|skip| skip.id).collect();
        assert_eq!(
            ids,
            vec![SkipId::Number(3), SkipId::Number(1), SkipId::Number(2)],
            "order and invalid records should be kept"
        );
    }

    #[tokio::test]
    async fn default_skips_query_the_default_location() {
        let port = Arc::new(FakeSkipPort::new(Ok(Vec::new())));
        let service = SkipService::new(port.clone(), Arc::new(PendingCheckout));

        let skips = service.default_skips().await.expect("fake backend succeeds");

        assert!(skips.is_empty(), "no skips were offered");
        let queried = port.queried.lock().expect("lock should not be poisoned");
        assert_eq!(*queried, vec![Location::default()], "single default query");
    }

    #[tokio::test]
    async fn backend_errors_are_passed_through() {
        let error = PortError::Server {
            status: 500,
            status_text: "Internal Server Error".to_owned(),
        };
        let port = Arc::new(FakeSkipPort::new(Err(error.clone())));
        let service = SkipService::new(port, Arc::new(PendingCheckout));

        let result = service.default_skips().await;

        assert_eq!(result, Err(error), "error should not be rewritten");
    }

    #[tokio::test]
    async fn checkout_delegates_to_port() {
        let port = Arc::new(FakeSkipPort::new(Ok(Vec::new())));
        let accepting = SkipService::new(port.clone(), Arc::new(PendingCheckout));
        let rejecting = SkipService::new(port, Arc::new(RejectingCheckout));

        assert_eq!(accepting.checkout(&skip(1, 4)).await, Ok(()), "accepted");
        assert_eq!(
            rejecting.checkout(&skip(1, 4)).await,
            Err(PortError::Checkout("closed".to_owned())),
            "rejected"
        );
    }

    #[test]
    fn error_messages_match_user_facing_text() {
        let server = PortError::Server {
            status: 404,
            status_text: "Not Found".to_owned(),
        };
        let network = PortError::Network {
            detail: "connection refused".to_owned(),
        };
        let request = PortError::Request("builder error".to_owned());

        assert_eq!(server.to_string(), "API Error: 404 - Not Found", "server");
        assert_eq!(
            network.to_string(),
            "Network Error: Unable to reach the server",
            "network"
        );
        assert_eq!(request.to_string(), "Request Error: builder error", "request");
    }
}
