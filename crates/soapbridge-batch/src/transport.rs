//! Envelope transport implementations.

use async_trait::async_trait;
use soapbridge_core::{error::TransportError, EnvelopeTransport};

/// Local exchange: the request document doubles as the response.
///
/// This mirrors the original service flow, which built and parsed the same
/// local document without ever dispatching it. Deployments that talk to a
/// real endpoint swap in [`HttpTransport`] (behind the `remote` feature).
///
/// [`HttpTransport`]: crate::transport::HttpTransport
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackTransport;

#[async_trait]
impl EnvelopeTransport for LoopbackTransport {
    async fn exchange(&self, request: &str) -> Result<String, TransportError> {
        Ok(request.to_owned())
    }
}

#[cfg(feature = "remote")]
pub use remote::HttpTransport;

#[cfg(feature = "remote")]
mod remote {
    use super::*;
    use std::time::Duration;

    /// HTTP exchange with a real legacy endpoint: POST the request envelope,
    /// return the response body markup.
    pub struct HttpTransport {
        client: reqwest::Client,
        endpoint: String,
    }

    impl HttpTransport {
        pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .map_err(|e| TransportError::RequestFailed {
                    reason: e.to_string(),
                })?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
            })
        }
    }

    #[async_trait]
    impl EnvelopeTransport for HttpTransport {
        async fn exchange(&self, request: &str) -> Result<String, TransportError> {
            let response = self
                .client
                .post(&self.endpoint)
                .header("Content-Type", "text/xml; charset=utf-8")
                .body(request.to_owned())
                .send()
                .await
                .map_err(|e| TransportError::RequestFailed {
                    reason: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::BadStatus {
                    status: status.as_u16(),
                });
            }

            response
                .text()
                .await
                .map_err(|e| TransportError::RequestFailed {
                    reason: e.to_string(),
                })
        }
    }
}
