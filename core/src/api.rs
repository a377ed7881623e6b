//! Typed client for the CipherCert backend.
//!
//! | call | endpoint |
//! |---|---|
//! | [`CipherApi::scan`] / [`ScanEndpoint::submit`] | `POST /api/scan` |
//! | [`CipherApi::history`] | `GET /api/history` |
//! | [`CipherApi::clear_history`] | `DELETE /api/history` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use ciphercert_common::config::Config;
use ciphercert_common::history::record::ScanRecord;
use ciphercert_common::scan::run::Outcome;
use ciphercert_common::scan::target::Target;

use crate::error::{ApiError, Result};
use crate::http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::runner::ScanEndpoint;

pub const SCAN_PATH: &str = "/api/scan";
pub const HISTORY_PATH: &str = "/api/history";

#[derive(Serialize)]
struct ScanRequest<'a> {
    domain: &'a str,
}

#[derive(Clone)]
pub struct CipherApi<C: HttpClient> {
    client: C,
    endpoint: String,
    timeout: Option<Duration>,
}

impl CipherApi<ReqwestHttpClient> {
    /// Builds a reqwest-backed client from the runtime configuration.
    pub fn connect(cfg: &Config) -> Self {
        Self::from_config(ReqwestHttpClient::new(), cfg)
    }
}

impl<C: HttpClient> CipherApi<C> {
    pub fn new(client: C, endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(client: C, cfg: &Config) -> Self {
        Self::new(client, cfg.api_url.clone(), cfg.request_timeout())
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.client.execute(&request, self.timeout).await
    }

    async fn post_scan(&self, target: &Target) -> Result<HttpResponse> {
        let body = serde_json::to_string(&ScanRequest {
            domain: target.as_str(),
        })?;
        let request = HttpRequest::new(Method::POST, &self.endpoint, SCAN_PATH).with_json(body);
        self.send(request).await
    }

    /// Scans one target and returns the backend's verdict.
    pub async fn scan(&self, target: &Target) -> Result<ScanRecord> {
        let response = expect_success(self.post_scan(target).await?)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// All stored scans, in the order the backend returns them (newest first).
    pub async fn history(&self) -> Result<Vec<ScanRecord>> {
        let request = HttpRequest::new(Method::GET, &self.endpoint, HISTORY_PATH);
        let response = expect_success(self.send(request).await?)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn clear_history(&self) -> Result<()> {
        let request = HttpRequest::new(Method::DELETE, &self.endpoint, HISTORY_PATH);
        expect_success(self.send(request).await?)?;
        Ok(())
    }
}

fn expect_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status,
            body: response.body,
        })
    }
}

#[async_trait]
impl<C: HttpClient> ScanEndpoint for CipherApi<C> {
    /// Any 2xx counts as accepted. The response body is not read.
    async fn submit(&self, target: &Target) -> Outcome {
        match self.post_scan(target).await {
            Ok(response) if response.is_success() => Outcome::Succeeded,
            Ok(response) => Outcome::failed(format!("HTTP {}", response.status)),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }
}
