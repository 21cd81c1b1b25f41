use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::errors::CoreError;
use crate::models::auth::{Credentials, RegisterRequest, TokenResponse};
use crate::models::broker::{BrokerAccount, ConnectParams, ConnectionProbe, LiveQuote, SyncReceipt};
use crate::transport::traits::{AuthApi, BrokerApi};
use crate::transport::wire::{BrokerBalance, BrokerPosition, BrokerSummary, BrokerTrade};

/// Error body shape used by the backend for all non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Decode a response body, mapping remote rejections to `CoreError::Broker`
/// (with the remote `detail` message unmodified) and undecodable bodies to
/// `CoreError::MalformedResponse`.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, CoreError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(CoreError::Broker { message });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| CoreError::MalformedResponse(e.to_string()))
}

async fn expect_success(resp: Response) -> Result<(), CoreError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(CoreError::Broker { message });
    }
    Ok(())
}

/// Provides the current bearer token at request time. Re-reading per
/// request means a login or logout takes effect immediately without
/// rebuilding the HTTP client.
pub type TokenSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// REST implementation of [`BrokerApi`] against the `/broker` endpoints.
///
/// A bearer token (obtained through [`RestAuthApi`]) is attached to every
/// request via the [`TokenSource`].
pub struct RestBrokerApi {
    client: Client,
    base_url: String,
    token_source: Option<TokenSource>,
}

impl RestBrokerApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source: None,
        }
    }

    /// Attach a token source consulted on every request.
    #[must_use]
    pub fn with_token_source(mut self, source: TokenSource) -> Self {
        self.token_source = Some(source);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/broker{path}", self.base_url)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token_source.as_ref().and_then(|source| source()) {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl BrokerApi for RestBrokerApi {
    async fn list_accounts(&self) -> Result<Vec<BrokerAccount>, CoreError> {
        let resp = self
            .with_auth(self.client.get(self.url("/accounts")))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn connect(&self, params: &ConnectParams) -> Result<BrokerAccount, CoreError> {
        let resp = self
            .with_auth(self.client.post(self.url("/connect")).json(params))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn disconnect(&self, account_id: i64) -> Result<(), CoreError> {
        let resp = self
            .with_auth(
                self.client
                    .delete(self.url(&format!("/disconnect/{account_id}"))),
            )
            .send()
            .await?;
        expect_success(resp).await
    }

    async fn connection_status(&self, account_id: i64) -> Result<ConnectionProbe, CoreError> {
        let resp = self
            .with_auth(self.client.get(self.url(&format!("/status/{account_id}"))))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn sync(&self, account_id: i64) -> Result<SyncReceipt, CoreError> {
        let resp = self
            .with_auth(
                self.client
                    .post(self.url(&format!("/sync/{account_id}")))
                    .json(&json!({})),
            )
            .send()
            .await?;
        read_json(resp).await
    }

    async fn positions(&self, account_id: i64) -> Result<Vec<BrokerPosition>, CoreError> {
        let resp = self
            .with_auth(
                self.client
                    .get(self.url(&format!("/positions/{account_id}"))),
            )
            .send()
            .await?;
        read_json(resp).await
    }

    async fn trades(&self, account_id: i64) -> Result<Vec<BrokerTrade>, CoreError> {
        let resp = self
            .with_auth(self.client.get(self.url(&format!("/trades/{account_id}"))))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn portfolio_summary(&self, account_id: i64) -> Result<BrokerSummary, CoreError> {
        let resp = self
            .with_auth(self.client.get(self.url(&format!("/summary/{account_id}"))))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn balance(&self, account_id: i64) -> Result<BrokerBalance, CoreError> {
        let resp = self
            .with_auth(self.client.get(self.url(&format!("/balance/{account_id}"))))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn quote(&self, symbol: &str) -> Result<LiveQuote, CoreError> {
        let resp = self
            .with_auth(self.client.get(self.url(&format!("/quote/{symbol}"))))
            .send()
            .await?;
        read_json(resp).await
    }
}

/// REST implementation of [`AuthApi`] against the `/auth` endpoints.
/// No bearer token is attached — these are the endpoints that issue it.
pub struct RestAuthApi {
    client: Client,
    base_url: String,
}

impl RestAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, CoreError> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&body)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<TokenResponse, CoreError> {
        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        };
        let resp = self
            .client
            .post(format!("{}/auth/register", self.base_url))
            .json(&body)
            .send()
            .await?;
        read_json(resp).await
    }
}
