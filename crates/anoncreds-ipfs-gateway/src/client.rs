use reqwest::{
    Client, ClientBuilder, Response,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;

use crate::{ConfigError, ContentStore, GatewayConfig, GatewayError, RetryPolicy, StoreFuture};

const USER_AGENT: &str = concat!("anoncreds-ipfs-gateway/", env!("CARGO_PKG_VERSION"));

/// Client for the IPFS HTTP RPC API (`/api/v0/cat`, `/api/v0/add`).
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

#[derive(Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self::with_client(
            client,
            config.parsed_url()?.as_str(),
            config.retry_policy(),
        ))
    }

    pub fn with_client(client: Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches the bytes stored under `cid`.
    pub async fn cat(&self, cid: &str, deadline: Option<Instant>) -> Result<Vec<u8>, GatewayError> {
        debug!(cid, "fetching content");
        self.retry.run(deadline, || self.cat_once(cid)).await
    }

    /// Uploads `bytes`, returning the content id minted by the gateway.
    ///
    /// Identical bytes always map to the same id, so retried uploads are safe.
    pub async fn add(&self, bytes: Vec<u8>, deadline: Option<Instant>) -> Result<String, GatewayError> {
        debug!(len = bytes.len(), "uploading content");
        let cid = self
            .retry
            .run(deadline, || self.add_once(bytes.clone()))
            .await?;
        debug!(cid = %cid, "uploaded content");
        Ok(cid)
    }

    async fn cat_once(&self, cid: &str) -> Result<Vec<u8>, GatewayError> {
        let res = self
            .client
            .post(format!("{}/api/v0/cat", self.base_url))
            .query(&[("arg", cid)])
            .send()
            .await
            .map_err(GatewayError::network)?;

        let res = check_status(res).await?;
        let bytes = res.bytes().await.map_err(GatewayError::network)?;
        Ok(bytes.to_vec())
    }

    async fn add_once(&self, bytes: Vec<u8>) -> Result<String, GatewayError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name("object.json"));

        let res = self
            .client
            .post(format!("{}/api/v0/add", self.base_url))
            .query(&[("pin", "true")])
            .multipart(form)
            .send()
            .await
            .map_err(GatewayError::network)?;

        let res = check_status(res).await?;
        let body = res.bytes().await.map_err(GatewayError::network)?;

        let added: AddResponse = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if added.hash.is_empty() {
            return Err(GatewayError::InvalidResponse("empty hash".to_string()));
        }

        Ok(added.hash)
    }
}

async fn check_status(res: Response) -> Result<Response, GatewayError> {
    let status = res.status();

    if status.is_success() {
        return Ok(res);
    }

    let message = res.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), message = %message, "gateway returned an error");

    if status.is_server_error() {
        Err(GatewayError::Server {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(GatewayError::Client {
            status: status.as_u16(),
            message,
        })
    }
}

impl ContentStore for GatewayClient {
    fn get<'a>(&'a self, cid: &'a str, deadline: Option<Instant>) -> StoreFuture<'a, Vec<u8>> {
        Box::pin(self.cat(cid, deadline))
    }

    fn put(&self, bytes: Vec<u8>, deadline: Option<Instant>) -> StoreFuture<'_, String> {
        Box::pin(self.add(bytes, deadline))
    }
}
