use super::types::{CallOptions, ConversionResult, EntityKind, MusicService, NormalizedUrl, SyncEntity};
use crate::config::SyncFmConfig;
use crate::error::ConversionError;
use crate::runtime::observability::{Observer, ObserverEvent};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const HANDLE_ENDPOINT: &str = "handle";
const CREATE_URL_ENDPOINT: &str = "createUrl";

pub fn build_api_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("syncfm-discord/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Deserialize)]
struct CreateUrlResponse {
    #[serde(default)]
    url: Option<String>,
}

/// Client for the SyncFM conversion API.
///
/// Every method makes exactly one request; failures are reported to the
/// observer and never retried.
pub struct SyncFmClient {
    http: Client,
    api_base: String,
    share_base: String,
    provider: String,
    observer: Arc<dyn Observer>,
}

impl SyncFmClient {
    pub fn new(config: &SyncFmConfig, observer: Arc<dyn Observer>) -> Self {
        Self::with_http(build_api_client(config.timeout_secs), config, observer)
    }

    pub fn with_http(http: Client, config: &SyncFmConfig, observer: Arc<dyn Observer>) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            share_base: config.share_base.trim_end_matches('/').to_string(),
            provider: config.provider.clone(),
            observer,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) fn observer(&self) -> &Arc<dyn Observer> {
        &self.observer
    }

    /// Resolve `url` into a canonical entity and share link.
    ///
    /// Returns `None` on any failure; the reason goes to the log and observer.
    pub async fn resolve(&self, url: &NormalizedUrl, options: &CallOptions) -> Option<ConversionResult> {
        match self.try_resolve(url, options).await {
            Ok(result) => Some(result),
            Err(error) => {
                tracing::warn!(url = %url, error = %error, "syncfm lookup failed");
                self.observer.record_event(&ObserverEvent::Error {
                    component: "resolver".into(),
                    message: error.to_string(),
                });
                None
            }
        }
    }

    pub async fn try_resolve(
        &self,
        url: &NormalizedUrl,
        options: &CallOptions,
    ) -> Result<ConversionResult, ConversionError> {
        let endpoint = format!("{}/api/handle/{}", self.api_base, self.provider);
        let request = self.http.get(&endpoint).query(&[("url", url.as_str())]);
        let response = send(request, options, HANDLE_ENDPOINT).await?;

        let entity: SyncEntity =
            response
                .json()
                .await
                .map_err(|e| ConversionError::InvalidBody {
                    endpoint: HANDLE_ENDPOINT,
                    message: e.to_string(),
                })?;

        if entity.sync_id.is_empty() {
            return Err(ConversionError::MissingSyncId);
        }

        let link = self.share_link(&entity);
        let kind = entity.infer_kind();
        tracing::debug!(sync_id = %entity.sync_id, kind = %kind, "syncfm lookup resolved");
        Ok(ConversionResult { link, entity, kind })
    }

    /// Short `/s/{shortcode}` link when available, otherwise the lookup
    /// endpoint re-queried by sync id.
    pub fn share_link(&self, entity: &SyncEntity) -> String {
        if let Some(shortcode) = entity.shortcode() {
            return format!("{}/s/{shortcode}", self.share_base);
        }

        let endpoint = format!("{}/api/handle/{}", self.api_base, self.provider);
        Url::parse_with_params(
            &endpoint,
            [
                ("syncId", entity.sync_id.as_str()),
                ("service", self.provider.as_str()),
            ],
        )
        .map_or_else(
            |_| format!("{endpoint}?syncId={}&service={}", entity.sync_id, self.provider),
            String::from,
        )
    }

    /// Ask the API for `service`'s native link to `entity`.
    pub async fn create_service_url(
        &self,
        service: MusicService,
        entity: &SyncEntity,
        kind: EntityKind,
        options: &CallOptions,
    ) -> Result<String, ConversionError> {
        let endpoint = format!("{}/api/createUrl", self.api_base);
        let request = self.http.post(&endpoint).json(&json!({
            "service": service.tag(),
            "input": entity,
            "type": kind,
        }));
        let response = send(request, options, CREATE_URL_ENDPOINT).await?;

        let body: CreateUrlResponse =
            response
                .json()
                .await
                .map_err(|e| ConversionError::InvalidBody {
                    endpoint: CREATE_URL_ENDPOINT,
                    message: e.to_string(),
                })?;

        body.url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConversionError::MissingUrl {
                service: service.tag().to_string(),
            })
    }
}

async fn send(
    mut request: RequestBuilder,
    options: &CallOptions,
    endpoint: &'static str,
) -> Result<Response, ConversionError> {
    if let Some(timeout) = options.timeout {
        request = request.timeout(timeout);
    }

    let sent = async {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ConversionError::TimedOut { endpoint }
            } else {
                ConversionError::Transport {
                    endpoint,
                    message: e.to_string(),
                }
            }
        })
    };

    let response = match &options.cancellation {
        Some(token) => tokio::select! {
            () = token.cancelled() => return Err(ConversionError::Cancelled { endpoint }),
            result = sent => result?,
        },
        None => sent.await?,
    };

    let status = response.status();
    if !status.is_success() {
        return Err(ConversionError::Http {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(response)
}
