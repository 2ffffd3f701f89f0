use crate::auth::AppJwt;
use crate::config::AppConfig;
use crate::error::{GithubError, Result};
use crate::types::{ApiErrorBody, HookDelivery};
use hookreplay::{Delivery, DeliveryId, DeliveryLog, DeliveryPages, PAGE_SIZE};
use reqwest::header::{HeaderMap, ACCEPT, LINK, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response};

pub const API_VERSION: &str = "2022-11-28";
const API_VERSION_HEADER: &str = "x-github-api-version";
const ACCEPT_JSON: &str = "application/vnd.github+json";

/// HTTP client for the webhook delivery endpoints of one GitHub App
pub struct GithubAppClient {
    api_url: String,
    http_client: reqwest::Client,
    jwt: AppJwt,
}

impl GithubAppClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let jwt = AppJwt::new(config.app_id, &config.private_key)?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        tracing::info!(
            "[GITHUB] client for app {} against {}",
            config.app_id,
            config.api_url
        );

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            http_client,
            jwt,
        })
    }

    pub fn app_id(&self) -> u64 {
        self.jwt.app_id()
    }

    fn deliveries_url(&self) -> String {
        format!("{}/app/hook/deliveries?per_page={}", self.api_url, PAGE_SIZE)
    }

    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        Ok(self
            .http_client
            .request(method, url)
            .bearer_auth(self.jwt.token()?)
            .header(ACCEPT, ACCEPT_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(
                USER_AGENT,
                concat!("hookreplay/", env!("CARGO_PKG_VERSION")),
            ))
    }

    /// Fetch one page of deliveries and the URL of the page after it.
    pub async fn list_deliveries(&self, url: &str) -> Result<(Vec<HookDelivery>, Option<String>)> {
        let endpoint = "GET /app/hook/deliveries";
        let response = self.request(Method::GET, url)?.send().await?;
        let response = check_status(endpoint, response).await?;

        let next = next_link(response.headers());
        let page: Vec<HookDelivery> = response.json().await.map_err(|e| GithubError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        for failed in page.iter().filter(|d| d.status != "OK") {
            tracing::debug!(
                id = failed.id,
                guid = %failed.guid,
                status_code = failed.status_code.unwrap_or(0),
                "[GITHUB] delivery not successful: {}",
                failed.status
            );
        }

        tracing::debug!(
            "[GITHUB] fetched {} deliveries (more pages: {})",
            page.len(),
            next.is_some()
        );

        Ok((page, next))
    }

    /// Ask GitHub to send delivery `id` again.
    pub async fn redeliver_attempt(&self, id: DeliveryId) -> Result<()> {
        let endpoint = format!("POST /app/hook/deliveries/{}/attempts", id);
        let url = format!("{}/app/hook/deliveries/{}/attempts", self.api_url, id);

        let response = self.request(Method::POST, &url)?.send().await?;
        check_status(&endpoint, response).await?;
        Ok(())
    }
}

async fn check_status(endpoint: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();

    tracing::debug!(
        endpoint,
        status = status.as_u16(),
        documentation_url = body.documentation_url.as_deref().unwrap_or(""),
        "[GITHUB] request failed"
    );

    Err(GithubError::Api {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message: body.message,
        documentation_url: body.documentation_url,
    })
}

/// URL with `rel="next"` from a `Link` header, if any.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Lazy page cursor over `GET /app/hook/deliveries`.
pub struct GithubDeliveryPages<'a> {
    client: &'a GithubAppClient,
    next_url: Option<String>,
}

impl DeliveryPages for GithubDeliveryPages<'_> {
    async fn next_page(&mut self) -> hookreplay::Result<Option<Vec<Delivery>>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let (page, next) = self.client.list_deliveries(&url).await?;
        self.next_url = next;

        Ok(Some(page.into_iter().map(Delivery::from).collect()))
    }
}

impl DeliveryLog for GithubAppClient {
    type Pages<'a> = GithubDeliveryPages<'a>;

    fn pages(&self) -> Self::Pages<'_> {
        GithubDeliveryPages {
            client: self,
            next_url: Some(self.deliveries_url()),
        }
    }

    async fn redeliver(&self, id: DeliveryId) -> hookreplay::Result<()> {
        self.redeliver_attempt(id).await?;
        Ok(())
    }
}
