//! Graph API client
//!
//! Thin transport over the versioned Graph root: authenticated GETs with cursor
//! pagination, form POSTs with method override, and the batch endpoint. No
//! retries happen here; callers decide what a failure means for their unit of
//! work.

use super::models::{api_error, BatchEntry, BatchSlot, Page};
use crate::config::{GraphConfig, SecretString};
use crate::domain::{GraphError, Result, RuleBridgeError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Headers an Ads Manager browser session sends with every Graph call
const FINGERPRINT_HEADERS: &[(&str, &str)] = &[
    ("accept", "*/*"),
    ("accept-language", "en-US,en;q=0.9"),
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"124\", \"Google Chrome\";v=\"124\", \"Not-A.Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("referer", "https://business.facebook.com/"),
];

/// Authenticated client for the Graph endpoint
///
/// The session token is passed in through [`GraphConfig`] and attached to every
/// request; it is never read from ambient state.
///
/// # Example
///
/// ```no_run
/// use rulebridge::adapters::graph::GraphClient;
/// use rulebridge::config::{secret_string, GraphConfig};
///
/// # async fn example() -> rulebridge::domain::Result<()> {
/// let config = GraphConfig::new(secret_string("EAAB...".to_string()));
/// let client = GraphClient::new(&config)?;
///
/// let rules = client
///     .fetch_all_pages("act_123/adrules_library", &[("limit", "100")])
///     .await?;
/// println!("{} rules", rules.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphClient {
    http: Client,
    api_root: Url,
    access_token: SecretString,
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("api_root", &self.api_root.as_str())
            .finish_non_exhaustive()
    }
}

impl GraphClient {
    /// Builds a client for the configured API root
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API root is not a valid URL or the
    /// HTTP client cannot be built.
    pub fn new(config: &GraphConfig) -> Result<Self> {
        let api_root = Url::parse(&config.api_root()).map_err(|e| {
            RuleBridgeError::Configuration(format!(
                "Invalid Graph API root '{}': {e}",
                config.api_root()
            ))
        })?;

        let mut headers = HeaderMap::new();
        for &(name, value) in FINGERPRINT_HEADERS {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        let http = ClientBuilder::new()
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                RuleBridgeError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_root,
            access_token: config.access_token.clone(),
        })
    }

    /// Versioned root every relative path is resolved against
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// GETs a single page
    ///
    /// `path` is either relative to the API root or an absolute cursor URL.
    ///
    /// # Errors
    ///
    /// Transport failures, non-JSON bodies, Graph `error` objects, and pages
    /// without a `data` array.
    pub async fn fetch_page(&self, path: &str, query: &[(&str, &str)]) -> Result<Page> {
        let mut url = self.resolve(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        let url = self.with_token(url);

        tracing::debug!(path = %path, "Fetching page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(GraphError::from)?;
        let body = read_json(response).await?;

        let page: Page = serde_json::from_value(body)
            .map_err(|e| GraphError::InvalidResponse(format!("Malformed page for {path}: {e}")))?;
        if page.data.is_none() {
            return Err(GraphError::MissingData(path.to_string()).into());
        }
        Ok(page)
    }

    /// GETs every page of an edge, following `paging.next` cursors
    ///
    /// Items are returned in page order.
    ///
    /// # Errors
    ///
    /// Any page failing as in [`GraphClient::fetch_page`], or a cursor pointing
    /// back at a page already fetched.
    pub async fn fetch_all_pages(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();

        let mut page = self.fetch_page(path, query).await?;
        let mut page_count = 1usize;

        loop {
            let next = page.next_url().map(str::to_string);
            items.extend(page.data.take().unwrap_or_default());

            let Some(next) = next else {
                break;
            };
            if !visited.insert(next.clone()) {
                return Err(GraphError::PaginationLoop(next).into());
            }

            page = self.fetch_page(&next, &[]).await?;
            page_count += 1;
        }

        tracing::debug!(path = %path, pages = page_count, items = items.len(), "Fetched all pages");
        Ok(items)
    }

    /// POSTs a form with the session token
    ///
    /// Single writes use this with a `method` override in both the query string
    /// and the form (`?method=delete`), the way Ads Manager issues them.
    ///
    /// # Errors
    ///
    /// Transport failures, non-JSON bodies and Graph `error` objects.
    pub async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.resolve(path)?;
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        form.push((ACCESS_TOKEN_PARAM, self.access_token.expose_secret().as_ref()));
        form.extend_from_slice(params);

        tracing::debug!(path = %path, "POST");

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(GraphError::from)?;
        read_json(response).await
    }

    /// Submits entries to the batch endpoint
    ///
    /// The result is aligned index for index with `entries`; `null` slots in
    /// the server's answer come back as `None`. An empty `entries` slice
    /// returns an empty result without any request.
    ///
    /// # Errors
    ///
    /// Transport failures, a Graph `error` object in place of the array, or a
    /// body that is not a JSON array.
    pub async fn submit_batch(
        &self,
        entries: &[BatchEntry],
        extra_params: &[(&str, &str)],
    ) -> Result<Vec<BatchSlot>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let batch = serde_json::to_string(entries)?;
        let mut form: Vec<(&str, &str)> = vec![
            (ACCESS_TOKEN_PARAM, self.access_token.expose_secret().as_ref()),
            ("include_headers", "false"),
        ];
        form.extend_from_slice(extra_params);
        form.push(("batch", batch.as_str()));

        tracing::debug!(entries = entries.len(), "Submitting batch");

        let response = self
            .http
            .post(self.api_root.clone())
            .form(&form)
            .send()
            .await
            .map_err(GraphError::from)?;
        let body = read_json(response).await?;

        if !body.is_array() {
            return Err(GraphError::InvalidResponse(format!(
                "Batch response is not an array: {}",
                truncate(&body.to_string())
            ))
            .into());
        }

        let slots: Vec<BatchSlot> = serde_json::from_value(body).map_err(|e| {
            GraphError::InvalidResponse(format!("Malformed batch response: {e}"))
        })?;

        if slots.len() != entries.len() {
            tracing::warn!(
                expected = entries.len(),
                received = slots.len(),
                "Batch response length differs from request"
            );
        }

        Ok(slots)
    }

    /// Absolute URLs pass through, everything else joins the API root
    fn resolve(&self, path: &str) -> Result<Url> {
        let resolved = if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)
        } else {
            self.api_root.join(path.trim_start_matches('/'))
        };
        resolved.map_err(|e| {
            RuleBridgeError::Graph(GraphError::InvalidResponse(format!(
                "Invalid request path '{path}': {e}"
            )))
        })
    }

    /// Appends the token unless the URL already carries one (cursor URLs do)
    fn with_token(&self, mut url: Url) -> Url {
        let has_token = url.query_pairs().any(|(key, _)| key == ACCESS_TOKEN_PARAM);
        if !has_token {
            url.query_pairs_mut()
                .append_pair(ACCESS_TOKEN_PARAM, self.access_token.expose_secret().as_ref());
        }
        url
    }
}

/// Reads a response as JSON, mapping Graph error objects and non-JSON bodies
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await.map_err(GraphError::from)?;

    let body: Value = match serde_json::from_str(&text) {
        Ok(body) => body,
        Err(_) if status.is_server_error() => {
            return Err(GraphError::ServerError {
                status: status.as_u16(),
                message: truncate(&text),
            }
            .into())
        }
        Err(_) if status.is_client_error() => {
            return Err(GraphError::ClientError {
                status: status.as_u16(),
                message: truncate(&text),
            }
            .into())
        }
        Err(e) => {
            return Err(GraphError::InvalidResponse(format!(
                "Expected JSON (status {status}): {e}"
            ))
            .into())
        }
    };

    if let Some(error) = api_error(&body) {
        return Err(GraphError::Api {
            code: error.code.unwrap_or(i64::from(status.as_u16())),
            message: error.describe(),
        }
        .into());
    }

    Ok(body)
}

fn truncate(text: &str) -> String {
    const LIMIT: usize = 300;
    if text.len() <= LIMIT {
        return text.to_string();
    }
    let mut end = LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn client() -> GraphClient {
        let config = GraphConfig::new(secret_string("tok".to_string()));
        GraphClient::new(&config).unwrap()
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let client = client();
        assert_eq!(
            client.resolve("act_1/adrules_library").unwrap().as_str(),
            "https://adsmanager-graph.facebook.com/v23.0/act_1/adrules_library"
        );
        assert_eq!(
            client.resolve("/2384").unwrap().as_str(),
            "https://adsmanager-graph.facebook.com/v23.0/2384"
        );
        assert_eq!(
            client.resolve("https://other.example/next?after=x").unwrap().as_str(),
            "https://other.example/next?after=x"
        );
    }

    #[test]
    fn test_token_added_once() {
        let client = client();
        let url = client.with_token(Url::parse("https://g.example/p?limit=1").unwrap());
        assert_eq!(url.as_str(), "https://g.example/p?limit=1&access_token=tok");

        let cursor = Url::parse("https://g.example/p?access_token=server&after=c").unwrap();
        assert_eq!(client.with_token(cursor.clone()), cursor);
    }

    #[test]
    fn test_debug_hides_token() {
        let output = format!("{:?}", client());
        assert!(!output.contains("tok\""));
        assert!(output.contains("api_root"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "é".repeat(400);
        let cut = truncate(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 303);
    }
}
