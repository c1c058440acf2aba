//! TestRail API v2 client over blocking HTTP.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use trailer_model::{CaseRecord, RunId, Section, SuiteScope, TranslatedResult};
use trailer_transfer::{ApiError, CreatedRun, NewRun, SubmittedResult, TestRailApi, TestRecord};

use crate::credentials::Credentials;
use crate::error::{ClientError, Result};

/// Account used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://docker.testrail.com";

const API_PATH: &str = "index.php?";
const API_PREFIX: &str = "/api/v2/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Body of the bulk result endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ResultsBody<'a> {
    pub results: &'a [TranslatedResult],
}

/// Client bound to one TestRail account.
pub struct TestRailClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl TestRailClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("trailer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `endpoint`, e.g. `get_cases/3&suite_id=33`.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{API_PATH}{API_PREFIX}{endpoint}", self.base_url)
    }

    /// Full URL of a pagination link such as `/api/v2/get_cases/3&offset=250`.
    fn link_url(&self, link: &str) -> String {
        format!("{}/{API_PATH}{link}", self.base_url)
    }

    fn send(&self, request: RequestBuilder, url: &str) -> std::result::Result<Response, ApiError> {
        debug!(%url, "TestRail request");
        let response = request
            .basic_auth(&self.credentials.username, Some(self.credentials.token()))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| ApiError::transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::http(
            status.as_u16(),
            error_message(status.as_u16(), status.canonical_reason(), &body),
        ))
    }

    fn get_value(&self, url: &str) -> std::result::Result<Value, ApiError> {
        self.send(self.client.get(url), url)?
            .json()
            .map_err(|err| ApiError::transport(format!("invalid response from {url}: {err}")))
    }

    /// Reads every page of a listing endpoint.
    fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        items_key: &str,
    ) -> std::result::Result<Vec<T>, ApiError> {
        let mut url = self.endpoint_url(endpoint);
        let mut items = Vec::new();
        loop {
            let page = split_page(self.get_value(&url)?, items_key)?;
            items.extend(page.items);
            match page.next {
                Some(next) => url = self.link_url(&next),
                None => break,
            }
        }
        debug!(endpoint, count = items.len(), "listed items");
        serde_json::from_value(Value::Array(items))
            .map_err(|err| ApiError::transport(format!("invalid {items_key} from {endpoint}: {err}")))
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> std::result::Result<T, ApiError> {
        let url = self.endpoint_url(endpoint);
        self.send(self.client.post(&url).json(body), &url)?
            .json()
            .map_err(|err| ApiError::transport(format!("invalid response from {url}: {err}")))
    }
}

impl TestRailApi for TestRailClient {
    fn get_sections(&self, scope: SuiteScope) -> std::result::Result<Vec<Section>, ApiError> {
        self.get_list(
            &format!("get_sections/{}&suite_id={}", scope.project_id, scope.suite_id),
            "sections",
        )
    }

    fn get_cases(&self, scope: SuiteScope) -> std::result::Result<Vec<CaseRecord>, ApiError> {
        self.get_list(
            &format!("get_cases/{}&suite_id={}", scope.project_id, scope.suite_id),
            "cases",
        )
    }

    fn get_tests(&self, run_id: RunId) -> std::result::Result<Vec<TestRecord>, ApiError> {
        self.get_list(&format!("get_tests/{run_id}"), "tests")
    }

    fn add_run(&self, project_id: u64, run: &NewRun) -> std::result::Result<CreatedRun, ApiError> {
        self.post(&format!("add_run/{project_id}"), run)
    }

    fn add_results_for_cases(
        &self,
        run_id: RunId,
        results: &[TranslatedResult],
    ) -> std::result::Result<Vec<SubmittedResult>, ApiError> {
        self.post(
            &format!("add_results_for_cases/{run_id}"),
            &ResultsBody { results },
        )
    }
}

/// One page of a listing response.
#[derive(Debug, PartialEq)]
struct Page {
    items: Vec<Value>,
    next: Option<String>,
}

/// Accepts a bare array or the `{"_links": {"next": ..}, "<items_key>": [..]}` envelope.
fn split_page(body: Value, items_key: &str) -> std::result::Result<Page, ApiError> {
    match body {
        Value::Array(items) => Ok(Page { items, next: None }),
        Value::Object(mut object) => {
            let next = object
                .get("_links")
                .and_then(|links| links.get("next"))
                .and_then(Value::as_str)
                .map(str::to_string);
            match object.remove(items_key) {
                Some(Value::Array(items)) => Ok(Page { items, next }),
                _ => Err(ApiError::transport(format!(
                    "response has no '{items_key}' list"
                ))),
            }
        }
        other => Err(ApiError::transport(format!(
            "unexpected response shape for '{items_key}': {other}"
        ))),
    }
}

/// `"<code> <reason>: <detail>"`, preferring the `error` field of a JSON body.
fn error_message(status: u16, reason: Option<&str>, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    match reason {
        Some(reason) => format!("{status} {reason}: {detail}"),
        None => format!("{status}: {detail}"),
    }
}
