use crate::error::StoreError;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// Read/write access to the hosted document store.
pub trait DocumentStore {
    /// Run a GROQ query. `params` are bound as `$name` in the query.
    fn fetch(&self, query: &str, params: &[(&str, Value)]) -> Result<Vec<Value>, StoreError>;

    /// Create a new document and return the ids the store assigned.
    fn create(&self, document: &Value) -> Result<MutationResult, StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    pub transaction_id: String,
    pub document_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(rename = "transactionId")]
    transaction_id: String,
    #[serde(default)]
    results: Vec<MutateResultItem>,
}

#[derive(Debug, Deserialize)]
struct MutateResultItem {
    id: String,
}

pub struct SanityClient {
    client: Client,
    base_url: String, // https://{project}.api.sanity.io
    dataset: String,
    api_version: String,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(project_id: &str, dataset: &str, api_version: &str, use_cdn: bool) -> Self {
        let host = if use_cdn { "apicdn" } else { "api" };
        Self {
            client: Client::new(),
            base_url: format!("https://{}.{}.sanity.io", project_id, host),
            dataset: dataset.to_string(),
            api_version: api_version.trim_start_matches('v').to_string(),
            token: None,
        }
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn endpoint(&self, kind: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            self.base_url, self.api_version, kind, self.dataset
        )
    }

    fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Encode query parameters the way the query API expects: `$name=<json>`.
pub fn encode_params(params: &[(&str, Value)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(name, value)| (format!("${}", name), value.to_string()))
        .collect()
}

impl DocumentStore for SanityClient {
    fn fetch(&self, query: &str, params: &[(&str, Value)]) -> Result<Vec<Value>, StoreError> {
        let url = self.endpoint("query");
        let mut query_pairs = vec![("query".to_string(), query.to_string())];
        query_pairs.extend(encode_params(params));

        debug!(url = %url, params = params.len(), "querying document store");

        let mut request = self.client.get(&url).query(&query_pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = Self::check_status(request.send()?)?;

        let body = response
            .json::<QueryResponse>()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        // `*[...]` yields an array, `*[...][0]` an object or null
        Ok(match body.result {
            Value::Array(docs) => docs,
            Value::Null => Vec::new(),
            other => vec![other],
        })
    }

    fn create(&self, document: &Value) -> Result<MutationResult, StoreError> {
        let token = self.token.as_deref().ok_or(StoreError::MissingToken)?;
        let url = format!("{}?returnIds=true", self.endpoint("mutate"));
        let body = json!({ "mutations": [ { "create": document } ] });

        debug!(url = %url, "creating document");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()?;
        let response = Self::check_status(response)?;

        let parsed = response
            .json::<MutateResponse>()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(MutationResult {
            transaction_id: parsed.transaction_id,
            document_ids: parsed.results.into_iter().map(|r| r.id).collect(),
        })
    }
}
