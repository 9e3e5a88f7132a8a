use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use std::cell::RefCell;
use stockdesk_shared::protocol::ApiRequest;
use stockdesk_shared::{Ack, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{FilePart, HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// The single API client shared by the session and every view.
///
/// It owns the default `Authorization` header slot. Only the session
/// manager writes that slot (the setters are crate-private), so views can
/// never send with a credential the session has already dropped.
pub struct ApiClient<C> {
    base_url: String,
    client: C,
    bearer: RefCell<Option<String>>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            bearer: RefCell::new(None),
        }
    }

    pub fn from_config(config: &ClientConfig, client: C) -> Self {
        Self::new(config.base_url.clone(), client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // ---------------------------------------------------------
    // Authorization slot (session manager only)
    // ---------------------------------------------------------

    pub fn has_authorization(&self) -> bool {
        self.bearer.borrow().is_some()
    }

    pub(crate) fn set_bearer(&self, token: &str) {
        *self.bearer.borrow_mut() = Some(format!("Bearer {}", token));
    }

    pub(crate) fn clear_bearer(&self) {
        self.bearer.borrow_mut().take();
    }

    /// Builds a request, reading the header slot at dispatch time.
    fn build(&self, method: HttpMethod, path: &str, query: &[(&str, String)]) -> HttpRequest {
        let mut url = self.url(path);
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }

        let mut req = HttpRequest::new(&url, method);
        if let Some(value) = self.bearer.borrow().as_deref() {
            req = req.with_header(HEADER_AUTHORIZATION, value);
        }
        req
    }

    fn with_json_body<B: Serialize + ?Sized>(req: HttpRequest, body: &B) -> ClientResult<HttpRequest> {
        let body = serde_json::to_string(body)?;
        Ok(req
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with_json(body))
    }

    /// Sends and maps non-2xx replies to `ClientError::Http`.
    async fn execute(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        debug!("{} {}", method, url);

        let resp = self.client.send(req).await.inspect_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
        })?;

        if resp.ok() {
            return Ok(resp);
        }

        let message = server_message(&resp.body);
        warn!(
            "{} {} returned {}: {}",
            method,
            url,
            resp.status,
            message.as_deref().unwrap_or("<no message>")
        );
        Err(ClientError::http(resp.status, message))
    }

    // ---------------------------------------------------------
    // Verbs
    // ---------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let req = self.build(HttpMethod::Get, path, query);
        self.execute(req).await?.json()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = Self::with_json_body(self.build(HttpMethod::Post, path, &[]), body)?;
        self.execute(req).await?.json()
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = Self::with_json_body(self.build(HttpMethod::Put, path, &[]), body)?;
        self.execute(req).await?.json()
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.build(HttpMethod::Delete, path, &[]);
        self.execute(req).await?.json()
    }

    /// Posts one file as `multipart/form-data`. The transport sets the boundary header.
    /// Any 2xx reply is an acknowledgement, whatever its body.
    pub async fn upload(&self, path: &str, file: FilePart) -> ClientResult<Ack> {
        let req = self.build(HttpMethod::Post, path, &[]).with_file(file);
        Ok(Ack::from_body(&self.execute(req).await?.body))
    }

    /// Fetches a binary body untouched.
    pub async fn download(&self, path: &str) -> ClientResult<Vec<u8>> {
        let req = self.build(HttpMethod::Get, path, &[]);
        Ok(self.execute(req).await?.body)
    }

    /// Dispatches a typed endpoint contract.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ClientResult<R::Response> {
        let mut req = self.build(R::METHOD, &request.path(), &request.query());
        if R::HAS_BODY {
            req = Self::with_json_body(req, request)?;
        }
        let resp = self.execute(req).await?;
        R::decode(&resp.body).map_err(ClientError::from)
    }
}

/// Pulls `message` out of a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
}
