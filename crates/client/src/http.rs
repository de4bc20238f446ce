use std::sync::Arc;

use api_types::{
    ErrorBody,
    auth::{LoginRequest, LoginResponse, UserView},
    expense::{ExpenseBody, ExpenseList, ExpenseResponse, ExpenseStatus, ExpenseView, StatusUpdate},
};
use engine::Scope;
use reqwest::{
    RequestBuilder, Response, Url,
    cookie::{CookieStore, Jar},
};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Thin wrapper over the backend REST API.
///
/// Every request carries the session cookie stored in the shared jar. One
/// call is one request: no retries, no caching.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    jar: Arc<Jar>,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(format!(
                "{base_url} cannot be used as a base"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            base_url,
            http,
            jar,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let res = self.send(req).await?;
        Ok(res.json::<T>().await?)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let req = req.build()?;
        tracing::debug!(method = %req.method(), url = %req.url(), "request");

        let res = self.http.execute(req).await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = res
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
        tracing::debug!(%status, %message, "request failed");
        Err(ClientError::from_status(status, message))
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<UserView, ClientError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = self.http.post(self.endpoint(&["auth", "login"])).json(&payload);
        let res: LoginResponse = self.send_json(req).await?;
        Ok(res.user)
    }

    /// `GET /expenses` (own records) or `GET /expenses/all` (every record).
    pub async fn list_expenses(&self, scope: Scope) -> Result<Vec<ExpenseView>, ClientError> {
        let url = match scope {
            Scope::Mine => self.endpoint(&["expenses"]),
            Scope::All => self.endpoint(&["expenses", "all"]),
        };
        let list: ExpenseList = self.send_json(self.http.get(url)).await?;
        Ok(list.into_vec())
    }

    /// `POST /expenses`
    pub async fn create_expense(&self, body: &ExpenseBody) -> Result<ExpenseView, ClientError> {
        let req = self.http.post(self.endpoint(&["expenses"])).json(body);
        let res: ExpenseResponse = self.send_json(req).await?;
        Ok(res.into_inner())
    }

    /// `PUT /expenses/{id}`
    pub async fn update_expense(
        &self,
        id: &str,
        body: &ExpenseBody,
    ) -> Result<ExpenseView, ClientError> {
        let req = self.http.put(self.endpoint(&["expenses", id])).json(body);
        let res: ExpenseResponse = self.send_json(req).await?;
        Ok(res.into_inner())
    }

    /// `DELETE /expenses/{id}`
    pub async fn delete_expense(&self, id: &str) -> Result<(), ClientError> {
        self.send(self.http.delete(self.endpoint(&["expenses", id])))
            .await?;
        Ok(())
    }

    /// `POST /expenses/{id}/status`
    pub async fn set_status(
        &self,
        id: &str,
        status: ExpenseStatus,
    ) -> Result<ExpenseView, ClientError> {
        let req = self
            .http
            .post(self.endpoint(&["expenses", id, "status"]))
            .json(&StatusUpdate { status });
        let res: ExpenseResponse = self.send_json(req).await?;
        Ok(res.into_inner())
    }

    /// Cookie header currently sent to the backend, if any.
    pub fn session_cookies(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(ToString::to_string))
    }

    /// Loads a cookie header previously returned by [`Self::session_cookies`].
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar
                .add_cookie_str(&format!("{pair}; Path=/"), &self.base_url);
        }
    }

    /// Expires every cookie held for the backend.
    pub fn clear_cookies(&self) {
        let Some(header) = self.session_cookies() else {
            return;
        };
        for name in header
            .split(';')
            .filter_map(|pair| pair.split('=').next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            self.jar
                .add_cookie_str(&format!("{name}=; Max-Age=0; Path=/"), &self.base_url);
        }
    }
}
