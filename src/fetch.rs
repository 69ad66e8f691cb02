//! HTTP helper for talking to the Calorie Counter API

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::error::{flatten_field_errors, Error};
use crate::session::SessionStore;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Option<HashMap<String, String>>,
    body: Option<Vec<u8>>,
    session: Option<&'a SessionStore>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: None,
            body: None,
            session: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Authenticate against the session store.
    ///
    /// Attaches the stored access token as a bearer credential and arranges
    /// for the store to be cleared should the API answer 401. Fails up front
    /// with [`Error::Unauthorized`] when no session is present.
    pub fn authenticated(mut self, store: &'a SessionStore) -> Result<Self, Error> {
        let token = store.access_token().ok_or(Error::Unauthorized)?;
        self.session = Some(store);
        Ok(self.bearer_auth(&token))
    }

    /// Add query parameters to the request
    pub fn query(mut self, params: HashMap<String, String>) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        // Add query parameters if present
        if let Some(params) = &self.query_params {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let response = self.send().await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// Execute the request, discarding any response body
    pub async fn execute_empty(&self) -> Result<(), Error> {
        self.send().await?;
        Ok(())
    }

    async fn send(&self) -> Result<reqwest::Response, Error> {
        log::debug!("{} {}", self.method, self.url);

        let req = self.build()?;
        let response = req.send().await.map_err(|err| {
            log::error!("request to {} failed: {}", self.url, err);
            err
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        Err(self.error_from(response).await)
    }

    /// Map an unsuccessful response onto the error taxonomy: 401 invalidates
    /// the session, structured 4xx bodies become flattened validation
    /// messages, everything else is surfaced as-is.
    async fn error_from(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            if let Some(store) = self.session {
                store.clear();
            }
            return Error::Unauthorized;
        }

        if status.is_client_error() {
            if let Ok(body) = serde_json::from_str::<serde_json::Value>(&text) {
                if let Some(message) = flatten_field_errors(&body) {
                    return Error::Validation(message);
                }
            }
        }

        log::error!("request to {} failed with status {}", self.url, status);
        Error::Api {
            status: status.as_u16(),
            message: text,
        }
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
