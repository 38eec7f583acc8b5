//! # HTTP Service
//!
//! Builds requests from parsed command-line or prompt input, sends them
//! through one long-lived blocking client and captures the response in a
//! [`ResponseView`] for formatting.

use crate::key_value::KeyValues;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// HTTP methods accepted by reqline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name isn't one of [`Method::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid method: {0}")]
pub struct InvalidMethod(pub String);

impl FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| InvalidMethod(s.to_string()))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Failure to get a response for a request
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Everything needed to send one request
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub headers: KeyValues,
    pub query_params: KeyValues,
    pub form_data: KeyValues,
    pub json_body: KeyValues,
}

/// Body a request is sent with, after precedence has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<'a> {
    None,
    Form(&'a KeyValues),
    Json(serde_json::Value),
}

impl RequestSpec {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: KeyValues::new(),
            query_params: KeyValues::new(),
            form_data: KeyValues::new(),
            json_body: KeyValues::new(),
        }
    }

    /// The URL the request goes to, query parameters included.
    ///
    /// This is both what gets dispatched and what gets shown to the user.
    pub fn target_url(&self) -> Result<Url, DispatchError> {
        let mut url = Url::parse(&self.url).map_err(|source| DispatchError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        if !self.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query_params.iter());
        }
        Ok(url)
    }

    /// Pick the request body. A JSON payload wins over form data.
    pub fn body(&self) -> RequestBody<'_> {
        if !self.json_body.is_empty() {
            if !self.form_data.is_empty() {
                tracing::warn!("both form data and JSON given; sending JSON only");
            }
            RequestBody::Json(serde_json::Value::Object(self.json_body.to_json_object()))
        } else if !self.form_data.is_empty() {
            RequestBody::Form(&self.form_data)
        } else {
            RequestBody::None
        }
    }

    fn header_map(&self) -> Result<HeaderMap, DispatchError> {
        let mut map = HeaderMap::new();
        for (name, value) in self.headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| DispatchError::InvalidHeader(name.to_string()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| DispatchError::InvalidHeader(name.to_string()))?;
            map.append(header_name, header_value);
        }
        Ok(map)
    }
}

/// Response data kept for display
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseView {
    pub status_code: u16,
    /// Headers with lowercased names, grouped by name in the order each name
    /// first appeared. Repeated headers such as `set-cookie` are listed
    /// together even when other headers arrived between them.
    pub headers: Vec<(String, String)>,
    pub body_text: String,
    pub requested_url: String,
}

/// Service for sending requests
///
/// Owns a single pooled client, so requests made during one run reuse
/// connections.
pub struct HttpService {
    client: reqwest::blocking::Client,
}

impl HttpService {
    pub fn new() -> Result<Self, DispatchError> {
        tracing::debug!("Creating HTTP client");
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("reqline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Send the request and read the whole response
    pub fn send(&self, spec: &RequestSpec) -> Result<ResponseView, DispatchError> {
        let url = spec.target_url()?;
        let requested_url = url.to_string();
        tracing::debug!(method = %spec.method, url = %requested_url, "sending request");

        let mut builder = self
            .client
            .request(spec.method.into(), url)
            .headers(spec.header_map()?);
        builder = match spec.body() {
            RequestBody::None => builder,
            RequestBody::Form(form) => builder.form(&form.iter().collect::<Vec<_>>()),
            RequestBody::Json(json) => builder.json(&json),
        };

        let response = builder.send().map_err(|e| {
            tracing::error!("HTTP request failed: {e}");
            DispatchError::from(e)
        })?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body_text = response.text()?;
        tracing::info!(status = status_code, "received response");

        Ok(ResponseView {
            status_code,
            headers,
            body_text,
            requested_url,
        })
    }
}
