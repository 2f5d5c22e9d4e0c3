//! Thin JSON HTTP helper with callback-style record operations.
//!
//! Client-side (csr): requests go through `gloo-net` via [`FetchTransport`].
//! Elsewhere the fetch transport is a stub that always fails, and tests plug
//! in their own [`HttpTransport`].
//!
//! ERROR HANDLING
//! ==============
//! Every request is issued exactly once: no retry, no timeout, no
//! cancellation. Non-2xx responses become [`HttpError::Status`]. Failures pass
//! through the client's single response interceptor before reaching the
//! caller's failure callback.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; non-JSON text is kept as a string, empty is null.
    pub body: Value,
}

impl HttpResponse {
    /// Decode the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_value(self.body.clone()).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HttpError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Status { status: u16, body: Value },
    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => Some(body),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// One request in, one response (of any status) out.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Failure continuation accepted by the record operations.
pub type OnFailure = Box<dyn FnOnce(HttpError)>;

/// Response interceptor shared by every request made through a client.
pub type Interceptor = Rc<dyn Fn(&HttpError)>;

pub struct HttpClient<T> {
    transport: Rc<T>,
    bearer: Rc<RefCell<Option<String>>>,
    interceptor: Rc<RefCell<Option<Interceptor>>>,
}

impl<T> Clone for HttpClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            bearer: Rc::clone(&self.bearer),
            interceptor: Rc::clone(&self.interceptor),
        }
    }
}

impl<T: HttpTransport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Rc::new(transport),
            bearer: Rc::new(RefCell::new(None)),
            interceptor: Rc::new(RefCell::new(None)),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Attach `token` to every subsequent request.
    pub fn set_bearer(&self, token: &str) {
        *self.bearer.borrow_mut() = Some(token.to_owned());
    }

    pub fn bearer(&self) -> Option<String> {
        self.bearer.borrow().clone()
    }

    /// Install the response interceptor. There is at most one; installing
    /// again replaces the previous handler.
    pub fn install_interceptor(&self, interceptor: impl Fn(&HttpError) + 'static) {
        *self.interceptor.borrow_mut() = Some(Rc::new(interceptor));
    }

    pub fn has_interceptor(&self) -> bool {
        self.interceptor.borrow().is_some()
    }

    /// Run the installed interceptor (if any) over `error`.
    pub fn intercept(&self, error: &HttpError) {
        // Clone out so the handler may reinstall without a double borrow.
        let handler = self.interceptor.borrow().clone();
        if let Some(handler) = handler {
            handler(error);
        }
    }

    /// Issue one request without running the interceptor.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`HttpError::Status`] for non-2xx.
    pub async fn send_raw(&self, method: Method, url: &str, body: Option<Value>) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest { method, url: url.to_owned(), bearer: self.bearer(), body };
        let resp = self.transport.send(request).await?;
        if (200..300).contains(&resp.status) {
            Ok(resp)
        } else {
            Err(HttpError::Status { status: resp.status, body: resp.body })
        }
    }

    /// Issue one request; failures pass through the interceptor first.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::send_raw`].
    pub async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<HttpResponse, HttpError> {
        let result = self.send_raw(method, url, body).await;
        if let Err(e) = &result {
            self.intercept(e);
        }
        result
    }

    pub async fn get_record(&self, url: &str, on_success: impl FnOnce(HttpResponse), on_failure: Option<OnFailure>) {
        settle(self.send(Method::Get, url, None).await, on_success, on_failure);
    }

    pub async fn create_record(
        &self,
        url: &str,
        data: Value,
        on_success: impl FnOnce(HttpResponse),
        on_failure: Option<OnFailure>,
    ) {
        settle(self.send(Method::Post, url, Some(data)).await, on_success, on_failure);
    }

    pub async fn update_record(
        &self,
        url: &str,
        data: Value,
        on_success: impl FnOnce(HttpResponse),
        on_failure: Option<OnFailure>,
    ) {
        settle(self.send(Method::Put, url, Some(data)).await, on_success, on_failure);
    }

    pub async fn delete_record(&self, url: &str, on_success: impl FnOnce(HttpResponse), on_failure: Option<OnFailure>) {
        settle(self.send(Method::Delete, url, None).await, on_success, on_failure);
    }
}

fn settle(result: Result<HttpResponse, HttpError>, on_success: impl FnOnce(HttpResponse), on_failure: Option<OnFailure>) {
    match result {
        Ok(resp) => on_success(resp),
        Err(e) => {
            if let Some(reject) = on_failure {
                reject(e);
            }
        }
    }
}

#[cfg(any(test, feature = "csr"))]
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let sent = match &request.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| HttpError::Transport(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            };
            let resp = sent.map_err(|e| HttpError::Transport(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| HttpError::Transport(e.to_string()))?;
            Ok(HttpResponse { status, body: parse_body(&text) })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(HttpError::Transport("not available outside the browser".to_owned()))
        }
    }
}
