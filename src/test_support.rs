//! Fakes shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::net::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use crate::util::navigator::Navigator;

/// Transport that replays queued results and records every request.
#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn replying(replies: impl IntoIterator<Item = Result<HttpResponse, HttpError>>) -> Self {
        Self { replies: RefCell::new(replies.into_iter().collect()), requests: RefCell::default() }
    }

    pub fn status(status: u16, body: serde_json::Value) -> Self {
        Self::replying([Ok(HttpResponse { status, body })])
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Transport("no reply queued".to_owned())))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    External(String),
    Push(String),
}

/// Navigator that records navigation requests instead of performing them.
#[derive(Default)]
pub struct RecordingNavigator {
    events: RefCell<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_external(&self, url: &str) {
        self.events.borrow_mut().push(NavEvent::External(url.to_owned()));
    }

    fn push(&self, path: &str) {
        self.events.borrow_mut().push(NavEvent::Push(path.to_owned()));
    }
}
