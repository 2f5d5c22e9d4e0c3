use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::test_support::FakeTransport;

fn ok(body: Value) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse { status: 200, body })
}

#[test]
fn get_record_invokes_success_with_response() {
    let client = HttpClient::new(FakeTransport::replying([ok(json!({ "id": 1 }))]));
    let seen = RefCell::new(None);
    block_on(client.get_record("/api/fund_sources/1", |resp| *seen.borrow_mut() = Some(resp.body), None));
    assert_eq!(seen.into_inner(), Some(json!({ "id": 1 })));

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, "/api/fund_sources/1");
    assert_eq!(requests[0].body, None);
}

#[test]
fn create_update_delete_use_matching_methods_and_payloads() {
    let client = HttpClient::new(FakeTransport::replying([ok(Value::Null), ok(Value::Null), ok(Value::Null)]));
    block_on(async {
        client.create_record("/api/wfps", json!({ "title": "a" }), |_| {}, None).await;
        client.update_record("/api/wfps/3", json!({ "title": "b" }), |_| {}, None).await;
        client.delete_record("/api/wfps/3", |_| {}, None).await;
    });

    let requests = client.transport().requests();
    let methods: Vec<Method> = requests.iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::Post, Method::Put, Method::Delete]);
    assert_eq!(requests[0].body, Some(json!({ "title": "a" })));
    assert_eq!(requests[1].body, Some(json!({ "title": "b" })));
    assert_eq!(requests[2].body, None);
}

#[test]
fn non_success_status_calls_failure_callback() {
    let client = HttpClient::new(FakeTransport::status(422, json!({ "message": "invalid" })));
    let failure = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&failure);
    let succeeded = RefCell::new(false);
    block_on(client.get_record(
        "/api/apps",
        |_| *succeeded.borrow_mut() = true,
        Some(Box::new(move |e| *sink.borrow_mut() = Some(e))),
    ));

    assert!(!*succeeded.borrow());
    let error = failure.borrow().clone().expect("failure recorded");
    assert_eq!(error.status(), Some(422));
    assert_eq!(error.body(), Some(&json!({ "message": "invalid" })));
}

#[test]
fn missing_failure_callback_is_a_noop() {
    let client = HttpClient::new(FakeTransport::replying([Err(HttpError::Transport("offline".to_owned()))]));
    let succeeded = RefCell::new(false);
    block_on(client.delete_record("/api/ppmps/1", |_| *succeeded.borrow_mut() = true, None));
    assert!(!*succeeded.borrow());
    assert_eq!(client.transport().requests().len(), 1);
}

#[test]
fn bearer_token_is_attached_after_set() {
    let client = HttpClient::new(FakeTransport::replying([ok(Value::Null), ok(Value::Null)]));
    block_on(client.get_record("/a", |_| {}, None));
    client.set_bearer("tok-1");
    block_on(client.get_record("/b", |_| {}, None));

    let requests = client.transport().requests();
    assert_eq!(requests[0].bearer, None);
    assert_eq!(requests[1].bearer.as_deref(), Some("tok-1"));
}

#[test]
fn interceptor_sees_failures_before_callback() {
    let client = HttpClient::new(FakeTransport::status(500, json!("boom")));
    let order = Rc::new(RefCell::new(Vec::new()));
    let seen_by_interceptor = Rc::clone(&order);
    client.install_interceptor(move |e| seen_by_interceptor.borrow_mut().push(format!("interceptor:{e}")));
    let seen_by_callback = Rc::clone(&order);
    block_on(client.get_record(
        "/x",
        |_| {},
        Some(Box::new(move |_| seen_by_callback.borrow_mut().push("callback".to_owned()))),
    ));

    assert_eq!(
        order.borrow().as_slice(),
        ["interceptor:server responded with status 500".to_owned(), "callback".to_owned()]
    );
}

#[test]
fn installing_interceptor_twice_replaces_instead_of_stacking() {
    let client = HttpClient::new(FakeTransport::status(403, Value::Null));
    let calls = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::clone(&calls);
    client.install_interceptor(move |_| first.borrow_mut().push("first"));
    let second = Rc::clone(&calls);
    client.install_interceptor(move |_| second.borrow_mut().push("second"));
    block_on(client.get_record("/x", |_| {}, None));

    assert_eq!(calls.borrow().as_slice(), ["second"]);
}

#[test]
fn interceptor_is_skipped_for_successful_responses() {
    let client = HttpClient::new(FakeTransport::replying([ok(Value::Null)]));
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    client.install_interceptor(move |_| *counter.borrow_mut() += 1);
    block_on(client.get_record("/x", |_| {}, None));
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn send_raw_does_not_run_interceptor() {
    let client = HttpClient::new(FakeTransport::status(404, Value::Null));
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    client.install_interceptor(move |_| *counter.borrow_mut() += 1);
    let result = block_on(client.send_raw(Method::Post, "/auth", None));
    assert_eq!(result.expect_err("404").status(), Some(404));
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn response_json_reports_decode_errors() {
    let resp = HttpResponse { status: 200, body: json!({ "count": "many" }) };
    #[derive(serde::Deserialize, Debug)]
    struct Count {
        #[allow(dead_code)]
        count: u32,
    }
    assert!(matches!(resp.json::<Count>(), Err(HttpError::Decode(_))));
}

#[test]
fn parse_body_handles_empty_json_and_text() {
    assert_eq!(parse_body(""), Value::Null);
    assert_eq!(parse_body("{\"a\":1}"), json!({ "a": 1 }));
    assert_eq!(parse_body("Internal Server Error"), json!("Internal Server Error"));
}

#[cfg(not(feature = "csr"))]
#[test]
fn fetch_transport_fails_outside_browser() {
    let client = HttpClient::new(FetchTransport);
    let result = block_on(client.send(Method::Get, "/x", None));
    assert!(matches!(result, Err(HttpError::Transport(_))));
}
