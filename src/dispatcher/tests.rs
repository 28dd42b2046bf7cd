//! Dispatcher Tests
//!
//! Drives the dispatcher against a recording transport and feeds the
//! resulting actions through the real reducer.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::json;

use super::*;
use crate::api::{ApiError, ApiRequest, ApiResponse, Method};
use crate::form::DraftField;
use crate::store::{CatalogState, LoadState};

#[derive(Default)]
struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingTransport {
    fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.reply_raw(status, &body.to_string())
    }

    fn reply_raw(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    fn fail(self, error: ApiError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".into())))
    }
}

struct FixedConfirm {
    answer: bool,
    asked: RefCell<Vec<String>>,
}

impl FixedConfirm {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

fn dispatcher(
    transport: RecordingTransport,
    answer: bool,
) -> MutationDispatcher<RecordingTransport, FixedConfirm> {
    MutationDispatcher::new(
        ProductClient::new("http://api.test", transport),
        FixedConfirm::new(answer),
    )
}

fn requests(d: &MutationDispatcher<RecordingTransport, FixedConfirm>) -> Vec<ApiRequest> {
    d.client().transport().requests.borrow().clone()
}

fn body(request: &ApiRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

fn widget() -> Product {
    Product {
        id: "abc".into(),
        code: "P1".into(),
        name: "Widget".into(),
        price: 9.99,
    }
}

#[tokio::test]
async fn test_load_fills_state() {
    let d = dispatcher(
        RecordingTransport::default().reply(
            200,
            json!([
                { "_id": "1", "code": "A", "name": "Alpha", "price": 1 },
                { "_id": "2", "code": "B", "name": "Beta", "price": "2.5" },
                { "_id": "3", "code": "C", "name": "Gamma", "price": 3 }
            ]),
        ),
        true,
    );
    let state = RefCell::new(CatalogState::default());

    d.load(|a| state.borrow_mut().apply(a)).await;

    let state = state.into_inner();
    assert_eq!(state.load, LoadState::Loaded);
    let rows = state.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].code, "B");
    assert_eq!(rows[1].name, "Beta");
    assert_eq!(rows[1].price, "2.5");

    let sent = requests(&d);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "http://api.test/products");
}

#[tokio::test]
async fn test_load_server_error() {
    let d = dispatcher(RecordingTransport::default().reply_raw(503, "maintenance"), true);
    let state = RefCell::new(CatalogState::default());

    d.load(|a| state.borrow_mut().apply(a)).await;

    assert_eq!(
        state.borrow().load,
        LoadState::Failed(ApiError::Server {
            status: 503,
            message: Some("maintenance".into())
        })
    );
}

#[tokio::test]
async fn test_load_bad_json() {
    let d = dispatcher(RecordingTransport::default().reply_raw(200, "<html>"), true);
    let state = RefCell::new(CatalogState::default());

    d.load(|a| state.borrow_mut().apply(a)).await;

    assert!(matches!(state.borrow().load, LoadState::Failed(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_add_posts_payload_and_appends() {
    let d = dispatcher(
        RecordingTransport::default().reply(
            201,
            json!({ "_id": "new", "code": "P1", "name": "Widget", "price": 9.99 }),
        ),
        true,
    );
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::OpenAdd);
    for (field, value) in [
        (DraftField::Code, "P1"),
        (DraftField::Name, "Widget"),
        (DraftField::Price, "9.99"),
    ] {
        state.borrow_mut().apply(Action::EditField(field, value.into()));
    }

    let (view, draft) = {
        let s = state.borrow();
        (s.view.clone(), s.form.draft.clone())
    };
    d.submit(&view, &draft, |a| state.borrow_mut().apply(a)).await;

    let sent = requests(&d);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://api.test/products");
    assert_eq!(body(&sent[0]), json!({ "code": "P1", "name": "Widget", "price": 9.99 }));

    let state = state.into_inner();
    assert_eq!(state.view, ViewState::Closed);
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].id, "new");
}

#[tokio::test]
async fn test_add_with_acknowledgement_reloads_list() {
    let d = dispatcher(
        RecordingTransport::default()
            .reply(201, json!({ "acknowledged": true, "insertedId": "new" }))
            .reply(
                200,
                json!([{ "_id": "new", "code": "P1", "name": "Widget", "price": 9.99 }]),
            ),
        true,
    );
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::OpenAdd);

    let draft = ProductDraft {
        code: "P1".into(),
        name: "Widget".into(),
        price: "9.99".into(),
    };
    d.submit(&ViewState::AddOpen, &draft, |a| state.borrow_mut().apply(a)).await;

    let sent = requests(&d);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[1].method, Method::Get);

    let state = state.into_inner();
    assert_eq!(state.view, ViewState::Closed);
    assert_eq!(state.form.error, None);
    assert_eq!(state.load, LoadState::Loaded);
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].id, "new");
}

#[tokio::test]
async fn test_update_puts_original_id_with_new_name() {
    let d = dispatcher(
        RecordingTransport::default().reply(
            200,
            json!({ "_id": "abc", "code": "P1", "name": "Gizmo", "price": 9.99 }),
        ),
        true,
    );
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::LoadSucceeded(vec![widget()]));
    state.borrow_mut().apply(Action::OpenEdit(widget()));
    state
        .borrow_mut()
        .apply(Action::EditField(DraftField::Name, "Gizmo".into()));

    let (view, draft) = {
        let s = state.borrow();
        (s.view.clone(), s.form.draft.clone())
    };
    d.submit(&view, &draft, |a| state.borrow_mut().apply(a)).await;

    let sent = requests(&d);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].url, "http://api.test/products");
    let sent_body = body(&sent[0]);
    assert_eq!(sent_body["id"], "abc");
    assert_eq!(sent_body["name"], "Gizmo");

    let state = state.into_inner();
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].name, "Gizmo");
    assert_eq!(state.view, ViewState::Closed);
}

#[tokio::test]
async fn test_update_without_echo_patches_locally() {
    let d = dispatcher(RecordingTransport::default().reply(200, json!({ "ok": 1 })), true);
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::LoadSucceeded(vec![widget()]));

    let draft = ProductDraft {
        price: "12".into(),
        ..ProductDraft::from_product(&widget())
    };
    d.submit(&ViewState::EditOpen("abc".into()), &draft, |a| state.borrow_mut().apply(a))
        .await;

    assert_eq!(state.borrow().products, vec![Product { price: 12.0, ..widget() }]);
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let d = dispatcher(RecordingTransport::default(), true);
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::OpenAdd);

    let draft = ProductDraft {
        code: "P1".into(),
        name: "Widget".into(),
        price: "cheap".into(),
    };
    d.submit(&ViewState::AddOpen, &draft, |a| state.borrow_mut().apply(a)).await;

    assert!(requests(&d).is_empty());
    let state = state.into_inner();
    assert_eq!(state.view, ViewState::AddOpen);
    assert_eq!(
        state.form.error,
        Some(ApiError::Validation { field: DraftField::Price })
    );
}

#[tokio::test]
async fn test_submit_error_keeps_modal_open() {
    let d = dispatcher(
        RecordingTransport::default().fail(ApiError::Network("refused".into())),
        true,
    );
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::OpenAdd);

    let draft = ProductDraft {
        code: "P1".into(),
        name: "Widget".into(),
        price: "1".into(),
    };
    d.submit(&ViewState::AddOpen, &draft, |a| state.borrow_mut().apply(a)).await;

    let state = state.into_inner();
    assert_eq!(state.view, ViewState::AddOpen);
    assert!(!state.form.submitting);
    assert_eq!(state.form.error, Some(ApiError::Network("refused".into())));
    assert!(state.products.is_empty());
}

#[tokio::test]
async fn test_submit_when_closed_is_noop() {
    let d = dispatcher(RecordingTransport::default(), true);
    let dispatched = Cell::new(0);

    d.submit(&ViewState::Closed, &ProductDraft::default(), |_| {
        dispatched.set(dispatched.get() + 1)
    })
    .await;

    assert_eq!(dispatched.get(), 0);
    assert!(requests(&d).is_empty());
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let d = dispatcher(RecordingTransport::default(), false);
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::LoadSucceeded(vec![widget()]));

    let sent = d.delete(&widget(), |a| state.borrow_mut().apply(a)).await;

    assert!(!sent);
    assert!(requests(&d).is_empty());
    assert_eq!(
        d.confirm.asked.borrow().as_slice(),
        ["Are you sure you want to delete [Widget]?"]
    );
    assert_eq!(state.borrow().products.len(), 1);
}

#[tokio::test]
async fn test_accepted_delete_sends_one_request() {
    let d = dispatcher(
        RecordingTransport::default().reply(200, json!({ "deletedCount": 1 })),
        true,
    );
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::LoadSucceeded(vec![widget()]));

    let sent = d.delete(&widget(), |a| state.borrow_mut().apply(a)).await;

    assert!(sent);
    let sent = requests(&d);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Delete);
    assert_eq!(sent[0].url, "http://api.test/products/abc");
    assert_eq!(sent[0].body, None);
    assert!(state.borrow().products.is_empty());
}

#[tokio::test]
async fn test_delete_empty_body_is_success() {
    let d = dispatcher(RecordingTransport::default().reply_raw(204, ""), true);
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::LoadSucceeded(vec![widget()]));

    d.delete(&widget(), |a| state.borrow_mut().apply(a)).await;

    assert!(state.borrow().products.is_empty());
}

#[tokio::test]
async fn test_delete_failure_keeps_product() {
    let d = dispatcher(RecordingTransport::default().reply_raw(500, "oops"), true);
    let state = RefCell::new(CatalogState::default());
    state.borrow_mut().apply(Action::LoadSucceeded(vec![widget()]));

    d.delete(&widget(), |a| state.borrow_mut().apply(a)).await;

    let state = state.into_inner();
    assert_eq!(state.products, vec![widget()]);
    assert!(matches!(state.notice, Some(crate::store::Notice::Error(_))));
}
