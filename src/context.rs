//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{FetchTransport, ProductClient};
use crate::config::ApiConfig;
use crate::dispatcher::{BrowserConfirm, MutationDispatcher};
use crate::form::DraftField;
use crate::models::Product;
use crate::store::{store_dispatch, Action, CatalogStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    store: CatalogStore,
    config: StoredValue<ApiConfig>,
}

impl AppContext {
    pub fn new(store: CatalogStore, config: ApiConfig) -> Self {
        Self {
            store,
            config: StoredValue::new(config),
        }
    }

    pub fn base_url(&self) -> String {
        self.config.with_value(|c| c.base_url.clone())
    }

    fn dispatcher(&self) -> MutationDispatcher<FetchTransport, BrowserConfirm> {
        MutationDispatcher::new(ProductClient::new(self.base_url(), FetchTransport), BrowserConfirm)
    }

    pub fn dispatch(&self, action: Action) {
        store_dispatch(&self.store, action);
    }

    /// Fetch the product list from the backend
    pub fn reload(&self) {
        let ctx = *self;
        spawn_local(async move {
            ctx.dispatcher().load(move |a| ctx.dispatch(a)).await;
        });
    }

    pub fn open_add(&self) {
        self.dispatch(Action::OpenAdd);
    }

    pub fn open_edit(&self, product: Product) {
        self.dispatch(Action::OpenEdit(product));
    }

    pub fn close(&self) {
        self.dispatch(Action::Close);
    }

    pub fn edit_field(&self, field: DraftField, value: String) {
        self.dispatch(Action::EditField(field, value));
    }

    /// Submit the open form as a create or an update
    pub fn submit(&self) {
        let ctx = *self;
        let (view, draft, busy) = self.store.with_untracked(|s| {
            (s.view.clone(), s.form.draft.clone(), s.form.submitting)
        });
        if busy {
            return;
        }
        spawn_local(async move {
            ctx.dispatcher()
                .submit(&view, &draft, move |a| ctx.dispatch(a))
                .await;
        });
    }

    /// Ask for confirmation, then delete
    pub fn delete(&self, product: Product) {
        let ctx = *self;
        spawn_local(async move {
            ctx.dispatcher()
                .delete(&product, move |a| ctx.dispatch(a))
                .await;
        });
    }
}
