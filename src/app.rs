//! Product Admin App
//!
//! Single screen: product table, add button and the shared add/update modal.

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{NoticeBar, ProductModal, ProductTable};
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::store::{Action, CatalogState, CatalogStateStoreFields, Notice};

const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(CatalogState::default());
    let ctx = AppContext::new(store, ApiConfig::from_env());

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load products on mount
    ctx.reload();

    // Success notices clear themselves unless replaced in the meantime
    Effect::new(move |_| {
        if let Some(notice @ Notice::Success(_)) = store.notice().get() {
            spawn_local(async move {
                sleep(NOTICE_TIMEOUT).await;
                if store.notice().get_untracked().as_ref() == Some(&notice) {
                    ctx.dispatch(Action::DismissNotice);
                }
            });
        }
    });

    let base_url = ctx.base_url();

    view! {
        <div class="container">
            <p class="api-url">"API_URL: " {base_url}</p>
            <h1>"Product Management"</h1>
            <NoticeBar />
            <button type="button" class="btn outline-success" on:click=move |_| ctx.open_add()>
                "Add"
            </button>
            <ProductTable />
        </div>
        <ProductModal />
    }
}
