//! Notice Bar Component
//!
//! Load errors with a retry button, plus mutation results.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_catalog_store, Action, CatalogStateStoreFields, LoadState, Notice};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_catalog_store();

    let load_error = move || {
        store.load().with(|l| match l {
            LoadState::Failed(e) => Some(e.to_string()),
            _ => None,
        })
    };

    view! {
        {move || load_error().map(|msg| view! {
            <div class="notice error">
                <span>"Could not load products: " {msg}</span>
                <button type="button" on:click=move |_| ctx.reload()>"Retry"</button>
            </div>
        })}
        {move || store.notice().get().map(|notice| {
            let (class, msg) = match notice {
                Notice::Success(msg) => ("notice success", msg),
                Notice::Error(msg) => ("notice error", msg),
            };
            view! {
                <div class=class>
                    <span>{msg}</span>
                    <button type="button" on:click=move |_| ctx.dispatch(Action::DismissNotice)>"×"</button>
                </div>
            }
        })}
    }
}
