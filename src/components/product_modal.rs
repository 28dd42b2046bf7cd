//! Product Modal Component
//!
//! Add/update dialog. The backdrop does not dismiss it; only Close, the
//! header button or a successful submit do.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::AppContext;
use crate::form::DraftField;
use crate::store::{use_catalog_store, CatalogStateStoreFields, ViewState};

#[component]
pub fn ProductModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_catalog_store();

    let is_open = move || store.view().with(|v| v.is_open());
    let is_add = move || store.view().with(|v| *v == ViewState::AddOpen);
    let submitting = move || store.form().with(|f| f.submitting);
    let form_error = move || store.form().with(|f| f.error.as_ref().map(|e| e.to_string()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.submit();
    };

    view! {
        <Show when=is_open>
            <div class="modal-backdrop">
                <div class="modal" role="dialog">
                    <div class="modal-header">
                        <h2 class="modal-title">
                            {move || if is_add() { "Add new product" } else { "Update Product" }}
                        </h2>
                        <button type="button" class="close-btn" on:click=move |_| ctx.close()>"×"</button>
                    </div>
                    <form class="modal-body" on:submit=on_submit>
                        {DraftField::ALL.into_iter().map(move |field| view! {
                            <div class="form-row">
                                <label>{field.label()}</label>
                                <input
                                    type=field.input_type()
                                    prop:value=move || store.form().with(|f| f.draft.get(field).to_string())
                                    on:input=move |ev| {
                                        let Some(input) = ev.target()
                                            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                                        else { return };
                                        ctx.edit_field(field, input.value());
                                    }
                                />
                            </div>
                        }).collect_view()}

                        {move || form_error().map(|msg| view! {
                            <p class="form-error">{msg}</p>
                        })}

                        <div class="modal-footer">
                            <button type="button" class="btn secondary" on:click=move |_| ctx.close()>
                                "Close"
                            </button>
                            <button type="submit" class="btn primary" disabled=submitting>
                                {move || if is_add() { "Add" } else { "Update" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
