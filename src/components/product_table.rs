//! Product Table Component
//!
//! One row per product with edit/delete icons.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::ProductRow;
use crate::store::{use_catalog_store, CatalogStateStoreFields, LoadState};

#[component]
pub fn ProductTable() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_catalog_store();

    let rows = move || store.with(|s| s.rows());
    let is_loading = move || store.load().with(|l| *l == LoadState::Loading);
    let is_empty = move || store.load().with(|l| *l == LoadState::Loaded) && store.products().with(|p| p.is_empty());

    // Look up the full product when an icon is clicked
    let find = move |id: &str| store.products().with_untracked(|p| p.iter().find(|p| p.id == id).cloned());

    view! {
        <table class="product-table">
            <thead>
                <tr>
                    <th class="icon-col">" "</th>
                    <th class="text-center">"Code"</th>
                    <th class="text-center">"Name"</th>
                    <th class="text-center">"Price/Unit"</th>
                </tr>
            </thead>
            <tbody>
                <Show when=is_loading>
                    <tr class="status-row"><td colspan="4">"Loading products..."</td></tr>
                </Show>
                <Show when=is_empty>
                    <tr class="status-row"><td colspan="4">"No products"</td></tr>
                </Show>
                // Key on every displayed field so edits re-render the row
                <For
                    each=rows
                    key=|row: &ProductRow| (row.id.clone(), row.code.clone(), row.name.clone(), row.price.clone())
                    children=move |row: ProductRow| {
                        let edit_id = row.id.clone();
                        let delete_id = row.id.clone();
                        view! {
                            <tr>
                                <td class="icon-col">
                                    <span
                                        class="icon edit-icon"
                                        title="Edit"
                                        on:click=move |_| {
                                            if let Some(product) = find(&edit_id) {
                                                ctx.open_edit(product);
                                            }
                                        }
                                    >
                                        "✎"
                                    </span>
                                    <span
                                        class="icon delete-icon"
                                        title="Delete"
                                        on:click=move |_| {
                                            if let Some(product) = find(&delete_id) {
                                                ctx.delete(product);
                                            }
                                        }
                                    >
                                        "🗑"
                                    </span>
                                </td>
                                <td>{row.code}</td>
                                <td>{row.name}</td>
                                <td>{row.price}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
