//! Mutation Dispatcher
//!
//! Loads the catalog and issues create/update/delete requests, reporting
//! every outcome as an [`Action`] so the store never goes stale.

#[cfg(test)]
mod tests;

use leptos::logging::{error, log};

use crate::api::{ProductClient, Transport};
use crate::form::ProductDraft;
use crate::models::Product;
use crate::store::{Action, ViewState};

/// Synchronous yes/no prompt shown before destructive actions
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm`; answers "no" when there is no window
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub fn delete_prompt(product: &Product) -> String {
    format!("Are you sure you want to delete [{}]?", product.name)
}

pub struct MutationDispatcher<T, C> {
    client: ProductClient<T>,
    confirm: C,
}

impl<T: Transport, C: Confirm> MutationDispatcher<T, C> {
    pub fn new(client: ProductClient<T>, confirm: C) -> Self {
        Self { client, confirm }
    }

    #[cfg(test)]
    pub fn client(&self) -> &ProductClient<T> {
        &self.client
    }

    /// Fetch the whole collection
    pub async fn load(&self, dispatch: impl Fn(Action)) {
        dispatch(Action::LoadStarted);
        match self.client.list().await {
            Ok(products) => {
                log!("[CATALOG] Loaded {} products", products.len());
                dispatch(Action::LoadSucceeded(products));
            }
            Err(e) => {
                error!("[CATALOG] Failed to load products: {}", e);
                dispatch(Action::LoadFailed(e));
            }
        }
    }

    /// Create or update depending on which modal is open
    pub async fn submit(&self, view: &ViewState, draft: &ProductDraft, dispatch: impl Fn(Action)) {
        let id = match view {
            ViewState::Closed => return,
            ViewState::AddOpen => None,
            ViewState::EditOpen(id) => Some(id.clone()),
        };

        let origin = view.clone();
        dispatch(Action::SubmitStarted);

        let payload = match draft.to_payload(id.clone()) {
            Ok(payload) => payload,
            Err(error) => {
                dispatch(Action::SubmitFailed { origin, error });
                return;
            }
        };

        let result = match &id {
            None => self.client.create(&payload).await.map(|created| match created {
                Some(product) => Action::ProductCreated { origin: origin.clone(), product },
                None => Action::CreateAccepted { origin: origin.clone() },
            }),
            Some(id) => self
                .client
                .update(id, &payload)
                .await
                .map(|product| Action::ProductUpdated { origin: origin.clone(), product }),
        };

        match result {
            Ok(action) => {
                log!("[CATALOG] Saved product {}", payload.code);
                let refetch = matches!(action, Action::CreateAccepted { .. });
                dispatch(action);
                // The server id is unknown until the list is fetched again
                if refetch {
                    self.load(&dispatch).await;
                }
            }
            Err(error) => {
                error!("[CATALOG] Failed to save product {}: {}", payload.code, error);
                dispatch(Action::SubmitFailed { origin, error });
            }
        }
    }

    /// Returns false when the user declined and nothing was sent
    pub async fn delete(&self, product: &Product, dispatch: impl Fn(Action)) -> bool {
        if !self.confirm.confirm(&delete_prompt(product)) {
            return false;
        }

        match self.client.delete(&product.id).await {
            Ok(body) => {
                log!("[CATALOG] Deleted product {}: {}", product.id, body);
                dispatch(Action::ProductDeleted(product.id.clone()));
            }
            Err(e) => {
                error!("[CATALOG] Failed to delete product {}: {}", product.id, e);
                dispatch(Action::DeleteFailed(e));
            }
        }
        true
    }
}
