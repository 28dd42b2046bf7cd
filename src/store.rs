//! Catalog State Store
//!
//! One explicit state value for the screen, changed only through [`Action`]s.
//! Wrapped in a `reactive_stores::Store` for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiError;
use crate::form::{DraftField, ProductDraft};
use crate::models::{product_rows, Product, ProductRow};

/// Which modal (if any) is open
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Closed,
    AddOpen,
    EditOpen(String),
}

impl ViewState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ViewState::Closed)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(ApiError),
}

/// Banner shown above the table
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Modal form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: ProductDraft,
    pub error: Option<ApiError>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    LoadSucceeded(Vec<Product>),
    LoadFailed(ApiError),
    OpenAdd,
    OpenEdit(Product),
    Close,
    EditField(DraftField, String),
    SubmitStarted,
    /// Submit outcomes name the modal they were sent from; a different or
    /// reopened modal is left alone
    SubmitFailed { origin: ViewState, error: ApiError },
    ProductCreated { origin: ViewState, product: Product },
    /// Created, but the response did not describe the product
    CreateAccepted { origin: ViewState },
    ProductUpdated { origin: ViewState, product: Product },
    ProductDeleted(String),
    DeleteFailed(ApiError),
    DismissNotice,
}

/// Screen state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    /// Products as last confirmed by the server
    pub products: Vec<Product>,
    pub load: LoadState,
    pub view: ViewState,
    pub form: FormState,
    pub notice: Option<Notice>,
}

impl CatalogState {
    pub fn rows(&self) -> Vec<ProductRow> {
        product_rows(&self.products)
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadStarted => {
                self.load = LoadState::Loading;
            }
            Action::LoadSucceeded(products) => {
                self.products = products;
                self.load = LoadState::Loaded;
            }
            Action::LoadFailed(err) => {
                self.products.clear();
                self.load = LoadState::Failed(err);
            }
            Action::OpenAdd => {
                if !self.view.is_open() {
                    self.view = ViewState::AddOpen;
                    self.form = FormState::default();
                }
            }
            Action::OpenEdit(product) => {
                if !self.view.is_open() {
                    self.form = FormState {
                        draft: ProductDraft::from_product(&product),
                        ..FormState::default()
                    };
                    self.view = ViewState::EditOpen(product.id);
                }
            }
            Action::Close => self.close_modal(),
            Action::EditField(field, value) => {
                if self.view.is_open() {
                    self.form.draft.set(field, value);
                }
            }
            Action::SubmitStarted => {
                self.form.submitting = true;
                self.form.error = None;
            }
            Action::SubmitFailed { origin, error } => {
                if self.awaiting(&origin) {
                    self.form.submitting = false;
                    self.form.error = Some(error);
                }
            }
            Action::ProductCreated { origin, product } => {
                self.products.push(product);
                self.finish_submit(&origin, "Product added");
            }
            Action::CreateAccepted { origin } => {
                self.finish_submit(&origin, "Product added");
            }
            Action::ProductUpdated { origin, product } => {
                match self.products.iter_mut().find(|p| p.id == product.id) {
                    Some(existing) => *existing = product,
                    None => self.products.push(product),
                }
                self.finish_submit(&origin, "Product updated");
            }
            Action::ProductDeleted(id) => {
                self.products.retain(|p| p.id != id);
                self.close_modal();
                self.notice = Some(Notice::Success("Product deleted".into()));
            }
            Action::DeleteFailed(err) => {
                self.notice = Some(Notice::Error(format!("Delete failed: {}", err)));
            }
            Action::DismissNotice => {
                self.notice = None;
            }
        }
    }

    /// True while the modal that sent a submit is still open and waiting on it
    fn awaiting(&self, origin: &ViewState) -> bool {
        self.form.submitting && self.view == *origin
    }

    fn finish_submit(&mut self, origin: &ViewState, message: &str) {
        if self.awaiting(origin) {
            self.close_modal();
        }
        self.notice = Some(Notice::Success(message.into()));
    }

    fn close_modal(&mut self) {
        self.view = ViewState::Closed;
        self.form = FormState::default();
    }
}

/// Type alias for the store
pub type CatalogStore = Store<CatalogState>;

/// Get the catalog store from context
pub fn use_catalog_store() -> CatalogStore {
    expect_context::<CatalogStore>()
}

/// Apply an action to the store
pub fn store_dispatch(store: &CatalogStore, action: Action) {
    store.update(|state| state.apply(action));
}
