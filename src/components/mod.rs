//! UI Components
//!
//! Leptos components for the catalog screen.

mod notice_bar;
mod product_modal;
mod product_table;

pub use notice_bar::NoticeBar;
pub use product_modal::ProductModal;
pub use product_table::ProductTable;
