//! Repository store for the configured account.

mod error;
mod pagination;
mod state;
mod store;

pub use pagination::Pagination;
pub use store::{RepoStore, StoreSettings};
