//! Memo storage for gote-core
//!
//! Memos live in a single SQLite table. Deletion is a soft delete: the
//! row keeps its data and gets a `deleted_at` tombstone, and every read
//! in [`MemoStore`] skips tombstoned rows.

mod store;
mod types;

pub use store::MemoStore;
pub use types::{validate_title, Memo};
