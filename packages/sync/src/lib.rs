//! # Orgtree Sync
//!
//! Keeps the local forest in step with a remote document store.
//!
//! ```text
//! Intent ──▶ HierarchySession ──▶ DocumentStore (list/create/patch/delete)
//!                  │                     │
//!                  │◀──── confirmed ─────┘
//!                  ▼
//!        Mutation::apply(forest) ──▶ new canonical forest
//! ```
//!
//! Local state only changes after the store confirms a write. A failed call
//! is logged and leaves both the forest and the form exactly as they were.
//!
//! ## Usage
//!
//! ```rust
//! use orgtree_sync::{HierarchySession, MemoryStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), orgtree_sync::SyncError> {
//! let mut session = HierarchySession::new(Arc::new(MemoryStore::new()));
//! session.load().await?;
//!
//! session.set_child_name("Engineering");
//! session.submit().await?;
//!
//! assert_eq!(session.view().tree[0].breadcrumb, "Engineering");
//! # Ok(())
//! # }
//! ```

mod errors;
pub mod form;
mod intent;
mod session;
pub mod store;

pub use errors::{StoreError, SyncError, ValidationErrors};
pub use form::{FormMode, FormState};
pub use intent::{Intent, SessionView, SyncOutcome};
pub use session::HierarchySession;
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreConfig, StoreOp};

#[cfg(feature = "firestore")]
pub use store::{FirestoreConfig, FirestoreStore};

// Re-export the tree types sessions hand out
pub use orgtree_hierarchy::{Forest, Node, NodeId, Record};
