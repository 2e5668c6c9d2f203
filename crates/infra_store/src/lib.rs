//! Ledger Store
//!
//! In-memory home of every Breadfund pool. The store is the single source of
//! truth: callers only ever see snapshots, and every change goes through
//! [`LedgerStore::mutate`].
//!
//! # Concurrency
//!
//! A `tokio::sync::RwLock` guards the pool index and each pool sits behind
//! its own `tokio::sync::Mutex`. Mutations of one pool are serialized;
//! mutations of different pools run independently.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{LedgerStore, seed_demo_data};
//!
//! let store = LedgerStore::new();
//! let demo = seed_demo_data(&store).await?;
//! let snapshot = store.get(demo).await?;
//! ```

pub mod ledger;
pub mod error;
pub mod seed;

pub use ledger::LedgerStore;
pub use error::StoreError;
pub use seed::{seed_demo_data, demo_user};
