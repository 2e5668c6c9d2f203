//! Breadfund Application Layer
//!
//! The facade a UI calls into. It holds the mock wallet session, resolves
//! pool ids against the ledger store, stamps every operation with the
//! injected clock, and maps layered errors onto the public [`AppError`]
//! taxonomy.

pub mod app;
pub mod config;
pub mod error;
pub mod session;
pub mod views;

pub use app::BreadfundApp;
pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use session::{Identity, Session};
pub use views::{PoolSummary, PremiumOverview, TokenInfo};
