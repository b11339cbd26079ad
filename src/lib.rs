//! D-Day tracking library
//!
//! This library records named target dates, computes the signed number of
//! days between each one and today, and keeps the whole collection in a
//! single persisted JSON slot.

mod cli;
mod config;
mod date_math;
mod errors;
mod event;
mod helper;
mod render;
mod storage;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use date_math::*;
pub use errors::*;
pub use event::*;
pub use helper::*;
pub use render::*;
pub use storage::*;
pub use store::*;
pub use types::*;
