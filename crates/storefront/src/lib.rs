//! Storefront application layer.
//!
//! Wires the domain services to persistent storage:
//! - [`Session`] restores state on startup and writes it back after every change
//! - [`SharedSession`] for hosts that call in from several threads
//! - [`Config`] read from the environment
//! - the built-in [`seed`] catalog used on first launch

pub mod config;
pub mod error;
pub mod seed;
pub mod session;

pub use config::Config;
pub use error::{AppError, Result};
pub use session::{Session, SharedSession};
