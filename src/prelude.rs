//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use status_rail::prelude::*;
//!
//! fn lookup(id: &str) -> HandlerResult {
//!     id.parse::<u64>().with_status(StatusCode::BAD_REQUEST)?;
//!     Err(public_error!(StatusCode::NOT_FOUND, "no user {id}"))
//! }
//!
//! assert!(lookup("7").is_err());
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`public_error!`], [`status_error!`]
//! - **Types**: [`Status`], [`BoxError`], [`HandlerResult`], [`PanicError`]
//! - **Traits**: [`Handler`], [`ResultExt`], [`ResponseSink`]
//! - **Functions**: extraction and rendering entry points
//! - [`StatusCode`] from the `http` crate

pub use http::StatusCode;

// Macros
pub use crate::{public_error, status_error};

// Core types
pub use crate::status::Status;
pub use crate::types::{BoxError, HandlerResult, PanicError};

// Traits
pub use crate::handler::Handler;
pub use crate::response::ResponseSink;
pub use crate::traits::ResultExt;

// Functions
pub use crate::chain::{is_equivalent, public_message, status_code};
pub use crate::convert::wrap;
pub use crate::handler::handler_fn;
pub use crate::panic::catch_panic;
pub use crate::response::default_error_handler;
