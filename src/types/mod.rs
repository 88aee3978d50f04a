//! Error node types.
//!
//! Every error built by this crate is one of these nodes, boxed as a
//! [`BoxError`]. Nodes link to their cause through
//! [`std::error::Error::source`], forming the wrap chain that
//! [`crate::chain`] walks.
//!
//! | Node | Carries a status | Public message | Cause |
//! |------|------------------|----------------|-------|
//! | [`Status`](crate::Status) | yes | no | none |
//! | [`WrappedError`] | yes | no | any error |
//! | [`PublicError`] | yes | yes | none |
//! | [`PanicError`] | no | no | the panic payload, when it was an error |
//! | [`Exposed`] | no | yes | a caller type implementing [`Public`](crate::Public) |

pub mod exposed;
pub mod panic_error;
pub mod public_error;
pub mod wrapped_error;

pub use exposed::{expose, Exposed};
pub use panic_error::PanicError;
pub use public_error::PublicError;
pub use wrapped_error::WrappedError;

/// Type-erased error returned by handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result returned by handlers: `Ok(())` on success, any error otherwise.
pub type HandlerResult = Result<(), BoxError>;
