//! Capability and extension traits.
//!
//! - [`Public`]: the public-message capability read by
//!   [`public_message`](crate::public_message)
//! - [`ResultExt`]: attach a status or a public message to the `Err` of any
//!   `Result`

pub mod public;
pub mod result_ext;

pub use public::Public;
pub use result_ext::ResultExt;
