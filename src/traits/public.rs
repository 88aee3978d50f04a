/// Errors that carry a message safe to show to the client.
///
/// [`PublicError`](crate::PublicError) implements this. Your own types can too,
/// and become visible to [`public_message`](crate::public_message) once wrapped
/// with [`expose`](crate::expose).
pub trait Public {
    /// Returns the message that may be written into a response body.
    fn public_message(&self) -> &str;
}
