//! Name generator port for producing candidate usernames.

/// Produces the username sent with each request.
///
/// Abstracting name generation lets a run reuse a recorded sequence of
/// names instead of drawing fresh random ones.
pub trait NameGenerator: Send + Sync {
    /// Returns the next username.
    fn generate_name(&self) -> String;
}
