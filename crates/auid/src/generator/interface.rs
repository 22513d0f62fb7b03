use crate::{Auid, GeneratorError, IdGenStatus};

/// The minting surface application code depends on.
///
/// Implemented by [`AuidFactory`](crate::AuidFactory) for every clock, so
/// services can take a `&dyn AuidGenerator` or a generic `G: AuidGenerator`
/// and swap in a factory driven by a manual clock in tests.
pub trait AuidGenerator {
    /// Mints the next identifier, waiting out sequence exhaustion.
    ///
    /// # Errors
    ///
    /// See [`GeneratorError`].
    fn new_id(&self) -> Result<Auid, GeneratorError>;

    /// Attempts to mint without waiting.
    ///
    /// # Errors
    ///
    /// See [`GeneratorError`].
    fn try_poll_id(&self) -> Result<IdGenStatus, GeneratorError>;
}
