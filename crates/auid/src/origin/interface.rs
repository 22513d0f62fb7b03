use crate::ConfigError;

/// Supplies the origin id a factory stamps into every identifier it mints.
///
/// Called exactly once, when the factory is built. An implementation must
/// either return a value in `0..=max_origin_id` or fail: there is no safe
/// fallback, because two factories sharing an origin id can mint duplicates.
///
/// # Example
///
/// ```
/// use auid::{ConfigError, OriginIdProvider};
///
/// struct FromEnv(u64);
///
/// impl OriginIdProvider for FromEnv {
///     fn origin_id(&self, max_origin_id: u64) -> Result<u64, ConfigError> {
///         if self.0 > max_origin_id {
///             return Err(ConfigError::OriginIdOutOfRange {
///                 origin_id: self.0,
///                 max: max_origin_id,
///             });
///         }
///         Ok(self.0)
///     }
/// }
///
/// assert_eq!(FromEnv(7).origin_id(4095), Ok(7));
/// assert!(FromEnv(4096).origin_id(4095).is_err());
/// ```
pub trait OriginIdProvider {
    /// Resolves the origin id for a layout whose origin field holds at most
    /// `max_origin_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when no valid origin id can be determined.
    fn origin_id(&self, max_origin_id: u64) -> Result<u64, ConfigError>;
}

impl<P: OriginIdProvider + ?Sized> OriginIdProvider for &P {
    fn origin_id(&self, max_origin_id: u64) -> Result<u64, ConfigError> {
        (**self).origin_id(max_origin_id)
    }
}
