use crate::{ConfigError, OriginIdProvider};

/// An externally assigned origin id, e.g. a node number from deployment
/// configuration, or a fixed value in tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstantOriginId(u64);

impl ConstantOriginId {
    pub const fn new(origin_id: u64) -> Self {
        Self(origin_id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl OriginIdProvider for ConstantOriginId {
    fn origin_id(&self, max_origin_id: u64) -> Result<u64, ConfigError> {
        if self.0 > max_origin_id {
            return Err(ConfigError::OriginIdOutOfRange {
                origin_id: self.0,
                max: max_origin_id,
            });
        }
        Ok(self.0)
    }
}
