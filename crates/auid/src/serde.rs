//! Serde adapters.
//!
//! [`Auid`] serializes as its 11 character string and deserializes through
//! the strict parser. For integer columns, use the field adapters:
//!
//! ```
//! use auid::Auid;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Expense {
//!     id: Auid,
//!     #[serde(with = "auid::serde::as_native")]
//!     party_id: Auid,
//!     #[serde(with = "auid::serde::as_native_nullable")]
//!     parent_id: Auid,
//! }
//! ```

use core::fmt;

use ::serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::Auid;

impl Serialize for Auid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.as_str())
    }
}

struct AuidVisitor;

impl Visitor<'_> for AuidVisitor {
    type Value = Auid;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an 11 character base62 identifier")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Auid::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Auid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(AuidVisitor)
    }
}

/// (De)serializes an [`Auid`] as its raw `i64`, for `BIGINT` columns.
pub mod as_native {
    use super::{Auid, Deserialize, Deserializer, Serialize, Serializer, de};

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Auid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_i64().serialize(s)
    }

    /// # Errors
    ///
    /// Fails on negative values, or if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<Auid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = i64::deserialize(d)?;
        Auid::try_from(n).map_err(de::Error::custom)
    }
}

/// Like [`as_native`], for nullable columns: `null` maps to [`Auid::EMPTY`]
/// and back.
pub mod as_native_nullable {
    use super::{Auid, Deserialize, Deserializer, Serialize, Serializer, de};

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Auid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = (!id.is_empty()).then(|| id.to_i64());
        value.serialize(s)
    }

    /// # Errors
    ///
    /// Fails on negative values, or if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<Auid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = Option::<i64>::deserialize(d)?;
        Auid::from_nullable(n).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        id: Auid,
        #[serde(with = "as_native")]
        party_id: Auid,
        #[serde(with = "as_native_nullable")]
        parent_id: Auid,
    }

    #[test]
    fn string_and_native_fields() {
        let row = Row {
            id: Auid::try_from(42_u64).unwrap(),
            party_id: Auid::try_from(4_194_347_015_u64).unwrap(),
            parent_id: Auid::try_from(7_u64).unwrap(),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            json!({"id": "0000000000g", "party_id": 4_194_347_015_i64, "parent_id": 7})
        );
        let back: Row = serde_json::from_value(value).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn null_maps_to_empty_and_back() {
        let row: Row =
            serde_json::from_value(json!({"id": "00000000001", "party_id": 1, "parent_id": null}))
                .unwrap();
        assert!(row.parent_id.is_empty());
        assert_eq!(serde_json::to_value(&row).unwrap()["parent_id"], json!(null));
    }

    #[test]
    fn strict_parser_errors_surface() {
        let err = serde_json::from_value::<Auid>(json!("00000")).unwrap_err();
        assert_eq!(err.to_string(), ParseError::invalid_length(5).to_string());

        let err = serde_json::from_value::<Auid>(json!(42)).unwrap_err();
        assert!(err.to_string().contains("an 11 character base62 identifier"));
    }

    #[test]
    fn negative_native_values_are_rejected() {
        let err = serde_json::from_value::<Row>(json!({
            "id": "00000000001",
            "party_id": -1,
            "parent_id": null
        }))
        .unwrap_err();
        assert!(err.to_string().contains("sign bit"));
    }
}
