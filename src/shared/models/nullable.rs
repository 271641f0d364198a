//! Clearable fields of update requests
//!
//! An update request leaves a field alone when it is absent and sets the
//! column to NULL when it is an explicit `null`. Such fields are typed
//! `Option<Option<T>>` and annotated with
//!
//! ```rust,ignore
//! #[serde(default, skip_serializing_if = "Option::is_none", with = "super::nullable")]
//! ```
//!
//! | JSON | Value |
//! |------|-------|
//! | field missing | `None` |
//! | `null` | `Some(None)` |
//! | a value | `Some(Some(value))` |

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    value.as_ref().and_then(Option::as_ref).serialize(serializer)
}
