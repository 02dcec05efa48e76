//! Tri-state field updates for PATCH-like request bodies.
//!
//! JSON distinguishes a field that is absent from one that is explicitly
//! `null`. [`FieldUpdate`] keeps that distinction so "leave unchanged" and
//! "clear" never collapse into the same `Option::None`.

use serde::{Deserialize, Deserializer};

/// Intent for a single optional field in an update request.
///
/// Use together with `#[serde(default)]` on the containing struct field:
///
/// - field absent -> [`FieldUpdate::Unchanged`]
/// - field `null` -> [`FieldUpdate::Clear`]
/// - field set -> [`FieldUpdate::Set`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// True when the request did not mention the field at all.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    /// The value to write, if any. `None` for both `Unchanged` and `Clear`.
    pub fn new_value(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Apply the intent to the current value of an optional field.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Unchanged => current,
            FieldUpdate::Clear => None,
            FieldUpdate::Set(value) => Some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absence is handled by `default`.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        })
    }
}
