use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{PronounId, PronounSetId};
use crate::update::FieldUpdate;

/// Separator used between words of a normalized slug.
pub const SLUG_SEPARATOR: char = '-';

/// A named grouping of related pronoun forms (e.g. "she/her").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronounSet {
    pub id: PronounSetId,
    /// Display name, unique across sets.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single labeled pronoun entry belonging to exactly one set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pronoun {
    pub id: PronounId,
    pub pronoun_set_id: PronounSetId,
    /// Human-readable label as entered ("They / Them").
    pub label: String,
    /// Slug derived from `label` via [`normalize_label`]. Globally unique.
    pub value: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pronoun set together with the pronouns it owns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PronounSetDetail {
    #[serde(flatten)]
    pub set: PronounSet,
    pub pronouns: Vec<Pronoun>,
}

/// Request to create a pronoun. Required fields are optional here so that a
/// missing field surfaces as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePronounRequest {
    pub label: Option<String>,
    pub description: Option<String>,
    pub pronoun_set_id: Option<PronounSetId>,
}

/// Request to update a pronoun. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePronounRequest {
    /// New label; always triggers recomputation of `value`.
    pub label: Option<String>,
    /// `null` clears the description.
    #[serde(default)]
    pub description: FieldUpdate<String>,
    /// Relink to another set. `null` is rejected since the link is required.
    #[serde(default)]
    pub pronoun_set_id: FieldUpdate<PronounSetId>,
}

/// Column-level changes to one pronoun, applied by the store in a single
/// statement so concurrent patches of different fields never undo each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PronounPatch {
    /// New label. Always paired with `value`.
    pub label: Option<String>,
    /// Slug of the new label.
    pub value: Option<String>,
    pub description: FieldUpdate<String>,
    pub pronoun_set_id: Option<PronounSetId>,
    pub updated_at: DateTime<Utc>,
}

impl PronounPatch {
    /// A patch that only bumps `updated_at`.
    pub fn touch(updated_at: DateTime<Utc>) -> Self {
        Self {
            label: None,
            value: None,
            description: FieldUpdate::Unchanged,
            pronoun_set_id: None,
            updated_at,
        }
    }

    /// Apply to an in-memory record, column by column.
    pub fn apply(&self, pronoun: &mut Pronoun) {
        if let Some(label) = &self.label {
            pronoun.label = label.clone();
        }
        if let Some(value) = &self.value {
            pronoun.value = value.clone();
        }
        pronoun.description = self.description.clone().apply_to(pronoun.description.take());
        if let Some(set_id) = self.pronoun_set_id {
            pronoun.pronoun_set_id = set_id;
        }
        pronoun.updated_at = self.updated_at;
    }
}

/// Request to create a pronoun set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePronounSetRequest {
    pub name: Option<String>,
}

/// Normalize a human-readable label into a storage-safe slug.
///
/// Rules:
/// - Lowercase
/// - Whitespace runs and hyphens become separators
/// - Everything that is not ASCII alphanumeric or a separator is dropped
/// - Consecutive separators collapse into one, leading/trailing ones are trimmed
///
/// The output only contains `[a-z0-9]` and single interior hyphens, so the
/// function is idempotent. Blank input yields an empty string.
///
/// # Examples
///
/// ```
/// use pronouns_types::pronoun::normalize_label;
///
/// assert_eq!(normalize_label("She / Her"), "she-her");
/// assert_eq!(normalize_label("They/Them"), "theythem");
/// assert_eq!(normalize_label("   "), "");
/// ```
pub fn normalize_label(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.to_lowercase().chars() {
        if c.is_whitespace() || c == SLUG_SEPARATOR {
            pending_separator = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_separator && !result.is_empty() {
                result.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            result.push(c);
        }
    }

    result
}
