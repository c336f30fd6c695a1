//! The per-user profile document and the edits that can be applied to it.
//!
//! A profile is keyed by email and holds two ordered lists: food preferences and
//! pantry items. Every mutation is expressed as a [`ProfilePatch`] so that stores
//! can apply it inside whatever atomic section they provide, re-validating it
//! against the state they actually hold rather than a stale read.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A user's pantry profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub email: String,
    /// Older documents spell this field `preference`.
    #[serde(default, alias = "preference", deserialize_with = "string_list")]
    pub preferences: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub items: Vec<String>,
}

impl UserProfile {
    /// A freshly created profile with empty lists.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            preferences: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// Reads a list field leniently: `null`, a missing field, or any non-array value
/// becomes an empty list, and non-string elements are stringified.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(values) = value else {
        return Ok(Vec::new());
    };

    Ok(values.into_iter().filter_map(entry_text).collect())
}

/// Text stored for one list entry. Strings are kept as-is, `null` is dropped,
/// and any other JSON value is stored as its compact JSON text.
pub fn entry_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// A single edit to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePatch {
    /// Replace the whole preference list.
    SetPreferences(Vec<String>),
    AppendPreference(String),
    AppendItem(String),
    /// Remove the item at a zero-based position, shifting later items down.
    RemoveItem { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("Invalid item index {index}: profile has {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ProfilePatch {
    /// Apply the patch in place. On error the profile is left untouched.
    pub fn apply(&self, profile: &mut UserProfile) -> Result<(), PatchError> {
        match self {
            ProfilePatch::SetPreferences(preferences) => {
                profile.preferences = preferences.clone();
            }
            ProfilePatch::AppendPreference(preference) => {
                profile.preferences.push(preference.clone());
            }
            ProfilePatch::AppendItem(item) => {
                profile.items.push(item.clone());
            }
            ProfilePatch::RemoveItem { index } => {
                let len = profile.items.len();
                if *index >= len {
                    return Err(PatchError::IndexOutOfRange { index: *index, len });
                }
                profile.items.remove(*index);
            }
        }
        Ok(())
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProfilePatch::SetPreferences(_) => "set_preferences",
            ProfilePatch::AppendPreference(_) => "append_preference",
            ProfilePatch::AppendItem(_) => "append_item",
            ProfilePatch::RemoveItem { .. } => "remove_item",
        }
    }
}
