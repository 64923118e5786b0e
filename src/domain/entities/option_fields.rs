use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{ValidateEmail, ValidateLength, ValidateUrl};

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field not touched
/// - `SetToNull` → explicitly null
/// - `SetToValue` → set to provided value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

/// Use together with `#[serde(default)]`: a missing key stays `Unchanged`,
/// `null` becomes `SetToNull`, anything else `SetToValue`.
pub fn deserialize_patch<'de, D, T>(deserializer: D) -> Result<OptionField<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|value| match value {
        Some(v) => OptionField::SetToValue(v),
        None => OptionField::SetToNull,
    })
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }
    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

impl ValidateEmail for OptionField<String> {
    fn as_email_string(&self) -> Option<Cow<'_, str>> {
        self.value_ref().map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl ValidateUrl for OptionField<String> {
    fn as_url_string(&self) -> Option<Cow<'_, str>> {
        self.value_ref().map(|s| Cow::Borrowed(s.as_str()))
    }
}

// ---------------------- Core helpers ----------------------

impl<T> OptionField<T> {
    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// True when `SetToNull`.
    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl<T: Clone> OptionField<T> {
    /// Writes the patch into a nullable column value.
    pub fn apply_to(&self, target: &mut Option<T>) {
        match self {
            Self::Unchanged => {}
            Self::SetToNull => *target = None,
            Self::SetToValue(v) => *target = Some(v.clone()),
        }
    }
}

// ---------------------- Aliases ----------------------

pub type PatchString = OptionField<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_patch")]
        name: PatchString,
    }

    #[test]
    fn missing_null_and_value_are_distinguished() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();

        assert!(missing.name.is_unchanged());
        assert!(null.name.is_set_to_null());
        assert_eq!(value.name.value_ref().map(String::as_str), Some("Ada"));
    }

    #[test]
    fn apply_to_respects_each_state() {
        let mut target = Some("old".to_string());

        OptionField::Unchanged.apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("old"));

        OptionField::SetToValue("new".to_string()).apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("new"));

        OptionField::<String>::SetToNull.apply_to(&mut target);
        assert_eq!(target, None);
    }

    #[test]
    fn length_validation_ignores_untouched_fields() {
        let untouched: PatchString = OptionField::Unchanged;
        let too_long = OptionField::SetToValue("x".repeat(10));

        assert!(untouched.validate_length(Some(1), Some(5), None));
        assert!(!too_long.validate_length(Some(1), Some(5), None));
    }
}
