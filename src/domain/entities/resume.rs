use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::option_fields::{deserialize_patch, PatchString};
use crate::entities::PHONE_PATTERN;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resume {
    pub id: i64,
    /// Public reference; never exposes the sequential id.
    pub uuid: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub full_name: Option<String>,
    pub professional_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ResumeInsert {
    pub uuid: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub profile: ResumeProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Header fields shared by create requests and inserts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ResumeProfile {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 200, message = "Professional title must be at most 200 characters"))]
    pub professional_title: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(
        length(max = 20, message = "Phone must be at most 20 characters"),
        regex(path = *PHONE_PATTERN, message = "Phone may only contain digits, spaces and + ( ) - .")
    )]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(url(message = "Invalid website URL"))]
    pub website_url: Option<String>,

    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin_url: Option<String>,

    #[validate(url(message = "Invalid GitHub URL"))]
    pub github_url: Option<String>,

    #[validate(url(message = "Invalid Twitter URL"))]
    pub twitter_url: Option<String>,

    pub summary: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeCreatedResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub message: String,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewResume {
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = "validate_title_not_blank")
    )]
    pub title: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub profile: ResumeProfile,
}

/// PATCH body; owner and uuid are not part of it, so they cannot change.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateResumeRequest {
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = "validate_title_not_null")
    )]
    pub title: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub full_name: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(length(max = 200, message = "Professional title must be at most 200 characters"))]
    pub professional_title: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(email(message = "Invalid email format"))]
    pub email: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(custom(function = "validate_patch_phone"))]
    pub phone: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(url(message = "Invalid website URL"))]
    pub website_url: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin_url: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(url(message = "Invalid GitHub URL"))]
    pub github_url: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[validate(url(message = "Invalid Twitter URL"))]
    pub twitter_url: PatchString,

    #[serde(default, deserialize_with = "deserialize_patch")]
    pub summary: PatchString,
}

fn validate_title_not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Title cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

fn validate_title_not_null(title: &PatchString) -> Result<(), ValidationError> {
    if title.is_set_to_null() {
        let mut err = ValidationError::new("required");
        err.message = Some("Title cannot be null".into());
        return Err(err);
    }
    match title.value_ref() {
        Some(value) => validate_title_not_blank(value),
        None => Ok(()),
    }
}

fn validate_patch_phone(phone: &PatchString) -> Result<(), ValidationError> {
    match phone.value_ref() {
        Some(value) if value.len() > 20 || !PHONE_PATTERN.is_match(value) => {
            let mut err = ValidationError::new("phone");
            err.message = Some("Phone may only contain digits, spaces and + ( ) - .".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

// ───── Insert Preparation Logic ─────────────────────────────────────

impl NewResume {
    pub fn prepare_for_insert(&self, owner_id: Uuid) -> ResumeInsert {
        let now = Utc::now();
        ResumeInsert {
            uuid: Uuid::new_v4(),
            owner_id,
            title: self.title.trim().to_string(),
            profile: self.profile.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Resume {
    /// Applies a PATCH in place; both stores persist the patched row as a whole.
    pub fn apply_patch(&mut self, patch: &UpdateResumeRequest) {
        if let Some(title) = patch.title.value_ref() {
            self.title = title.trim().to_string();
        }
        patch.full_name.apply_to(&mut self.full_name);
        patch.professional_title.apply_to(&mut self.professional_title);
        patch.email.apply_to(&mut self.email);
        patch.phone.apply_to(&mut self.phone);
        patch.location.apply_to(&mut self.location);
        patch.website_url.apply_to(&mut self.website_url);
        patch.linkedin_url.apply_to(&mut self.linkedin_url);
        patch.github_url.apply_to(&mut self.github_url);
        patch.twitter_url.apply_to(&mut self.twitter_url);
        patch.summary.apply_to(&mut self.summary);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_resume(title: &str) -> NewResume {
        NewResume { title: title.into(), profile: ResumeProfile::default() }
    }

    fn field_names(errors: validator::ValidationErrors) -> Vec<String> {
        errors.errors().keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let err = new_resume("   ").validate().unwrap_err();
        assert_eq!(field_names(err), vec!["title"]);

        assert!(new_resume("  Backend  ").validate().is_ok());
    }

    #[test]
    fn patch_rejects_blank_or_null_title() {
        let blank: UpdateResumeRequest = serde_json::from_str(r#"{"title": "  "}"#).unwrap();
        let null: UpdateResumeRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        let absent: UpdateResumeRequest = serde_json::from_str("{}").unwrap();

        assert!(blank.validate().is_err());
        assert!(null.validate().is_err());
        assert!(absent.validate().is_ok());
    }

    #[test]
    fn patch_validates_only_supplied_fields() {
        let bad_email: UpdateResumeRequest =
            serde_json::from_str(r#"{"email": "not-an-email", "phone": null}"#).unwrap();
        assert_eq!(field_names(bad_email.validate().unwrap_err()), vec!["email"]);

        let good: UpdateResumeRequest =
            serde_json::from_str(r#"{"email": "ada@example.com", "github_url": "https://github.com/ada"}"#)
                .unwrap();
        assert!(good.validate().is_ok());
    }

    #[test]
    fn apply_patch_trims_title_and_clears_nulls() {
        let mut resume = Resume {
            id: 1,
            uuid: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Draft".into(),
            full_name: Some("Ada".into()),
            professional_title: None,
            email: None,
            phone: Some("555".into()),
            location: None,
            website_url: None,
            linkedin_url: None,
            github_url: None,
            twitter_url: None,
            summary: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let patch: UpdateResumeRequest =
            serde_json::from_str(r#"{"title": " Final ", "phone": null}"#).unwrap();

        resume.apply_patch(&patch);

        assert_eq!(resume.title, "Final");
        assert_eq!(resume.phone, None);
        assert_eq!(resume.full_name.as_deref(), Some("Ada"));
    }
}
