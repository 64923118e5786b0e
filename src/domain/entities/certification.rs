use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Postgres};
use validator::{Validate, ValidationError};

use crate::entities::section::{trim_in_place, trim_optional, Section, SectionFields, SectionKind};

pub type Certification = Section<CertificationFields>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[validate(schema(function = "validate_certification_dates"))]
pub struct CertificationFields {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Issuing organization must be between 1 and 200 characters"))]
    pub issuing_organization: String,

    pub issue_date: NaiveDate,
    pub expiration_date: Option<NaiveDate>,

    #[validate(length(max = 100, message = "Credential ID must be at most 100 characters"))]
    pub credential_id: Option<String>,

    #[validate(url(message = "Invalid credential URL"))]
    pub credential_url: Option<String>,
}

fn validate_certification_dates(fields: &CertificationFields) -> Result<(), ValidationError> {
    match fields.expiration_date {
        Some(expires) if expires < fields.issue_date => {
            let mut err = ValidationError::new("expiration_date");
            err.message = Some("Expiration date cannot be before issue date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl SectionFields for CertificationFields {
    const KIND: SectionKind = SectionKind::Certification;
    const TABLE: &'static str = "certifications";
    const COLUMNS: &'static [&'static str] = &[
        "name", "issuing_organization", "issue_date", "expiration_date", "credential_id", "credential_url",
    ];
    const ORDER_BY: &'static str = "issue_date DESC, id ASC";

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.issuing_organization.clone())
            .push_bind(self.issue_date)
            .push_bind(self.expiration_date)
            .push_bind(self.credential_id.clone())
            .push_bind(self.credential_url.clone());
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        other.issue_date.cmp(&self.issue_date)
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.issuing_organization);
        trim_optional(&mut self.credential_id);
        trim_optional(&mut self.credential_url);
    }
}
