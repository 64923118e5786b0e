use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Postgres};
use validator::{Validate, ValidationError};

use crate::entities::section::{
    ongoing_first_cmp, trim_in_place, trim_optional, Section, SectionFields, SectionKind,
};

pub type Experience = Section<ExperienceFields>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[validate(schema(function = "validate_experience_dates"))]
pub struct ExperienceFields {
    #[validate(length(min = 1, max = 200, message = "Company must be between 1 and 200 characters"))]
    pub company: String,

    #[validate(length(min = 1, max = 200, message = "Position must be between 1 and 200 characters"))]
    pub position: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_current: bool,

    /// One accomplishment per line; rendered as bullets.
    pub description: Option<String>,
}

impl ExperienceFields {
    /// End date as shown on the document; a current role is always open-ended.
    pub fn displayed_end(&self) -> Option<NaiveDate> {
        if self.is_current { None } else { self.end_date }
    }
}

fn validate_experience_dates(fields: &ExperienceFields) -> Result<(), ValidationError> {
    if fields.is_current && fields.end_date.is_some() {
        let mut err = ValidationError::new("is_current");
        err.message = Some("A current position cannot have an end date".into());
        return Err(err);
    }
    match fields.end_date {
        Some(end) if end < fields.start_date => {
            let mut err = ValidationError::new("end_date");
            err.message = Some("End date cannot be before start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl SectionFields for ExperienceFields {
    const KIND: SectionKind = SectionKind::Experience;
    const TABLE: &'static str = "experience";
    const COLUMNS: &'static [&'static str] = &[
        "company", "position", "location", "start_date", "end_date", "is_current", "description",
    ];
    const ORDER_BY: &'static str = "end_date DESC NULLS FIRST, start_date DESC, id ASC";

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.company.clone())
            .push_bind(self.position.clone())
            .push_bind(self.location.clone())
            .push_bind(self.start_date)
            .push_bind(self.end_date)
            .push_bind(self.is_current)
            .push_bind(self.description.clone());
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        ongoing_first_cmp(
            (self.end_date.as_ref(), &self.start_date),
            (other.end_date.as_ref(), &other.start_date),
        )
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.company);
        trim_in_place(&mut self.position);
        trim_optional(&mut self.location);
        trim_optional(&mut self.description);
    }
}
