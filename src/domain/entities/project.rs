use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Postgres};
use validator::{Validate, ValidationError};

use crate::entities::section::{
    ongoing_first_cmp, trim_in_place, trim_optional, Section, SectionFields, SectionKind,
};

pub type Project = Section<ProjectFields>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[validate(schema(function = "validate_project_dates"))]
pub struct ProjectFields {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    /// Comma separated, e.g. "Rust, PostgreSQL, actix-web".
    #[serde(default)]
    pub technologies: String,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    #[validate(url(message = "Invalid project URL"))]
    pub project_url: Option<String>,

    #[validate(url(message = "Invalid GitHub URL"))]
    pub github_url: Option<String>,
}

fn validate_project_dates(fields: &ProjectFields) -> Result<(), ValidationError> {
    match fields.end_date {
        Some(end) if end < fields.start_date => {
            let mut err = ValidationError::new("end_date");
            err.message = Some("End date cannot be before start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl SectionFields for ProjectFields {
    const KIND: SectionKind = SectionKind::Project;
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &[
        "name", "description", "technologies", "start_date", "end_date", "project_url", "github_url",
    ];
    const ORDER_BY: &'static str = "end_date DESC NULLS FIRST, start_date DESC, id ASC";

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.technologies.clone())
            .push_bind(self.start_date)
            .push_bind(self.end_date)
            .push_bind(self.project_url.clone())
            .push_bind(self.github_url.clone());
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        ongoing_first_cmp(
            (self.end_date.as_ref(), &self.start_date),
            (other.end_date.as_ref(), &other.start_date),
        )
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.technologies);
        trim_optional(&mut self.project_url);
        trim_optional(&mut self.github_url);
    }
}
