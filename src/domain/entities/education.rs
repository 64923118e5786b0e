use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Postgres};
use validator::{Validate, ValidationError};

use crate::entities::section::{
    ongoing_first_cmp, trim_in_place, trim_optional, Section, SectionFields, SectionKind,
};

pub type Education = Section<EducationFields>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[validate(schema(function = "validate_education_dates"))]
pub struct EducationFields {
    #[validate(length(min = 1, max = 200, message = "School must be between 1 and 200 characters"))]
    pub school: String,

    #[validate(length(min = 1, max = 200, message = "Degree must be between 1 and 200 characters"))]
    pub degree: String,

    #[validate(length(max = 200, message = "Field of study must be at most 200 characters"))]
    pub field_of_study: Option<String>,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, max = 4.0, message = "GPA must be between 0.00 and 4.00"))]
    pub gpa: Option<f64>,

    pub description: Option<String>,
}

fn validate_education_dates(fields: &EducationFields) -> Result<(), ValidationError> {
    match fields.end_date {
        Some(end) if end < fields.start_date => {
            let mut err = ValidationError::new("end_date");
            err.message = Some("End date cannot be before start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl SectionFields for EducationFields {
    const KIND: SectionKind = SectionKind::Education;
    const TABLE: &'static str = "education";
    const COLUMNS: &'static [&'static str] = &[
        "school", "degree", "field_of_study", "start_date", "end_date", "gpa", "description",
    ];
    const ORDER_BY: &'static str = "end_date DESC NULLS FIRST, start_date DESC, id ASC";

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.school.clone())
            .push_bind(self.degree.clone())
            .push_bind(self.field_of_study.clone())
            .push_bind(self.start_date)
            .push_bind(self.end_date)
            .push_bind(self.gpa)
            .push_bind(self.description.clone());
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        ongoing_first_cmp(
            (self.end_date.as_ref(), &self.start_date),
            (other.end_date.as_ref(), &other.start_date),
        )
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.school);
        trim_in_place(&mut self.degree);
        trim_optional(&mut self.field_of_study);
        trim_optional(&mut self.description);
        self.gpa = self.gpa.map(|gpa| (gpa * 100.0).round() / 100.0);
    }
}
