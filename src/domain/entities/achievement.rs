use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Postgres};
use validator::Validate;

use crate::entities::section::{trim_in_place, trim_optional, Section, SectionFields, SectionKind};

pub type Achievement = Section<AchievementFields>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct AchievementFields {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    pub date_achieved: NaiveDate,

    #[validate(length(max = 200, message = "Organization must be at most 200 characters"))]
    pub organization: Option<String>,
}

impl SectionFields for AchievementFields {
    const KIND: SectionKind = SectionKind::Achievement;
    const TABLE: &'static str = "achievements";
    const COLUMNS: &'static [&'static str] = &["title", "description", "date_achieved", "organization"];
    const ORDER_BY: &'static str = "date_achieved DESC, id ASC";

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.title.clone())
            .push_bind(self.description.clone())
            .push_bind(self.date_achieved)
            .push_bind(self.organization.clone());
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        other.date_achieved.cmp(&self.date_achieved)
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.description);
        trim_optional(&mut self.organization);
    }
}
