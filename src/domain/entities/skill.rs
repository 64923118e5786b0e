use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::{query_builder::Separated, Postgres};
use validator::Validate;

use crate::{
    entities::section::{trim_in_place, Section, SectionFields, SectionKind},
    errors::AppError,
};

pub type Skill = Section<SkillFields>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct SkillFields {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Empty when the skill is uncategorised; such skills sort first.
    #[serde(default)]
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,

    #[serde(default)]
    pub level: SkillLevel,

    #[validate(range(min = 0, max = 80, message = "Years of experience must be between 0 and 80"))]
    pub years_of_experience: Option<i32>,
}

impl SectionFields for SkillFields {
    const KIND: SectionKind = SectionKind::Skill;
    const TABLE: &'static str = "skills";
    const COLUMNS: &'static [&'static str] = &["name", "category", "level", "years_of_experience"];
    const ORDER_BY: &'static str = r#"category COLLATE "C" ASC, name COLLATE "C" ASC, id ASC"#;

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.name.clone())
            .push_bind(self.category.clone())
            .push_bind(self.level)
            .push_bind(self.years_of_experience);
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.name.cmp(&other.name))
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.category);
    }

    fn unique_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn duplicate_error(&self) -> AppError {
        AppError::invalid(
            "name",
            format!("Skill '{}' already exists on this resume; skill names must be unique", self.name),
        )
    }
}
