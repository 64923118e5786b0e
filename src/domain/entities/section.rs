use std::{cmp::Ordering, fmt::Debug};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{postgres::PgRow, query_builder::Separated, FromRow, Postgres, Row};
use validator::Validate;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Education,
    Experience,
    Project,
    Skill,
    Certification,
    Achievement,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Education => "Education",
            SectionKind::Experience => "Experience",
            SectionKind::Project => "Project",
            SectionKind::Skill => "Skill",
            SectionKind::Certification => "Certification",
            SectionKind::Achievement => "Achievement",
        }
    }
}

/// Domain attributes of one section type.
///
/// A section row is always `Section<F>`: the parent link and timestamps are shared,
/// everything else lives in `F`. Ownership is never stored here; it is derived from
/// the parent resume.
pub trait SectionFields:
    for<'r> FromRow<'r, PgRow>
    + Serialize
    + DeserializeOwned
    + Validate
    + Clone
    + PartialEq
    + Debug
    + Send
    + Sync
    + Unpin
    + 'static
{
    const KIND: SectionKind;
    const TABLE: &'static str;
    /// Columns written by inserts and updates, in `push_values` order.
    const COLUMNS: &'static [&'static str];
    /// Canonical ordering as SQL, ending with the `id` tie-break.
    const ORDER_BY: &'static str;

    fn push_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);

    /// Canonical ordering without the `id` tie-break.
    fn canonical_cmp(&self, other: &Self) -> Ordering;

    /// Trims free-text input before it is stored.
    fn normalize(&mut self) {}

    /// Value that must be unique within one resume, if any.
    fn unique_name(&self) -> Option<&str> {
        None
    }

    fn duplicate_error(&self) -> AppError {
        AppError::Conflict(format!("Duplicate {}", Self::KIND.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<F> {
    pub id: i64,
    pub resume_id: i64,
    #[serde(flatten)]
    pub fields: F,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r, F> FromRow<'r, PgRow> for Section<F>
where
    F: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Section {
            id: row.try_get("id")?,
            resume_id: row.try_get("resume_id")?,
            fields: F::from_row(row)?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<F: SectionFields> Section<F> {
    /// Canonical ordering with the `id` tie-break.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.fields
            .canonical_cmp(&other.fields)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sorts a collection into its canonical presentation order.
pub fn sort_canonical<F: SectionFields>(items: &mut [Section<F>]) {
    items.sort_by(|a, b| a.canonical_cmp(b));
}

/// POST body for any section: the parent resume plus the section's own fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct NewSection<F: SectionFields> {
    pub resume_id: i64,
    #[serde(flatten)]
    pub fields: F,
}

#[derive(Debug, Deserialize)]
pub struct SectionListQuery {
    pub resume: Option<i64>,
}

/// Ordering used by Education, Experience and Project: open-ended entries first,
/// then latest end date, then latest start date.
pub fn ongoing_first_cmp<D: Ord>(
    (a_end, a_start): (Option<&D>, &D),
    (b_end, b_start): (Option<&D>, &D),
) -> Ordering {
    let by_end = match (a_end, b_end) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(a),
    };
    by_end.then_with(|| b_start.cmp(a_start))
}

pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub(crate) fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim_in_place(inner);
    }
    if value.as_deref() == Some("") {
        *value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn ongoing_entries_sort_before_finished_ones() {
        let ongoing = (None, &d(2018, 1));
        let finished = (Some(&d(2024, 1)), &d(2022, 1));

        assert_eq!(ongoing_first_cmp(ongoing, finished), Ordering::Less);
        assert_eq!(ongoing_first_cmp(finished, ongoing), Ordering::Greater);
    }

    #[test]
    fn later_end_then_later_start_sorts_first() {
        let a = (Some(&d(2024, 1)), &d(2020, 1));
        let b = (Some(&d(2023, 1)), &d(2021, 1));
        let c = (Some(&d(2024, 1)), &d(2022, 1));

        assert_eq!(ongoing_first_cmp(a, b), Ordering::Less);
        assert_eq!(ongoing_first_cmp(c, a), Ordering::Less);
        assert_eq!(ongoing_first_cmp(a, a), Ordering::Equal);
    }

    #[test]
    fn trim_optional_clears_blank_values() {
        let mut blank = Some("   ".to_string());
        let mut padded = Some("  Berlin ".to_string());
        trim_optional(&mut blank);
        trim_optional(&mut padded);

        assert_eq!(blank, None);
        assert_eq!(padded.as_deref(), Some("Berlin"));
    }
}
