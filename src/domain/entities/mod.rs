use once_cell::sync::Lazy;
use regex::Regex;

pub mod achievement;
pub mod bundle;
pub mod certification;
pub mod education;
pub mod experience;
pub mod option_fields;
pub mod project;
pub mod resume;
pub mod section;
pub mod skill;
pub mod token;

/// Digits plus the punctuation people type into phone numbers.
pub static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9+()\-.\s]*$").expect("phone pattern is a valid regex")
});
