pub mod entities;
pub mod formatters;
pub mod use_cases;
