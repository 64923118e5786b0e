pub mod memory;
pub mod resume;
pub mod section;
pub mod sqlx_repo;
