pub mod aggregator;
pub mod export;
pub mod extractors;
pub mod ownership;
pub mod resumes;
pub mod sections;
