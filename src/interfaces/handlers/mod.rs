pub mod export;
pub mod home;
pub mod resumes;
pub mod sections;
pub mod system;
