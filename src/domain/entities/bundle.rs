use serde::Serialize;

use crate::entities::{
    achievement::Achievement, certification::Certification, education::Education,
    experience::Experience, project::Project, resume::Resume, section::sort_canonical,
    skill::Skill,
};

/// The six child collections of one resume, read from a single snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeSections {
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub certifications: Vec<Certification>,
    pub achievements: Vec<Achievement>,
}

impl ResumeSections {
    /// Puts every collection into canonical order, whatever order the store returned.
    pub fn sort_canonical(&mut self) {
        sort_canonical(&mut self.education);
        sort_canonical(&mut self.experience);
        sort_canonical(&mut self.projects);
        sort_canonical(&mut self.skills);
        sort_canonical(&mut self.certifications);
        sort_canonical(&mut self.achievements);
    }
}

/// Read-only snapshot of a resume and its ordered sections, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeBundle {
    pub resume: Resume,
    #[serde(flatten)]
    pub sections: ResumeSections,
}

impl ResumeBundle {
    pub fn new(resume: Resume, mut sections: ResumeSections) -> Self {
        sections.sort_canonical();
        ResumeBundle { resume, sections }
    }
}
