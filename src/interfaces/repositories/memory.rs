use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    entities::{
        achievement::AchievementFields,
        bundle::{ResumeBundle, ResumeSections},
        certification::CertificationFields,
        education::EducationFields,
        experience::ExperienceFields,
        project::ProjectFields,
        resume::{Resume, ResumeInsert},
        section::{sort_canonical, Section, SectionFields},
        skill::SkillFields,
    },
    errors::AppError,
    repositories::{resume::ResumeRepository, section::SectionRepository},
};

/// Rows of one table plus its id sequence.
pub struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table { next_id: 1, rows: BTreeMap::new() }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub struct MemoryState {
    resumes: Table<Resume>,
    education: Table<Section<EducationFields>>,
    experience: Table<Section<ExperienceFields>>,
    projects: Table<Section<ProjectFields>>,
    skills: Table<Section<SkillFields>>,
    certifications: Table<Section<CertificationFields>>,
    achievements: Table<Section<AchievementFields>>,
}

impl MemoryState {
    fn sections_of<F: MemoryTable>(&self, resume_id: i64) -> Vec<Section<F>> {
        let mut rows: Vec<_> = F::table(self)
            .rows
            .values()
            .filter(|s| s.resume_id == resume_id)
            .cloned()
            .collect();
        sort_canonical(&mut rows);
        rows
    }

    fn remove_children(&mut self, resume_id: i64) {
        self.education.rows.retain(|_, s| s.resume_id != resume_id);
        self.experience.rows.retain(|_, s| s.resume_id != resume_id);
        self.projects.rows.retain(|_, s| s.resume_id != resume_id);
        self.skills.rows.retain(|_, s| s.resume_id != resume_id);
        self.certifications.rows.retain(|_, s| s.resume_id != resume_id);
        self.achievements.rows.retain(|_, s| s.resume_id != resume_id);
    }
}

/// Maps a section type to its table inside the shared state.
pub trait MemoryTable: SectionFields {
    fn table(state: &MemoryState) -> &Table<Section<Self>>;
    fn table_mut(state: &mut MemoryState) -> &mut Table<Section<Self>>;
}

macro_rules! memory_table {
    ($fields:ty, $table:ident) => {
        impl MemoryTable for $fields {
            fn table(state: &MemoryState) -> &Table<Section<Self>> {
                &state.$table
            }

            fn table_mut(state: &mut MemoryState) -> &mut Table<Section<Self>> {
                &mut state.$table
            }
        }
    };
}

memory_table!(EducationFields, education);
memory_table!(ExperienceFields, experience);
memory_table!(ProjectFields, projects);
memory_table!(SkillFields, skills);
memory_table!(CertificationFields, certifications);
memory_table!(AchievementFields, achievements);

/// Process-local record store with the same contract as the PostgreSQL one:
/// cascading deletes, skill-name uniqueness and snapshot reads under one lock.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_unique<F: MemoryTable>(
    state: &MemoryState,
    resume_id: i64,
    fields: &F,
    except_id: Option<i64>,
) -> Result<(), AppError> {
    let Some(name) = fields.unique_name() else {
        return Ok(());
    };

    let taken = F::table(state).rows.values().any(|s| {
        s.resume_id == resume_id && Some(s.id) != except_id && s.fields.unique_name() == Some(name)
    });

    if taken { Err(fields.duplicate_error()) } else { Ok(()) }
}

#[async_trait]
impl ResumeRepository for InMemoryStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_resume(&self, insert: &ResumeInsert) -> Result<Resume, AppError> {
        let mut state = self.state.write();
        let id = state.resumes.allocate_id();
        let profile = insert.profile.clone();

        let resume = Resume {
            id,
            uuid: insert.uuid,
            owner_id: insert.owner_id,
            title: insert.title.clone(),
            full_name: profile.full_name,
            professional_title: profile.professional_title,
            email: profile.email,
            phone: profile.phone,
            location: profile.location,
            website_url: profile.website_url,
            linkedin_url: profile.linkedin_url,
            github_url: profile.github_url,
            twitter_url: profile.twitter_url,
            summary: profile.summary,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        };

        state.resumes.rows.insert(id, resume.clone());
        Ok(resume)
    }

    async fn get_resume(&self, id: i64) -> Result<Option<Resume>, AppError> {
        Ok(self.state.read().resumes.rows.get(&id).cloned())
    }

    async fn list_resumes(&self, owner_id: &Uuid) -> Result<Vec<Resume>, AppError> {
        let state = self.state.read();
        let mut resumes: Vec<_> = state
            .resumes
            .rows
            .values()
            .filter(|r| r.owner_id == *owner_id)
            .cloned()
            .collect();

        resumes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(resumes)
    }

    async fn update_resume(&self, resume: &Resume) -> Result<Resume, AppError> {
        let mut state = self.state.write();
        let stored = state
            .resumes
            .rows
            .get_mut(&resume.id)
            .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;

        let Resume { id, uuid, owner_id, created_at, .. } = *stored;
        *stored = Resume { id, uuid, owner_id, created_at, ..resume.clone() };

        Ok(stored.clone())
    }

    async fn delete_resume(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.write();
        if state.resumes.rows.remove(&id).is_none() {
            return Err(AppError::NotFound("Resume not found".into()));
        }
        state.remove_children(id);
        Ok(())
    }

    async fn load_bundle(&self, resume_id: i64) -> Result<Option<ResumeBundle>, AppError> {
        let state = self.state.read();
        let Some(resume) = state.resumes.rows.get(&resume_id).cloned() else {
            return Ok(None);
        };

        let sections = ResumeSections {
            education: state.sections_of(resume_id),
            experience: state.sections_of(resume_id),
            projects: state.sections_of(resume_id),
            skills: state.sections_of(resume_id),
            certifications: state.sections_of(resume_id),
            achievements: state.sections_of(resume_id),
        };

        Ok(Some(ResumeBundle::new(resume, sections)))
    }
}

#[async_trait]
impl<F: MemoryTable> SectionRepository<F> for InMemoryStore {
    async fn create(&self, resume_id: i64, fields: &F) -> Result<Section<F>, AppError> {
        let mut state = self.state.write();
        if !state.resumes.rows.contains_key(&resume_id) {
            return Err(AppError::NotFound("Resume not found".into()));
        }
        ensure_unique(&state, resume_id, fields, None)?;

        let now = Utc::now();
        let table = F::table_mut(&mut state);
        let section = Section {
            id: table.allocate_id(),
            resume_id,
            fields: fields.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(section.id, section.clone());

        Ok(section)
    }

    async fn get(&self, id: i64) -> Result<Option<Section<F>>, AppError> {
        Ok(F::table(&self.state.read()).rows.get(&id).cloned())
    }

    async fn list_by_resume(&self, resume_id: i64) -> Result<Vec<Section<F>>, AppError> {
        Ok(self.state.read().sections_of(resume_id))
    }

    async fn list_for_owner(&self, owner_id: &Uuid) -> Result<Vec<Section<F>>, AppError> {
        let state = self.state.read();
        let mut rows: Vec<_> = F::table(&state)
            .rows
            .values()
            .filter(|s| {
                state
                    .resumes
                    .rows
                    .get(&s.resume_id)
                    .is_some_and(|r| r.owner_id == *owner_id)
            })
            .cloned()
            .collect();

        sort_canonical(&mut rows);
        Ok(rows)
    }

    async fn update(&self, id: i64, fields: &F) -> Result<Section<F>, AppError> {
        let mut state = self.state.write();
        let not_found = || AppError::NotFound(format!("{} not found", F::KIND.label()));

        let resume_id = F::table(&state).rows.get(&id).map(|s| s.resume_id).ok_or_else(not_found)?;
        ensure_unique(&state, resume_id, fields, Some(id))?;

        let section = F::table_mut(&mut state).rows.get_mut(&id).ok_or_else(not_found)?;
        section.fields = fields.clone();
        section.updated_at = Utc::now();

        Ok(section.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        match F::table_mut(&mut self.state.write()).rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("{} not found", F::KIND.label()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{resume::ResumeProfile, skill::SkillLevel};
    use chrono::NaiveDate;

    fn insert(owner: Uuid) -> ResumeInsert {
        ResumeInsert {
            uuid: Uuid::new_v4(),
            owner_id: owner,
            title: "Backend".into(),
            profile: ResumeProfile::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn skill(name: &str) -> SkillFields {
        SkillFields {
            name: name.into(),
            category: "Languages".into(),
            level: SkillLevel::Advanced,
            years_of_experience: Some(3),
        }
    }

    fn job(start: (i32, u32)) -> ExperienceFields {
        ExperienceFields {
            company: "Acme".into(),
            position: "Engineer".into(),
            location: None,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap(),
            end_date: None,
            is_current: true,
            description: None,
        }
    }

    #[tokio::test]
    async fn duplicate_skill_is_rejected_only_within_one_resume() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let first = store.create_resume(&insert(owner)).await.unwrap();
        let second = store.create_resume(&insert(owner)).await.unwrap();

        SectionRepository::create(&store, first.id, &skill("Rust")).await.unwrap();
        let dup = SectionRepository::create(&store, first.id, &skill("Rust")).await;
        assert!(matches!(dup, Err(AppError::ValidationError(_))));

        assert!(SectionRepository::create(&store, second.id, &skill("Rust")).await.is_ok());
    }

    #[tokio::test]
    async fn renaming_a_skill_onto_a_sibling_is_rejected() {
        let store = InMemoryStore::new();
        let resume = store.create_resume(&insert(Uuid::new_v4())).await.unwrap();

        SectionRepository::create(&store, resume.id, &skill("Rust")).await.unwrap();
        let go = SectionRepository::create(&store, resume.id, &skill("Go")).await.unwrap();

        let renamed = SectionRepository::update(&store, go.id, &skill("Rust")).await;
        assert!(matches!(renamed, Err(AppError::ValidationError(_))));
        assert!(SectionRepository::update(&store, go.id, &skill("Go")).await.is_ok());
    }

    #[tokio::test]
    async fn deleting_a_resume_cascades_to_sections() {
        let store = InMemoryStore::new();
        let resume = store.create_resume(&insert(Uuid::new_v4())).await.unwrap();
        let created = SectionRepository::create(&store, resume.id, &job((2020, 1))).await.unwrap();

        store.delete_resume(resume.id).await.unwrap();

        let gone: Option<Section<ExperienceFields>> = SectionRepository::get(&store, created.id).await.unwrap();
        assert!(gone.is_none());
        assert!(store.load_bundle(resume.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn identical_keys_fall_back_to_id_order() {
        let store = InMemoryStore::new();
        let resume = store.create_resume(&insert(Uuid::new_v4())).await.unwrap();
        for _ in 0..3 {
            SectionRepository::create(&store, resume.id, &job((2022, 6))).await.unwrap();
        }

        let rows: Vec<Section<ExperienceFields>> =
            SectionRepository::list_by_resume(&store, resume.id).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn owner_listing_excludes_other_owners() {
        let store = InMemoryStore::new();
        let mine = store.create_resume(&insert(Uuid::new_v4())).await.unwrap();
        let theirs = store.create_resume(&insert(Uuid::new_v4())).await.unwrap();
        SectionRepository::create(&store, mine.id, &skill("Rust")).await.unwrap();
        SectionRepository::create(&store, theirs.id, &skill("Go")).await.unwrap();

        let listed: Vec<Section<SkillFields>> =
            SectionRepository::list_for_owner(&store, &mine.owner_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].fields.name, "Rust");
    }
}
