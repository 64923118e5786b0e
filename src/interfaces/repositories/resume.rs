use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

use crate::{
    entities::{
        bundle::{ResumeBundle, ResumeSections},
        resume::{Resume, ResumeInsert},
        section::{Section, SectionFields},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxResumeRepo,
};

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_resume(&self, resume: &ResumeInsert) -> Result<Resume, AppError>;
    async fn get_resume(&self, id: i64) -> Result<Option<Resume>, AppError>;
    /// Newest first.
    async fn list_resumes(&self, owner_id: &Uuid) -> Result<Vec<Resume>, AppError>;
    /// Persists every mutable column of `resume`; owner and uuid are never written.
    async fn update_resume(&self, resume: &Resume) -> Result<Resume, AppError>;
    /// Removes the resume and, by cascade, all of its sections.
    async fn delete_resume(&self, id: i64) -> Result<(), AppError>;
    /// Resume plus all six collections from one consistent snapshot.
    /// `None` when the resume no longer exists.
    async fn load_bundle(&self, resume_id: i64) -> Result<Option<ResumeBundle>, AppError>;
}

#[async_trait]
impl<T: ResumeRepository + ?Sized> ResumeRepository for Arc<T> {
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn create_resume(&self, resume: &ResumeInsert) -> Result<Resume, AppError> {
        (**self).create_resume(resume).await
    }

    async fn get_resume(&self, id: i64) -> Result<Option<Resume>, AppError> {
        (**self).get_resume(id).await
    }

    async fn list_resumes(&self, owner_id: &Uuid) -> Result<Vec<Resume>, AppError> {
        (**self).list_resumes(owner_id).await
    }

    async fn update_resume(&self, resume: &Resume) -> Result<Resume, AppError> {
        (**self).update_resume(resume).await
    }

    async fn delete_resume(&self, id: i64) -> Result<(), AppError> {
        (**self).delete_resume(id).await
    }

    async fn load_bundle(&self, resume_id: i64) -> Result<Option<ResumeBundle>, AppError> {
        (**self).load_bundle(resume_id).await
    }
}

async fn fetch_sections<F: SectionFields>(
    conn: &mut PgConnection,
    resume_id: i64,
) -> Result<Vec<Section<F>>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM {} WHERE resume_id = $1 ORDER BY {}",
        F::TABLE,
        F::ORDER_BY
    );
    sqlx::query_as::<_, Section<F>>(&sql)
        .bind(resume_id)
        .fetch_all(conn)
        .await
}

#[async_trait]
impl ResumeRepository for SqlxResumeRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        let row = sqlx::query("SELECT 1 AS ok").fetch_one(&self.pool).await?;
        let _: i32 = row.try_get("ok")?;
        Ok(())
    }

    async fn create_resume(&self, resume: &ResumeInsert) -> Result<Resume, AppError> {
        let profile = &resume.profile;

        let created = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (
                uuid, owner_id, title, full_name, professional_title, email, phone, location,
                website_url, linkedin_url, github_url, twitter_url, summary, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(resume.uuid)
        .bind(resume.owner_id)
        .bind(&resume.title)
        .bind(&profile.full_name)
        .bind(&profile.professional_title)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(&profile.website_url)
        .bind(&profile.linkedin_url)
        .bind(&profile.github_url)
        .bind(&profile.twitter_url)
        .bind(&profile.summary)
        .bind(resume.created_at)
        .bind(resume.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_resume(&self, id: i64) -> Result<Option<Resume>, AppError> {
        let resume = sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(resume)
    }

    async fn list_resumes(&self, owner_id: &Uuid) -> Result<Vec<Resume>, AppError> {
        let resumes = sqlx::query_as::<_, Resume>(
            "SELECT * FROM resumes WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(resumes)
    }

    async fn update_resume(&self, resume: &Resume) -> Result<Resume, AppError> {
        let updated = sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes SET
                title = $2, full_name = $3, professional_title = $4, email = $5, phone = $6,
                location = $7, website_url = $8, linkedin_url = $9, github_url = $10,
                twitter_url = $11, summary = $12, updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(resume.id)
        .bind(&resume.title)
        .bind(&resume.full_name)
        .bind(&resume.professional_title)
        .bind(&resume.email)
        .bind(&resume.phone)
        .bind(&resume.location)
        .bind(&resume.website_url)
        .bind(&resume.linkedin_url)
        .bind(&resume.github_url)
        .bind(&resume.twitter_url)
        .bind(&resume.summary)
        .bind(resume.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;

        Ok(updated)
    }

    async fn delete_resume(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Resume not found".into()));
        }
        Ok(())
    }

    async fn load_bundle(&self, resume_id: i64) -> Result<Option<ResumeBundle>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let Some(resume) = sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1")
            .bind(resume_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let sections = ResumeSections {
            education: fetch_sections(&mut *tx, resume_id).await?,
            experience: fetch_sections(&mut *tx, resume_id).await?,
            projects: fetch_sections(&mut *tx, resume_id).await?,
            skills: fetch_sections(&mut *tx, resume_id).await?,
            certifications: fetch_sections(&mut *tx, resume_id).await?,
            achievements: fetch_sections(&mut *tx, resume_id).await?,
        };

        tx.commit().await?;

        Ok(Some(ResumeBundle::new(resume, sections)))
    }
}
