use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::section::{Section, SectionFields},
    errors::AppError,
    repositories::sqlx_repo::SqlxSectionRepo,
};

/// Storage for one section type. Every list is returned in canonical order.
#[async_trait]
pub trait SectionRepository<F: SectionFields>: Send + Sync {
    async fn create(&self, resume_id: i64, fields: &F) -> Result<Section<F>, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Section<F>>, AppError>;
    async fn list_by_resume(&self, resume_id: i64) -> Result<Vec<Section<F>>, AppError>;
    /// Sections of every resume owned by `owner_id`, joined through the parent.
    async fn list_for_owner(&self, owner_id: &Uuid) -> Result<Vec<Section<F>>, AppError>;
    async fn update(&self, id: i64, fields: &F) -> Result<Section<F>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
impl<F, T> SectionRepository<F> for Arc<T>
where
    F: SectionFields,
    T: SectionRepository<F> + ?Sized,
{
    async fn create(&self, resume_id: i64, fields: &F) -> Result<Section<F>, AppError> {
        (**self).create(resume_id, fields).await
    }

    async fn get(&self, id: i64) -> Result<Option<Section<F>>, AppError> {
        (**self).get(id).await
    }

    async fn list_by_resume(&self, resume_id: i64) -> Result<Vec<Section<F>>, AppError> {
        (**self).list_by_resume(resume_id).await
    }

    async fn list_for_owner(&self, owner_id: &Uuid) -> Result<Vec<Section<F>>, AppError> {
        (**self).list_for_owner(owner_id).await
    }

    async fn update(&self, id: i64, fields: &F) -> Result<Section<F>, AppError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        (**self).delete(id).await
    }
}

/// Maps constraint violations raised by a section write.
fn write_error<F: SectionFields>(fields: &F, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && fields.unique_name().is_some() {
            return fields.duplicate_error();
        }
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound("Resume not found".into());
        }
    }
    AppError::from(err)
}

#[async_trait]
impl<F: SectionFields> SectionRepository<F> for SqlxSectionRepo<F> {
    async fn create(&self, resume_id: i64, fields: &F) -> Result<Section<F>, AppError> {
        let now = Utc::now();
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO ");
        query
            .push(F::TABLE)
            .push(" (resume_id, ")
            .push(F::COLUMNS.join(", "))
            .push(", created_at, updated_at) VALUES (");

        let mut values = query.separated(", ");
        values.push_bind(resume_id);
        fields.push_values(&mut values);
        values.push_bind(now).push_bind(now);
        values.push_unseparated(") RETURNING *");

        query
            .build_query_as::<Section<F>>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error(fields, e))
    }

    async fn get(&self, id: i64) -> Result<Option<Section<F>>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", F::TABLE);
        let section = sqlx::query_as::<_, Section<F>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(section)
    }

    async fn list_by_resume(&self, resume_id: i64) -> Result<Vec<Section<F>>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE resume_id = $1 ORDER BY {}",
            F::TABLE,
            F::ORDER_BY
        );
        let sections = sqlx::query_as::<_, Section<F>>(&sql)
            .bind(resume_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(sections)
    }

    async fn list_for_owner(&self, owner_id: &Uuid) -> Result<Vec<Section<F>>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE resume_id IN (SELECT id FROM resumes WHERE owner_id = $1) ORDER BY {}",
            F::TABLE,
            F::ORDER_BY
        );
        let sections = sqlx::query_as::<_, Section<F>>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(sections)
    }

    async fn update(&self, id: i64, fields: &F) -> Result<Section<F>, AppError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE ");
        query
            .push(F::TABLE)
            .push(" SET (")
            .push(F::COLUMNS.join(", "))
            .push(", updated_at) = (");

        let mut values = query.separated(", ");
        fields.push_values(&mut values);
        values.push_bind(Utc::now());
        values.push_unseparated(") WHERE id = ");

        query.push_bind(id).push(" RETURNING *");

        query
            .build_query_as::<Section<F>>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(fields, e))?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", F::KIND.label())))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", F::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} not found", F::KIND.label())));
        }
        Ok(())
    }
}
