use std::marker::PhantomData;

use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxResumeRepo {
    pub pool: PgPool,
}

impl SqlxResumeRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxResumeRepo { pool }
    }
}

/// One repository type for every section table; `F` picks the table and columns.
pub struct SqlxSectionRepo<F> {
    pub pool: PgPool,
    _fields: PhantomData<fn() -> F>,
}

impl<F> SqlxSectionRepo<F> {
    pub fn new(pool: PgPool) -> Self {
        SqlxSectionRepo { pool, _fields: PhantomData }
    }
}

impl<F> Clone for SqlxSectionRepo<F> {
    fn clone(&self) -> Self {
        SqlxSectionRepo::new(self.pool.clone())
    }
}
