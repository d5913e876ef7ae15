//! Student CRUD against PostgreSQL. Each call takes its own connection (or transaction) from the pool
//! and returns it on every exit path; mutations commit only after the statement matched a row.

use crate::error::StoreError;
use crate::service::validation::{StudentInput, StudentPatch};
use crate::sql;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub grade: String,
}

/// Storage operations for students. Mutations return `Ok(false)` when no row has the given id.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError>;

    /// Insert and return the storage-generated id.
    async fn create(&self, input: &StudentInput) -> Result<i32, StoreError>;

    async fn replace(&self, id: i32, input: &StudentInput) -> Result<bool, StoreError>;

    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, StoreError>;

    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        PgStudentRepository { pool }
    }

    /// Run a mutation in its own transaction. Commits only when a row was affected;
    /// otherwise the transaction is dropped, which rolls it back.
    async fn execute_mutation(&self, sql: &str, params: &[&str], id: i32) -> Result<bool, StoreError> {
        tracing::debug!(sql = %sql, params = ?params, id, "query (tx)");
        let mut tx = self.pool.begin().await.map_err(StoreError::Connect)?;
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(*p);
        }
        let result = query
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Query)?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await.map_err(StoreError::Query)?;
        Ok(true)
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let sql = sql::select_all();
        tracing::debug!(sql = %sql, "query");
        let mut conn = self.pool.acquire().await.map_err(StoreError::Connect)?;
        sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(StoreError::Query)
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError> {
        let sql = sql::select_by_id();
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.pool.acquire().await.map_err(StoreError::Connect)?;
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(StoreError::Query)
    }

    async fn create(&self, input: &StudentInput) -> Result<i32, StoreError> {
        let sql = sql::insert();
        tracing::debug!(sql = %sql, name = %input.name, grade = %input.grade, "query (tx)");
        let mut tx = self.pool.begin().await.map_err(StoreError::Connect)?;
        let (id,): (i32,) = sqlx::query_as(&sql)
            .bind(&input.name)
            .bind(&input.grade)
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::Query)?;
        tx.commit().await.map_err(StoreError::Query)?;
        Ok(id)
    }

    async fn replace(&self, id: i32, input: &StudentInput) -> Result<bool, StoreError> {
        let sql = sql::replace();
        self.execute_mutation(&sql, &[input.name.as_str(), input.grade.as_str()], id).await
    }

    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, StoreError> {
        let q = sql::update_fields(patch);
        let params: Vec<&str> = q.params.iter().map(String::as_str).collect();
        self.execute_mutation(&q.sql, &params, id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let sql = sql::delete();
        self.execute_mutation(&sql, &[], id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::Connect)?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }
}
