//! PostgreSQL store adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use stencil_core::model::{InputSpec, NewTemplate, Template, TemplateInput, TemplateUpdate};
use stencil_core::store::{StoreError, StoreResult, TemplateStore};

/// Column list for `templates` queries.
const TEMPLATE_COLUMNS: &str = "id, name, description, body, created_at, updated_at";

/// Column list for `template_inputs` queries.
const INPUT_COLUMNS: &str = "id, template_id, name, description, required, created_at";

/// A row from the `templates` table.
#[derive(Debug, FromRow)]
struct TemplateRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Template {
            id: row.id,
            name: row.name,
            description: row.description,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `template_inputs` table.
#[derive(Debug, FromRow)]
struct InputRow {
    id: Uuid,
    template_id: Uuid,
    name: String,
    description: Option<String>,
    required: bool,
    created_at: DateTime<Utc>,
}

impl From<InputRow> for TemplateInput {
    fn from(row: InputRow) -> Self {
        TemplateInput {
            id: row.id,
            template_id: row.template_id,
            name: row.name,
            description: row.description,
            required: row.required,
            created_at: row.created_at,
        }
    }
}

/// A [`TemplateStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        debug!("Running template store migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

fn map_err(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::RowNotFound => StoreError::NotFound(e.to_string()),
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Constraint(db.to_string())
        }
        _ => StoreError::Backend(e.to_string()),
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn create_template(&self, new: NewTemplate) -> StoreResult<Template> {
        let query = format!(
            "INSERT INTO templates (id, name, description, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TEMPLATE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TemplateRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.body)
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.into())
    }

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<Template>> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1");
        let row = sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Into::into))
    }

    async fn get_template_by_name(&self, name: &str) -> StoreResult<Option<Template>> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE name = $1");
        let row = sqlx::query_as::<_, TemplateRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(row.map(Into::into))
    }

    async fn list_templates(&self) -> StoreResult<Vec<Template>> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY created_at");
        let rows = sqlx::query_as::<_, TemplateRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_template(&self, id: Uuid, update: TemplateUpdate) -> StoreResult<Template> {
        let query = format!(
            "UPDATE templates \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 body = COALESCE($4, body), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {TEMPLATE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .bind(&update.name)
            .bind(&update.description)
            .bind(&update.body)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?
            .ok_or_else(|| StoreError::NotFound(format!("template {}", id)))?;
        Ok(row.into())
    }

    async fn delete_template(&self, id: Uuid) -> StoreResult<()> {
        // Inputs go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("template {}", id)));
        }
        Ok(())
    }

    async fn replace_inputs(&self, template_id: Uuid, inputs: Vec<InputSpec>) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;
        sqlx::query("DELETE FROM template_inputs WHERE template_id = $1")
            .bind(template_id)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;
        for spec in &inputs {
            sqlx::query(
                "INSERT INTO template_inputs (id, template_id, name, description, required) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(template_id)
            .bind(&spec.name)
            .bind(&spec.description)
            .bind(spec.required)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;
        }
        tx.commit().await.map_err(map_err)
    }

    async fn list_inputs(&self, template_id: Uuid) -> StoreResult<Vec<TemplateInput>> {
        let query = format!(
            "SELECT {INPUT_COLUMNS} FROM template_inputs \
             WHERE template_id = $1 \
             ORDER BY created_at"
        );
        let rows = sqlx::query_as::<_, InputRow>(&query)
            .bind(template_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
