use sqlx::PgPool;

use crate::domain::LabourResource;

use super::repo_error::RepositoryError;

pub trait LabourRepository {
    async fn get_labour_entries(&self) -> Result<Vec<LabourResource>, RepositoryError>;
    async fn get_labour_entry(&self, id: i32) -> Result<LabourResource, RepositoryError>;
    async fn add_labour_entry(
        &self,
        entry: &NewLabourResource,
    ) -> Result<LabourResource, RepositoryError>;
    async fn update_labour_entry(
        &self,
        id: i32,
        entry: &NewLabourResource,
    ) -> Result<LabourResource, RepositoryError>;
    async fn delete_labour_entry(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct LabourRepositoryImpl {
    pool: PgPool,
}

impl LabourRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LabourRepository for LabourRepositoryImpl {
    async fn get_labour_entries(&self) -> Result<Vec<LabourResource>, RepositoryError> {
        let entries = sqlx::query_as::<_, LabourResource>(
            r#"
            SELECT id, name, role, cost_rate, charge_out_rate, night_rate, notes
            FROM labour_resources
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_labour_entry(&self, id: i32) -> Result<LabourResource, RepositoryError> {
        let entry = sqlx::query_as::<_, LabourResource>(
            r#"
            SELECT id, name, role, cost_rate, charge_out_rate, night_rate, notes
            FROM labour_resources
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("labour resource {id}")))?;

        Ok(entry)
    }

    async fn add_labour_entry(
        &self,
        entry: &NewLabourResource,
    ) -> Result<LabourResource, RepositoryError> {
        let entry = sqlx::query_as::<_, LabourResource>(
            r#"
            INSERT INTO labour_resources (name, role, cost_rate, charge_out_rate, night_rate, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, role, cost_rate, charge_out_rate, night_rate, notes
            "#,
        )
        .bind(&entry.name)
        .bind(&entry.role)
        .bind(entry.cost_rate)
        .bind(entry.charge_out_rate)
        .bind(entry.night_rate)
        .bind(&entry.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn update_labour_entry(
        &self,
        id: i32,
        entry: &NewLabourResource,
    ) -> Result<LabourResource, RepositoryError> {
        let entry = sqlx::query_as::<_, LabourResource>(
            r#"
            UPDATE labour_resources
            SET name = $2,
                role = $3,
                cost_rate = $4,
                charge_out_rate = $5,
                night_rate = $6,
                notes = $7
            WHERE id = $1
            RETURNING id, name, role, cost_rate, charge_out_rate, night_rate, notes
            "#,
        )
        .bind(id)
        .bind(&entry.name)
        .bind(&entry.role)
        .bind(entry.cost_rate)
        .bind(entry.charge_out_rate)
        .bind(entry.night_rate)
        .bind(&entry.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("labour resource {id}")))?;

        Ok(entry)
    }

    async fn delete_labour_entry(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM labour_resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("labour resource {id}")));
        }

        Ok(())
    }
}

pub struct NewLabourResource {
    pub name: String,
    pub role: String,
    pub cost_rate: f64,
    pub charge_out_rate: f64,
    pub night_rate: f64,
    pub notes: String,
}
