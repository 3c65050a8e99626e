use sqlx::PgPool;

use crate::domain::{EquipmentResource, Ownership};

use super::repo_error::RepositoryError;

pub trait EquipmentRepository {
    async fn get_equipment_entries(&self) -> Result<Vec<EquipmentResource>, RepositoryError>;
    async fn get_equipment_entry(&self, id: i32) -> Result<EquipmentResource, RepositoryError>;
    async fn add_equipment_entry(
        &self,
        entry: &NewEquipmentResource,
    ) -> Result<EquipmentResource, RepositoryError>;
    async fn update_equipment_entry(
        &self,
        id: i32,
        entry: &NewEquipmentResource,
    ) -> Result<EquipmentResource, RepositoryError>;
    async fn delete_equipment_entry(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct EquipmentRepositoryImpl {
    pool: PgPool,
}

impl EquipmentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EquipmentRepository for EquipmentRepositoryImpl {
    async fn get_equipment_entries(&self) -> Result<Vec<EquipmentResource>, RepositoryError> {
        let entries = sqlx::query_as::<_, EquipmentResource>(
            r#"
            SELECT id, name, category, charge_out_rate, night_rate, owned_or_hired, supplier, notes
            FROM equipment_resources
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_equipment_entry(&self, id: i32) -> Result<EquipmentResource, RepositoryError> {
        let entry = sqlx::query_as::<_, EquipmentResource>(
            r#"
            SELECT id, name, category, charge_out_rate, night_rate, owned_or_hired, supplier, notes
            FROM equipment_resources
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("equipment resource {id}")))?;

        Ok(entry)
    }

    async fn add_equipment_entry(
        &self,
        entry: &NewEquipmentResource,
    ) -> Result<EquipmentResource, RepositoryError> {
        let entry = sqlx::query_as::<_, EquipmentResource>(
            r#"
            INSERT INTO equipment_resources
                (name, category, charge_out_rate, night_rate, owned_or_hired, supplier, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, category, charge_out_rate, night_rate, owned_or_hired, supplier, notes
            "#,
        )
        .bind(&entry.name)
        .bind(&entry.category)
        .bind(entry.charge_out_rate)
        .bind(entry.night_rate)
        .bind(entry.owned_or_hired.to_string())
        .bind(&entry.supplier)
        .bind(&entry.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn update_equipment_entry(
        &self,
        id: i32,
        entry: &NewEquipmentResource,
    ) -> Result<EquipmentResource, RepositoryError> {
        let entry = sqlx::query_as::<_, EquipmentResource>(
            r#"
            UPDATE equipment_resources
            SET name = $2,
                category = $3,
                charge_out_rate = $4,
                night_rate = $5,
                owned_or_hired = $6,
                supplier = $7,
                notes = $8
            WHERE id = $1
            RETURNING id, name, category, charge_out_rate, night_rate, owned_or_hired, supplier, notes
            "#,
        )
        .bind(id)
        .bind(&entry.name)
        .bind(&entry.category)
        .bind(entry.charge_out_rate)
        .bind(entry.night_rate)
        .bind(entry.owned_or_hired.to_string())
        .bind(&entry.supplier)
        .bind(&entry.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("equipment resource {id}")))?;

        Ok(entry)
    }

    async fn delete_equipment_entry(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM equipment_resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "equipment resource {id}"
            )));
        }

        Ok(())
    }
}

pub struct NewEquipmentResource {
    pub name: String,
    pub category: String,
    pub charge_out_rate: f64,
    pub night_rate: f64,
    pub owned_or_hired: Ownership,
    pub supplier: String,
    pub notes: String,
}
