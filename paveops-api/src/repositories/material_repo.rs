use pricing::MaterialType;
use sqlx::PgPool;

use crate::domain::MaterialResource;

use super::repo_error::RepositoryError;

pub trait MaterialRepository {
    async fn get_materials(&self) -> Result<Vec<MaterialResource>, RepositoryError>;
    async fn get_material(&self, id: i32) -> Result<MaterialResource, RepositoryError>;
    async fn add_material(
        &self,
        material: &NewMaterialResource,
    ) -> Result<MaterialResource, RepositoryError>;
    async fn update_material(
        &self,
        id: i32,
        material: &NewMaterialResource,
    ) -> Result<MaterialResource, RepositoryError>;
    async fn delete_material(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct MaterialRepositoryImpl {
    pool: PgPool,
}

impl MaterialRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MaterialRepository for MaterialRepositoryImpl {
    async fn get_materials(&self) -> Result<Vec<MaterialResource>, RepositoryError> {
        let materials = sqlx::query_as::<_, MaterialResource>(
            r#"
            SELECT id, name, purchase_price, material_type, measurement_unit,
                   formula_constant, supplier, notes
            FROM material_resources
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(materials)
    }

    async fn get_material(&self, id: i32) -> Result<MaterialResource, RepositoryError> {
        let material = sqlx::query_as::<_, MaterialResource>(
            r#"
            SELECT id, name, purchase_price, material_type, measurement_unit,
                   formula_constant, supplier, notes
            FROM material_resources
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("material {id}")))?;

        Ok(material)
    }

    async fn add_material(
        &self,
        material: &NewMaterialResource,
    ) -> Result<MaterialResource, RepositoryError> {
        let material = sqlx::query_as::<_, MaterialResource>(
            r#"
            INSERT INTO material_resources
                (name, purchase_price, material_type, measurement_unit,
                 formula_constant, supplier, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, purchase_price, material_type, measurement_unit,
                      formula_constant, supplier, notes
            "#,
        )
        .bind(&material.name)
        .bind(material.purchase_price)
        .bind(material.material_type.to_string())
        .bind(&material.measurement_unit)
        .bind(material.formula_constant)
        .bind(&material.supplier)
        .bind(&material.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(material)
    }

    async fn update_material(
        &self,
        id: i32,
        material: &NewMaterialResource,
    ) -> Result<MaterialResource, RepositoryError> {
        let material = sqlx::query_as::<_, MaterialResource>(
            r#"
            UPDATE material_resources
            SET name = $2,
                purchase_price = $3,
                material_type = $4,
                measurement_unit = $5,
                formula_constant = $6,
                supplier = $7,
                notes = $8
            WHERE id = $1
            RETURNING id, name, purchase_price, material_type, measurement_unit,
                      formula_constant, supplier, notes
            "#,
        )
        .bind(id)
        .bind(&material.name)
        .bind(material.purchase_price)
        .bind(material.material_type.to_string())
        .bind(&material.measurement_unit)
        .bind(material.formula_constant)
        .bind(&material.supplier)
        .bind(&material.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("material {id}")))?;

        Ok(material)
    }

    async fn delete_material(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM material_resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("material {id}")));
        }

        Ok(())
    }
}

pub struct NewMaterialResource {
    pub name: String,
    pub purchase_price: f64,
    pub material_type: MaterialType,
    pub measurement_unit: String,
    pub formula_constant: Option<f64>,
    pub supplier: String,
    pub notes: String,
}
