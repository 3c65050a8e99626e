use sqlx::PgPool;

use crate::domain::Client;

use super::repo_error::RepositoryError;

pub trait ClientRepository {
    async fn get_clients(&self) -> Result<Vec<Client>, RepositoryError>;
    async fn add_client(&self, client: &NewClient) -> Result<Client, RepositoryError>;
    async fn update_client(&self, id: i32, client: &NewClient)
        -> Result<Client, RepositoryError>;
    async fn delete_client(&self, id: i32) -> Result<(), RepositoryError>;
}

pub struct ClientRepositoryImpl {
    pool: PgPool,
}

impl ClientRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ClientRepository for ClientRepositoryImpl {
    async fn get_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, first_name, last_name, email, phone, client_type, notes
            FROM clients
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn add_client(&self, client: &NewClient) -> Result<Client, RepositoryError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (first_name, last_name, email, phone, client_type, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, phone, client_type, notes
            "#,
        )
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.client_type)
        .bind(&client.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    async fn update_client(
        &self,
        id: i32,
        client: &NewClient,
    ) -> Result<Client, RepositoryError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET first_name = $2,
                last_name = $3,
                email = $4,
                phone = $5,
                client_type = $6,
                notes = $7
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, client_type, notes
            "#,
        )
        .bind(id)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.client_type)
        .bind(&client.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("client {id}")))?;

        Ok(client)
    }

    async fn delete_client(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("client {id}")));
        }

        Ok(())
    }
}

pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub client_type: String,
    pub notes: String,
}
