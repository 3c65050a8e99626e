use pricing::{MaterialType, Phase};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Quote, QuoteMaterialLine, QuoteResourceLine, QuoteStatus};

use super::repo_error::RepositoryError;

pub trait QuoteRepository {
    async fn get_quotes(&self) -> Result<Vec<Quote>, RepositoryError>;
    async fn get_quote(&self, id: i32) -> Result<Quote, RepositoryError>;
    async fn get_labour_lines(&self, quote_id: i32)
        -> Result<Vec<QuoteResourceLine>, RepositoryError>;
    async fn get_equipment_lines(
        &self,
        quote_id: i32,
    ) -> Result<Vec<QuoteResourceLine>, RepositoryError>;
    async fn get_material_lines(
        &self,
        quote_id: i32,
    ) -> Result<Vec<QuoteMaterialLine>, RepositoryError>;
    async fn create_quote(&self, quote: &NewQuote) -> Result<Quote, RepositoryError>;
    async fn update_status(&self, id: i32, status: QuoteStatus) -> Result<(), RepositoryError>;
}

pub struct QuoteRepositoryImpl {
    pool: PgPool,
}

impl QuoteRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const QUOTE_COLUMNS: &str = "id, client_id, title, summary, job_site_address, status, \
                             date_created, total_area, notes, quote_number, markup, gst, \
                             total, cost_base, profit, margin";

impl QuoteRepository for QuoteRepositoryImpl {
    async fn get_quotes(&self) -> Result<Vec<Quote>, RepositoryError> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY date_created DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    async fn get_quote(&self, id: i32) -> Result<Quote, RepositoryError> {
        let quote = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("quote {id}")))?;

        Ok(quote)
    }

    async fn get_labour_lines(
        &self,
        quote_id: i32,
    ) -> Result<Vec<QuoteResourceLine>, RepositoryError> {
        fetch_resource_lines(&self.pool, "quote_labour_lines", quote_id).await
    }

    async fn get_equipment_lines(
        &self,
        quote_id: i32,
    ) -> Result<Vec<QuoteResourceLine>, RepositoryError> {
        fetch_resource_lines(&self.pool, "quote_equipment_lines", quote_id).await
    }

    async fn get_material_lines(
        &self,
        quote_id: i32,
    ) -> Result<Vec<QuoteMaterialLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, QuoteMaterialLine>(
            r#"
            SELECT id, quote_id, material_id, material_type, sqm, depth, quantity,
                   sell_price, charge
            FROM quote_material_lines
            WHERE quote_id = $1
            ORDER BY id
            "#,
        )
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Insert the header and all line rows in one transaction. The header's
    /// financial fields are already computed; nothing here does arithmetic.
    async fn create_quote(&self, quote: &NewQuote) -> Result<Quote, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO quotes
                (client_id, title, summary, job_site_address, status, total_area,
                 notes, markup, gst, total, cost_base, profit, margin)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(quote.client_id)
        .bind(&quote.title)
        .bind(&quote.summary)
        .bind(&quote.job_site_address)
        .bind(quote.status.to_string())
        .bind(quote.total_area)
        .bind(&quote.notes)
        .bind(quote.markup)
        .bind(quote.gst)
        .bind(quote.total)
        .bind(quote.cost_base)
        .bind(quote.profit)
        .bind(quote.margin)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE quotes SET quote_number = $1 WHERE id = $2")
            .bind(quote_number(id))
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for line in &quote.labour {
            insert_resource_line(&mut tx, "quote_labour_lines", id, line).await?;
        }
        for line in &quote.equipment {
            insert_resource_line(&mut tx, "quote_equipment_lines", id, line).await?;
        }
        for line in &quote.materials {
            insert_material_line(&mut tx, id, line).await?;
        }

        let created = sqlx::query_as::<_, Quote>(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_status(&self, id: i32, status: QuoteStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE quotes SET status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("quote {id}")));
        }

        Ok(())
    }
}

async fn fetch_resource_lines(
    pool: &PgPool,
    table: &str,
    quote_id: i32,
) -> Result<Vec<QuoteResourceLine>, RepositoryError> {
    let sql = format!(
        "SELECT id, quote_id, resource_id, quantity, charge_rate, total, required_for, is_night \
         FROM {table} WHERE quote_id = $1 ORDER BY id"
    );
    let lines = sqlx::query_as::<_, QuoteResourceLine>(&sql)
        .bind(quote_id)
        .fetch_all(pool)
        .await?;

    Ok(lines)
}

async fn insert_resource_line(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    quote_id: i32,
    line: &NewQuoteResourceLine,
) -> Result<(), RepositoryError> {
    let sql = format!(
        "INSERT INTO {table} \
             (quote_id, resource_id, quantity, charge_rate, total, required_for, is_night) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)"
    );
    sqlx::query(&sql)
        .bind(quote_id)
        .bind(line.resource_id)
        .bind(line.quantity)
        .bind(line.charge_rate)
        .bind(line.total)
        .bind(line.required_for.to_string())
        .bind(line.is_night)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn insert_material_line(
    tx: &mut Transaction<'_, Postgres>,
    quote_id: i32,
    line: &NewQuoteMaterialLine,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"
        INSERT INTO quote_material_lines
            (quote_id, material_id, material_type, sqm, depth, quantity, sell_price, charge)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(quote_id)
    .bind(line.material_id)
    .bind(line.material_type.to_string())
    .bind(line.sqm)
    .bind(line.depth)
    .bind(line.quantity)
    .bind(line.sell_price)
    .bind(line.charge)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn quote_number(id: i32) -> String {
    format!("Q-{id:05}")
}

pub struct NewQuote {
    pub client_id: i32,
    pub title: String,
    pub summary: String,
    pub job_site_address: String,
    pub status: QuoteStatus,
    pub total_area: f64,
    pub notes: String,
    pub markup: f64,
    pub gst: f64,
    pub total: f64,
    pub cost_base: f64,
    pub profit: f64,
    pub margin: f64,
    pub labour: Vec<NewQuoteResourceLine>,
    pub equipment: Vec<NewQuoteResourceLine>,
    pub materials: Vec<NewQuoteMaterialLine>,
}

pub struct NewQuoteResourceLine {
    pub resource_id: i32,
    pub quantity: f64,
    pub charge_rate: f64,
    pub total: f64,
    pub required_for: Phase,
    pub is_night: bool,
}

pub struct NewQuoteMaterialLine {
    pub material_id: i32,
    pub material_type: MaterialType,
    pub sqm: f64,
    pub depth: f64,
    pub quantity: f64,
    pub sell_price: f64,
    pub charge: f64,
}

#[cfg(test)]
mod tests {
    use super::quote_number;

    #[test]
    fn quote_numbers_are_zero_padded() {
        assert_eq!(quote_number(7), "Q-00007");
        assert_eq!(quote_number(12345), "Q-12345");
        assert_eq!(quote_number(123456), "Q-123456");
    }
}
