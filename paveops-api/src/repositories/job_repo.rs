use sqlx::PgPool;
use time::Date;

use crate::domain::Job;

use super::repo_error::RepositoryError;

pub trait JobRepository {
    async fn get_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
    async fn add_job(&self, job: &NewJob) -> Result<Job, RepositoryError>;
}

pub struct JobRepositoryImpl {
    pool: PgPool,
}

impl JobRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl JobRepository for JobRepositoryImpl {
    async fn get_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, job_name, site_address, notes, job_dates, client_id
            FROM jobs
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn add_job(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (job_name, site_address, notes, job_dates, client_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_name, site_address, notes, job_dates, client_id
            "#,
        )
        .bind(&job.job_name)
        .bind(&job.site_address)
        .bind(&job.notes)
        .bind(&job.job_dates)
        .bind(job.client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }
}

pub struct NewJob {
    pub job_name: String,
    pub site_address: String,
    pub notes: String,
    pub job_dates: Vec<Date>,
    pub client_id: i32,
}
