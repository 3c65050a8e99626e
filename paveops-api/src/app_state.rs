use std::sync::Arc;

use pricing::QuoteCalculator;
use sqlx::PgPool;

use crate::repositories::{
    ClientRepositoryImpl, EquipmentRepositoryImpl, JobRepositoryImpl, LabourRepositoryImpl,
    MaterialRepositoryImpl, QuoteRepositoryImpl,
};

#[derive(Clone)]
pub struct AppState {
    pub client_repo: Arc<ClientRepositoryImpl>,
    pub labour_repo: Arc<LabourRepositoryImpl>,
    pub equipment_repo: Arc<EquipmentRepositoryImpl>,
    pub material_repo: Arc<MaterialRepositoryImpl>,
    pub job_repo: Arc<JobRepositoryImpl>,
    pub quote_repo: Arc<QuoteRepositoryImpl>,
    pub calculator: QuoteCalculator,
}

impl AppState {
    pub fn new(db_pool: PgPool, calculator: QuoteCalculator) -> Self {
        Self {
            client_repo: Arc::new(ClientRepositoryImpl::new(db_pool.clone())),
            labour_repo: Arc::new(LabourRepositoryImpl::new(db_pool.clone())),
            equipment_repo: Arc::new(EquipmentRepositoryImpl::new(db_pool.clone())),
            material_repo: Arc::new(MaterialRepositoryImpl::new(db_pool.clone())),
            job_repo: Arc::new(JobRepositoryImpl::new(db_pool.clone())),
            quote_repo: Arc::new(QuoteRepositoryImpl::new(db_pool)),
            calculator,
        }
    }
}
