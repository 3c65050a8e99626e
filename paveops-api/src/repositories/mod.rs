mod client_repo;
mod equipment_repo;
mod job_repo;
mod labour_repo;
mod material_repo;
mod quote_repo;
mod repo_error;

pub use client_repo::*;
pub use equipment_repo::*;
pub use job_repo::*;
pub use labour_repo::*;
pub use material_repo::*;
pub use quote_repo::*;
pub use repo_error::RepositoryError;
