use std::sync::Arc;

use tax_core::DeductionRepository;

use crate::auth::AdminCredentials;

/// Shared by every handler. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn DeductionRepository>,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn DeductionRepository>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            repo,
            admin: Arc::new(admin),
        }
    }
}
