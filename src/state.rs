//! Estado compartido de la aplicación

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::repositories::RentalStore;
use crate::services::email_service::Mailer;
use crate::services::file_service::FileStorage;
use crate::services::jwt_service::JwtService;
use crate::utils::ids::IdGenerator;

/// Dependencias compartidas por todos los handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RentalStore>,
    pub ids: Arc<IdGenerator>,
    pub jwt: JwtService,
    pub mailer: Arc<dyn Mailer>,
    pub files: Arc<dyn FileStorage>,
    pub config: Arc<EnvironmentConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RentalStore>,
        ids: Arc<IdGenerator>,
        jwt: JwtService,
        mailer: Arc<dyn Mailer>,
        files: Arc<dyn FileStorage>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            store,
            ids,
            jwt,
            mailer,
            files,
            config: Arc::new(config),
        }
    }
}
