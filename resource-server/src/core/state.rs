//! Server state shared by every handler

use std::sync::Arc;

use shared::AppError;

use crate::api::upload::UploadStore;
use crate::core::Config;
use crate::db::DbService;

/// Cloned into each request; all fields are cheap handles.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub uploads: UploadStore,
}

impl ServerState {
    /// Open the store named in `config` and prepare the upload directory.
    ///
    /// Fails when the store cannot be opened or migrated.
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db = DbService::connect(&config.database_url, config.database_max_connections).await?;
        Self::with_db(config, db).await
    }

    /// Build state around an already opened store
    pub async fn with_db(config: Config, db: DbService) -> Result<Self, AppError> {
        let uploads = UploadStore::new(&config.upload_dir, config.max_upload_bytes);
        if config.resource.serves_uploads() {
            uploads.ensure_dir().await?;
        }
        Ok(Self {
            config: Arc::new(config),
            db,
            uploads,
        })
    }
}
