use std::sync::Arc;

use crate::{
    auth::jwt::JwtService,
    blog::{BlogStore, store::StoreError},
    config::Config,
    enquiry::Mailer,
    passwords::AdminCredentials,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<BlogStore>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt: Arc<JwtService>,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    /// Opens the listing store under the configured content directory.
    pub async fn new(config: Config, mailer: Arc<dyn Mailer>) -> Result<Self, StoreError> {
        let store = BlogStore::open(config.layout()).await?;
        Ok(Self {
            jwt: Arc::new(JwtService::new(config.jwt_secret())),
            admin: Arc::new(AdminCredentials::new(
                config.admin_username(),
                config.admin_password_hash().map(str::to_string),
            )),
            store: Arc::new(store),
            mailer,
            config: Arc::new(config),
        })
    }
}
