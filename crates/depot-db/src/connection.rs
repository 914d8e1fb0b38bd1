//! Connection settings for the matrix store.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

/// Where the permission matrix lives.
///
/// Loadable from `DEPOT_DB_*` environment variables; the defaults
/// target a local development instance.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket endpoint, host:port.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "depot".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}

impl DbConfig {
    /// Read `DEPOT_DB_URL`, `DEPOT_DB_NAMESPACE`, `DEPOT_DB_DATABASE`,
    /// `DEPOT_DB_USERNAME` and `DEPOT_DB_PASSWORD`, keeping the
    /// development default for any variable that is unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_or("DEPOT_DB_URL", defaults.url),
            namespace: env_or("DEPOT_DB_NAMESPACE", defaults.namespace),
            database: env_or("DEPOT_DB_DATABASE", defaults.database),
            username: env_or("DEPOT_DB_USERNAME", defaults.username),
            password: env_or("DEPOT_DB_PASSWORD", defaults.password),
        }
    }

    /// Open the matrix store: WebSocket connect, root signin, then
    /// namespace/database selection. The returned client is cheap to
    /// clone and is what the repository types wrap.
    pub async fn connect(&self) -> Result<Surreal<Client>, DbError> {
        info!(
            url = %self.url,
            namespace = %self.namespace,
            database = %self.database,
            "Opening matrix store connection"
        );

        let db = Surreal::new::<Ws>(&self.url).await?;
        db.signin(Root {
            username: self.username.clone(),
            password: self.password.clone(),
        })
        .await?;
        db.use_ns(&self.namespace).use_db(&self.database).await?;

        info!("Matrix store connection ready");
        Ok(db)
    }
}
