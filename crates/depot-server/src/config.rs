//! Server configuration, loaded from the environment.

use anyhow::Context;
use depot_auth::AuthConfig;
use depot_db::DbConfig;

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind (default: `127.0.0.1:3000`).
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Departments seeded at startup, as `(slug, display name)` pairs.
    pub seed_departments: Vec<(String, String)>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Load configuration from `DEPOT_*` environment variables,
    /// falling back to development defaults for everything except the
    /// JWT public key, which is required.
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig::from_env();

        let public_key_path = std::env::var("DEPOT_JWT_PUBLIC_KEY_FILE")
            .context("DEPOT_JWT_PUBLIC_KEY_FILE must be set")?;
        let jwt_public_key_pem = std::fs::read_to_string(&public_key_path)
            .with_context(|| format!("reading JWT public key from {public_key_path}"))?;

        // The private key is only needed when this deployment issues
        // tokens itself.
        let jwt_private_key_pem = match std::env::var("DEPOT_JWT_PRIVATE_KEY_FILE") {
            Ok(path) => std::fs::read_to_string(&path)
                .with_context(|| format!("reading JWT private key from {path}"))?,
            Err(_) => String::new(),
        };

        let auth = AuthConfig {
            jwt_public_key_pem,
            jwt_private_key_pem,
            access_token_lifetime_secs: env_or("DEPOT_TOKEN_LIFETIME_SECS", "86400")
                .parse()
                .context("DEPOT_TOKEN_LIFETIME_SECS must be an integer")?,
            jwt_issuer: env_or("DEPOT_JWT_ISSUER", "depot"),
        };

        // DEPOT_SEED_DEPARTMENTS="marketing:Marketing,it:IT"
        let seed_departments = std::env::var("DEPOT_SEED_DEPARTMENTS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|pair| {
                let (slug, name) = pair.split_once(':')?;
                let slug = slug.trim();
                if slug.is_empty() {
                    return None;
                }
                Some((slug.to_string(), name.trim().to_string()))
            })
            .collect();

        Ok(Self {
            bind_addr: env_or("DEPOT_BIND_ADDR", "127.0.0.1:3000"),
            db,
            auth,
            seed_departments,
        })
    }
}
