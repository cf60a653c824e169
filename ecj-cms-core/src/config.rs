use std::env;
use tracing::{debug, error, info};

use crate::error::CmsError;

/// Used when neither `DIRECTUS_URL` nor `PUBLIC_DIRECTUS_URL` is set.
pub const DEFAULT_DIRECTUS_URL: &str = "http://localhost:8055";

pub const ADMIN_TOKEN_VAR: &str = "DIRECTUS_ADMIN_TOKEN";
pub const ADMIN_URL_VAR: &str = "DIRECTUS_URL";
pub const PUBLIC_URL_VAR: &str = "PUBLIC_DIRECTUS_URL";

/// Where the CMS lives and, for admin commands, how to authenticate.
///
/// Read once at process start and handed to [`crate::client::DirectusClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub base_url: String,
    pub admin_token: Option<String>,
}

impl CmsConfig {
    pub fn new(base_url: impl Into<String>, admin_token: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_token,
        }
    }

    /// Config for the public, read-only side: no token, `PUBLIC_DIRECTUS_URL` or the local default.
    pub fn public_from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = non_empty_var(PUBLIC_URL_VAR).unwrap_or_else(|| DEFAULT_DIRECTUS_URL.to_string());
        info!(base_url = %base_url, "Loaded public CMS config");
        Self::new(base_url, None)
    }

    /// Config for provisioning and seeding. The admin token is mandatory.
    ///
    /// The base URL is `DIRECTUS_URL`, then `PUBLIC_DIRECTUS_URL`, then the local default.
    pub fn admin_from_env() -> Result<Self, CmsError> {
        dotenvy::dotenv().ok();
        let token = match non_empty_var(ADMIN_TOKEN_VAR) {
            Some(token) => token,
            None => {
                error!(var = ADMIN_TOKEN_VAR, "Admin token missing in environment");
                return Err(CmsError::MissingEnv(ADMIN_TOKEN_VAR));
            }
        };
        let base_url = non_empty_var(ADMIN_URL_VAR)
            .or_else(|| non_empty_var(PUBLIC_URL_VAR))
            .unwrap_or_else(|| DEFAULT_DIRECTUS_URL.to_string());
        info!(base_url = %base_url, token_set = !token.is_empty(), "Loaded admin CMS config");
        Ok(Self::new(base_url, Some(token)))
    }

    pub fn admin_url(&self) -> String {
        format!("{}/admin", self.base_url)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => {
            debug!(var = name, "Environment variable set but empty");
            None
        }
        Err(_) => None,
    }
}
