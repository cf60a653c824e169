//! Error type shared by every CMS call in the core crate.

/// Everything that can go wrong while talking to Directus or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// A required environment variable is not set.
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    /// The API answered with a non-success status.
    #[error("API Error {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (connection, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body or a record did not have the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A schema or seed catalog could not be parsed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] serde_yaml::Error),
}

impl CmsError {
    /// True when Directus rejected a definition because it is already there.
    ///
    /// Directus reports duplicates as a 400 with an "already exists" message
    /// rather than a dedicated status, so this looks at the body.
    pub fn is_already_exists(&self) -> bool {
        match self {
            CmsError::Api { body, .. } => body.to_lowercase().contains("already exists"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_carries_status_and_body() {
        let err = CmsError::Api {
            status: 403,
            body: "{\"errors\":[{\"message\":\"Forbidden\"}]}".into(),
        };
        assert_eq!(
            err.to_string(),
            "API Error 403: {\"errors\":[{\"message\":\"Forbidden\"}]}"
        );
    }

    #[test]
    fn recognises_duplicate_definition_bodies() {
        let dup = CmsError::Api {
            status: 400,
            body: "Field \"name\" already exists in collection \"tires\"".into(),
        };
        let other = CmsError::Api {
            status: 400,
            body: "Invalid payload".into(),
        };
        assert!(dup.is_already_exists());
        assert!(!other.is_already_exists());
        assert!(!CmsError::MissingEnv("DIRECTUS_ADMIN_TOKEN").is_already_exists());
    }
}
