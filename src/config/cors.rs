use std::env;

/// Origins allowed to call the API from a browser. The portal's client runs
/// on a separate dev server, so credentials and explicit origins are required.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        };
        assert_eq!(config.allowed_origins.len(), 1);
    }
}
