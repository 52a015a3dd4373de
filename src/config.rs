use secrecy::SecretString;
use std::env;

const DEV_JWT_SECRET: &str = "dev-secret-key-replace-in-prod";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub session_hours: i64,
    pub gemini_api_key: Option<SecretString>,
    pub ai_model_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "cbc_curriculum_db".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            session_hours: env::var("SESSION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24 * 14),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            ai_model_name: env::var("AI_MODEL_NAME")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
        }
    }

    /// Logs loud warnings when development defaults are still in place.
    pub fn warn_on_dev_defaults(&self) {
        use secrecy::ExposeSecret;

        if self.jwt_secret.expose_secret() == DEV_JWT_SECRET {
            log::warn!("Using default JWT_SECRET. Set JWT_SECRET environment variable!");
        }
        if self.gemini_api_key.is_none() {
            log::warn!("GEMINI_API_KEY not set. AI generation will be disabled.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "cbc_curriculum_test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            session_hours: 1,
            gemini_api_key: None,
            ai_model_name: "gemini-1.5-flash".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(!config.ai_model_name.is_empty());
        assert!(config.session_hours > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "cbc_curriculum_test");
        assert!(config.gemini_api_key.is_none());
    }
}
