use std::env;

const DEFAULT_DB_HOST: &str = "cluster0.pzmwwb7.mongodb.net";
const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "https://academe-connect.web.app"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = match lookup("MONGO_URI") {
            Some(uri) => uri,
            None => {
                let user = lookup("DB_USER").ok_or(ConfigError::Missing("MONGO_URI or DB_USER"))?;
                let pass = lookup("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?;
                let host = lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
                format!("mongodb+srv://{user}:{pass}@{host}/?retryWrites=true&w=majority")
            }
        };

        let jwt_secret = lookup("JWT_SECRET")
            .or_else(|| lookup("ACCESS_TOKEN_SECRET"))
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 5000,
        };

        let allowed_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            mongo_uri,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "AssignmentDB".to_string()),
            jwt_secret,
            port,
            allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
