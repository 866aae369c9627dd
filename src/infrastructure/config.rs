#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_url: String,
    pub mongodb_db: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Reads configuration once at startup. Request handlers never touch the
    /// process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let mongodb_url = std::env::var("MONGODB_URL")
            .map_err(|_| anyhow::anyhow!("MONGODB_URL must be set"))?;
        let mongodb_db = std::env::var("MONGODB_DB").unwrap_or_else(|_| "catalog".into());
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
        // actix-cors rejects a wildcard origin once credentials are allowed,
        // so the fallback is a concrete dev origin.
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            mongodb_url,
            mongodb_db,
            jwt_secret,
            cors_origins,
        })
    }
}
