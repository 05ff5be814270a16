use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Login rate limiting configuration
    pub rate_limit: RateLimitConfig,
    /// FRED ingestion configuration
    pub fred: FredConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub login_window_secs: u64,
    pub login_max_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct FredConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub observation_start: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid PORT value"))?,
                cors_origins: env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://pricewatch.db".to_string()),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                    // Generate a random secret if not provided (dev only)
                    use rand::Rng;
                    let mut rng = rand::thread_rng();
                    (0..32).map(|_| rng.gen::<u8>()).map(|b| format!("{:02x}", b)).collect()
                }),
            },
            rate_limit: RateLimitConfig {
                login_window_secs: env::var("LOGIN_RATE_WINDOW_SECS")
                    .unwrap_or_else(|_| "900".to_string())
                    .parse()
                    .unwrap_or(900),
                login_max_attempts: env::var("LOGIN_RATE_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            },
            fred: FredConfig {
                api_key: env::var("FRED_API_KEY").ok(),
                base_url: env::var("FRED_BASE_URL").unwrap_or_else(|_| {
                    "https://api.stlouisfed.org/fred/series/observations".to_string()
                }),
                observation_start: env::var("FRED_OBSERVATION_START")
                    .unwrap_or_else(|_| "2023-01-01".to_string()),
            },
        };

        Ok(config)
    }
}
