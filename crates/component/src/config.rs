/// Component configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ComponentConfig {
    /// Address the component answers as (default: `push.localhost`).
    pub domain: String,
    /// Database URL (default: `sqlite::memory:`).
    pub database_url: String,
}

impl ComponentConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default           |
    /// |--------------------|-------------------|
    /// | `COMPONENT_DOMAIN` | `push.localhost`  |
    /// | `DATABASE_URL`     | `sqlite::memory:` |
    pub fn from_env() -> Self {
        let domain =
            std::env::var("COMPONENT_DOMAIN").unwrap_or_else(|_| "push.localhost".into());

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".into());

        Self {
            domain,
            database_url,
        }
    }
}
