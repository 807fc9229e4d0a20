/// What a handler does when the store rejects a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the error and send the user back to the list as if nothing happened.
    #[default]
    LogAndRedirect,
    /// Log the error and answer with a 500.
    Surface,
}

impl std::str::FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redirect" | "log_and_redirect" => Ok(FailurePolicy::LogAndRedirect),
            "error" | "surface" => Ok(FailurePolicy::Surface),
            other => anyhow::bail!("unknown persistence failure policy: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Prefix the user routes are nested under; redirects point here.
    pub mount: String,
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let failure_policy = match std::env::var("PERSISTENCE_FAILURE_POLICY") {
            Ok(v) => v.parse()?,
            Err(_) => FailurePolicy::default(),
        };
        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            mount: normalize_mount(
                &std::env::var("USERS_MOUNT").unwrap_or_else(|_| "/users".into()),
            ),
            failure_policy,
        })
    }
}

/// `users/` and `/users/` both become `/users`; an empty value becomes `/`.
pub fn normalize_mount(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else {
        format!("/{trimmed}")
    }
}
