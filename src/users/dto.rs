use serde::Deserialize;
use uuid::Uuid;

/// Body of the create and update forms. Missing fields arrive as empty strings.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A malformed id names no record; callers treat it like an unknown one.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
