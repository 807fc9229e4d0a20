use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::config::{AppConfig, FailurePolicy};
use crate::db;
use crate::users::{
    error::UserError,
    repo::{PgUserRepository, UserRepository},
    validation::{password_rules, FieldRules},
};
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub views: Arc<Views>,
    pub password_rules: Arc<FieldRules>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await;
        let users = Arc::new(PgUserRepository::new(pool)) as Arc<dyn UserRepository>;
        Self::from_parts(Arc::new(config), users)
    }

    pub fn from_parts(config: Arc<AppConfig>, users: Arc<dyn UserRepository>) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            users,
            views: Arc::new(Views::new()?),
            password_rules: Arc::new(password_rules()),
        })
    }

    /// Path of the list page; every successful write lands here.
    pub fn root(&self) -> &str {
        &self.config.mount
    }

    /// Prefix for per-user links (`{base}/edit/{id}`).
    pub fn base(&self) -> &str {
        if self.config.mount == "/" {
            ""
        } else {
            &self.config.mount
        }
    }

    /// 302 back to the list page.
    pub fn redirect_to_list(&self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.root().to_string())]).into_response()
    }

    /// Applies the configured policy to a failed store write.
    pub fn persistence_failure(&self, op: &'static str, err: anyhow::Error) -> Result<Response, UserError> {
        match self.config.failure_policy {
            FailurePolicy::LogAndRedirect => {
                error!(error = %err, op, "store write failed; redirecting to list");
                Ok(self.redirect_to_list())
            }
            FailurePolicy::Surface => Err(UserError::Persistence(err.context(op))),
        }
    }
}
