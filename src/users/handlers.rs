use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    state::AppState,
    users::{
        dto::{parse_id, UserForm},
        error::UserError,
        password::hash_password,
        repo_types::{User, UserChanges},
    },
    views::{EditView, IndexView},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", super::list_routes())
        .route("/edit/:id", get(edit_form))
        .route("/update/:id", post(update_user))
        .route("/delete/:id", get(delete_user))
}

fn render_index(state: &AppState, users: &[User], errors: Option<&[String]>) -> Result<Html<String>, UserError> {
    let html = state.views.index(&IndexView {
        root: state.root(),
        base: state.base(),
        users,
        errors,
    })?;
    Ok(Html(html))
}

fn render_edit(state: &AppState, user: &User, errors: Option<&[String]>) -> Result<Html<String>, UserError> {
    let html = state.views.edit(&EditView {
        root: state.root(),
        base: state.base(),
        user,
        errors,
    })?;
    Ok(Html(html))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Html<String>, UserError> {
    let users = state.users.list_all().await.map_err(UserError::Persistence)?;
    render_index(&state, &users, None)
}

#[instrument(skip(state, form))]
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Result<Response, UserError> {
    let errors = state.password_rules.check(&form.password);
    if !errors.is_empty() {
        warn!(field = state.password_rules.field, count = errors.len(), "create rejected by validation");
        let users = state.users.list_all().await.map_err(UserError::Persistence)?;
        return Ok(render_index(&state, &users, Some(errors.as_slice()))?.into_response());
    }

    let hash = hash_password(&form.password).map_err(UserError::Hash)?;

    match state.users.create(&form.name, &form.email, &hash).await {
        Ok(user) => info!(user_id = %user.id, "user created"),
        Err(e) => return state.persistence_failure("create user", e),
    }
    Ok(state.redirect_to_list())
}

#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, UserError> {
    let id = parse_id(&id).ok_or(UserError::NotFound)?;
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(UserError::Persistence)?
        .ok_or(UserError::NotFound)?;
    render_edit(&state, &user, None)
}

/// Overwrites name, email and password. The password is hashed before it is stored.
#[instrument(skip(state, form))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Result<Response, UserError> {
    let id = parse_id(&id);

    let errors = state.password_rules.check(&form.password);
    if !errors.is_empty() {
        warn!(field = state.password_rules.field, count = errors.len(), "update rejected by validation");
        let id = id.ok_or(UserError::NotFound)?;
        let user = state
            .users
            .find_by_id(id)
            .await
            .map_err(UserError::Persistence)?
            .ok_or(UserError::NotFound)?;
        return Ok(render_edit(&state, &user, Some(errors.as_slice()))?.into_response());
    }

    let Some(id) = id else {
        warn!("update for malformed id ignored");
        return Ok(state.redirect_to_list());
    };

    let hash = hash_password(&form.password).map_err(UserError::Hash)?;
    let changes = UserChanges {
        name: Some(form.name),
        email: Some(form.email),
        password_hash: Some(hash),
    };

    match state.users.update_by_id(id, changes).await {
        Ok(Some(user)) => info!(user_id = %user.id, "user updated"),
        Ok(None) => warn!(user_id = %id, "update for unknown user ignored"),
        Err(e) => return state.persistence_failure("update user", e),
    }
    Ok(state.redirect_to_list())
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, UserError> {
    if let Some(id) = parse_id(&id) {
        if let Err(e) = state.users.delete_by_id(id).await {
            return state.persistence_failure("delete user", e);
        }
        info!(user_id = %id, "user deleted");
    }
    Ok(state.redirect_to_list())
}
