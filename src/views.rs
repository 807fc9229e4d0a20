use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::users::repo_types::User;

pub const INDEX: &str = "index";
pub const EDIT: &str = "partials/edit";

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// `root` is the list page path; `base` prefixes the per-user links and is
/// empty when mounted at `/`.
/// `errors` is `None` on a clean render so templates can skip the block.
#[derive(Debug, Serialize)]
pub struct IndexView<'a> {
    pub root: &'a str,
    pub base: &'a str,
    pub users: &'a [User],
    pub errors: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
pub struct EditView<'a> {
    pub root: &'a str,
    pub base: &'a str,
    pub user: &'a User,
    pub errors: Option<&'a [String]>,
}

/// Compiled page templates. Built once at startup and shared read-only.
pub struct Views {
    handlebars: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ViewError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(INDEX, include_str!("../templates/index.hbs"))?;
        handlebars.register_template_string(EDIT, include_str!("../templates/partials/edit.hbs"))?;
        Ok(Self { handlebars })
    }

    pub fn index(&self, view: &IndexView<'_>) -> Result<String, ViewError> {
        Ok(self.handlebars.render(INDEX, view)?)
    }

    pub fn edit(&self, view: &EditView<'_>) -> Result<String, ViewError> {
        Ok(self.handlebars.render(EDIT, view)?)
    }
}
