//! Server-rendered pages
//!
//! Pages are rendered with Askama; interpolated values are HTML-escaped by
//! the template engine.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use compass_core::{DemoCredential, Role};
use tracing::error;

/// Sign-in page: role selector, form, and the optional demo account hint
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub roles: &'static [Role],
    /// Empty hides the hint
    pub credentials: Vec<DemoCredential>,
}

impl LoginTemplate {
    pub fn new(credentials: Vec<DemoCredential>) -> Self {
        Self {
            title: "Campus Compass - Sign in".to_string(),
            roles: &Role::ALL,
            credentials,
        }
    }
}

/// Render a template into a response, logging failures as a 500
pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render template");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_template_lists_roles_and_credentials() {
        let html = LoginTemplate::new(vec![DemoCredential {
            role: Role::Faculty,
            email: "lisa.anderson@college.edu".to_string(),
        }])
        .render()
        .unwrap();

        for role in Role::ALL {
            assert!(html.contains(&format!("<option value=\"{}\">{}</option>", role, role.label())));
        }
        assert!(html.contains("Demo Credentials:"));
        assert!(html.contains("lisa.anderson@college.edu"));
        assert!(html.contains("/api/auth/login"));
    }

    #[test]
    fn test_login_template_hides_empty_hint() {
        let html = LoginTemplate::new(Vec::new()).render().unwrap();
        assert!(!html.contains("Demo Credentials:"));
        assert!(html.contains("Select your role"));
    }

    #[test]
    fn test_directory_values_are_escaped() {
        let html = LoginTemplate::new(vec![DemoCredential {
            role: Role::Admin,
            email: "<script>alert(1)</script>@college.edu".to_string(),
        }])
        .render()
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
