use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::error::AppError;
use crate::session::{FlashMessages, Session};

/// Data every page template receives.
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    pub app_name: String,
    pub messages: FlashMessages,
}

impl TemplateData {
    /// Pops the session's flash messages, so each is shown exactly once.
    pub fn new(app_name: &str, session: &Session) -> Self {
        Self {
            app_name: app_name.to_string(),
            messages: session.take_messages(),
        }
    }
}

pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => AppError::Template(e).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use std::fmt;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[derive(Template)]
    #[template(source = "<p>{{ value }}</p>", ext = "html")]
    struct Page<D: fmt::Display> {
        value: D,
    }

    #[test]
    fn renders_html() {
        let response = HtmlTemplate(Page { value: "Hello" }).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[test]
    fn render_failure_is_a_server_error() {
        let response = HtmlTemplate(Page { value: Broken }).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "application/json");
    }
}
