use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::workflow::{FormState, Outcome, Page};

/// Status for a rendered page: 422 when a submitted form was rejected
pub fn page_status(page: &Page) -> StatusCode {
    match page.state {
        Some(FormState::Rejected) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let status = page_status(&self);

        // Wrap in success envelope; the template renderer consumes `data`
        let envelope = json!({
            "success": status == StatusCode::OK,
            "template": self.template,
            "data": self.context,
        });

        (status, Json(envelope)).into_response()
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Render(page) => page.into_response(),
            Outcome::Redirect(route) => {
                tracing::debug!("Redirecting to {} ({})", route.name(), route.path());
                (StatusCode::SEE_OTHER, [(header::LOCATION, route.path())]).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Route;

    #[test]
    fn redirect_uses_see_other_with_location() {
        let response = Outcome::Redirect(Route::Topic { topic_id: 4 }).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/topics/4");
    }

    #[test]
    fn rejected_form_renders_unprocessable() {
        let page = Page::with_form("learning_logs/new_topic.html", json!({}), FormState::Rejected);
        assert_eq!(Outcome::Render(page).into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn displayed_form_renders_ok() {
        let page = Page::with_form("learning_logs/new_topic.html", json!({}), FormState::FormDisplayed);
        assert_eq!(page_status(&page), StatusCode::OK);
    }
}
