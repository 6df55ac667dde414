pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::import::handlers as imports;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Editing sessions
        .route("/api/v1/sessions", post(sessions::handle_open_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_close_session),
        )
        .route(
            "/api/v1/sessions/:id/onboarding",
            post(sessions::handle_onboarding),
        )
        .route(
            "/api/v1/sessions/:id/sections",
            post(sessions::handle_add_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:index",
            put(sessions::handle_update_section).delete(sessions::handle_delete_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:index/edits",
            post(sessions::handle_edit_section),
        )
        .route("/api/v1/sessions/:id/reorder", post(sessions::handle_reorder))
        .route("/api/v1/sessions/:id/toggle", post(sessions::handle_toggle))
        .route("/api/v1/sessions/:id/save", post(sessions::handle_save))
        .route("/api/v1/sessions/:id/catalog", get(sessions::handle_catalog))
        .route("/api/v1/sessions/:id/preview", get(sessions::handle_preview))
        .route("/api/v1/sessions/:id/review", post(sessions::handle_review))
        // CV import
        .route("/api/v1/imports", post(imports::handle_import_preview))
        .route(
            "/api/v1/imports/confirm",
            post(imports::handle_import_confirm),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::backend::mock::{Call, MockBackend};
    use crate::session::SessionSettings;
    use crate::state::AppState;

    fn stored_resume() -> Value {
        json!({
            "id": "r1",
            "title": "My CV",
            "templateId": "classic",
            "sections": [
                { "id": "s2", "type": "EXPERIENCE", "order": 1, "content": { "entries": [] } },
                { "id": "s1", "type": "PROFILE", "order": 0, "content": { "name": "Jane Doe", "email": "jane@example.com" } }
            ]
        })
    }

    fn app(backend: Arc<MockBackend>) -> axum::Router {
        build_router(AppState::new(
            backend,
            SessionSettings {
                debounce: Duration::from_secs(60),
                rollback_failed_reorder: false,
            },
        ))
    }

    async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(Arc::new(MockBackend::new()));
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_open_edit_and_save_session() {
        let backend = Arc::new(MockBackend::with_resume(stored_resume()));
        let app = app(backend.clone());

        let (status, view) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(view["status"], "saved");
        assert_eq!(view["open_key"], "profile-0");
        assert_eq!(view["resume"]["template"], "classic");
        assert_eq!(view["items"][1]["title"], "Experience");
        let id = view["session_id"].as_str().unwrap().to_string();

        let (status, view) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/sections/1/edits"),
            Some(json!({ "section": "experience", "op": "add" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["status"], "unsaved");
        assert_eq!(view["items"][1]["count"], 1);

        let (status, saved) = send(&app, "POST", &format!("/api/v1/sessions/{id}/save"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["outcome"], "saved");
        assert_eq!(saved["session"]["status"], "saved");
        assert_eq!(saved["session"]["notices"][0]["message"], "Resume saved successfully");
        assert_eq!(backend.saves()[0].personal_information.full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_profile_delete_is_rejected() {
        let backend = Arc::new(MockBackend::with_resume(stored_resume()));
        let app = app(backend.clone());
        let (_, view) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        let id = view["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}/sections/0"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(!backend.calls().iter().any(|call| matches!(call, Call::DeleteSection(_))));
    }

    #[tokio::test]
    async fn test_add_duplicate_section_conflicts() {
        let backend = Arc::new(MockBackend::with_resume(stored_resume()));
        let app = app(backend);
        let (_, view) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        let id = view["session_id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/sections"),
            Some(json!({ "type": "experience" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/sections"),
            Some(json!({ "type": "hobbies" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, catalog) = send(&app, "GET", &format!("/api/v1/sessions/{id}/catalog"), None).await;
        assert_eq!(status, StatusCode::OK);
        let experience = catalog
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["type"] == "experience")
            .unwrap();
        assert_eq!(experience["added"], true);
    }

    async fn open_session(app: &axum::Router) -> String {
        let (_, view) = send(app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        view["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_put_ongoing_entry_with_end_date_is_normalized() {
        let app = app(Arc::new(MockBackend::with_resume(stored_resume())));
        let id = open_session(&app).await;

        let (status, view) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/sections/1"),
            Some(json!({
                "id": "s2",
                "type": "experience",
                "data": { "entries": [{ "id": "e1", "jobTitle": "Engineer", "current": true, "endDate": "2020-01" }] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entry = &view["resume"]["sections"][1]["data"]["entries"][0];
        assert_eq!(entry["current"], true);
        assert_eq!(entry["endDate"], Value::Null);
        assert_eq!(view["status"], "unsaved");
    }

    #[tokio::test]
    async fn test_put_with_repeated_entry_ids_then_delete_removes_one() {
        let app = app(Arc::new(MockBackend::with_resume(stored_resume())));
        let id = open_session(&app).await;

        let (status, view) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/sections/1"),
            Some(json!({
                "id": "s2",
                "type": "experience",
                "data": { "entries": [
                    { "id": "dup", "jobTitle": "A" },
                    { "id": "dup", "jobTitle": "B" },
                    { "id": "c", "jobTitle": "C" }
                ] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries = view["resume"]["sections"][1]["data"]["entries"].as_array().unwrap();
        assert_eq!(entries[0]["id"], "dup");
        assert_ne!(entries[1]["id"], "dup");

        let (status, view) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/sections/1/edits"),
            Some(json!({ "section": "experience", "op": "delete", "id": "dup" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = view["resume"]["sections"][1]["data"]["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["jobTitle"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_put_cannot_change_section_type() {
        let app = app(Arc::new(MockBackend::with_resume(stored_resume())));
        let id = open_session(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/sections/0"),
            Some(json!({ "id": "s1", "type": "skills", "data": { "categories": [] } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, view) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["resume"]["sectionOrder"], json!(["profile", "experience"]));
    }

    #[tokio::test]
    async fn test_preview_returns_html() {
        let backend = Arc::new(MockBackend::with_resume(stored_resume()));
        let app = app(backend);
        let (_, view) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        let id = view["session_id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .uri(format!("/api/v1/sessions/{id}/preview?template=minimal"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(html.to_vec()).unwrap();
        assert!(html.contains("resume minimal"));
        assert!(html.contains("Jane Doe"));

        let (status, _) = send(&app, "GET", &format!("/api/v1/sessions/{id}/preview?template=fancy"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_session_and_missing_resume() {
        let app = app(Arc::new(MockBackend::new()));
        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "nope" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_close_session() {
        let backend = Arc::new(MockBackend::with_resume(stored_resume()));
        let app = app(backend);
        let (_, view) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        let id = view["session_id"].as_str().unwrap().to_string();

        let (status, closed) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(closed["flushed"], Value::Null);
        assert_eq!(closed["status"], "saved");
        let (status, _) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_close_saves_pending_edits() {
        let backend = Arc::new(MockBackend::with_resume(stored_resume()));
        let app = app(backend.clone());
        let (_, view) = send(&app, "POST", "/api/v1/sessions", Some(json!({ "resume_id": "r1" }))).await;
        let id = view["session_id"].as_str().unwrap().to_string();

        send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/sections/1/edits"),
            Some(json!({ "section": "experience", "op": "add" })),
        )
        .await;
        assert!(backend.saves().is_empty());

        let (status, closed) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(closed["flushed"], "saved");
        assert_eq!(closed["status"], "saved");
        assert_eq!(backend.saves().len(), 1);
    }

    #[tokio::test]
    async fn test_import_confirm_opens_session() {
        let backend = Arc::new(MockBackend::new());
        let app = app(backend.clone());
        let (status, view) = send(
            &app,
            "POST",
            "/api/v1/imports/confirm",
            Some(json!({
                "title": "Imported Resume - cv.pdf",
                "sections": [{ "type": "profile", "data": { "name": "Jane Doe" } }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(view["resume"]["id"], "resume-1");
        assert_eq!(view["onboarding"], false);
        assert_eq!(backend.calls().len(), 2);
    }
}
