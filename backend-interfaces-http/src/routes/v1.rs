use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{check_in_handlers, ops_handlers, registration_handlers, ticket_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/check-in", post(check_in_handlers::check_in))
        .route(
            "/v1/events/:event_id/registrations",
            get(registration_handlers::list_registrations)
                .post(registration_handlers::create_registration),
        )
        .route(
            "/v1/events/:event_id/tickets/:user_id",
            get(ticket_handlers::get_ticket),
        )
        .route("/v1/tickets/:ticket_id/qr", get(ticket_handlers::get_ticket_qr))
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use backend_application::Metrics;
    use backend_domain::{Holder, HolderDirectory, RuntimeConfig, UserId};
    use backend_infrastructure::{
        DefaultHealthService, InMemoryHolderDirectory, InMemoryRegistrationRepository,
        QrTicketRenderer,
    };

    use super::*;

    async fn test_state(scanner_token: Option<&str>) -> AppState {
        let repo = Arc::new(InMemoryRegistrationRepository::new());
        let holders = Arc::new(InMemoryHolderDirectory::new());
        holders
            .upsert_holders(&[Holder {
                user_id: UserId(7),
                full_name: "Jane Doe".to_string(),
            }])
            .await
            .expect("seed holders");
        AppState {
            config: RuntimeConfig {
                bind_addr: "127.0.0.1:0".to_string(),
                api_token: None,
                scanner_token: scanner_token.map(str::to_string),
                public_base_url: "http://localhost:3240".to_string(),
                max_body_bytes: 1024,
                request_timeout_seconds: 5,
            },
            registration_repo: repo.clone(),
            holder_directory: holders,
            ticket_renderer: Arc::new(QrTicketRenderer::default()),
            health_service: Arc::new(DefaultHealthService::new(repo)),
            metrics: Arc::new(Metrics::default()),
        }
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn registration_body() -> Value {
        json!({
            "user_id": 7,
            "participation_type": "Solo",
            "participation_category": "Dance"
        })
    }

    #[tokio::test]
    async fn gate_flow_reports_first_entry_then_re_entry() {
        let app = build_router(test_state(None).await);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/v1/events/12/registrations", registration_body()))
            .await
            .expect("register");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["scan_count"], 0);
        assert_eq!(created["participation_type"], "Solo");

        let response = app
            .clone()
            .oneshot(json_request("POST", "/v1/check-in", json!({"ticket_id": "CP-12-7"})))
            .await
            .expect("first scan");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "VERIFIED: Jane Doe");
        assert_eq!(body["classification"], "first");
        assert_eq!(body["scan_count"], 1);

        let response = app
            .oneshot(json_request("POST", "/v1/check-in", json!({"ticket_id": "CP-12-7"})))
            .await
            .expect("second scan");
        let body = body_json(response).await;
        assert_eq!(body["message"], "RE-ENTRY (2): Jane Doe");
        assert_eq!(body["classification"], "re-entry");
        assert_eq!(body["scan_count"], 2);
    }

    #[tokio::test]
    async fn corrupt_and_unknown_tickets_map_to_distinct_statuses() {
        let app = build_router(test_state(None).await);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/v1/check-in", json!({"ticket_id": "XX-12-7"})))
            .await
            .expect("corrupt scan");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "corrupt ticket");

        let response = app
            .oneshot(json_request("POST", "/v1/check-in", json!({"ticket_id": "CP-12-7"})))
            .await
            .expect("unknown scan");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "entry not found");
    }

    #[tokio::test]
    async fn registration_for_unknown_holder_is_bad_request() {
        let app = build_router(test_state(None).await);
        let body = json!({
            "user_id": 99,
            "participation_type": "Solo",
            "participation_category": "Dance"
        });
        let response = app
            .oneshot(json_request("POST", "/v1/events/12/registrations", body))
            .await
            .expect("register");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad request: unknown user 99");
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let app = build_router(test_state(None).await);
        let first = app
            .clone()
            .oneshot(json_request("POST", "/v1/events/3/registrations", registration_body()))
            .await
            .expect("first");
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(json_request("POST", "/v1/events/3/registrations", registration_body()))
            .await
            .expect("second");
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(second).await["error"], "already registered");
    }

    #[tokio::test]
    async fn scanner_routes_require_scanner_token() {
        let app = build_router(test_state(Some("gate-secret")).await);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/v1/check-in", json!({"ticket_id": "CP-1-7"})))
            .await
            .expect("anonymous scan");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut request = json_request("POST", "/v1/check-in", json!({"ticket_id": "CP-1-7"}));
        request.headers_mut().insert(
            header::AUTHORIZATION,
            "Bearer gate-secret".parse().expect("header"),
        );
        let response = app.oneshot(request).await.expect("authorized scan");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ticket_and_qr_are_served_for_registrations() {
        let app = build_router(test_state(None).await);
        app.clone()
            .oneshot(json_request("POST", "/v1/events/5/registrations", registration_body()))
            .await
            .expect("register");

        let response = app
            .clone()
            .oneshot(get_request("/v1/events/5/tickets/7"))
            .await
            .expect("ticket");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ticket_id"], "CP-5-7");
        assert_eq!(body["qr_url"], "http://localhost:3240/v1/tickets/CP-5-7/qr");

        let response = app
            .clone()
            .oneshot(get_request("/v1/tickets/CP-5-7/qr"))
            .await
            .expect("qr");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "image/png"
        );

        let response = app
            .oneshot(get_request("/v1/events/5/tickets/8"))
            .await
            .expect("missing ticket");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn roster_lists_event_registrations() {
        let app = build_router(test_state(None).await);
        app.clone()
            .oneshot(json_request("POST", "/v1/events/9/registrations", registration_body()))
            .await
            .expect("register");

        let response = app
            .oneshot(get_request("/v1/events/9/registrations"))
            .await
            .expect("roster");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["ticket_id"], "CP-9-7");
        assert_eq!(body[0]["holder_name"], "Jane Doe");
        assert_eq!(body[0]["scan_count"], 0);
    }

    #[tokio::test]
    async fn health_endpoints_report_ok() {
        let app = build_router(test_state(None).await);
        let live = app
            .clone()
            .oneshot(get_request("/v1/ops/health/live"))
            .await
            .expect("live");
        assert_eq!(live.status(), StatusCode::OK);
        let ready = app
            .oneshot(get_request("/v1/ops/health/ready"))
            .await
            .expect("ready");
        assert_eq!(ready.status(), StatusCode::OK);
    }
}
