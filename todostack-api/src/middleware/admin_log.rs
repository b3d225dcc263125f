/// Admin request audit logging
///
/// Every request entering the admin subtree is logged with the caller's
/// user ID, timestamp, method, URI, request body, and response body.
/// Bodies are buffered in full and forwarded byte-for-byte; only the
/// logged rendering is truncated for oversized payloads. Error
/// responses are logged the same way and passed through unchanged.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use todostack_shared::auth::middleware::AuthUser;
use tracing::{error, info};

/// Truncation threshold for the logged body rendering
const MAX_AUDIT_BODY_BYTES: usize = 64 * 1024;

/// Buffers request and response bodies and emits one audit record per
/// admin request
///
/// Must be layered inside the JWT middleware so the [`AuthUser`]
/// extension is present. An absent extension is logged as "anonymous";
/// the admin guard will have rejected such requests already.
pub async fn admin_audit_middleware(req: Request, next: Next) -> Response {
    let caller = req
        .extensions()
        .get::<AuthUser>()
        .map(|auth| auth.id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let method = req.method().clone();
    let uri = req.uri().clone();
    let started_at = chrono::Utc::now();

    let (parts, body) = req.into_parts();
    let request_body = buffer_body(body).await;
    let req = Request::from_parts(parts, Body::from(request_body.clone()));

    let response = next.run(req).await;

    let status = response.status();
    let (parts, body) = response.into_parts();
    let response_body = buffer_body(body).await;
    let response = Response::from_parts(parts, Body::from(response_body.clone()));

    let request_body = lossy_text(&request_body);
    let response_body = lossy_text(&response_body);

    if status.is_client_error() || status.is_server_error() {
        error!(
            user_id = %caller,
            time = %started_at.to_rfc3339(),
            method = %method,
            uri = %uri,
            status = %status,
            request_body = %request_body,
            response_body = %response_body,
            "Admin request failed"
        );
    } else {
        info!(
            user_id = %caller,
            time = %started_at.to_rfc3339(),
            method = %method,
            uri = %uri,
            status = %status,
            request_body = %request_body,
            response_body = %response_body,
            "Admin request"
        );
    }

    response
}

/// Collects a body into bytes for pass-through
async fn buffer_body(body: Body) -> bytes::Bytes {
    to_bytes(body, usize::MAX).await.unwrap_or_default()
}

/// Renders a body for the log, truncating oversized payloads
///
/// Truncation affects only this rendering; the forwarded body is never
/// modified.
fn lossy_text(bytes: &bytes::Bytes) -> String {
    if bytes.is_empty() {
        return "<empty>".to_string();
    }

    if bytes.len() > MAX_AUDIT_BODY_BYTES {
        return format!(
            "{}... ({} bytes truncated)",
            String::from_utf8_lossy(&bytes[..MAX_AUDIT_BODY_BYTES]),
            bytes.len() - MAX_AUDIT_BODY_BYTES
        );
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::post, Json, Router};
    use tower::Service as _;

    #[tokio::test]
    async fn test_bodies_pass_through_intact() {
        async fn echo(Json(value): Json<serde_json::Value>) -> Json<serde_json::Value> {
            Json(value)
        }

        let mut app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(admin_audit_middleware));

        let payload = r#"{"role":"ADMIN"}"#;
        let response = app
            .call(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["role"], "ADMIN");
    }

    #[tokio::test]
    async fn test_large_bodies_pass_through_unmodified() {
        async fn echo(body: bytes::Bytes) -> bytes::Bytes {
            body
        }

        let mut app = Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(admin_audit_middleware));

        // Larger than the log truncation threshold
        let payload = vec![b'x'; MAX_AUDIT_BODY_BYTES + 36 * 1024];
        let response = app
            .call(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .body(Body::from(payload.clone()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), payload.len());
        assert_eq!(&body[..], &payload[..]);
    }

    #[test]
    fn test_log_rendering_truncates_oversized_bodies() {
        let big = bytes::Bytes::from(vec![b'a'; MAX_AUDIT_BODY_BYTES + 10]);

        let text = lossy_text(&big);
        assert!(text.ends_with("(10 bytes truncated)"));

        let small = bytes::Bytes::from_static(b"{\"role\":\"ADMIN\"}");
        assert_eq!(lossy_text(&small), "{\"role\":\"ADMIN\"}");
    }

    #[tokio::test]
    async fn test_error_responses_are_not_swallowed() {
        async fn fail() -> StatusCode {
            StatusCode::NOT_FOUND
        }

        let mut app = Router::new()
            .route("/fail", post(fail))
            .layer(middleware::from_fn(admin_audit_middleware));

        let response = app
            .call(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/fail")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
