use super::{SharedState, page};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

const SCRIPT: &str = include_str!("../../static/script.js");

pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(page::index_page(&state.default_resolutions).into_string())
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT,
    )
        .into_response()
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::super::{router, test_support::state_in};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get(path: &str, root: &std::path::Path) -> (StatusCode, String) {
        let response = router(state_in(root))
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert_eq!(
            get("/healthz", tmp.path()).await,
            (StatusCode::OK, "ok".to_string())
        );
    }

    #[tokio::test]
    async fn index_lists_default_resolutions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (status, body) = get("/", tmp.path()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="32x18""#));
        assert!(body.contains(r#"value="18x32""#));
        assert!(body.contains("/static/js/script.js"));
    }

    #[tokio::test]
    async fn script_is_served() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (status, body) = get("/static/js/script.js", tmp.path()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/upload"));
    }

    #[tokio::test]
    async fn generated_files_are_served() {
        let tmp = tempfile::TempDir::new().unwrap();
        let state = state_in(tmp.path());
        let dir = state.server.generated_dir.join("123");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("wallpaper_1x1.jpg"), b"jpeg bytes").unwrap();

        let (status, body) = get("/static/generated/123/wallpaper_1x1.jpg", tmp.path()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "jpeg bytes");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (status, _) = get("/nope", tmp.path()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_upload_is_method_not_allowed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (status, _) = get("/upload", tmp.path()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
