//! HTTP routes
//!
//! Handlers are thin: each one extracts its input, makes a single call on
//! the shared [`Notary`], and renders the result.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json, Redirect},
    routing::get,
    Form, Router,
};
use notary::store::Store;
use notary::{Notary, Verification, WireReceipt};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;

/// Shared handler state.
pub type SharedNotary<S> = Arc<Notary<S>>;

const BANNER: &str = "Notary service. GET /sign for the form, GET /list for all receipts.\n";

/// Build the application router over `notary`.
pub fn router<S: Store + 'static>(notary: SharedNotary<S>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/sign", get(sign_form).post(sign::<S>))
        .route("/view", get(view::<S>))
        .route("/list", get(list::<S>))
        .route("/verify", get(verify::<S>))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(notary)
}

/// Plain-text banner.
pub async fn index() -> &'static str {
    BANNER
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// Submission form.
pub async fn sign_form() -> Html<&'static str> {
    Html(include_str!("../static/sign.html"))
}

#[derive(Debug, Deserialize)]
pub struct SignForm {
    pub payload: Option<String>,
}

/// POST /sign: notarize the `payload` field, then redirect to the receipt.
pub async fn sign<S: Store>(
    State(notary): State<SharedNotary<S>>,
    Form(form): Form<SignForm>,
) -> Result<Redirect, AppError> {
    let payload = form
        .payload
        .ok_or_else(|| AppError::BadRequest("missing form field: payload".to_string()))?;
    let (hash, _) = notary.notarize(payload).await?;
    Ok(Redirect::to(&format!("/view?hash={hash}")))
}

#[derive(Debug, Deserialize)]
pub struct HashQuery {
    pub hash: Option<String>,
}

impl HashQuery {
    fn require(self) -> Result<String, AppError> {
        self.hash
            .ok_or_else(|| AppError::BadRequest("missing query parameter: hash".to_string()))
    }
}

/// GET /view?hash=
pub async fn view<S: Store>(
    State(notary): State<SharedNotary<S>>,
    Query(query): Query<HashQuery>,
) -> Result<Json<WireReceipt>, AppError> {
    let hash = query.require()?;
    Ok(Json(notary.load(&hash).await?))
}

/// GET /list
pub async fn list<S: Store>(
    State(notary): State<SharedNotary<S>>,
) -> Result<Json<Vec<WireReceipt>>, AppError> {
    Ok(Json(notary.list().await?))
}

/// GET /verify?hash=
pub async fn verify<S: Store>(
    State(notary): State<SharedNotary<S>>,
    Query(query): Query<HashQuery>,
) -> Result<Json<Verification>, AppError> {
    let hash = query.require()?;
    Ok(Json(notary.verify(&hash).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use notary::core::DigestSigner;
    use notary::store::{FileStore, MemoryStore, StorageEntry};
    use notary_testkit::TestFixture;
    use tower::ServiceExt;

    fn rsa_notary() -> SharedNotary<MemoryStore> {
        let fixture = TestFixture::new();
        Arc::new(Notary::new(fixture.dyn_signer(), fixture.store))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sign")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        serde_json::from_slice(&body_bytes(resp).await).unwrap()
    }

    /// Submit a payload and return the redirect target.
    async fn submit(app: &Router, body: &'static str) -> String {
        let resp = app.clone().oneshot(post_form(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        resp.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn index_returns_banner() {
        let resp = router(rsa_notary()).oneshot(get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, BANNER.as_bytes());
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let resp = router(rsa_notary()).oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, b"OK");
    }

    #[tokio::test]
    async fn sign_form_is_html() {
        let resp = router(rsa_notary()).oneshot(get("/sign")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = String::from_utf8(body_bytes(resp).await).unwrap();
        assert!(html.contains(r#"name="payload""#));
    }

    #[tokio::test]
    async fn sign_then_view_and_verify() {
        let app = router(rsa_notary());
        let location = submit(&app, "payload=hello+world").await;
        assert!(location.starts_with("/view?hash="));

        let resp = app.clone().oneshot(get(&location)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let wire: WireReceipt = body_json(resp).await;
        assert_eq!(wire.payload, "hello world");
        assert!(wire.hash.is_some());

        let hash = location.trim_start_matches("/view?hash=");
        assert_eq!(wire.signature, hash);

        let resp = app
            .oneshot(get(&format!("/verify?hash={hash}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let verification: serde_json::Value = body_json(resp).await;
        assert_eq!(verification["mode"], "asymmetric");
        assert_eq!(verification["integrity_ok"], true);
        assert_eq!(verification["signature_ok"], true);
    }

    #[tokio::test]
    async fn sign_empty_payload_is_accepted() {
        let app = router(rsa_notary());
        let location = submit(&app, "payload=").await;

        let wire: WireReceipt = body_json(app.oneshot(get(&location)).await.unwrap()).await;
        assert_eq!(wire.payload, "");
    }

    #[tokio::test]
    async fn sign_without_payload_is_bad_request() {
        let resp = router(rsa_notary())
            .oneshot(post_form("other=1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = body_json(resp).await;
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn view_rejects_bad_hashes() {
        let app = router(rsa_notary());
        for (uri, status) in [
            ("/view", StatusCode::BAD_REQUEST),
            ("/view?hash=", StatusCode::BAD_REQUEST),
            ("/view?hash=zz", StatusCode::BAD_REQUEST),
            ("/view?hash=..%2F..%2Fetc%2Fpasswd", StatusCode::BAD_REQUEST),
            ("/view?hash=00ff", StatusCode::NOT_FOUND),
            ("/verify?hash=00ff", StatusCode::NOT_FOUND),
        ] {
            let resp = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), status, "{uri}");
        }
    }

    #[tokio::test]
    async fn list_returns_all_receipts() {
        let app = router(rsa_notary());
        let resp = app.clone().oneshot(get("/list")).await.unwrap();
        let empty: Vec<WireReceipt> = body_json(resp).await;
        assert!(empty.is_empty());

        submit(&app, "payload=one").await;
        submit(&app, "payload=two").await;

        let resp = app.oneshot(get("/list")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let mut payloads: Vec<String> = body_json::<Vec<WireReceipt>>(resp)
            .await
            .into_iter()
            .map(|wire| wire.payload)
            .collect();
        payloads.sort();
        assert_eq!(payloads, ["one", "two"]);
    }

    #[tokio::test]
    async fn list_with_corrupt_entry_is_internal_error() {
        let notary = rsa_notary();
        notary
            .store()
            .store(&StorageEntry::new("beef.json", b"garbage".to_vec()))
            .await
            .unwrap();

        let resp = router(notary).oneshot(get("/list")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = body_json(resp).await;
        assert_eq!(body["error"]["message"], "internal server error");
    }

    #[tokio::test]
    async fn keyless_server_issues_stamps() {
        let notary = Arc::new(Notary::new(
            Arc::new(DigestSigner::new()),
            MemoryStore::new(),
        ));
        let app = router(notary);
        let location = submit(&app, "payload=hello").await;
        let hash = location.trim_start_matches("/view?hash=").to_string();
        assert_eq!(hash.len(), 128);

        let resp = app
            .oneshot(get(&format!("/verify?hash={hash}")))
            .await
            .unwrap();
        let verification: serde_json::Value = body_json(resp).await;
        assert_eq!(verification["mode"], "digest_only");
        assert_eq!(verification["integrity_ok"], true);
        assert_eq!(verification["signature_ok"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn rsa_receipts_round_trip_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("receipts")).unwrap();
        let notary = Arc::new(Notary::new(TestFixture::new().dyn_signer(), store));
        let app = router(Arc::clone(&notary));

        let first = submit(&app, "payload=hello").await;
        let second = submit(&app, "payload=h%C3%A9llo+w%C3%B6rld").await;
        let hash = first.trim_start_matches("/view?hash=").to_string();
        assert_eq!(hash.len(), 512);

        let resp = app.clone().oneshot(get(&first)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let wire: WireReceipt = body_json(resp).await;
        assert_eq!(wire.payload, "hello");
        assert_eq!(wire.signature, hash);
        assert_eq!(wire.hash.as_deref().map(str::len), Some(64));

        let resp = app
            .clone()
            .oneshot(get(&format!("/verify?hash={hash}")))
            .await
            .unwrap();
        let verification: serde_json::Value = body_json(resp).await;
        assert_eq!(verification["mode"], "asymmetric");
        assert_eq!(verification["integrity_ok"], true);
        assert_eq!(verification["signature_ok"], true);

        let resp = app.oneshot(get("/list")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let mut payloads: Vec<String> = body_json::<Vec<WireReceipt>>(resp)
            .await
            .into_iter()
            .map(|wire| wire.payload)
            .collect();
        payloads.sort();
        assert_eq!(payloads, ["hello", "héllo wörld"]);
        assert!(second.starts_with("/view?hash="));

        // Reopening the directory sees the same receipts.
        let reopened = FileStore::open(notary.store().root()).unwrap();
        let reopened = Notary::new(TestFixture::new().dyn_signer(), reopened);
        assert_eq!(reopened.list().await.unwrap().len(), 2);
    }
}
