mod admin;
mod dashboard;
mod home;
mod jobs;
mod pricing;
mod upload;

use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Pages
        home::root,
        dashboard::dashboard,
        // Uploads
        upload::upload_file,
        // Orders
        jobs::submit_job,
        jobs::update_job_status,
        // Pricing
        pricing::get_pricing,
        // Admin
        admin::init_db,
    ),
    components(
        schemas(
            upload::FileUploadResponse,
            jobs::SubmitJobRequest,
            jobs::JobRequest,
            jobs::SubmitJobResponse,
            jobs::StatusUpdateResponse,
            pricing::PricingResponse,
            crate::entities::print_batch::BatchStatus,
        )
    ),
    tags(
        (name = "Pages", description = "Server rendered customer and operator pages"),
        (name = "Uploads", description = "PDF upload and page counting"),
        (name = "Orders", description = "Order submission and status changes"),
        (name = "Pricing", description = "Per page rates"),
        (name = "Admin", description = "Schema setup")
    ),
    info(
        title = "Print Intake API",
        version = "0.1.0",
        description = "Order intake for a print shop: PDF uploads, priced print jobs and an operator queue",
    )
)]
struct ApiDoc;

/// `./static` when running from the repository, else the copy next to the manifest.
fn resolve_static_dir() -> PathBuf {
    let local_static = PathBuf::from("static");
    if local_static.is_dir() {
        return local_static;
    }
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

pub fn create_routes(state: AppState) -> Router {
    // Swagger UI (stateless)
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    let body_limit = state.config.max_upload_bytes();

    let app_routes = Router::new()
        .route("/", get(home::root))
        .route("/upload", get(upload::upload_page).post(upload::upload_form))
        .route("/upload-file", post(upload::upload_file))
        .route("/submit-job", post(jobs::submit_job))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/update-job-status/{batch_id}/{status}", post(jobs::update_job_status))
        .route("/get-pricing", get(pricing::get_pricing))
        .route("/init-db", get(admin::init_db))
        .nest_service("/static", ServeDir::new(resolve_static_dir()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    Router::new()
        .merge(swagger_router)
        .merge(app_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::print_batch::{self, BatchStatus};
    use crate::entities::print_file;
    use crate::test_support::{sample_pdf, test_state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
    use serde_json::{json, Value};
    use std::path::Path;
    use tower::ServiceExt;

    const BOUNDARY: &str = "print-intake-test-boundary";

    fn upload_request(filename: &str, bytes: &[u8]) -> Request<Body> {
        multipart_request("file", filename, bytes)
    }

    fn multipart_request(field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload-file")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn stored_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    async fn batch_count(db: &DatabaseConnection) -> u64 {
        print_batch::Entity::find().count(db).await.unwrap()
    }

    fn job(name: &str, cost: f64) -> Value {
        json!({
            "original_name": name,
            "saved_path": format!("0123456789abcdef0123456789abcdef_{name}"),
            "page_count_original": 5,
            "page_range": "",
            "page_count_final": 5,
            "copies": 2,
            "print_color": "Color",
            "print_duplex": "1-Sided",
            "file_cost": cost,
        })
    }

    async fn submit(app: &Router, name: &str) -> i64 {
        let (status, body) = send_json(
            app,
            json_request("POST", "/submit-job", json!({ "mobile_number": "9876543210", "jobs": [job(name, 25.0)] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["batch_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn upload_counts_pages_of_a_valid_pdf() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);

        let (status, body) = send_json(&app, upload_request("flyer.pdf", &sample_pdf(3))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["original_name"], json!("flyer.pdf"));
        assert_eq!(body["page_count"], json!(3));
        let saved = body["saved_path"].as_str().unwrap();
        assert!(saved.ends_with("_flyer.pdf"));
        assert!(upload_dir.join(saved).is_file());
    }

    #[tokio::test]
    async fn upload_rejects_non_pdf_without_writing() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);

        let (status, body) = send_json(&app, upload_request("notes.txt", b"hello")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "Only PDF files are allowed" }));
        assert_eq!(stored_files(&upload_dir), 0);
    }

    #[tokio::test]
    async fn upload_removes_unreadable_pdf() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);

        let (status, body) = send_json(&app, upload_request("broken.pdf", b"this is not really a pdf")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid PDF file"));
        assert_eq!(stored_files(&upload_dir), 0);
    }

    #[tokio::test]
    async fn upload_without_file_field_is_rejected() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);

        let (status, body) = send_json(&app, multipart_request("attachment", "flyer.pdf", &sample_pdf(1))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "No file provided" }));
        assert_eq!(stored_files(&upload_dir), 0);
    }

    #[tokio::test]
    async fn upload_with_empty_filename_is_rejected() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);

        let (status, body) = send_json(&app, upload_request("", b"")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "No file selected" }));
        assert_eq!(stored_files(&upload_dir), 0);
    }

    #[tokio::test]
    async fn upload_removes_zero_page_pdf() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);

        let (status, body) = send_json(&app, upload_request("blank.pdf", &sample_pdf(0))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Invalid PDF file: document has no pages"));
        assert_eq!(stored_files(&upload_dir), 0);
    }

    #[tokio::test]
    async fn same_name_uploads_get_distinct_paths() {
        let (state, _temp) = test_state(&[]).await;
        let upload_dir = state.config.upload_dir.clone();
        let app = create_routes(state);
        let pdf = sample_pdf(1);

        let (first, second) = tokio::join!(
            send_json(&app, upload_request("same.pdf", &pdf)),
            send_json(&app, upload_request("same.pdf", &pdf)),
        );

        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(second.0, StatusCode::OK);
        assert_ne!(first.1["saved_path"], second.1["saved_path"]);
        assert_eq!(stored_files(&upload_dir), 2);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let (state, _temp) = test_state(&[]).await;
        let app = create_routes(state);

        let big = vec![b'x'; 2 * 1024 * 1024];
        let (status, _) = send(&app, upload_request("huge.pdf", &big)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn submit_job_stores_batch_and_files() {
        let (state, _temp) = test_state(&[]).await;
        let db = state.db.clone();
        let app = create_routes(state);

        let (status, body) = send_json(
            &app,
            json_request(
                "POST",
                "/submit-job",
                json!({ "mobile_number": "9876543210", "jobs": [job("poster.pdf", 25.0)] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["total_cost"], json!(25.0));

        let batch_id = body["batch_id"].as_i64().unwrap() as i32;
        let batch = print_batch::Entity::find_by_id(batch_id).one(&db).await.unwrap().unwrap();
        assert_eq!(batch.status, BatchStatus::Waiting);
        assert_eq!(batch.total_cost, Decimal::new(25, 0));

        let files = print_file::Entity::find().all(&db).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].batch_id, batch_id);
        assert!(files[0].print_color);
        assert!(!files[0].print_duplex);
        assert_eq!(files[0].copies, 2);
        assert_eq!(files[0].page_count_final, 5);
    }

    #[tokio::test]
    async fn submit_job_rejects_missing_data_before_writing() {
        let (state, _temp) = test_state(&[]).await;
        let db = state.db.clone();
        let app = create_routes(state);

        let cases = [
            (json!({ "mobile_number": "9876543210", "jobs": [] }), "Invalid data"),
            (json!({ "jobs": [job("a.pdf", 1.0)] }), "Invalid data"),
            (json!({ "mobile_number": "", "jobs": [job("a.pdf", 1.0)] }), "Invalid data"),
            (json!({ "mobile_number": "98765", "jobs": [job("a.pdf", 1.0)] }), "Invalid mobile number"),
        ];
        for (payload, error) in cases {
            let (status, body) = send_json(&app, json_request("POST", "/submit-job", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], json!(error));
        }

        let mut zero_copies = job("a.pdf", 1.0);
        zero_copies["copies"] = json!(0);
        let (status, _) = send_json(
            &app,
            json_request("POST", "/submit-job", json!({ "mobile_number": "9876543210", "jobs": [zero_copies] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/submit-job")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.is_empty());

        assert_eq!(batch_count(&db).await, 0);
    }

    #[tokio::test]
    async fn submit_job_rejects_costs_the_database_cannot_hold() {
        let (state, _temp) = test_state(&[]).await;
        let db = state.db.clone();
        let app = create_routes(state);

        // Each fits a Decimal, their sum does not
        let (status, body) = send_json(
            &app,
            json_request(
                "POST",
                "/submit-job",
                json!({ "mobile_number": "9876543210", "jobs": [job("a.pdf", 5e28), job("b.pdf", 5e28)] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        // Individually storable, but the total overflows DECIMAL(10,2)
        let (status, body) = send_json(
            &app,
            json_request(
                "POST",
                "/submit-job",
                json!({ "mobile_number": "9876543210", "jobs": [job("a.pdf", 60_000_000.0), job("b.pdf", 60_000_000.0)] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Order total cannot exceed"));

        let (status, _) = send_json(
            &app,
            json_request("POST", "/submit-job", json!({ "mobile_number": "9876543210", "jobs": [job("a.pdf", 0.125)] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut long_range = job("a.pdf", 1.0);
        long_range["page_range"] = json!("1,".repeat(60));
        let (status, _) = send_json(
            &app,
            json_request("POST", "/submit-job", json!({ "mobile_number": "9876543210", "jobs": [long_range] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(batch_count(&db).await, 0);
    }

    #[tokio::test]
    async fn verified_submissions_reject_tampered_costs() {
        let (state, _temp) = test_state(&["--verify-costs"]).await;
        let db = state.db.clone();
        let app = create_routes(state);

        // 5 color pages x 2 copies at 2.50
        let (status, _) = send_json(
            &app,
            json_request("POST", "/submit-job", json!({ "mobile_number": "9876543210", "jobs": [job("a.pdf", 25.0)] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send_json(
            &app,
            json_request("POST", "/submit-job", json!({ "mobile_number": "9876543210", "jobs": [job("a.pdf", 0.01)] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("cost should be"));

        assert_eq!(batch_count(&db).await, 1);
    }

    #[tokio::test]
    async fn status_update_validates_status_and_batch() {
        let (state, _temp) = test_state(&[]).await;
        let db = state.db.clone();
        let app = create_routes(state);
        let batch_id = submit(&app, "a.pdf").await;

        let (status, body) =
            send_json(&app, empty_request("POST", &format!("/update-job-status/{batch_id}/Shipped"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Invalid status"));
        let batch = print_batch::Entity::find_by_id(batch_id as i32).one(&db).await.unwrap().unwrap();
        assert_eq!(batch.status, BatchStatus::Waiting);

        let (status, body) =
            send_json(&app, empty_request("POST", &format!("/update-job-status/{batch_id}/Printing"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        let batch = print_batch::Entity::find_by_id(batch_id as i32).one(&db).await.unwrap().unwrap();
        assert_eq!(batch.status, BatchStatus::Printing);

        let (status, body) = send_json(&app, empty_request("POST", "/update-job-status/9999/Completed")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("Batch not found"));
    }

    #[tokio::test]
    async fn dashboard_lists_open_batches_oldest_first() {
        let (state, _temp) = test_state(&[]).await;
        let app = create_routes(state);

        submit(&app, "first.pdf").await;
        let done = submit(&app, "second.pdf").await;
        submit(&app, "third.pdf").await;
        let (status, _) = send(&app, empty_request("POST", &format!("/update-job-status/{done}/Completed"))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, empty_request("GET", "/dashboard")).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();

        let first = html.find("first.pdf").unwrap();
        let third = html.find("third.pdf").unwrap();
        assert!(first < third);
        assert!(!html.contains("second.pdf"));
        assert!(html.contains("9876543210"));
        assert!(html.contains("25.00"));
    }

    #[tokio::test]
    async fn pricing_returns_seeded_rates() {
        let (state, _temp) = test_state(&[]).await;
        let app = create_routes(state);

        let (status, body) = send_json(&app, empty_request("GET", "/get-pricing")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["pricing"]["bw_single_sided"], json!(1.0));
        assert_eq!(body["pricing"]["color_single_sided"], json!(2.5));
        assert_eq!(body["pricing"].as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn upload_form_checks_mobile_number() {
        let (state, _temp) = test_state(&[]).await;
        let app = create_routes(state);

        let form = |body: &'static str| {
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap()
        };

        let (status, body) = send(&app, form("mobile_number=12345")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"Invalid mobile number");

        let (status, body) = send(&app, form("mobile_number=9876543210")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("9876543210"));

        let (status, _) = send(&app, empty_request("GET", "/upload")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn pages_and_assets_are_served() {
        let (state, _temp) = test_state(&[]).await;
        let app = create_routes(state);

        let (status, body) = send(&app, empty_request("GET", "/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("mobile_number"));

        let (status, _) = send(&app, empty_request("GET", "/static/style.css")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn init_db_is_repeatable() {
        let (state, _temp) = test_state(&[]).await;
        let app = create_routes(state);

        for _ in 0..2 {
            let (status, body) = send(&app, empty_request("GET", "/init-db")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, b"Database initialized successfully!");
        }
    }
}
