//! HTTP endpoint tests against the in-memory backend
//!
//! Each test builds a fresh router over in-memory repositories and a
//! temporary blob directory, then drives it with `oneshot`.

mod test_fixtures;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_service::api_errors::ErrorBody;
use catalog_service::dto::{BlobResponse, CatalogImageResponse, PersonResponse, ProductResponse};
use test_fixtures::{
    body_bytes, body_json, empty_request, json_request, multipart_request, Part, TestApp,
};

fn new_product(category: &str) -> Value {
    json!({
        "category": category,
        "name": "Espresso Machine",
        "price": 249.5,
        "description": "Dual boiler"
    })
}

async fn create_product(app: &TestApp, category: &str) -> ProductResponse {
    let response = app
        .router
        .clone()
        .oneshot(json_request(Method::POST, "/api/products", &new_product(category)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["database"], "not_configured");
}

#[tokio::test]
async fn test_product_lifecycle() {
    // Arrange
    let app = TestApp::new().await;
    let created = create_product(&app, "coffee").await;
    assert_eq!(created.category, "coffee");
    assert_eq!(created.price, 249.5);

    // Act: read back
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, &format!("/api/products/{}", created.id)))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: ProductResponse = body_json(response).await;
    assert_eq!(fetched, created);

    // Act: partial update keeps the untouched fields
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/products/{}", created.id),
            &json!({ "price": 199.0, "name": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductResponse = body_json(response).await;
    assert_eq!(updated.price, 199.0);
    assert_eq!(updated.name, "Espresso Machine");
    assert_eq!(updated.category, "coffee");

    // Act: delete
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::DELETE, &format!("/api/products/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: bool = body_json(response).await;
    assert!(deleted);

    // Second delete reports the product as missing
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::DELETE, &format!("/api/products/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_change_moves_product() {
    let app = TestApp::new().await;
    let created = create_product(&app, "coffee").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/products/{}", created.id),
            &json!({ "category": "kitchen" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let moved: ProductResponse = body_json(response).await;
    assert_eq!(moved.id, created.id);
    assert_eq!(moved.category, "kitchen");

    // Only one copy remains, under the new category
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/products"))
        .await
        .unwrap();
    let all: Vec<ProductResponse> = body_json(response).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category, "kitchen");
}

#[tokio::test]
async fn test_invalid_product_is_rejected() {
    let app = TestApp::new().await;

    let mut body = new_product("coffee");
    body["price"] = json!(-1.0);

    let response = app
        .router
        .clone()
        .oneshot(json_request(Method::POST, "/api/products", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(response).await;
    assert_eq!(error.error_code, "BAD_REQUEST");
    assert_eq!(error.status_code, 400);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(response).await;
    assert_eq!(error.error_code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_product_lookup_errors() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/products/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/products/{}", uuid::Uuid::new_v4()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = body_json(response).await;
    assert_eq!(error.error_code, "NOT_FOUND");
}

#[tokio::test]
async fn test_people_lifecycle() {
    let app = TestApp::new().await;

    // Create
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/people",
            &json!({ "firstName": "Ada", "lastName": "Lovelace" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("location header");
    let person: PersonResponse = body_json(response).await;
    assert_eq!(location, format!("/api/people/{}", person.id));

    // Update
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &location,
            &json!({ "lastName": "King" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: PersonResponse = body_json(response).await;
    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.last_name, "King");

    // List
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/people"))
        .await
        .unwrap();
    let people: Vec<PersonResponse> = body_json(response).await;
    assert_eq!(people, vec![updated]);

    // Delete, then it is gone
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::DELETE, &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_person_with_blank_name_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/people",
            &json!({ "firstName": "", "lastName": "Lovelace" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_image_upload_download_delete() {
    let app = TestApp::new().await;
    let content = b"\x89PNG fake image bytes";

    // Upload
    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/catalogimage",
            &[
                Part::File {
                    file_name: "front view.png",
                    content_type: "image/png",
                    content,
                },
                Part::Text {
                    name: "productCategory",
                    value: "coffee",
                },
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let image: CatalogImageResponse = body_json(response).await;
    assert_eq!(image.product_category, "coffee");
    assert!(image.blob_name.starts_with(&image.id));
    assert!(image.blob_name.ends_with("front_view.png"));
    assert!(image.blob_url.ends_with(&format!("/catalog-images/{}", image.blob_name)));

    // The blob URL path serves the stored bytes
    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/blobs/catalog-images/{}", image.blob_name),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(body_bytes(response).await, content.to_vec());

    // Delete removes the record and the blob
    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/catalogimage/{}", image.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/blobs/catalog-images/{}", image.blob_name),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/catalogimage/{}", image.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_image_requires_file_and_category() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/catalogimage",
            &[Part::Text {
                name: "productCategory",
                value: "coffee",
            }],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/catalogimage",
            &[Part::File {
                file_name: "a.png",
                content_type: "image/png",
                content: b"png",
            }],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_catalog_image_is_rejected() {
    let app = TestApp::with_env(&[("CATALOG_IMAGES_MAX_KB", "1")]).await;
    let content = vec![7u8; 2048];

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/catalogimage",
            &[
                Part::File {
                    file_name: "big.png",
                    content_type: "image/png",
                    content: &content,
                },
                Part::Text {
                    name: "productCategory",
                    value: "coffee",
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(response).await;
    assert!(error.message.contains("KB"), "message: {}", error.message);

    // Nothing was stored
    let stored = std::fs::read_dir(app.blob_dir.path().join("catalog-images"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_catalog_blobs() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(multipart_request(
            "/api/catalog",
            &[Part::File {
                file_name: "price-list.pdf",
                content_type: "application/pdf",
                content: b"%PDF-1.7",
            }],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let blob: BlobResponse = body_json(response).await;
    assert_eq!(blob.size_bytes, 8);
    assert_eq!(blob.content_type, "application/pdf");
    assert!(blob.name.ends_with("-price-list.pdf"));

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/catalog"))
        .await
        .unwrap();
    let listed: Vec<BlobResponse> = body_json(response).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, blob.name);

    // Delete is idempotent
    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/api/catalog/{}", blob.name),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/catalog"))
        .await
        .unwrap();
    let listed: Vec<BlobResponse> = body_json(response).await;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_blob_in_unknown_container_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/blobs/secrets/passwd"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api/nothing-here"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = body_json(response).await;
    assert_eq!(error.error_code, "NOT_FOUND");
    assert_eq!(error.message, "No route for GET /api/nothing-here");
}

#[tokio::test]
async fn test_wrong_method_uses_error_envelope() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::PATCH, "/api/products"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let error: ErrorBody = body_json(response).await;
    assert_eq!(error.error_code, "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::GET, "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc: Value = body_json(response).await;
    assert!(doc["paths"]["/api/products"].is_object());
}
