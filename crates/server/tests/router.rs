mod support;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use support::{multipart_body, test_app, BOUNDARY};

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, json))
}

fn urls_of(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| items.iter().filter_map(|i| i["url"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn health_and_version() -> anyhow::Result<()> {
    let app = test_app().await?;
    let (status, body) = send(&app.router, Method::GET, "/api/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app.router, Method::GET, "/__version", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn product_image_lifecycle() -> anyhow::Result<()> {
    let app = test_app().await?;
    let r = &app.router;

    let (status, cat) = send(r, Method::POST, "/api/categories", Some(json!({"name": "bags"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let cat_id = cat["id"].as_i64().unwrap_or_default();

    let (status, product) = send(r, Method::POST, "/api/products", Some(json!({"name": "tote", "category_id": cat_id, "price": 500}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["promo_price"], json!(0.0));
    let pid = product["id"].as_i64().unwrap_or_default();

    let uri = format!("/api/products/{pid}/images");
    let (_, body) = send(r, Method::POST, &uri, Some(json!(["/static/a.jpg", "/static/b.jpg", "/static/a.jpg"]))).await?;
    assert_eq!(body, json!({"ok": true, "inserted": 2, "skipped": 1}));
    let (_, body) = send(r, Method::POST, &uri, Some(json!(["/static/a.jpg"]))).await?;
    assert_eq!(body, json!({"ok": true, "inserted": 0, "skipped": 1}));

    let (_, body) = send(r, Method::DELETE, &uri, Some(json!({"url": "http://127.0.0.1:8000/static/a.jpg"}))).await?;
    assert_eq!(body, json!({"ok": true, "deleted": 1}));

    let (_, body) = send(r, Method::PUT, &uri, Some(json!(["/static/c.jpg", "/static/b.jpg", "/static/c.jpg"]))).await?;
    assert_eq!(body, json!({"ok": true, "count": 2}));

    let (_, product) = send(r, Method::GET, &format!("/api/products/{pid}"), None).await?;
    assert_eq!(urls_of(&product["images"]), ["/static/c.jpg", "/static/b.jpg"]);

    let (status, body) = send(r, Method::DELETE, &uri, Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn fabric_update_distinguishes_absent_and_empty_lists() -> anyhow::Result<()> {
    let app = test_app().await?;
    let r = &app.router;

    let (_, fabric) = send(r, Method::POST, "/api/fabrics", Some(json!({"name": "linen"}))).await?;
    assert_eq!(fabric["origin"], "Taiwan");
    assert_eq!(fabric["images"], json!([]));
    let id = fabric["id"].as_i64().unwrap_or_default();
    let uri = format!("/api/fabrics/{id}");

    let (_, fabric) = send(r, Method::PUT, &uri, Some(json!({"name": "linen", "images_urls": ["/i.jpg"], "works_urls": ["/w.jpg"]}))).await?;
    assert_eq!(urls_of(&fabric["images"]), ["/i.jpg"]);
    assert_eq!(urls_of(&fabric["works"]), ["/w.jpg"]);

    let (_, fabric) = send(r, Method::PUT, &uri, Some(json!({"name": "linen 2", "on_clearance": true}))).await?;
    assert_eq!(fabric["name"], "linen 2");
    assert_eq!(urls_of(&fabric["images"]), ["/i.jpg"]);

    let (_, fabric) = send(r, Method::PUT, &uri, Some(json!({"name": "linen 2", "works_urls": []}))).await?;
    assert_eq!(urls_of(&fabric["images"]), ["/i.jpg"]);
    assert_eq!(fabric["works"], json!([]));

    let (_, clearance) = send(r, Method::GET, "/api/public/fabrics/clearance", None).await?;
    assert_eq!(clearance.as_array().map(Vec::len), Some(0));

    let (status, body) = send(r, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
    let (status, _) = send(r, Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn category_rules() -> anyhow::Result<()> {
    let app = test_app().await?;
    let r = &app.router;

    let (status, _) = send(r, Method::POST, "/api/categories", Some(json!({"name": " "}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, cat) = send(r, Method::POST, "/api/categories", Some(json!({"name": "shirts"}))).await?;
    let cat_id = cat["id"].as_i64().unwrap_or_default();
    let (status, _) = send(r, Method::POST, "/api/categories", Some(json!({"name": "shirts"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(r, Method::POST, "/api/products", Some(json!({"name": "x", "category_id": 999}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, products) = send(r, Method::GET, "/api/products", None).await?;
    assert_eq!(products, json!([]));

    send(r, Method::POST, "/api/products", Some(json!({"name": "tee", "category_id": cat_id}))).await?;
    let (status, _) = send(r, Method::DELETE, &format!("/api/categories/{cat_id}"), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, listed) = send(r, Method::GET, &format!("/api/public/products/by_category/{cat_id}"), None).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    let (_, listed) = send(r, Method::GET, "/api/public/products/by_category/4242", None).await?;
    assert_eq!(listed, json!([]));

    let (status, _) = send(r, Method::DELETE, "/api/categories/4242", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn order_pricing_and_item_update() -> anyhow::Result<()> {
    let app = test_app().await?;
    let r = &app.router;

    let (_, cat) = send(r, Method::POST, "/api/categories", Some(json!({"name": "bags"}))).await?;
    let (_, regular) = send(r, Method::POST, "/api/products", Some(json!({"name": "a", "category_id": cat["id"], "price": 100}))).await?;
    let (_, promo) = send(r, Method::POST, "/api/products", Some(json!({"name": "b", "category_id": cat["id"], "price": 100, "promo_price": 80}))).await?;

    let (status, order) = send(
        r,
        Method::POST,
        "/api/orders",
        Some(json!({
            "customer_name": "Lee",
            "items": [
                {"product_id": regular["id"], "adjustment": -100.5},
                {"product_id": promo["id"]}
            ]
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["order_status"], "not yet processed");
    assert_eq!(order["payment_status"], "cash on delivery");
    assert_eq!(order["items"][0]["final_price"], json!(-0.5));
    assert_eq!(order["items"][1]["original_price"], json!(80.0));
    assert_eq!(order["items"][1]["final_price"], json!(80.0));
    assert_eq!(order["items"][1]["state"], "blank");

    let item_id = order["items"][1]["id"].as_i64().unwrap_or_default();
    let (_, item) = send(
        r,
        Method::PUT,
        &format!("/api/orders/items/{item_id}"),
        Some(json!({"product_id": promo["id"], "adjustment": 20, "state": "sewn"})),
    )
    .await?;
    assert_eq!(item["adjustment"], json!(20.0));
    assert_eq!(item["final_price"], json!(80.0));

    let (status, _) = send(r, Method::POST, "/api/orders", Some(json!({"customer_name": "Lee", "items": [{"product_id": 999}]}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, orders) = send(r, Method::GET, "/api/orders", None).await?;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));

    let (status, _) = send(r, Method::DELETE, &format!("/api/products/{}", promo["id"]), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn upload_saves_and_serves_files() -> anyhow::Result<()> {
    let app = test_app().await?;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/upload/fabrics/7?kind=work")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(&[("Swatch.PNG", &b"png-bytes"[..]), ("raw", &b"raw-bytes"[..])])))?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&axum::body::to_bytes(res.into_body(), usize::MAX).await?)?;
    let saved: Vec<String> = body["saved"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    assert_eq!(saved.len(), 2);
    assert!(saved[0].starts_with("/static/uploads/fabrics/7/works/0_") && saved[0].ends_with(".png"));
    assert!(saved[1].starts_with("/static/uploads/fabrics/7/works/1_") && saved[1].ends_with(".jpg"));

    let res = app.router.clone().oneshot(Request::builder().uri(saved[0].as_str()).body(Body::empty())?).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"png-bytes");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/upload/fabrics/7?kind=video")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(&[("a.jpg", &b"x"[..])])))?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
