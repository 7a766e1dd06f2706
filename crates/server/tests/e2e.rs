mod support;

use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use support::test_app;

struct Running {
    base_url: String,
    _app: support::TestApp,
}

async fn start_server() -> anyhow::Result<Running> {
    let app = test_app().await?;
    let router = app.router.clone();
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(Running { base_url: format!("http://{}:{}", addr.ip(), addr.port()), _app: app })
}

#[tokio::test]
async fn e2e_catalog_and_upload_flow() -> anyhow::Result<()> {
    let srv = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/health", srv.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let fabric: Value = client
        .post(format!("{}/api/fabrics", srv.base_url))
        .json(&json!({"name": "canvas", "price": 240}))
        .send()
        .await?
        .json()
        .await?;
    let id = fabric["id"].as_i64().unwrap_or_default();

    let form = reqwest::multipart::Form::new()
        .part("files", reqwest::multipart::Part::bytes(b"first".to_vec()).file_name("one.JPG"))
        .part("files", reqwest::multipart::Part::bytes(b"second".to_vec()).file_name("two.webp"));
    let uploaded: Value = client
        .post(format!("{}/api/upload/fabrics/{}", srv.base_url, id))
        .multipart(form)
        .send()
        .await?
        .json()
        .await?;
    let saved: Vec<String> = uploaded["saved"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    assert_eq!(saved.len(), 2);
    assert!(saved[0].contains(&format!("/fabrics/{id}/images/0_")));

    // register the uploaded paths as absolute URLs, the way a browser would echo them back
    let absolute: Vec<String> = saved.iter().map(|p| format!("{}{}", srv.base_url, p)).collect();
    let appended: Value = client
        .post(format!("{}/api/fabrics/{}/images", srv.base_url, id))
        .json(&absolute)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(appended["inserted"], 2);

    let deleted: Value = client
        .delete(format!("{}/api/fabrics/{}/images", srv.base_url, id))
        .json(&json!({"urls": [saved[0]]}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(deleted["deleted"], 1);

    let file = client.get(format!("{}{}", srv.base_url, saved[1])).send().await?;
    assert_eq!(file.status(), StatusCode::OK);
    assert_eq!(file.bytes().await?.as_ref(), b"second");

    let listed: Value = client.get(format!("{}/api/public/fabrics", srv.base_url)).send().await?.json().await?;
    assert_eq!(listed[0]["images"].as_array().map(Vec::len), Some(1));

    let docs = client.get(format!("{}/api-docs/openapi.json", srv.base_url)).send().await?;
    assert_eq!(docs.status(), StatusCode::OK);
    Ok(())
}
