mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};

#[tokio::test]
async fn serves_uploaded_file() -> Result<()> {
    let server = common::TestServer::start().await?;
    let dir = server.uploads_dir().join("patients").join("p-9");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("report.pdf"), b"%PDF-1.4 body")?;

    let res = reqwest::get(server.url("/uploads/patients/p-9/report.pdf")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        res.headers()[header::CACHE_CONTROL],
        "public, max-age=31536000, immutable"
    );
    assert_eq!(&res.bytes().await?[..], b"%PDF-1.4 body");
    Ok(())
}

#[tokio::test]
async fn unknown_extension_is_octet_stream() -> Result<()> {
    let server = common::TestServer::start().await?;
    std::fs::write(server.uploads_dir().join("scan.unknownext"), b"\x01\x02")?;

    let res = reqwest::get(server.url("/uploads/scan.unknownext")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/octet-stream");
    Ok(())
}

#[tokio::test]
async fn traversal_is_rejected_and_missing_is_404() -> Result<()> {
    let server = common::TestServer::start().await?;
    std::fs::write(server.storage_root.join("outside.txt"), b"x")?;

    let res = reqwest::get(server.url("/uploads/..%2Foutside.txt")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Invalid path");

    let res = reqwest::get(server.url("/uploads/nope/missing.pdf")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "File not found");
    Ok(())
}
