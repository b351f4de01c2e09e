mod common;

use common::{response, serve};
use ember_http::{Client, Error, FileUpload, RequestOptions};

#[tokio::test]
async fn uploads_file_and_fields() {
    let dir = tempfile::Builder::new()
        .prefix("ember-http-upload-")
        .tempdir()
        .expect("Failed to create temp dir");
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "line one\nline two\n").expect("Failed to write fixture");

    let (base, server) = serve(vec![response("201 Created", &[], "stored")]).await;

    let mut resp = Client::default()
        .post(
            &format!("{base}/upload"),
            RequestOptions::default()
                .body("ignored plain body")
                .upload(FileUpload::path(&path))
                .multipart_field("comment", "hello"),
        )
        .await
        .expect("upload failed");

    assert_eq!(resp.status_code(), 201);
    assert_eq!(resp.text().await.expect("body"), "stored");

    let captured = server.await.expect("server task");
    let req = &captured[0];
    let content_type = req.header("content-type").expect("content type");
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .expect("multipart content type");
    assert_eq!(boundary.len(), 60);

    let body = req.body_text();
    assert!(body.starts_with(&format!("--{boundary}\r\n")));
    assert!(body.contains("Content-Disposition: form-data; name=\"file\"; filename=\"note.txt\"\r\n"));
    assert!(body.contains("Content-Type: text/plain\r\n\r\nline one\nline two\n\r\n"));
    assert!(body.contains("Content-Disposition: form-data; name=\"comment\"\r\n\r\nhello"));
    assert!(body.ends_with(&format!("\r\n--{boundary}--\r\n")));
    assert!(!body.contains("ignored plain body"));
}

#[tokio::test]
async fn two_unnamed_uploads_are_numbered() {
    let (base, server) = serve(vec![response("200 OK", &[], "")]).await;

    Client::default()
        .post(
            &base,
            RequestOptions::default()
                .upload(FileUpload::reader(&b"first"[..]).file_name("a.bin"))
                .upload(FileUpload::reader(&b"second"[..]).file_name("b.bin")),
        )
        .await
        .expect("upload failed");

    let captured = server.await.expect("server task");
    let body = captured[0].body_text();
    assert!(body.contains("name=\"file1\"; filename=\"a.bin\""));
    assert!(body.contains("name=\"file2\"; filename=\"b.bin\""));
}

#[tokio::test]
async fn missing_file_aborts_before_sending() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let err = Client::default()
        .post(
            "http://127.0.0.1:9/never",
            RequestOptions::default()
                .upload(FileUpload::reader(&b"ok"[..]))
                .upload(FileUpload::path(dir.path().join("absent.txt"))),
        )
        .await
        .expect_err("missing upload should fail");

    assert!(matches!(err, Error::Io { .. }), "{err:?}");
}

#[tokio::test]
async fn uploads_are_post_only() {
    let err = Client::default()
        .put(
            "http://127.0.0.1:9/never",
            RequestOptions::default().upload(FileUpload::reader(&b"x"[..])),
        )
        .await
        .expect_err("PUT upload should fail");

    assert!(matches!(err, Error::Configuration(_)), "{err:?}");
}
