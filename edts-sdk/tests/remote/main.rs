#![cfg(feature = "remote")]

use edts_sdk::remote::{
    ApiContentResponse, ApiResponse, ApiResult, DataSource, DefaultMessages, ErrorMessages,
    FailureKind, IndonesianMessages, Raw, RawResponse, classify,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Deserialize, Debug, PartialEq)]
struct Product {
    id: u64,
    name: String,
}

#[derive(Serialize)]
struct Login<'a> {
    phone: &'a str,
    password: &'a str,
}

/// 只处理一个请求的本地 http 服务，返回 base url，task 结束时返回收到的原始请求
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + len {
                    break;
                }
            }
        }

        let resp = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(resp.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&buf).into_owned()
    });
    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn paged_products() {
    let body = r#"{"status":"success","message":null,"data":{"content":[{"id":1,"name":"Teh"},{"id":2,"name":"Kopi"}],"pageable":{"pageNumber":2,"pageSize":10},"totalPages":3}}"#;
    let (base_url, server) = serve_once("200 OK", body).await;
    let source = DataSource::builder().base_url(base_url).build().unwrap();

    let res: ApiResult<ApiContentResponse<Vec<Product>>> = source.get("/products?page=2").await;
    let page = res.success().unwrap();
    let data = page.data.as_ref().unwrap();
    assert_eq!(data.offset(), 20);
    assert_eq!(data.total_pages(), 3);
    assert_eq!(
        page.content().unwrap()[1],
        Product {
            id: 2,
            name: "Kopi".to_owned(),
        }
    );

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /products?page=2 HTTP/1.1"));
}

#[tokio::test]
async fn login_returns_token_pair() {
    let body = r#"{"status":"success","data":{"accessToken":"acc","refreshToken":"ref"}}"#;
    let (base_url, server) = serve_once("200 OK", body).await;
    let source = DataSource::builder().base_url(base_url).build().unwrap();

    let res = source
        .login(
            "auth/login",
            &Login {
                phone: "0812",
                password: "secret",
            },
        )
        .await;
    let tokens = res.success().and_then(|r| r.data).unwrap();
    assert_eq!(tokens.access_token(), "acc");
    assert_eq!(tokens.refresh_token(), "ref");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /auth/login HTTP/1.1"));
    assert!(request.contains(r#"{"phone":"0812","password":"secret"}"#));
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let (base_url, server) = serve_once("200 OK", r#"{"ok":true}"#).await;
    let source = DataSource::builder()
        .base_url(base_url)
        .access_token("tok-1".to_owned())
        .build()
        .unwrap();

    let res: ApiResult<Raw<serde_json::Value>> = source.get("me").await;
    assert!(res.is_success());

    let request = server.await.unwrap().to_lowercase();
    assert!(request.contains("authorization: bearer tok-1"));
}

#[tokio::test]
async fn execute_custom_request() {
    let body = r#"{"status":"OUT_OF_STOCK","message":"stok habis","data":{"id":9,"name":"Gula"}}"#;
    let (base_url, server) = serve_once("200 OK", body).await;
    let source = DataSource::builder().base_url(base_url).build().unwrap();

    let request = source
        .request(reqwest::Method::PUT, "/cart/9")
        .json(&serde_json::json!({"qty": 3}))
        .build()
        .unwrap();
    let res: ApiResult<ApiResponse<Product>> = source.execute(request).await;
    match res {
        ApiResult::Error {
            kind,
            code,
            message,
            partial_data,
            ..
        } => {
            assert_eq!(kind, FailureKind::ServerEnvelopeError);
            assert_eq!(code, "OUT_OF_STOCK");
            assert_eq!(message.as_deref(), Some("stok habis"));
            assert_eq!(
                partial_data,
                Some(Product {
                    id: 9,
                    name: "Gula".to_owned(),
                })
            );
        }
        other => panic!("unexpected: {other:?}"),
    }

    let request = server.await.unwrap();
    assert!(request.starts_with("PUT /cart/9 HTTP/1.1"));
}

#[tokio::test]
async fn unauthorized_over_http() {
    let (base_url, _server) = serve_once(
        "401 Unauthorized",
        r#"{"status":"UNAUTHORIZED","message":"token expired"}"#,
    )
    .await;
    let source = DataSource::builder().base_url(base_url.clone()).build().unwrap();

    let res: ApiResult<ApiResponse<Product>> = source.get("/me").await;
    assert_eq!(
        res,
        ApiResult::Unauthorized {
            message: Some("token expired".to_owned()),
            request_url: format!("{base_url}/me"),
        }
    );
}

#[tokio::test]
async fn service_unavailable_uses_localized_text() {
    let (base_url, _server) = serve_once("503 Service Unavailable", "maintenance").await;
    let source = DataSource::builder()
        .base_url(base_url)
        .messages(Arc::new(IndonesianMessages))
        .build()
        .unwrap();

    let res: ApiResult<ApiResponse<Product>> = source.get("/products").await;
    assert_eq!(res.kind(), Some(FailureKind::ServiceUnavailable));
    assert_eq!(res.code(), Some("503"));
    assert_eq!(
        res.message(),
        Some(IndonesianMessages.http503_text().as_str())
    );
}

#[tokio::test]
async fn connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = DataSource::builder()
        .base_url(format!("http://{addr}/api/"))
        .build()
        .unwrap();
    let res: ApiResult<ApiResponse<Product>> = source.get("/products").await;
    assert_eq!(res.code(), Some("ConnectionError"));
    assert_eq!(res.kind(), Some(FailureKind::ConnectionFailure));
    assert_eq!(
        res.request_url(),
        Some(format!("http://{addr}/api/products").as_str())
    );
}

#[tokio::test]
async fn timeout_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let source = DataSource::builder()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let res: ApiResult<ApiResponse<Product>> = source.get("slow").await;
    assert_eq!(
        res,
        ApiResult::Error {
            kind: FailureKind::ConnectionFailure,
            code: "ConnectionError".to_owned(),
            message: Some(DefaultMessages.connection_error_text()),
            partial_data: None,
            request_url: format!("http://{addr}/slow"),
        }
    );
}

#[tokio::test]
async fn invalid_url_is_system_error() {
    let source = DataSource::builder().base_url("not a url").build().unwrap();
    let res: ApiResult<ApiResponse<Product>> = source.get("x").await;
    assert_eq!(res.kind(), Some(FailureKind::UnknownFailure));
    assert_eq!(res.code(), Some("999"));
    assert_eq!(res.request_url(), Some("not a url/x"));
}

#[tokio::test]
async fn classify_buffered_reqwest_response() {
    let resp = reqwest::Response::from(
        http::Response::builder()
            .status(400)
            .body(br#"{"status":"INVALID_OTP","message":"otp salah"}"#.to_vec())
            .unwrap(),
    );
    let raw = RawResponse::from_reqwest(resp).await.unwrap();
    assert_eq!(raw.status, reqwest::StatusCode::BAD_REQUEST);

    let res: ApiResult<ApiResponse<Product>> = classify(raw, &DefaultMessages);
    assert_eq!(res.code(), Some("INVALID_OTP"));
    assert_eq!(res.message(), Some("otp salah"));
}

#[derive(Deserialize, Debug)]
struct LiveConfig {
    base_url: String,
    path: String,
}

#[tokio::test]
#[ignore]
async fn live_get_test() {
    let file_str = std::fs::read_to_string("tests/remote/config.toml").unwrap();
    let conf: LiveConfig = toml::from_str(&file_str).unwrap();
    let source = DataSource::builder().base_url(conf.base_url).build().unwrap();
    let res: ApiResult<ApiResponse<serde_json::Value>> = source.get(&conf.path).await;
    match res.into_result() {
        Ok(r) => println!("[success] res:\n{:#?}", r),
        Err(e) => println!("[error] {:#?}", e),
    }
}
