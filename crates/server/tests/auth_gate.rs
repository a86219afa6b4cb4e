mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use configs::AuthMode;

use support::{build_app, empty_request, send, token};

fn get_with(uri: &str, header: (&str, String)) -> Request<Body> {
    Request::builder().uri(uri).header(header.0, header.1).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn protected_routes_need_a_token() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Verify).await?.router;

    let (status, v) = send(&app, empty_request("GET", "/clientes")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(v["error"], "Unauthorized");

    let (status, _) = send(&app, get_with("/clientes", ("authorization", "Bearer not-a-jwt".into()))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_with("/clientes", ("authorization", format!("Basic {}", token("ana", 60))))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_with("/clientes", ("authorization", format!("Bearer {}", token("ana", -120))))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn bearer_header_or_cookie_is_accepted() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Verify).await?.router;

    let (status, v) = send(&app, get_with("/clientes", ("authorization", format!("Bearer {}", token("ana", 300))))).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(v.as_array().unwrap().is_empty());

    let (status, _) = send(&app, get_with("/agendamentos", ("cookie", format!("auth_token={}", token("ana", 300))))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn public_routes_skip_the_gate() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Verify).await?.router;

    let (status, v) = send(&app, empty_request("GET", "/health")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");

    let (status, v) = send(&app, empty_request("GET", "/api-docs/openapi.json")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(v["paths"]["/agendamentos"].is_object());
    Ok(())
}

#[tokio::test]
async fn bypass_admits_anonymous_callers() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;
    let (status, _) = send(&app, empty_request("GET", "/veterinarios")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
