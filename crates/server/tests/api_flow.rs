mod support;

use axum::http::StatusCode;
use configs::AuthMode;
use serde_json::json;

use support::{build_app, empty_request, json_request, seed_pet, send};

#[tokio::test]
async fn schedule_conflict_and_status_flow() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;
    let pet = seed_pet(&app).await?;

    let body = json!({
        "pet_id": pet,
        "service_line": "clinico",
        "data_hora": "2025-06-01T07:00:00-03:00",
        "observacoes": "primeira consulta"
    });
    let (status, first) = send(&app, json_request("POST", "/agendamentos", &body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    assert_eq!(first["status"], "agendado");
    let id = first["id"].as_i64().unwrap();

    // Same instant expressed in UTC
    let dup = json!({ "pet_id": pet, "service_line": "clinico", "scheduled_at": "2025-06-01T10:00:00Z" });
    let (status, err) = send(&app, json_request("POST", "/agendamentos", &dup)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "Conflict");
    assert!(!err["errors"].as_array().unwrap().is_empty());

    let petshop = json!({ "pet_id": pet, "service_line": "petshop", "scheduled_at": "2025-06-01T10:00:00Z" });
    let (status, _) = send(&app, json_request("POST", "/agendamentos", &petshop)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, v) = send(&app, json_request("PUT", "/agendamentos", &json!({ "id": id, "status": "concluido" }))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(v["error"], "Invalid Transition");

    let (status, v) = send(&app, json_request("PUT", "/agendamentos", &json!({ "id": id, "status": "confirmado" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "confirmado");

    let (status, v) = send(&app, json_request("DELETE", "/agendamentos", &json!({ "id": id }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "cancelado");
    let (status, _) = send(&app, json_request("DELETE", "/agendamentos", &json!({ "id": id }))).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, v) = send(&app, empty_request("GET", &format!("/agendamentos/{id}"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "cancelado");

    let (status, v) = send(&app, empty_request("GET", "/agendamentos/999")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn list_filters_by_line_and_day() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;
    let pet = seed_pet(&app).await?;
    for (line, at) in [
        ("clinico", "2025-06-02T15:00:00Z"),
        ("petshop", "2025-06-01T09:00:00Z"),
        ("clinico", "2025-06-01T12:00:00Z"),
    ] {
        let body = json!({ "pet_id": pet, "service_line": line, "scheduled_at": at });
        let (status, _) = send(&app, json_request("POST", "/agendamentos", &body)).await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = send(&app, empty_request("GET", "/agendamentos")).await?;
    let times: Vec<_> = all.as_array().unwrap().iter().map(|a| a["scheduled_at"].as_str().unwrap().to_string()).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]), "{times:?}");

    let (_, day) = send(&app, empty_request("GET", "/agendamentos?from=2025-06-01&to=2025-06-01")).await?;
    assert_eq!(day.as_array().unwrap().len(), 2);

    let (_, clinico) = send(&app, empty_request("GET", "/agendamentos?service_line=clinico")).await?;
    assert_eq!(clinico.as_array().unwrap().len(), 2);

    let (status, v) = send(&app, empty_request("GET", "/agendamentos?from=ontem&service_line=banho")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["errors"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn medical_record_lifecycle() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;
    let pet = seed_pet(&app).await?;

    let (status, v) = send(&app, empty_request("GET", "/prontuarios/999")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["errors"][0], "pet not found");

    let entry = json!({
        "data": "2025-06-01",
        "tipo": "consulta",
        "descricao": "Avaliação de rotina",
        "responsavel": "Dra. Ana",
        "arquivos": ["a.png", "b.pdf"]
    });
    let (status, created) = send(&app, json_request("POST", &format!("/prontuarios/{pet}/historico"), &entry)).await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["files"], json!(["a.png", "b.pdf"]));
    assert_eq!(created["type"], "consulta");
    let id = created["id"].as_i64().unwrap();

    let (status, v) = send(&app, json_request("POST", &format!("/prontuarios/{pet}/historico"), &json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Validation Error");
    assert_eq!(v["errors"].as_array().unwrap().len(), 4);

    let (status, list) = send(&app, empty_request("GET", &format!("/prontuarios/{pet}"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let uri = format!("/prontuarios/historico/{id}");
    let (status, _) = send(&app, json_request("PUT", &uri, &json!({ "descricao": "outra" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, v) = send(&app, json_request("PUT", &uri, &json!({ "responsavel": "Dr. Paulo" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["responsible"], "Dr. Paulo");
    assert_eq!(v["files"], json!(["a.png", "b.pdf"]));

    let (status, v) = send(&app, empty_request("DELETE", &uri)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(v.is_null());
    let (status, _) = send(&app, empty_request("DELETE", &uri)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn client_validation_and_cascade() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;

    let bad = json!({ "name": "Al", "email": "nope", "phone": "123" });
    let (status, v) = send(&app, json_request("POST", "/clientes", &bad)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["errors"].as_array().unwrap().len(), 3);

    let pet = seed_pet(&app).await?;
    let (_, p) = send(&app, empty_request("GET", &format!("/pets/{pet}"))).await?;
    let client_id = p["client_id"].as_i64().unwrap();
    let body = json!({ "pet_id": pet, "service_line": "petshop", "scheduled_at": "2025-06-01T10:00:00Z" });
    send(&app, json_request("POST", "/agendamentos", &body)).await?;

    let (status, _) = send(&app, empty_request("DELETE", &format!("/clientes/{client_id}"))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, empty_request("GET", &format!("/prontuarios/{pet}"))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = send(&app, empty_request("GET", "/agendamentos")).await?;
    assert!(list.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn veterinarian_assignment_is_checked() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;
    let pet = seed_pet(&app).await?;

    let body = json!({ "pet_id": pet, "service_line": "clinico", "scheduled_at": "2025-06-01T10:00:00Z", "veterinario_id": 42 });
    let (status, _) = send(&app, json_request("POST", "/agendamentos", &body)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, vet) = send(&app, json_request("POST", "/veterinarios", &json!({ "nome": "Dra. Ana Lima" }))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let body = json!({ "pet_id": pet, "service_line": "clinico", "scheduled_at": "2025-06-01T10:00:00Z", "veterinario_id": vet["id"] });
    let (status, a) = send(&app, json_request("POST", "/agendamentos", &body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(a["veterinarian_id"], vet["id"]);
    Ok(())
}

#[tokio::test]
async fn malformed_input_gets_json_errors() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/agendamentos")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let (status, v) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Bad Request");

    let (status, v) = send(&app, empty_request("GET", "/agendamentos/abc")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["errors"].is_array());

    let (status, _) = send(&app, json_request("PUT", "/agendamentos", &json!({ "id": 1, "status": "pendente" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn every_bad_schedule_field_is_reported() -> anyhow::Result<()> {
    let app = build_app(AuthMode::Bypass).await?.router;

    let body = json!({
        "pet_id": "x",
        "service_line": "banho",
        "scheduled_at": "amanha",
        "observacoes": "a".repeat(600)
    });
    let (status, v) = send(&app, json_request("POST", "/agendamentos", &body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Validation Error");
    assert_eq!(v["errors"].as_array().unwrap().len(), 4, "{v}");

    let (status, v) = send(&app, json_request("PUT", "/agendamentos", &json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["errors"].as_array().unwrap().len(), 2, "{v}");

    let (status, v) = send(&app, json_request("POST", "/pets", &json!({ "cliente_id": "abc" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "Validation Error");
    assert_eq!(v["errors"].as_array().unwrap().len(), 3, "{v}");
    Ok(())
}
