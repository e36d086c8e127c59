//! HTTP roundtrips through the full router against a scripted store.

mod support;

use bookgraph::error::AppError;
use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};

use support::{row, scripted_store, spawn};

async fn body(response: reqwest::Response) -> JsonValue {
    response.json().await.unwrap()
}

#[tokio::test]
async fn banner_describes_the_service() {
    let base = spawn(scripted_store()).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let banner = body(response).await;
    assert_eq!(banner["message"], "Bookgraph");
    assert!(banner["version"].is_string());
}

#[tokio::test]
async fn create_book_checks_then_creates() {
    let store = scripted_store();
    store
        .push_empty()
        .push_node(json!({"id": 1, "title": "Dune", "author": "Frank Herbert"}));
    let base = spawn(store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/books", base))
        .json(&json!({"id": 1, "title": "Dune", "author": "Frank Herbert"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(response).await,
        json!({"id": 1, "title": "Dune", "author": "Frank Herbert"})
    );
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn duplicate_book_is_a_conflict() {
    let store = scripted_store();
    store.push_node(json!({"id": 1, "title": "Dune", "author": "Frank Herbert"}));
    let base = spawn(store).await;

    let response = reqwest::Client::new()
        .post(format!("{}/books", base))
        .json(&json!({"id": 1, "title": "Emma", "author": "Jane Austen"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body(response).await["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn missing_book_is_not_found() {
    let base = spawn(scripted_store()).await;

    let response = reqwest::get(format!("{}/books/2", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body(response).await;
    assert_eq!(error["code"], "NOT_FOUND");
    assert_eq!(error["detail"], "Book not found: 2");
}

#[tokio::test]
async fn non_integer_id_is_rejected_before_the_store() {
    let store = scripted_store();
    let base = spawn(store.clone()).await;

    let response = reqwest::get(format!("{}/schools/abc", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body(response).await["code"], "VALIDATION_ERROR");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn delete_reports_message_then_not_found() {
    let store = scripted_store();
    store
        .push_row(row(&[("deleted", json!(1))]))
        .push_row(row(&[("deleted", json!(0))]));
    let base = spawn(store).await;
    let client = reqwest::Client::new();

    let first = client
        .delete(format!("{}/books/2", base))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body(first).await, json!({"message": "Book 2 deleted"}));

    let second = client
        .delete(format!("{}/books/2", base))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_ids_surface_as_integers() {
    let store = scripted_store();
    store
        .push_row(row(&[("next_id", json!(5))]))
        .push_node(json!({"user_id": "5", "name": "Ann"}));
    let base = spawn(store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/users", base))
        .json(&json!({"name": "Ann"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(response).await,
        json!({"user_id": 5, "name": "Ann", "email": "ann@example.com"})
    );
    assert_eq!(store.calls()[1].1["props"]["user_id"], json!("5"));
}

#[tokio::test]
async fn empty_company_update_reads_back() {
    let store = scripted_store();
    store.push_node(json!({"company_id": "acme", "name": "Acme"}));
    let base = spawn(store.clone()).await;

    let response = reqwest::Client::new()
        .put(format!("{}/companies/acme", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await["name"], "Acme");
    assert!(!store.calls()[0].0.contains("SET"));
}

#[tokio::test]
async fn link_book_to_author() {
    let store = scripted_store();
    let base = spawn(store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/book2author/create", base))
        .json(&json!({"book_title": "Dune", "author_name": "Frank Herbert"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(response).await,
        json!({"book": "Dune", "author": "Frank Herbert"})
    );
    assert!(store.calls()[0].0.contains("[:WRITTEN_BY]"));
}

#[tokio::test]
async fn link_without_target_field_is_rejected() {
    let base = spawn(scripted_store()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/author2school/create", base))
        .json(&json!({"author_name": "Jane Austen"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body(response).await["detail"]
        .as_str()
        .unwrap()
        .contains("school_name"));
}

#[tokio::test]
async fn books_by_author() {
    let store = scripted_store();
    store.push_row(row(&[("related", json!(["Dune", "Dune Messiah"]))]));
    let base = spawn(store.clone()).await;

    let response = reqwest::get(format!("{}/book2author/author/Frank%20Herbert", base))
        .await
        .unwrap();

    assert_eq!(
        body(response).await,
        json!({"author": "Frank Herbert", "books": ["Dune", "Dune Messiah"]})
    );
    assert_eq!(store.calls()[0].1["anchor"], json!("Frank Herbert"));
}

#[tokio::test]
async fn schools_of_unknown_author_is_empty() {
    let base = spawn(scripted_store()).await;

    let response = reqwest::get(format!("{}/author2school/author/Nobody", base))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body(response).await,
        json!({"author": "Nobody", "schools": []})
    );
}

#[tokio::test]
async fn unavailable_store_is_retried_then_503() {
    let store = scripted_store();
    store
        .push_error(AppError::StoreUnavailable("connection refused".into()))
        .push_error(AppError::StoreUnavailable("connection refused".into()));
    let base = spawn(store.clone()).await;

    let response = reqwest::get(format!("{}/authors", base)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body(response).await["code"], "STORE_UNAVAILABLE");
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn book_without_id_is_a_json_validation_error() {
    let store = scripted_store();
    let base = spawn(store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/books", base))
        .json(&json!({"title": "Dune", "author": "Herbert"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = body(response).await;
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["detail"].as_str().unwrap().contains("id"));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn malformed_link_body_is_a_json_validation_error() {
    let base = spawn(scripted_store()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/book2author/create", base))
        .header("content-type", "application/json")
        .body("{\"book_title\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn collection_answers_with_trailing_slash() {
    let store = scripted_store();
    store
        .push_node(json!({"company_id": "acme", "name": "Acme"}))
        .push_node(json!({"company_id": "acme", "name": "Acme"}));
    let base = spawn(store).await;

    for path in ["companies", "companies/"] {
        let response = reqwest::get(format!("{}/{}", base, path)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "GET /{}", path);
        assert_eq!(
            body(response).await,
            json!([{"company_id": "acme", "name": "Acme"}])
        );
    }
}
