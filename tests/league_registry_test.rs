// tests/league_registry_test.rs
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

mod common;
use common::league_helpers::{create_league, league_request};
use common::utils::{create_test_user_and_login, spawn_app};

#[tokio::test]
async fn test_create_private_league_returns_join_code_and_owner_membership() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_username, token) = create_test_user_and_login(&test_app.address).await;

    let body = create_league(
        &client,
        &test_app.address,
        &token,
        league_request("Office Ashes", "private", 8),
    )
    .await;

    assert_eq!(body["success"], true);
    let league_id = body["data"]["league_id"].as_str().expect("league_id missing");
    let join_code = body["data"]["join_code"].as_str().expect("join_code missing");
    assert_eq!(join_code.len(), 8);

    // The owner is the sole initial member
    let member_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM league_members WHERE league_id = $1 AND status = 'active'",
    )
    .bind(Uuid::parse_str(league_id).unwrap())
    .fetch_one(&test_app.db_pool)
    .await
    .expect("Failed to count members");
    assert_eq!(member_count, 1);
}

#[tokio::test]
async fn test_create_public_league_has_no_join_code() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_username, token) = create_test_user_and_login(&test_app.address).await;

    let body = create_league(
        &client,
        &test_app.address,
        &token,
        league_request("Open World Cup Pool", "public", 20),
    )
    .await;

    assert!(body["data"]["join_code"].is_null());
}

#[tokio::test]
async fn test_create_league_validation_failures() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_username, token) = create_test_user_and_login(&test_app.address).await;

    let empty_name = league_request("   ", "public", 8);

    let mut too_small = league_request("Tiny", "public", 8);
    too_small["max_users"] = json!(1);

    let mut inverted_dates = league_request("Backwards", "public", 8);
    let start = inverted_dates["start_date"].clone();
    inverted_dates["start_date"] = inverted_dates["end_date"].clone();
    inverted_dates["end_date"] = start;

    for bad_request in [empty_name, too_small, inverted_dates] {
        let response = client
            .post(format!("{}/leagues", &test_app.address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&bad_request)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status().as_u16(), 400);
    }

    // Nothing was created
    let league_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leagues")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to count leagues");
    assert_eq!(league_count, 0);
}

#[tokio::test]
async fn test_create_league_requires_authentication() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/leagues", &test_app.address))
        .json(&league_request("No Auth", "public", 8))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn test_discover_public_leagues_excludes_private_ones() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_owner, owner_token) = create_test_user_and_login(&test_app.address).await;

    create_league(
        &client,
        &test_app.address,
        &owner_token,
        league_request("Public Pool", "public", 10),
    )
    .await;
    create_league(
        &client,
        &test_app.address,
        &owner_token,
        league_request("Secret Pool", "private", 10),
    )
    .await;

    let (_other, other_token) = create_test_user_and_login(&test_app.address).await;
    let response = client
        .get(format!("{}/leagues/public", &test_app.address))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .expect("Failed to discover leagues");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    let leagues = body["data"].as_array().expect("data should be an array");
    assert_eq!(leagues.len(), 1);
    assert_eq!(leagues[0]["name"], "Public Pool");
    // Public projections never carry a join code
    assert!(leagues[0].get("join_code").is_none());
}

#[tokio::test]
async fn test_join_by_code_and_my_leagues() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_owner, owner_token) = create_test_user_and_login(&test_app.address).await;

    let created = create_league(
        &client,
        &test_app.address,
        &owner_token,
        league_request("Join Me", "private", 5),
    )
    .await;
    let join_code = created["data"]["join_code"].as_str().unwrap().to_string();

    let (_joiner, joiner_token) = create_test_user_and_login(&test_app.address).await;
    let response = client
        .post(format!("{}/leagues/join", &test_app.address))
        .header("Authorization", format!("Bearer {}", joiner_token))
        .json(&json!({ "code": join_code }))
        .send()
        .await
        .expect("Failed to join by code");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["league_name"], "Join Me");

    // The joiner sees the league (join code included) in their own list
    let mine: serde_json::Value = client
        .get(format!("{}/leagues/mine", &test_app.address))
        .header("Authorization", format!("Bearer {}", joiner_token))
        .send()
        .await
        .expect("Failed to list my leagues")
        .json()
        .await
        .unwrap();
    let leagues = mine["data"].as_array().unwrap();
    assert_eq!(leagues.len(), 1);
    assert_eq!(leagues[0]["join_code"].as_str().unwrap(), join_code);
}

#[tokio::test]
async fn test_join_by_unknown_code_is_not_found_and_creates_nothing() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_username, token) = create_test_user_and_login(&test_app.address).await;

    let response = client
        .post(format!("{}/leagues/join", &test_app.address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "code": "NOSUCHCD" }))
        .send()
        .await
        .expect("Failed to send join request");
    assert_eq!(response.status().as_u16(), 404);

    let membership_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM league_members")
        .fetch_one(&test_app.db_pool)
        .await
        .unwrap();
    assert_eq!(membership_count, 0);
}

#[tokio::test]
async fn test_duplicate_join_conflicts() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_owner, owner_token) = create_test_user_and_login(&test_app.address).await;

    let created = create_league(
        &client,
        &test_app.address,
        &owner_token,
        league_request("One Shot", "public", 5),
    )
    .await;
    let league_id = created["data"]["league_id"].as_str().unwrap();

    let (_joiner, joiner_token) = create_test_user_and_login(&test_app.address).await;
    let join_url = format!("{}/leagues/{}/join", &test_app.address, league_id);

    let first = client
        .post(&join_url)
        .header("Authorization", format!("Bearer {}", joiner_token))
        .send()
        .await
        .unwrap();
    assert!(first.status().is_success());

    let second = client
        .post(&join_url)
        .header("Authorization", format!("Bearer {}", joiner_token))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 409);
}

#[tokio::test]
async fn test_join_public_on_private_league_is_not_found() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (_owner, owner_token) = create_test_user_and_login(&test_app.address).await;

    let created = create_league(
        &client,
        &test_app.address,
        &owner_token,
        league_request("Hidden", "private", 5),
    )
    .await;
    let league_id = created["data"]["league_id"].as_str().unwrap();

    let (_joiner, joiner_token) = create_test_user_and_login(&test_app.address).await;
    let response = client
        .post(format!("{}/leagues/{}/join", &test_app.address, league_id))
        .header("Authorization", format!("Bearer {}", joiner_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_join_at_capacity_fails_for_third_user() {
    let test_app = spawn_app().await;
    let client = Client::new();

    // Owner joins implicitly on creation (count = 1)
    let (_owner, owner_token) = create_test_user_and_login(&test_app.address).await;
    let created = create_league(
        &client,
        &test_app.address,
        &owner_token,
        league_request("Two Seats", "private", 2),
    )
    .await;
    let join_code = created["data"]["join_code"].as_str().unwrap().to_string();

    // Second user fills the league (count = 2)
    let (_second, second_token) = create_test_user_and_login(&test_app.address).await;
    let second_join = client
        .post(format!("{}/leagues/join", &test_app.address))
        .header("Authorization", format!("Bearer {}", second_token))
        .json(&json!({ "code": join_code }))
        .send()
        .await
        .unwrap();
    assert!(second_join.status().is_success());

    // Third user bounces off the capacity check
    let (_third, third_token) = create_test_user_and_login(&test_app.address).await;
    let third_join = client
        .post(format!("{}/leagues/join", &test_app.address))
        .header("Authorization", format!("Bearer {}", third_token))
        .json(&json!({ "code": join_code }))
        .send()
        .await
        .unwrap();
    assert_eq!(third_join.status().as_u16(), 409);

    let body: serde_json::Value = third_join.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("full"));
}
