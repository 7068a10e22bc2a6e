use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

/// A reasonable league creation payload; override fields as needed.
pub fn league_request(name: &str, visibility: &str, max_users: i32) -> Value {
    let start = Utc::now();
    let end = start + Duration::days(60);
    json!({
        "name": name,
        "description": "Integration test league",
        "visibility": visibility,
        "max_users": max_users,
        "start_date": start.to_rfc3339(),
        "end_date": end.to_rfc3339(),
        "allowed_formats": ["t20", "odi"],
        "rules": { "competitions": ["ipl-2026"] },
        "update_policy": "live"
    })
}

/// Create a league via the API and return the response body.
pub async fn create_league(
    client: &Client,
    address: &str,
    token: &str,
    body: Value,
) -> Value {
    let response = client
        .post(format!("{}/leagues", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&body)
        .send()
        .await
        .expect("Failed to create league");
    assert!(
        response.status().is_success(),
        "League creation should succeed"
    );
    response.json().await.expect("Failed to parse league response")
}

/// Mint a league card directly in the database. Cards come from the
/// external card/pack service, so tests seed them at the storage layer.
pub async fn seed_league_card(
    pool: &PgPool,
    league_id: Uuid,
    owner_user_id: Uuid,
    player_name: &str,
) -> Uuid {
    let card_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO league_cards
            (id, league_id, owner_user_id, backing_card_id, player_name,
             player_role, player_team, image_url, created_at)
        VALUES ($1, $2, $3, $4, $5, 'batter', 'India', NULL, NOW())
        "#,
    )
    .bind(card_id)
    .bind(league_id)
    .bind(owner_user_id)
    .bind(Uuid::new_v4())
    .bind(player_name)
    .execute(pool)
    .await
    .expect("Failed to seed league card");
    card_id
}

/// Write an externally computed score row for a league member.
pub async fn seed_score(
    pool: &PgPool,
    league_id: Uuid,
    user_id: Uuid,
    total_points: i32,
    rank: i32,
) {
    sqlx::query(
        r#"
        INSERT INTO league_scores (league_id, user_id, total_points, rank, updated_at)
        VALUES ($1, $2, $3, $4, NOW())
        "#,
    )
    .bind(league_id)
    .bind(user_id)
    .bind(total_points)
    .bind(rank)
    .execute(pool)
    .await
    .expect("Failed to seed score row");
}
