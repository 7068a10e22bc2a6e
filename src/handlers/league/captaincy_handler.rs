use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::caller_id;
use crate::league::captaincy::CaptaincyAssigner;
use crate::middleware::auth::Claims;
use crate::models::roster::SetCaptainsRequest;

/// Assign or clear captain and vice-captain
#[tracing::instrument(
    name = "Set captains",
    skip(request, pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn set_captains(
    league_id: web::Path<Uuid>,
    request: web::Json<SetCaptainsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;
    let request = request.into_inner();

    let assigner = CaptaincyAssigner::new(pool.get_ref().clone());
    let roster = assigner
        .set_captains(
            league_id.into_inner(),
            user_id,
            request.captain_id,
            request.vice_captain_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Captains updated",
        "data": roster
    })))
}
