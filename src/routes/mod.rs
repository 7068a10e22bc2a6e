use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod league;
pub mod registration;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // League routes (require authentication)
    cfg.service(
        web::scope("/leagues")
            .wrap(AuthMiddleware)
            .service(league::create_league)
            .service(league::discover_public_leagues)
            .service(league::list_my_leagues)
            .service(league::join_by_code)
            .service(league::join_public)
            .service(league::list_members)
            .service(league::kick_member)
            .service(league::delete_league)
            .service(league::get_roster)
            .service(league::list_eligible_cards)
            .service(league::set_selection)
            .service(league::set_captains)
            .service(league::get_league_leaderboard),
    );
}
