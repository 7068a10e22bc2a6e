pub mod auth;
pub mod card;
pub mod leaderboard;
pub mod league;
pub mod membership;
pub mod roster;
pub mod user;
