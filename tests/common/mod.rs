pub mod league_helpers;
pub mod utils;
