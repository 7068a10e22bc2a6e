pub mod join_code;
pub mod password;
