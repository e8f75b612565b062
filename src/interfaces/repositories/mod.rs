pub mod experience;
pub mod profile;
pub mod sqlx_repo;
pub mod token;
pub mod user;
