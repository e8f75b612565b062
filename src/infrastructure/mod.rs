pub mod auth;
pub mod db;
pub mod llm;
pub mod utils;
