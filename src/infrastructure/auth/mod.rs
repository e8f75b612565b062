pub mod jwt;
pub mod oauth;
pub mod password;
