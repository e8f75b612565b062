pub mod admin;
pub mod analysis;
pub mod auth;
pub mod backup;
pub mod experiences;
pub mod home;
pub mod oauth;
pub mod profile;
pub mod system;
pub mod users;
