pub mod analysis;
pub mod auth;
pub mod backup;
pub mod experience;
pub mod extractors;
pub mod profile;
