use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod analysis;
mod auth;
mod backup;
mod experiences;
mod json_error;
mod profile;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(users::config_routes)
            .configure(experiences::config_routes)
            .configure(profile::config_routes)
            .configure(analysis::config_routes)
            .configure(backup::config_routes)
            .configure(admin::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
