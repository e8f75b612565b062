use actix_web::web;

use crate::handlers::profile;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(profile::get_profile)
            .service(profile::update_profile)
    );
}
