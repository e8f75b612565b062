use actix_web::web;

use crate::handlers::{admin, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(system::health_check)
            .service(admin::dashboard)
            .service(admin::list_users)
            .service(admin::user_experiences)
    );
}
