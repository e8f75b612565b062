use actix_web::web;

use crate::handlers::users;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::current_user);
    cfg.service(users::delete_user);
}
