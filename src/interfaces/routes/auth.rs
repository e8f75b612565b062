use actix_web::web;

use crate::handlers::{auth, oauth};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::refresh_token)
            .service(oauth::oauth_login)
            .service(oauth::oauth_callback)
    );
}
