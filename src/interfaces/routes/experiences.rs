use actix_web::web;

use crate::handlers::experiences;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/experiences")
            .service(experiences::list_experiences)
            .service(experiences::create_experience)
            .service(experiences::get_experience)
            .service(experiences::update_experience)
            .service(experiences::delete_experience)
    );
}
