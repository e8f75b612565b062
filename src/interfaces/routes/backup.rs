use actix_web::web;

use crate::handlers::backup;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/backup")
            .service(backup::export_csv)
            .service(backup::import_csv)
    );
}
