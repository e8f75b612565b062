use actix_web::web;

use crate::handlers::analysis;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analysis")
            .service(analysis::analyze_portfolio)
            .service(analysis::analyze_company_fit)
            .service(analysis::generate_resume)
            .service(analysis::generate_cover_letter)
    );
}
