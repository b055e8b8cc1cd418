use actix_web::web;

use crate::config::Deployment;
use crate::handlers;

/// Long-running service: bare routes plus a health probe.
pub fn standalone(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(handlers::predict)))
        .service(web::resource("/recommend").route(web::post().to(handlers::recommend)))
        .service(web::resource("/health").route(web::get().to(handlers::health)));
}

/// Function-hosted service: routes live under `/api` and the platform owns
/// health checking.
pub fn serverless(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/predict").route(web::post().to(handlers::predict)))
            .service(web::resource("/recommend").route(web::post().to(handlers::recommend))),
    );
}

pub fn for_deployment(deployment: Deployment) -> fn(&mut web::ServiceConfig) {
    match deployment {
        Deployment::Standalone => standalone,
        Deployment::Serverless => serverless,
    }
}
