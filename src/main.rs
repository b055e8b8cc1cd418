use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crop_advisor::config::Config;
use crop_advisor::{routes, Predictor};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let models_dir = config.models_dir();
    let deployment = config.deployment;

    // a failed load still starts the server; predictions then report the error
    let predictor = web::Data::new(Predictor::load(&models_dir));

    info!(
        host = %config.host,
        port = config.port,
        ?deployment,
        models_dir = %models_dir.display(),
        "server starting"
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(predictor.clone())
            .configure(routes::for_deployment(deployment))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
