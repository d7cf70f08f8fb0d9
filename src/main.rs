use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use study_companion::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(err) = config.validate_for_production() {
        log::error!("Refusing to start: {}", err);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()));
    }

    let missing = config.missing_store_settings();
    if !missing.is_empty() {
        log::warn!(
            "Content store is not fully configured; missing {}. Dependent features will be unavailable.",
            missing.join(", ")
        );
    }

    let state = AppState::new(config.clone())
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
    let auth_policy = web::Data::new(state.auth_policy());
    let state = web::Data::new(state);

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting HTTP server on {}:{} (auth: {:?})",
        bind_address.0,
        bind_address.1,
        config.auth_mode
    );

    HttpServer::new(move || {
        let cors = match &config.cors_allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .max_age(3600),
            None => Cors::default(),
        };

        App::new()
            .app_data(state.clone())
            .app_data(auth_policy.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
