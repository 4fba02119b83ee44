use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use examroom_server::{
    app_state::AppState, auth::JwtService, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;

    if config.is_production() {
        config.validate_for_production().map_err(std::io::Error::other)?;
    }

    let bind_address = config.bind_address();
    let permissive_cors = !config.is_production();
    let jwt_service = web::Data::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ));

    let state = AppState::new(config).await.map_err(std::io::Error::other)?;
    let state = web::Data::new(state);

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = if permissive_cors {
            Cors::permissive()
        } else {
            Cors::default()
        };

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(r#"%a "%r" %s %b %{x-request-id}o %Dms"#))
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
