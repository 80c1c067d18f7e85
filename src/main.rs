use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use aula_server::{
    app_state::AppState,
    auth::{AuthMiddleware, ConsentGate},
    config::Config,
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialize app state: {}", e)))?;

    log::info!(
        "Starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&state.config.frontend_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::from(state.jwt_service.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .service(handlers::health_check)
            .service(handlers::health_check_live)
            .service(handlers::health_check_ready)
            .service(handlers::github_callback)
            .service(handlers::refresh_session)
            .service(handlers::logout)
            .service(
                web::scope("/api")
                    // Consent endpoints stay outside the gate so an
                    // unconsented (or anonymous) caller can reach them.
                    .service(handlers::grant_consent)
                    .service(handlers::consent_status)
                    .service(
                        web::scope("")
                            .wrap(ConsentGate)
                            .wrap(AuthMiddleware)
                            .service(handlers::current_student)
                            .service(handlers::lesson_assessments)
                            .service(handlers::submit_quiz_attempt)
                            .service(handlers::submit_questionnaire_response)
                            .service(handlers::my_quiz_attempts),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
