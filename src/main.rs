mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting User Management Service...");
    log::info!("📊 Database: {}", config.database_url);

    // Connect to MongoDB; a failed connection keeps the server from starting.
    let db = database::MongoDB::new(&config.database_url)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    // The uploads directory must exist before the static file service mounts it.
    std::fs::create_dir_all(&config.uploads_dir)?;

    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config.clone());

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );

    let bind_addr = format!("{}:{}", config.host, config.port);
    let allowed_origin = config.allowed_origin.clone();
    let uploads_dir = config.uploads_dir.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            // Liveness & health
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Admin endpoints
            .route("/create-admin", web::post().to(api::admins::create_admin))
            .route("/login", web::post().to(api::admins::login))
            // User endpoints
            .route("/create-user", web::post().to(api::users::create_user))
            .route("/users", web::get().to(api::users::list_users))
            .route("/users/{email}", web::delete().to(api::users::delete_user))
            .route("/users/{email}", web::put().to(api::users::update_user))
            // Uploaded files, served read-only
            .service(Files::new("/uploads", uploads_dir.clone()))
    })
    .bind(bind_addr)?
    .run()
    .await
}
