use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use studio_backend::config::{Settings, StorageBackend};
use studio_backend::create_pool;
use studio_backend::db::users as user_db;
use studio_backend::email::Mailer;
use studio_backend::handlers;
use studio_backend::storage;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = Settings::from_env().expect("Invalid configuration");

    let db = create_pool(&settings.database_url).await;
    let db_data = web::Data::new(db);

    // First-run admin bootstrap.
    if let Some(bootstrap) = &settings.bootstrap_admin {
        match user_db::ensure_admin_user(db_data.get_ref(), bootstrap).await {
            Ok(Some(user)) => tracing::info!("Created bootstrap admin {}", user.email),
            Ok(None) => {}
            Err(e) => tracing::error!("Admin bootstrap failed: {e}"),
        }
    }

    let storage = storage::from_settings(&settings)
        .await
        .expect("Failed to initialize media storage");
    let storage_data = web::Data::from(storage);
    tracing::info!("Media storage backend: {}", settings.storage_backend);

    let mailer = Mailer::from_settings(settings.smtp.as_ref())
        .expect("Failed to initialize SMTP transport");
    if !mailer.is_configured() {
        tracing::warn!("SMTP not configured; contact notifications are disabled");
    }
    let mailer_data = web::Data::new(mailer);

    let serve_uploads = settings.storage_backend == StorageBackend::Local;
    let upload_dir = settings.upload_dir.clone();
    let bind_addr = format!("0.0.0.0:{}", settings.port);
    let settings_data = web::Data::new(settings);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let mut app = App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(settings_data.clone())
            .app_data(storage_data.clone())
            .app_data(mailer_data.clone())
            .route("/health", web::get().to(handlers::public::health))
            .service(web::scope("/api/v1").configure(handlers::init_routes));

        // The local backend serves its own uploads; S3 URLs point at
        // the bucket instead.
        if serve_uploads {
            app = app.service(Files::new("/static/uploads", &upload_dir));
        }

        app
    })
    .bind(&bind_addr)?
    .run()
    .await
}
