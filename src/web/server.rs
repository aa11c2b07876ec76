//! Web server module
//!
//! Configures and starts the Actix-Web HTTP server: CORS, request logging,
//! and the REST sketch's routes (spec.md §6) over an in-memory
//! `PlanRepository`.

use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::info;

use crate::infrastructure::repositories::InMemoryPlanRepository;
use crate::web::{config::WebConfig, handlers};

pub async fn start_web_server(config: WebConfig) -> std::io::Result<()> {
    info!("Starting web server on {}:{}", config.host, config.port);

    let repository = web::Data::new(Mutex::new(InMemoryPlanRepository::new()));

    let server = HttpServer::new(move || {
        let cors = Cors::default().allow_any_origin().allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(repository.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health_check))
                    .route("/scheduling/preview", web::post().to(handlers::scheduling_preview))
                    .route("/schedule", web::get().to(handlers::get_schedule))
                    .route("/schedule/slots/{id}", web::patch().to(handlers::patch_slot))
                    .route("/schedule/validate", web::post().to(handlers::validate_slots))
                    .route("/schedule/bulk-update", web::post().to(handlers::bulk_update))
                    .route("/analytics/kpis", web::get().to(handlers::analytics_kpis))
                    .route("/analytics/oee", web::get().to(handlers::analytics_oee))
                    .route("/analytics/adherence", web::get().to(handlers::analytics_adherence))
                    .route("/analytics/utilization", web::get().to(handlers::analytics_utilization))
                    .route("/analytics/quality", web::get().to(handlers::analytics_quality)),
            )
    })
    .bind((config.host.as_str(), config.port))?;

    info!("Web server started successfully");
    info!("Open http://{}:{} in your browser", config.host, config.port);

    server.run().await
}
