// src/main.rs
use std::sync::{Arc, RwLock};

use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use log::{info, warn};

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use crate::config::AppConfig;
use crate::handlers::{
    estimate_cost, generate_design, list_categories, list_designs, list_portfolios,
    refresh_catalog, submit_contact, test_openai, toggle_like,
};
use crate::services::catalog::CatalogView;
use crate::services::{OpenAiClient, StrapiService};

// The OpenAI client is only present when a key is configured; handlers turn
// its absence into the configuration error the API contract specifies.
#[derive(Clone)]
pub struct AppState {
    pub openai: Option<Arc<OpenAiClient>>,
    pub strapi: Arc<StrapiService>,
    pub catalog: Arc<RwLock<CatalogView>>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Interio service...");

    let config = AppConfig::from_env();
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, design generation will report a configuration error");
    }

    let openai = config
        .openai_api_key
        .clone()
        .map(|key| Arc::new(OpenAiClient::new(key, config.openai_base_url.clone())));
    let strapi = Arc::new(StrapiService::new(
        config.strapi_url.clone(),
        config.strapi_token.clone(),
    ));

    // Seed the catalog once; a CMS outage must not keep the service from binding.
    let records = match strapi.fetch_designs().await {
        Ok(records) => {
            info!("loaded {} catalog records from the CMS", records.len());
            records
        }
        Err(e) => {
            warn!("could not load the catalog from the CMS: {}", e);
            Vec::new()
        }
    };

    let app_state = AppState {
        openai,
        strapi,
        catalog: Arc::new(RwLock::new(CatalogView::new(records))),
    };

    info!("Starting HTTP server on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
            .wrap(middleware::Logger::default())
            .configure(configure_app)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route(
                "/generate-interior-design",
                web::post().to(generate_design),
            )
            .route("/test-openai", web::get().to(test_openai))
            .route("/designs", web::get().to(list_designs))
            .route("/designs/{id}/like", web::post().to(toggle_like))
            .route("/portfolios", web::get().to(list_portfolios))
            .route("/categories", web::get().to(list_categories))
            .route("/catalog/refresh", web::post().to(refresh_catalog))
            .route("/contact", web::post().to(submit_contact))
            .route("/estimate", web::post().to(estimate_cost)),
    )
    .route("/health", web::get().to(health_check));
}

// A 10 MB image becomes a ~13.7 MB base64 data URI, which has to fit in the
// JSON body along with the rest of the request.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024 * 1024)
        .error_handler(|err, _req| {
            let details = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Invalid request body",
                    "details": details
                })),
            )
            .into()
        })
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "interio",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
