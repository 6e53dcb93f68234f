// src/handlers.rs
use actix_web::{HttpResponse, web};
use chrono::Utc;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::errors::InterioError;
use crate::models::{ContactRequest, GenerationRequest, ProviderCapabilities};
use crate::services::catalog::{self, CatalogView};
use crate::services::estimator::{self, EstimateRequest};
use crate::services::pipeline;

fn catalog_view<'a>(
    data: &'a web::Data<AppState>,
) -> Result<std::sync::RwLockWriteGuard<'a, CatalogView>, InterioError> {
    data.catalog
        .write()
        .map_err(|_| InterioError::Internal("catalog lock poisoned".to_string()))
}

pub async fn generate_design(
    data: web::Data<AppState>,
    body: web::Json<GenerationRequest>,
) -> Result<HttpResponse, InterioError> {
    // Field validation happens before the credential check, so a bad request
    // is reported as such even on an unconfigured deployment.
    let request = body.into_inner().validate()?;

    let provider = data.openai.as_ref().ok_or(InterioError::MissingApiKey)?;

    info!(
        "generating a {} design for a {}",
        request.style.label(),
        request.room_type.label()
    );

    let result = pipeline::run_pipeline(provider.as_ref(), &request).await?;

    Ok(HttpResponse::Ok().json(result))
}

pub async fn test_openai(data: web::Data<AppState>) -> HttpResponse {
    let Some(client) = data.openai.as_ref() else {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": "OPENAI_API_KEY is not configured"
        }));
    };

    match client.list_models().await {
        Ok(models) => {
            let capabilities = ProviderCapabilities::from_model_ids(&models);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "OpenAI API connection successful",
                "capabilities": capabilities,
                "timestamp": Utc::now()
            }))
        }
        Err(InterioError::AuthFailed(details)) => {
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "error": "OpenAI rejected the configured credential",
                "details": details
            }))
        }
        Err(err) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": err.to_string()
        })),
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
}

pub async fn list_designs(
    data: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, InterioError> {
    let mut view = catalog_view(&data)?;
    view.set_search(query.search.as_deref().unwrap_or(""));
    view.set_category(query.category.as_deref().unwrap_or(catalog::ALL_CATEGORIES));
    if let Some(page) = query.page {
        view.set_page(page);
    }

    Ok(HttpResponse::Ok().json(view.current_page()))
}

pub async fn toggle_like(
    data: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, InterioError> {
    let id = path.into_inner();
    let mut view = catalog_view(&data)?;
    view.toggle_like(id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "liked": view.is_liked(id),
        "totalLikes": view.like_count()
    })))
}

pub async fn refresh_catalog(data: web::Data<AppState>) -> Result<HttpResponse, InterioError> {
    let records = data.strapi.fetch_designs().await?;

    let mut view = catalog_view(&data)?;
    view.replace_records(records);
    let count = view.record_count();
    info!("catalog refreshed with {} records", count);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "records": count
    })))
}

pub async fn list_portfolios(data: web::Data<AppState>) -> Result<HttpResponse, InterioError> {
    let records = data.strapi.fetch_portfolios().await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn list_categories(data: web::Data<AppState>) -> Result<HttpResponse, InterioError> {
    let records = data.strapi.fetch_categories().await?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn submit_contact(
    data: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> Result<HttpResponse, InterioError> {
    let contact = body.into_inner();
    contact.validate()?;

    let reference = Uuid::new_v4();
    let id = data
        .strapi
        .submit_contact(&contact, &reference.to_string())
        .await?;
    info!("contact submission {} stored in the CMS as {}", reference, id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "reference": reference,
        "id": id,
        "timestamp": Utc::now()
    })))
}

pub async fn estimate_cost(body: web::Json<EstimateRequest>) -> Result<HttpResponse, InterioError> {
    let estimate = estimator::estimate(&body.into_inner())?;
    Ok(HttpResponse::Ok().json(estimate))
}
