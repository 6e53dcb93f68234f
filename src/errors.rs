// src/errors.rs
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterioError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("{0}")]
    Validation(String),

    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Vision analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Image generation failed: {0}")]
    GenerationFailed(String),

    #[error("Image generation returned no image URL")]
    EmptyResult,

    #[error("OpenAI rejected the configured credential: {0}")]
    AuthFailed(String),

    #[error("CMS request failed: {0}")]
    Cms(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for InterioError {
    fn error_response(&self) -> HttpResponse {
        match self {
            InterioError::MissingFields(fields) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Missing required fields",
                    "details": fields
                }))
            }
            InterioError::Validation(details) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Invalid input",
                    "details": details
                }))
            }
            InterioError::MissingApiKey => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "OPENAI_API_KEY is not configured"
                }))
            }
            InterioError::AnalysisFailed(details) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Failed to analyze the room image",
                    "details": details
                }))
            }
            InterioError::GenerationFailed(details) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Failed to generate the design image",
                    "details": details
                }))
            }
            InterioError::EmptyResult => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "No image was returned by the generation service"
                }))
            }
            InterioError::AuthFailed(details) => {
                HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "OpenAI rejected the configured credential",
                    "details": details
                }))
            }
            InterioError::Cms(message) => {
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "Content service unavailable",
                    "message": message
                }))
            }
            InterioError::Internal(message) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error",
                    "message": message
                }))
            }
        }
    }
}
