// src/config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub strapi_url: String,
    pub strapi_token: Option<String>,
    pub bind_addr: String,
}

impl AppConfig {
    // A missing OPENAI_API_KEY is reported per-request, not at startup.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            strapi_url: env::var("STRAPI_URL")
                .unwrap_or_else(|_| "http://localhost:1337".to_string()),
            strapi_token: env::var("STRAPI_TOKEN").ok().filter(|t| !t.is_empty()),
            bind_addr: format!("{}:{}", host, port),
        }
    }
}
