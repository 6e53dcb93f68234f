// src/models.rs
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::InterioError;

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Kitchen,
    LivingRoom,
    Bedroom,
    Bathroom,
    DiningRoom,
    Office,
}

impl RoomType {
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Kitchen => "kitchen",
            RoomType::LivingRoom => "living room",
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom",
            RoomType::DiningRoom => "dining room",
            RoomType::Office => "office",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStyle {
    Modern,
    Scandinavian,
    Industrial,
    Bohemian,
    Luxury,
    Rustic,
}

impl DesignStyle {
    pub fn label(&self) -> &'static str {
        match self {
            DesignStyle::Modern => "modern",
            DesignStyle::Scandinavian => "scandinavian",
            DesignStyle::Industrial => "industrial",
            DesignStyle::Bohemian => "bohemian",
            DesignStyle::Luxury => "luxury",
            DesignStyle::Rustic => "rustic",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub image: Option<String>,
    pub room_type: Option<RoomType>,
    pub style: Option<DesignStyle>,
    pub prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidGeneration {
    pub image: String,
    pub room_type: RoomType,
    pub style: DesignStyle,
    pub prompt: Option<String>,
}

impl GenerationRequest {
    pub fn validate(self) -> Result<ValidGeneration, InterioError> {
        let mut missing = Vec::new();
        if self.image.as_deref().is_none_or(|i| i.trim().is_empty()) {
            missing.push("image");
        }
        if self.style.is_none() {
            missing.push("style");
        }
        if self.room_type.is_none() {
            missing.push("roomType");
        }
        if !missing.is_empty() {
            return Err(InterioError::MissingFields(missing.join(", ")));
        }

        let image = self.image.unwrap();
        validate_image_data_uri(&image)?;

        Ok(ValidGeneration {
            image,
            room_type: self.room_type.unwrap(),
            style: self.style.unwrap(),
            prompt: self.prompt.filter(|p| !p.trim().is_empty()),
        })
    }
}

fn validate_image_data_uri(image: &str) -> Result<(), InterioError> {
    if !image.starts_with("data:image/") {
        return Err(InterioError::Validation(
            "image must be a data URI with an image/* media type".to_string(),
        ));
    }

    let payload = image
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or_else(|| {
            InterioError::Validation("image data URI must be base64 encoded".to_string())
        })?;

    let decoded = general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| InterioError::Validation("image payload is not valid base64".to_string()))?;

    if decoded.is_empty() {
        return Err(InterioError::Validation("image payload is empty".to_string()));
    }
    if decoded.len() > MAX_IMAGE_BYTES {
        return Err(InterioError::Validation(
            "image exceeds the 10 MB upload limit".to_string(),
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    #[serde(default)]
    pub room_analysis: String,
    #[serde(default)]
    pub existing_elements: String,
    #[serde(default)]
    pub design_plan: String,
    pub dalle_prompt: String,
}

// Outcome of parsing the vision response. The provider is asked for JSON but
// is not guaranteed to return it; an unparseable body degrades to the raw
// text being used as the generation prompt instead of failing the request.
#[derive(Debug, Clone)]
pub enum DesignAnalysis {
    Structured(AnalysisDocument),
    Unstructured(String),
}

impl DesignAnalysis {
    pub fn parse(content: &str) -> Self {
        match serde_json::from_str::<AnalysisDocument>(content) {
            Ok(doc) if !doc.dalle_prompt.trim().is_empty() => DesignAnalysis::Structured(doc),
            _ => DesignAnalysis::Unstructured(content.trim().to_string()),
        }
    }

    pub fn generation_seed(&self) -> &str {
        match self {
            DesignAnalysis::Structured(doc) => &doc.dalle_prompt,
            DesignAnalysis::Unstructured(text) => text,
        }
    }

    pub fn room_analysis(&self) -> Option<&str> {
        match self {
            DesignAnalysis::Structured(doc) if !doc.room_analysis.trim().is_empty() => {
                Some(&doc.room_analysis)
            }
            _ => None,
        }
    }

    pub fn design_plan(&self) -> Option<&str> {
        match self {
            DesignAnalysis::Structured(doc) if !doc.design_plan.trim().is_empty() => {
                Some(&doc.design_plan)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUsage {
    pub vision_tokens: u64,
    pub image_generation: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub generated_image: String,
    pub analysis_prompt: String,
    pub design_plan: String,
    pub style: DesignStyle,
    pub room_type: RoomType,
    pub timestamp: DateTime<Utc>,
    pub api_usage: ApiUsage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapabilities {
    pub gpt4_available: bool,
    pub dalle_available: bool,
    pub total_models: usize,
}

impl ProviderCapabilities {
    pub fn from_model_ids(ids: &[String]) -> Self {
        Self {
            gpt4_available: ids.iter().any(|id| id.contains("gpt-4")),
            dalle_available: ids.iter().any(|id| id.contains("dall-e")),
            total_models: ids.len(),
        }
    }
}

// Catalog entities are owned by the CMS; only the fields the site reads are
// mapped, the rest of the attribute map is kept for date-based sorting.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRecord {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub images: Vec<String>,
    pub categories: Vec<String>,
    #[serde(skip_serializing)]
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), InterioError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        if !missing.is_empty() {
            return Err(InterioError::MissingFields(missing.join(", ")));
        }
        if !self.email.contains('@') {
            return Err(InterioError::Validation(
                "email address is not valid".to_string(),
            ));
        }
        Ok(())
    }
}
