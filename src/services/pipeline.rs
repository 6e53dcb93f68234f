// src/services/pipeline.rs
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};

use crate::errors::InterioError;
use crate::models::{ApiUsage, DesignAnalysis, GenerationResult, ValidGeneration};
use crate::services::prompts;

const ANALYSIS_PLACEHOLDER: &str = "Analysis unavailable";
const DESIGN_PLAN_PLACEHOLDER: &str = "Design plan unavailable";

pub struct AnalysisOutcome {
    pub content: String,
    pub vision_tokens: u64,
}

pub struct GeneratedImage {
    pub url: Option<String>,
}

#[async_trait]
pub trait DesignProvider: Send + Sync {
    async fn analyze_room(
        &self,
        request: &ValidGeneration,
    ) -> Result<AnalysisOutcome, InterioError>;

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, InterioError>;
}

// The two provider calls are strictly sequential: the generation prompt is
// derived from the analysis output, so an analysis failure aborts the whole
// request before any generation call is made.
pub async fn run_pipeline<P: DesignProvider + ?Sized>(
    provider: &P,
    request: &ValidGeneration,
) -> Result<GenerationResult, InterioError> {
    let outcome = provider.analyze_room(request).await?;

    let analysis = DesignAnalysis::parse(&outcome.content);
    match &analysis {
        DesignAnalysis::Structured(doc) => {
            debug!("elements kept in place: {}", doc.existing_elements);
        }
        DesignAnalysis::Unstructured(_) => {
            warn!("analysis response was not structured JSON, using the raw text as the prompt");
        }
    }

    let prompt = prompts::generation_prompt(
        analysis.generation_seed(),
        request.room_type,
        request.style,
    );

    let generated = provider.generate_image(&prompt).await?;
    let url = generated.url.ok_or(InterioError::EmptyResult)?;

    Ok(GenerationResult {
        success: true,
        generated_image: url,
        analysis_prompt: analysis
            .room_analysis()
            .unwrap_or(ANALYSIS_PLACEHOLDER)
            .to_string(),
        design_plan: analysis
            .design_plan()
            .unwrap_or(DESIGN_PLAN_PLACEHOLDER)
            .to_string(),
        style: request.style,
        room_type: request.room_type,
        timestamp: Utc::now(),
        api_usage: ApiUsage {
            vision_tokens: outcome.vision_tokens,
            image_generation: 1,
        },
    })
}
