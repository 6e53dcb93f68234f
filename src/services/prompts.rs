// src/services/prompts.rs
use crate::models::{DesignStyle, RoomType};

// Fixed template for the vision call. The model is asked for the four keys
// the pipeline knows how to read; anything else it returns is ignored.
pub fn analysis_prompt(room_type: RoomType, style: DesignStyle, wishes: Option<&str>) -> String {
    let mut prompt = format!(
        r#"You are an expert interior designer. Analyze this photo of a {room} that will be redesigned in the {style} style. Provide:

1. ROOM ANALYSIS: the room layout, dimensions and proportions exactly as seen in the photo.

2. EXISTING ELEMENTS: the architectural elements that must stay (windows, doors, ceiling, radiators, built-ins) and where they are.

3. DESIGN PLAN: how to transform this {room} into the {style} style while keeping the layout, with concrete materials, colors and furniture.

4. GENERATION PROMPT: a ready-to-use prompt for an image generation model that recreates this exact room with the new design applied.

Return as JSON matching this structure:
{{
    "roomAnalysis": "...",
    "existingElements": "...",
    "designPlan": "...",
    "dallePrompt": "..."
}}"#,
        room = room_type.label(),
        style = style.label()
    );

    if let Some(wishes) = wishes {
        prompt.push_str("\n\nClient wishes to incorporate: ");
        prompt.push_str(wishes);
    }

    prompt
}

// Wraps the prompt derived from the analysis step with the constraints the
// generation model tends to drop: layout fidelity and photographic realism.
pub fn generation_prompt(seed: &str, room_type: RoomType, style: DesignStyle) -> String {
    format!(
        r#"Professional interior design photograph. {seed}

Requirements:
- Preserve the exact room layout and proportions of the original photo
- Keep all architectural elements (windows, doors, ceiling) in their original positions
- Apply a cohesive {style} style throughout the room
- Professional interior photography lighting, realistic materials and textures

The result must read as a {style} {room}."#,
        seed = seed.trim(),
        style = style.label(),
        room = room_type.label()
    )
}
