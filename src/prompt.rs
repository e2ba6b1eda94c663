/// Prompt composition for the generation API
///
/// Combines a style preset's fragment with the user's optional free-text
/// edits, then wraps the result in the fixed instruction template that pins
/// the invariant constraints (preserve facial identity, photorealism,
/// seamless removals).

use crate::catalog::StylePreset;

/// Combine a preset's prompt fragment with free-text edit instructions
///
/// The free text is trimmed; if anything remains it is appended after the
/// fragment, separated by a period and a space. Empty or whitespace-only
/// edits leave the fragment unchanged.
pub fn compose(preset: &StylePreset, free_text: &str) -> String {
    let edits = free_text.trim();
    if edits.is_empty() {
        preset.prompt.to_string()
    } else {
        format!("{}. {}", preset.prompt, edits)
    }
}

/// Wrap a composed style prompt in the full instruction sent to the API
pub fn build_instruction(style_prompt: &str) -> String {
    format!(
        "Generate a photorealistic, professional headshot based on the person in this image. \
         Apply the following style: {}. \
         Ensure the result is high-quality and suitable for a professional profile. \
         Do not alter the person's key facial features, but enhance the overall quality \
         to a professional headshot standard. \
         If the user asks to remove something, remove it seamlessly.",
        style_prompt
    )
}
