/// Headshot style catalog
///
/// A fixed, ordered set of style presets. Each preset carries the prompt
/// fragment sent to the generation API and a thumbnail URL shown in the
/// style grid. The catalog is defined at compile time and never mutated.

/// A named headshot style preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    /// Unique identifier (stable, used for selection state)
    pub id: &'static str,
    /// Display name shown under the thumbnail
    pub name: &'static str,
    /// Prompt fragment describing the style to the generation API
    pub prompt: &'static str,
    /// Thumbnail image URL, fetched once at startup
    pub thumbnail_url: &'static str,
}

/// All available headshot styles, in display order
pub static HEADSHOT_STYLES: [StylePreset; 5] = [
    StylePreset {
        id: "corporate_grey",
        name: "Corporate Grey Backdrop",
        prompt: "a professional corporate headshot, sharp lighting, against a solid light grey backdrop, looking confidently at the camera",
        thumbnail_url: "https://picsum.photos/seed/corporate/200",
    },
    StylePreset {
        id: "tech_office",
        name: "Modern Tech Office",
        prompt: "a professional headshot in a modern tech office with a blurred background, natural window lighting, looking friendly and approachable",
        thumbnail_url: "https://picsum.photos/seed/tech/200",
    },
    StylePreset {
        id: "outdoor_natural",
        name: "Outdoor Natural Light",
        prompt: "an outdoor professional headshot with soft, natural lighting, a slightly blurred background of greenery, warm tones, looking relaxed",
        thumbnail_url: "https://picsum.photos/seed/outdoor/200",
    },
    StylePreset {
        id: "black_white_classic",
        name: "Classic Black & White",
        prompt: "a classic, professional black and white studio headshot with high contrast and dramatic lighting, looking thoughtful",
        thumbnail_url: "https://picsum.photos/seed/bw/200",
    },
    StylePreset {
        id: "creative_colorful",
        name: "Creative & Colorful",
        prompt: "a creative professional headshot against a vibrant, colorful, out-of-focus urban background, looking energetic and innovative",
        thumbnail_url: "https://picsum.photos/seed/creative/200",
    },
];

/// Look up a preset by its id
///
/// Returns `None` for unknown ids; the caller treats that as a
/// validation failure before any network call is made.
pub fn find_style(id: &str) -> Option<&'static StylePreset> {
    HEADSHOT_STYLES.iter().find(|style| style.id == id)
}
