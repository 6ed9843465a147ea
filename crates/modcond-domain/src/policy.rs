use crate::entropy::EntropyTable;

/// MIME types the host serves inline without forcing a download.
pub const FILE_TYPE_BROWSERSAFE: &[&str] = &[
    // images
    "image/png",
    "image/gif",
    "image/jpeg",
    "image/webp",
    "image/avif",
    "image/apng",
    "image/bmp",
    "image/tiff",
    "image/x-icon",
    // ogg
    "audio/opus",
    "video/ogg",
    "audio/ogg",
    "application/ogg",
    // ISO/IEC base media file format
    "video/quicktime",
    "video/mp4",
    "audio/mp4",
    "video/x-m4v",
    "audio/x-m4a",
    "video/3gpp",
    "video/3gpp2",
    "video/mpeg",
    "audio/mpeg",
    "video/webm",
    "audio/webm",
    "audio/aac",
    "audio/flac",
    "audio/wav",
    // legacy aliases
    "audio/x-flac",
    "audio/vnd.wave",
];

pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Effective engine configuration after the host resolved its settings.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub browser_safe_types: Vec<String>,
    /// Deepest formula the host accepts. Enforced when a formula is accepted,
    /// not during evaluation.
    pub max_depth: usize,
    /// `None` disables the username entropy leaves (they never match).
    pub entropy_table: Option<EntropyTable>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            browser_safe_types: FILE_TYPE_BROWSERSAFE.iter().map(|t| t.to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
            entropy_table: None,
        }
    }
}

impl EngineConfig {
    pub fn is_browser_safe(&self, mime: &str) -> bool {
        self.browser_safe_types.iter().any(|t| t == mime)
    }
}
