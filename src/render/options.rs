//! Rendering options configuration.

use super::style_mapping::{StyleMapping, StyleSlot};

/// Default presentation width of embedded images.
pub const DEFAULT_IMAGE_WIDTH: u32 = 700;

/// Default presentation height of embedded images.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 475;

/// Alt text used when an image has none.
pub const DEFAULT_ALT_TEXT: &str = "Image";

/// Source type used when a video has no MIME type.
pub const DEFAULT_VIDEO_TYPE: &str = "video/mp4";

/// Text shown by hosts that cannot play a video.
pub const VIDEO_FALLBACK_TEXT: &str = "Your browser does not support the video tag.";

/// What a checked render does with a node kind that has no rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKindPolicy {
    /// Render the children inside a neutral container
    #[default]
    Passthrough,
    /// Fail with an unsupported-kind error
    Reject,
}

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Class names per slot (None = no class attributes)
    pub styles: Option<StyleMapping>,

    /// Presentation width of embedded images
    pub image_width: u32,

    /// Presentation height of embedded images
    pub image_height: u32,

    /// Handling of unrecognized node kinds in checked renders
    pub unknown_kinds: UnknownKindPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            styles: Some(StyleMapping::with_defaults()),
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            unknown_kinds: UnknownKindPolicy::Passthrough,
        }
    }
}

impl RenderOptions {
    /// Create new render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the default class names.
    pub fn with_classes(mut self, enabled: bool) -> Self {
        self.styles = enabled.then(StyleMapping::with_defaults);
        self
    }

    /// Use a custom class mapping.
    pub fn with_styles(mut self, styles: StyleMapping) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Set the image presentation size.
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the unknown-kind policy.
    pub fn with_unknown_kinds(mut self, policy: UnknownKindPolicy) -> Self {
        self.unknown_kinds = policy;
        self
    }

    /// Reject unknown kinds in checked renders.
    pub fn strict(self) -> Self {
        self.with_unknown_kinds(UnknownKindPolicy::Reject)
    }

    /// Class for a slot under these options.
    pub fn class(&self, slot: StyleSlot) -> Option<&str> {
        self.styles.as_ref().and_then(|s| s.get(slot))
    }
}
