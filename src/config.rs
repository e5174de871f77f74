//! Enhancement configuration.
//!
//! The defaults reproduce the Bootstrap 5 article pages lucent was written
//! for: `main` as the content root, Bootstrap class names, and Arabic
//! accessibility labels. Every selector, offset, threshold, label and
//! synthesized id can be overridden, either in code through the `with_*`
//! setters or from a JSON file when the `serde` feature is enabled.
//!
//! ```
//! use lucent::EnhanceConfig;
//!
//! let config = EnhanceConfig::default()
//!     .with_content_root("article")
//!     .with_scroll_threshold(600.0);
//! let compiled = config.compile().unwrap();
//! assert_eq!(compiled.content_root.as_str(), "article");
//! ```

use crate::dom::SelectorSet;
use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnhanceConfig {
    pub selectors: SelectorConfig,
    /// Gap left above an anchor target after scrolling to it.
    pub anchor_offset: f64,
    /// Scroll offset past which the return-to-top control shows.
    pub scroll_threshold: f64,
    /// Fraction of a block's area that must be visible to reveal it.
    pub reveal_threshold: f64,
    /// Root margin handed to the intersection source.
    pub reveal_root_margin: String,
    pub strings: Strings,
    pub ids: IdVocabulary,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            anchor_offset: 20.0,
            scroll_threshold: 300.0,
            reveal_threshold: 0.15,
            reveal_root_margin: "0px".to_string(),
            strings: Strings::default(),
            ids: IdVocabulary::default(),
        }
    }
}

/// CSS selectors locating each enhancement's targets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    pub content_root: String,
    pub anchor_links: String,
    pub images: String,
    pub figure: String,
    pub caption: String,
    pub animatable: String,
    pub panel_group: String,
    pub panel_trigger: String,
    pub panel_item: String,
    pub panel_region: String,
    pub progress_bar: String,
    pub tooltip: String,
    pub popover: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            content_root: "main".to_string(),
            anchor_links: r##"a[href^="#"]"##.to_string(),
            images: "figure img.img-fluid".to_string(),
            figure: "figure".to_string(),
            caption: "figcaption".to_string(),
            animatable: "section, .card, .alert".to_string(),
            panel_group: ".accordion".to_string(),
            panel_trigger: ".accordion-button".to_string(),
            panel_item: ".accordion-item".to_string(),
            panel_region: ".accordion-collapse".to_string(),
            progress_bar: "#readingProgress".to_string(),
            tooltip: r#"[data-bs-toggle="tooltip"]"#.to_string(),
            popover: r#"[data-bs-toggle="popover"]"#.to_string(),
        }
    }
}

/// Localized labels written into synthesized markup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Strings {
    /// Label and title of the return-to-top control.
    pub back_to_top: String,
    /// Label announced for an inspectable image.
    pub enlarge_image: String,
    /// Label of the overlay's close button.
    pub close_overlay: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            back_to_top: "العودة إلى أعلى الصفحة".to_string(),
            enlarge_image: "تكبير الصورة".to_string(),
            close_overlay: "إغلاق".to_string(),
        }
    }
}

/// Ids and class names given to synthesized elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IdVocabulary {
    pub overlay: String,
    pub overlay_label: String,
    pub animation_style: String,
    /// Prefix for synthesized collapsible-region ids.
    pub region_prefix: String,
    /// Class marking the return-to-top control.
    pub control_class: String,
}

impl Default for IdVocabulary {
    fn default() -> Self {
        Self {
            overlay: "imageLightbox".to_string(),
            overlay_label: "imageLightboxLabel".to_string(),
            animation_style: "lucent-entrance-style".to_string(),
            region_prefix: "accordion-collapse".to_string(),
            control_class: "back-to-top".to_string(),
        }
    }
}

/// Selectors parsed once, before any enhancement runs.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub content_root: SelectorSet,
    pub anchor_links: SelectorSet,
    pub images: SelectorSet,
    pub figure: SelectorSet,
    pub caption: SelectorSet,
    pub animatable: SelectorSet,
    pub panel_group: SelectorSet,
    pub panel_trigger: SelectorSet,
    pub panel_item: SelectorSet,
    pub panel_region: SelectorSet,
    pub progress_bar: SelectorSet,
    pub tooltip: SelectorSet,
    pub popover: SelectorSet,
}

impl EnhanceConfig {
    pub fn with_content_root(mut self, selector: impl Into<String>) -> Self {
        self.selectors.content_root = selector.into();
        self
    }

    pub fn with_anchor_offset(mut self, offset: f64) -> Self {
        self.anchor_offset = offset;
        self
    }

    pub fn with_scroll_threshold(mut self, threshold: f64) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    pub fn with_reveal_threshold(mut self, threshold: f64) -> Self {
        self.reveal_threshold = threshold;
        self
    }

    pub fn with_strings(mut self, strings: Strings) -> Self {
        self.strings = strings;
        self
    }

    /// Check numeric ranges and parse every selector.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        self.validate()?;

        let s = &self.selectors;
        Ok(CompiledSelectors {
            content_root: SelectorSet::parse(&s.content_root)?,
            anchor_links: SelectorSet::parse(&s.anchor_links)?,
            images: SelectorSet::parse(&s.images)?,
            figure: SelectorSet::parse(&s.figure)?,
            caption: SelectorSet::parse(&s.caption)?,
            animatable: SelectorSet::parse(&s.animatable)?,
            panel_group: SelectorSet::parse(&s.panel_group)?,
            panel_trigger: SelectorSet::parse(&s.panel_trigger)?,
            panel_item: SelectorSet::parse(&s.panel_item)?,
            panel_region: SelectorSet::parse(&s.panel_region)?,
            progress_bar: SelectorSet::parse(&s.progress_bar)?,
            tooltip: SelectorSet::parse(&s.tooltip)?,
            popover: SelectorSet::parse(&s.popover)?,
        })
    }

    fn validate(&self) -> Result<()> {
        if !self.anchor_offset.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "anchor_offset must be finite, got {}",
                self.anchor_offset
            )));
        }
        if !self.scroll_threshold.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "scroll_threshold must be finite, got {}",
                self.scroll_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(Error::InvalidConfig(format!(
                "reveal_threshold must be within 0..=1, got {}",
                self.reveal_threshold
            )));
        }
        let ids = [
            ("overlay", &self.ids.overlay),
            ("overlay_label", &self.ids.overlay_label),
            ("animation_style", &self.ids.animation_style),
            ("region_prefix", &self.ids.region_prefix),
            ("control_class", &self.ids.control_class),
        ];
        for (field, value) in ids {
            if value.trim().is_empty() || value.contains(char::is_whitespace) {
                return Err(Error::InvalidConfig(format!(
                    "ids.{field} must be a single non-empty token, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl EnhanceConfig {
    /// Parse a JSON configuration; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
