//! Configuration type definitions

use crate::title::TimeFormat;
use serde::{Deserialize, Serialize};

/// Top-level quill configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuillConfig {
    /// Windowed list cache settings
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Search query and ranking settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Default title template settings
    #[serde(default)]
    pub title: TitleConfig,

    /// Internal link preview settings
    #[serde(default)]
    pub links: LinksConfig,
}

/// Configuration for the windowed item cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Ids fetched per resolver call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Batches kept resident before the least recently used one is evicted
    #[serde(default = "default_max_resident_batches")]
    pub max_resident_batches: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_resident_batches: default_max_resident_batches(),
        }
    }
}

/// Configuration for search query transformation and fuzzy ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Bare terms shorter than this are dropped (0 keeps everything)
    #[serde(default)]
    pub min_term_length: usize,

    /// Text inserted before each fuzzy-matched span
    #[serde(default)]
    pub match_prefix: String,

    /// Text inserted after each fuzzy-matched span
    #[serde(default)]
    pub match_suffix: String,
}

/// Configuration for generated note titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Template with `$date$`, `$time$`, `$timestamp$`, `$headline$`, `$count$`
    #[serde(default = "default_title_template")]
    pub template: String,

    /// Day.js-style date pattern, e.g. `DD-MM-YYYY`
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub time_format: TimeFormat,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            template: default_title_template(),
            date_format: default_date_format(),
            time_format: TimeFormat::default(),
        }
    }
}

/// Configuration for link previews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Characters of surrounding text kept in previews
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            preview_length: default_preview_length(),
        }
    }
}

fn default_batch_size() -> usize {
    500
}

fn default_max_resident_batches() -> usize {
    1
}

fn default_title_template() -> String {
    "Note $date$, $time$".to_string()
}

fn default_date_format() -> String {
    "DD-MM-YYYY".to_string()
}

fn default_preview_length() -> usize {
    200
}
