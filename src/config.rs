use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const VALIDATE_ON_ATTR: &str = "data-validate-on";
pub const LIVE_VALIDATE_ATTR: &str = "data-live-validate";
pub const VALIDATE_ON_BLUR_ATTR: &str = "data-validate-on-blur";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValidateOn {
    #[default]
    FieldChange,
    Off,
}

impl ValidateOn {
    pub fn parse(raw: &str) -> Self {
        if raw == "fieldChange" {
            Self::FieldChange
        } else {
            Self::Off
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FieldChange => "fieldChange",
            Self::Off => "none",
        }
    }
}

impl From<String> for ValidateOn {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ValidateOn> for String {
    fn from(v: ValidateOn) -> Self {
        v.as_str().to_string()
    }
}

/// One source of widget options. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionsLayer {
    #[serde(default)]
    pub validate_on: Option<ValidateOn>,
    #[serde(default)]
    pub live_validate: Option<bool>,
    #[serde(default)]
    pub validate_on_blur: Option<bool>,
}

/// Attribute strings are truthy unless empty or exactly `false`, `0` or `null`.
fn parse_flag(raw: &str) -> bool {
    !matches!(raw, "" | "false" | "0" | "null")
}

impl OptionsLayer {
    pub fn from_data_attributes(attrs: &BTreeMap<String, String>) -> Self {
        Self {
            validate_on: attrs.get(VALIDATE_ON_ATTR).map(|v| ValidateOn::parse(v)),
            live_validate: attrs.get(LIVE_VALIDATE_ATTR).map(|v| parse_flag(v)),
            validate_on_blur: attrs.get(VALIDATE_ON_BLUR_ATTR).map(|v| parse_flag(v)),
        }
    }

    /// Read an options file; format follows the extension (`.json`, `.toml`, else YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let layer = match ext {
            "json" => serde_json::from_str(&text).map_err(anyhow::Error::from),
            "toml" => toml::from_str(&text).map_err(anyhow::Error::from),
            _ => serde_yaml::from_str(&text).map_err(anyhow::Error::from),
        };
        layer.with_context(|| format!("Invalid options file: {}", path.display()))
    }

    /// `other` wins wherever it sets a field.
    pub fn overlay(&self, other: &OptionsLayer) -> OptionsLayer {
        OptionsLayer {
            validate_on: other.validate_on.or(self.validate_on),
            live_validate: other.live_validate.or(self.live_validate),
            validate_on_blur: other.validate_on_blur.or(self.validate_on_blur),
        }
    }
}

/// Effective widget options, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub validate_on: ValidateOn,
    pub live_validate: bool,
    pub validate_on_blur: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            validate_on: ValidateOn::FieldChange,
            live_validate: false,
            validate_on_blur: false,
        }
    }
}

impl WidgetConfig {
    /// Defaults, then container data attributes, then caller options.
    pub fn resolve(data: &OptionsLayer, explicit: &OptionsLayer) -> Self {
        let merged = data.overlay(explicit);
        let defaults = Self::default();
        Self {
            validate_on: merged.validate_on.unwrap_or(defaults.validate_on),
            live_validate: merged.live_validate.unwrap_or(defaults.live_validate),
            validate_on_blur: merged.validate_on_blur.unwrap_or(defaults.validate_on_blur),
        }
    }
}
