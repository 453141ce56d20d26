use crate::theme::Theme;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Geometry constants shared by sizing, layout and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Estimated width of one character of the main font.
    pub char_width: f32,
    /// Estimated width of one character of the parser annotation font.
    pub parser_char_width: f32,
    pub label_padding: f32,
    pub node_base_width: f32,
    pub branch_height: f32,
    /// Height reserved for the leaf box plus the connector below it.
    pub node_base_height: f32,
    pub leaf_box_height: f32,
    pub parser_band_height: f32,
    pub parser_box_height: f32,
    pub example_box_height: f32,
    pub output_band_height: f32,
    pub output_box_height: f32,
    pub output_value_max_width: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub level_gap: f32,
    pub sibling_separation: f32,
    pub subtree_separation: f32,
    pub margin: f32,
    pub input_band_height: f32,
    pub input_box_height: f32,
    pub corner_radius: f32,
    pub node_stroke_width: f32,
    pub highlight_stroke_width: f32,
    pub edge_stroke_width: f32,
    pub edge_highlight_stroke_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: 8.4,
            parser_char_width: 6.6,
            label_padding: 24.0,
            node_base_width: 140.0,
            branch_height: 56.0,
            node_base_height: 48.0,
            leaf_box_height: 36.0,
            parser_band_height: 30.0,
            parser_box_height: 20.0,
            example_box_height: 26.0,
            output_band_height: 64.0,
            output_box_height: 28.0,
            output_value_max_width: 120.0,
            horizontal_spacing: 1.1,
            vertical_spacing: 1.0,
            level_gap: 40.0,
            sibling_separation: 1.0,
            subtree_separation: 2.0,
            margin: 40.0,
            input_band_height: 84.0,
            input_box_height: 32.0,
            corner_radius: 8.0,
            node_stroke_width: 1.5,
            highlight_stroke_width: 3.0,
            edge_stroke_width: 1.5,
            edge_highlight_stroke_width: 3.0,
        }
    }
}

/// Raster size of PNG output; the drawing is scaled to fit inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<Value>,
    layout: Option<Value>,
    render: Option<Value>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Parses a JSON or JSON5 config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" | "default" => config.theme = Theme::modern(),
            "classic" => config.theme = Theme::classic(),
            other => log::warn!("unknown theme {other:?}; keeping the default"),
        }
    }
    if let Some(vars) = parsed.theme_variables {
        config.theme = overlay(&config.theme, vars, "themeVariables")?;
    }
    if let Some(layout) = parsed.layout {
        config.layout = overlay(&config.layout, layout, "layout")?;
    }
    if let Some(render) = parsed.render {
        config.render = overlay(&config.render, render, "render")?;
    }
    Ok(config)
}

/// Replaces the fields of `base` named in `patch`, keeping every other value.
fn overlay<T>(base: &T, patch: Value, section: &str) -> anyhow::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = patch else {
        return Err(anyhow::anyhow!("config section {section} must be an object"));
    };
    let mut merged = serde_json::to_value(base)?;
    if let Some(fields) = merged.as_object_mut() {
        for (key, value) in patch {
            if !fields.contains_key(&key) {
                log::warn!("ignoring unknown config key {section}.{key}");
                continue;
            }
            fields.insert(key, value);
        }
    }
    Ok(serde_json::from_value(merged)?)
}
