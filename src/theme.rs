use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub parser_font_size: f32,
    pub background: String,
    pub branch_fill: String,
    pub branch_stroke: String,
    pub branch_text: String,
    pub leaf_fill: String,
    pub leaf_stroke: String,
    pub leaf_text: String,
    /// Label colour of a highlighted branch, drawn on the swapped fill.
    pub highlight_text: String,
    pub line_color: String,
    pub highlight_line_color: String,
    pub true_color: String,
    pub false_color: String,
    pub custom_label_color: String,
    pub label_halo: String,
    pub example_fill: String,
    pub example_stroke: String,
    pub example_text: String,
    pub parser_stroke: String,
    pub parser_text: String,
    pub output_type_fill: String,
    pub output_value_fill: String,
    pub output_text: String,
    pub input_fill: String,
    pub input_stroke: String,
    pub input_text: String,
    pub glow_color: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace".to_string(),
            font_size: 14.0,
            parser_font_size: 11.0,
            background: "#FFFFFF".to_string(),
            branch_fill: "#F8FAFF".to_string(),
            branch_stroke: "#4F6D9A".to_string(),
            branch_text: "#1C2430".to_string(),
            leaf_fill: "#EEF6EE".to_string(),
            leaf_stroke: "#5E8C61".to_string(),
            leaf_text: "#1C2430".to_string(),
            highlight_text: "#FFFFFF".to_string(),
            line_color: "#7A8AA6".to_string(),
            highlight_line_color: "#E07A1F".to_string(),
            true_color: "#2E9E44".to_string(),
            false_color: "#D64545".to_string(),
            custom_label_color: "#555F6E".to_string(),
            label_halo: "#FFFFFF".to_string(),
            example_fill: "#FFFFFF".to_string(),
            example_stroke: "#C7D2E5".to_string(),
            example_text: "#3B4656".to_string(),
            parser_stroke: "#9AA6B8".to_string(),
            parser_text: "#6B7687".to_string(),
            output_type_fill: "#E6EEFA".to_string(),
            output_value_fill: "#FFF4E0".to_string(),
            output_text: "#1C2430".to_string(),
            input_fill: "#FFFFFF".to_string(),
            input_stroke: "#C7D2E5".to_string(),
            input_text: "#1C2430".to_string(),
            glow_color: "#E07A1F".to_string(),
        }
    }

    pub fn classic() -> Self {
        Self {
            font_family: "\"Courier New\", Courier, monospace".to_string(),
            font_size: 14.0,
            parser_font_size: 11.0,
            background: "#FFFFFF".to_string(),
            branch_fill: "#ECECFF".to_string(),
            branch_stroke: "#9370DB".to_string(),
            branch_text: "#333333".to_string(),
            leaf_fill: "#FFFFDE".to_string(),
            leaf_stroke: "#AAAA33".to_string(),
            leaf_text: "#333333".to_string(),
            highlight_text: "#FFFFFF".to_string(),
            line_color: "#333333".to_string(),
            highlight_line_color: "#FF8C00".to_string(),
            true_color: "#228B22".to_string(),
            false_color: "#B22222".to_string(),
            custom_label_color: "#333333".to_string(),
            label_halo: "#FFFFFF".to_string(),
            example_fill: "#FFFFFF".to_string(),
            example_stroke: "#999999".to_string(),
            example_text: "#333333".to_string(),
            parser_stroke: "#999999".to_string(),
            parser_text: "#666666".to_string(),
            output_type_fill: "#ECECFF".to_string(),
            output_value_fill: "#FFFFDE".to_string(),
            output_text: "#333333".to_string(),
            input_fill: "#FFFFFF".to_string(),
            input_stroke: "#999999".to_string(),
            input_text: "#333333".to_string(),
            glow_color: "#FF8C00".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
