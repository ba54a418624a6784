use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub input_fill: String,
    pub input_text: String,
    pub output_fill: String,
    pub output_text: String,
    pub evaluated_fill: String,
    pub evaluated_text: String,
    pub unevaluated_fill: String,
    pub unevaluated_text: String,
    pub line_color: String,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Helvetica, Arial, sans-serif".to_string(),
            font_size: 14.0,
            input_fill: "#333".to_string(),
            input_text: "white".to_string(),
            output_fill: "#008080".to_string(),
            output_text: "white".to_string(),
            evaluated_fill: "#ccc".to_string(),
            evaluated_text: "#333".to_string(),
            unevaluated_fill: "white".to_string(),
            unevaluated_text: "#333".to_string(),
            line_color: "#333".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn slate() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            input_fill: "#334155".to_string(),
            input_text: "#F8FAFC".to_string(),
            output_fill: "#0F766E".to_string(),
            output_text: "#F0FDFA".to_string(),
            evaluated_fill: "#CBD5E1".to_string(),
            evaluated_text: "#1E293B".to_string(),
            unevaluated_fill: "#FFFFFF".to_string(),
            unevaluated_text: "#1E293B".to_string(),
            line_color: "#64748B".to_string(),
            background: "#F8FAFC".to_string(),
        }
    }
}
