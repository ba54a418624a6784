use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    #[serde(rename = "TD", alias = "TB")]
    TopDown,
    #[serde(rename = "BT")]
    BottomUp,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Some(Self::TopDown),
            "BT" => Some(Self::BottomUp),
            "LR" => Some(Self::LeftRight),
            "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TooltipSize {
    Small,
    Medium,
    #[default]
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_spacing: f32,
    pub rank_spacing: f32,
    pub node_padding_x: f32,
    pub node_padding_y: f32,
    pub label_line_height: f32,
    pub direction: Direction,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 50.0,
            rank_spacing: 50.0,
            node_padding_x: 14.0,
            node_padding_y: 10.0,
            label_line_height: 1.4,
            direction: Direction::TopDown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub tooltip_max_chars: usize,
    pub panel_max_chars: Option<usize>,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub tooltip_size: TooltipSize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            tooltip_max_chars: 500,
            panel_max_chars: None,
            zoom_min: 0.1,
            zoom_max: 5.0,
            tooltip_size: TooltipSize::Large,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub interaction: InteractionConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
            interaction: InteractionConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    input_fill: Option<String>,
    input_text: Option<String>,
    output_fill: Option<String>,
    output_text: Option<String>,
    evaluated_fill: Option<String>,
    evaluated_text: Option<String>,
    unevaluated_fill: Option<String>,
    unevaluated_text: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_spacing: Option<f32>,
    rank_spacing: Option<f32>,
    node_padding_x: Option<f32>,
    node_padding_y: Option<f32>,
    label_line_height: Option<f32>,
    direction: Option<Direction>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct InteractionConfigFile {
    tooltip_max_chars: Option<usize>,
    panel_max_chars: Option<usize>,
    zoom_min: Option<f32>,
    zoom_max: Option<f32>,
    tooltip_size: Option<TooltipSize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
    interaction: Option<InteractionConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "slate" {
            config.theme = Theme::slate();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.and_then(|v| v.as_f32()) {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.input_fill {
            config.theme.input_fill = v;
        }
        if let Some(v) = vars.input_text {
            config.theme.input_text = v;
        }
        if let Some(v) = vars.output_fill {
            config.theme.output_fill = v;
        }
        if let Some(v) = vars.output_text {
            config.theme.output_text = v;
        }
        if let Some(v) = vars.evaluated_fill {
            config.theme.evaluated_fill = v;
        }
        if let Some(v) = vars.evaluated_text {
            config.theme.evaluated_text = v;
        }
        if let Some(v) = vars.unevaluated_fill {
            config.theme.unevaluated_fill = v;
        }
        if let Some(v) = vars.unevaluated_text {
            config.theme.unevaluated_text = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.node_spacing {
            config.layout.node_spacing = v;
        }
        if let Some(v) = layout.rank_spacing {
            config.layout.rank_spacing = v;
        }
        if let Some(v) = layout.node_padding_x {
            config.layout.node_padding_x = v;
        }
        if let Some(v) = layout.node_padding_y {
            config.layout.node_padding_y = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
        if let Some(v) = layout.direction {
            config.layout.direction = v;
        }
    }

    if let Some(interaction) = parsed.interaction {
        if let Some(v) = interaction.tooltip_max_chars {
            config.interaction.tooltip_max_chars = v;
        }
        if interaction.panel_max_chars.is_some() {
            config.interaction.panel_max_chars = interaction.panel_max_chars;
        }
        if let Some(v) = interaction.zoom_min {
            config.interaction.zoom_min = v;
        }
        if let Some(v) = interaction.zoom_max {
            config.interaction.zoom_max = v;
        }
        if let Some(v) = interaction.tooltip_size {
            config.interaction.tooltip_size = v;
        }
    }

    config.render.background = config.theme.background.clone();

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}
