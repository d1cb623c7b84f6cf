use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub entity_fill: String,
    pub entity_border: String,
    pub entity_text_color: String,
    pub anchor_fill: String,
    pub anchor_border: String,
    pub connector_color: String,
    pub waypoint_color: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            entity_fill: "#F8FAFF".to_string(),
            entity_border: "#C7D2E5".to_string(),
            entity_text_color: "#1C2430".to_string(),
            anchor_fill: "#FFFFFF".to_string(),
            anchor_border: "#7A8AA6".to_string(),
            connector_color: "#7A8AA6".to_string(),
            waypoint_color: "#D96C6C".to_string(),
        }
    }

    pub fn blueprint() -> Self {
        Self {
            font_family: "\"JetBrains Mono\", Menlo, monospace".to_string(),
            font_size: 12.0,
            background: "#10243E".to_string(),
            entity_fill: "#16355C".to_string(),
            entity_border: "#4F7CAC".to_string(),
            entity_text_color: "#D8E6F5".to_string(),
            anchor_fill: "#10243E".to_string(),
            anchor_border: "#7FA8D0".to_string(),
            connector_color: "#9FC3E8".to_string(),
            waypoint_color: "#F2B66D".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
