//! On-disk scene description. Every field is optional here; defaults and
//! validation are applied when converting into [`crate::scene::Scene`].

use serde::{Deserialize, Serialize};

use crate::types::Float;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[Float; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Float>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[Float; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Float>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Float>,
    /// Degrees, counter-clockwise about `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Float>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[Float; 2]>,
    #[serde(default)]
    pub circles: Vec<Circle>,
    #[serde(default)]
    pub rectangles: Vec<Rectangle>,
}

impl Scene {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
