//! Layout output model.
//!
//! Layouts are plain serializable data: a flat list of drawable elements plus
//! the node records the hit-tester reads. `group_texts` is a path of CSS
//! class names; the SVG writer nests a `<g>` per segment in emission order.

use cannimap_core::ConflictId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    #[serde(rename = "strokeFill")]
    pub stroke_fill: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleData {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    #[serde(rename = "strokeFill")]
    pub stroke_fill: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(default, rename = "fillOpacity")]
    pub fill_opacity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextData {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub fill: String,
    #[serde(rename = "fontSize")]
    pub font_size: f64,
    #[serde(rename = "verticalPos")]
    pub vertical_pos: String,
    #[serde(rename = "horizontalPos")]
    pub horizontal_pos: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathData {
    pub path: String,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(rename = "strokeFill")]
    pub stroke_fill: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(default, rename = "strokeDash")]
    pub stroke_dash: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawableElem {
    #[serde(rename = "rect")]
    Rect {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<RectData>,
    },
    #[serde(rename = "circle")]
    Circle {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<CircleData>,
    },
    #[serde(rename = "text")]
    Text {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<TextData>,
    },
    #[serde(rename = "path")]
    Path {
        #[serde(rename = "groupTexts")]
        group_texts: Vec<String>,
        data: Vec<PathData>,
    },
}

/// One page of one conflict, resolved to screen space.
///
/// `cluster_nodes` is a pure function of (conflicts, dimensions, config), so
/// these records are identical between the render pass that painted them and
/// the hit-test pass that reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(rename = "colorIndex")]
    pub color_index: usize,
    #[serde(rename = "conflictId")]
    pub conflict_id: ConflictId,
    #[serde(rename = "pageIndex")]
    pub page_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterChartLayout {
    pub width: f64,
    pub height: f64,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
    pub nodes: Vec<ClusterNode>,
    #[serde(default)]
    pub drawables: Vec<DrawableElem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendChartLayout {
    pub width: f64,
    pub height: f64,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
    #[serde(default)]
    pub drawables: Vec<DrawableElem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareBarLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub drawables: Vec<DrawableElem>,
}
