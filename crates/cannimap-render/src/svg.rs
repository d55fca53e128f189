//! SVG writer for chart layouts.
//!
//! Drawable lists become nested `<g class="…">` groups in emission order, so
//! the painter's z-ordering contract (edges before nodes, dataset order =
//! paint order) carries through to the document unchanged.

use crate::model::{
    CircleData, ClusterChartLayout, DrawableElem, PathData, RectData, ShareBarLayout, TextData,
    TrendChartLayout,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root `id` of the produced `<svg>`. Hosts embedding several charts in
    /// one page should make these unique (see `cannimap::sanitize_svg_id`).
    pub diagram_id: Option<String>,
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact attribute formatting: three decimals, trailing zeros trimmed,
/// non-finite values collapse to `0` so NaN never reaches the document.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<usize>,
}

fn node(tag: &str) -> Node {
    Node {
        tag: tag.to_string(),
        attrs: BTreeMap::new(),
        text: None,
        children: Vec::new(),
    }
}

fn push_child(arena: &mut Vec<Node>, parent: usize, child: Node) -> usize {
    let id = arena.len();
    arena.push(child);
    arena[parent].children.push(id);
    id
}

/// Walks `group_texts`, creating one `<g class="…">` per segment on first
/// sight, and returns the innermost group's arena index.
fn ensure_groups(
    arena: &mut Vec<Node>,
    groups_by_prefix: &mut HashMap<String, usize>,
    group_texts: &[String],
) -> usize {
    let mut parent = 0usize;
    let mut prefix = String::new();
    for seg in group_texts {
        prefix.push('/');
        prefix.push_str(seg);
        parent = if let Some(existing) = groups_by_prefix.get(&prefix).copied() {
            existing
        } else {
            let mut g = node("g");
            g.attrs
                .insert("class".to_string(), escape_xml(seg));
            let id = push_child(arena, parent, g);
            groups_by_prefix.insert(prefix.clone(), id);
            id
        };
    }
    parent
}

fn render_node(out: &mut String, arena: &[Node], id: usize) {
    let n = &arena[id];
    out.push('<');
    out.push_str(&n.tag);
    for (k, v) in &n.attrs {
        let _ = write!(out, r#" {k}="{v}""#);
    }
    if n.children.is_empty() && n.text.as_deref().unwrap_or("").is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if let Some(t) = n.text.as_deref() {
        out.push_str(t);
    }
    for c in &n.children {
        render_node(out, arena, *c);
    }
    let _ = write!(out, "</{}>", n.tag);
}

fn text_anchor(horizontal_pos: &str) -> &'static str {
    match horizontal_pos {
        "left" => "start",
        "right" => "end",
        _ => "middle",
    }
}

fn dominant_baseline(vertical_pos: &str) -> &'static str {
    if vertical_pos == "top" {
        "text-before-edge"
    } else {
        "middle"
    }
}

fn rect_node(rect: &RectData) -> Node {
    let mut n = node("rect");
    n.attrs.insert("x".to_string(), fmt(rect.x));
    n.attrs.insert("y".to_string(), fmt(rect.y));
    n.attrs.insert("width".to_string(), fmt(rect.width));
    n.attrs.insert("height".to_string(), fmt(rect.height));
    n.attrs.insert("fill".to_string(), escape_xml(&rect.fill));
    if rect.stroke_width > 0.0 {
        n.attrs
            .insert("stroke".to_string(), escape_xml(&rect.stroke_fill));
        n.attrs
            .insert("stroke-width".to_string(), fmt(rect.stroke_width));
    }
    n
}

fn circle_node(circle: &CircleData) -> Node {
    let mut n = node("circle");
    n.attrs.insert("cx".to_string(), fmt(circle.cx));
    n.attrs.insert("cy".to_string(), fmt(circle.cy));
    n.attrs.insert("r".to_string(), fmt(circle.r));
    n.attrs
        .insert("fill".to_string(), escape_xml(&circle.fill));
    if circle.stroke_width > 0.0 {
        n.attrs
            .insert("stroke".to_string(), escape_xml(&circle.stroke_fill));
        n.attrs
            .insert("stroke-width".to_string(), fmt(circle.stroke_width));
    }
    if let Some(fo) = circle.fill_opacity {
        n.attrs.insert("fill-opacity".to_string(), fmt(fo));
    }
    n
}

fn text_node(text: &TextData) -> Node {
    let mut n = node("text");
    n.attrs.insert("x".to_string(), fmt(text.x));
    n.attrs.insert("y".to_string(), fmt(text.y));
    n.attrs.insert("fill".to_string(), escape_xml(&text.fill));
    n.attrs
        .insert("font-size".to_string(), fmt(text.font_size));
    n.attrs.insert(
        "text-anchor".to_string(),
        text_anchor(&text.horizontal_pos).to_string(),
    );
    n.attrs.insert(
        "dominant-baseline".to_string(),
        dominant_baseline(&text.vertical_pos).to_string(),
    );
    n.text = Some(escape_xml(&text.text));
    n
}

fn path_node(path: &PathData) -> Node {
    let mut n = node("path");
    n.attrs.insert("d".to_string(), escape_xml(&path.path));
    n.attrs.insert(
        "fill".to_string(),
        path.fill
            .as_deref()
            .map(escape_xml)
            .unwrap_or_else(|| "none".to_string()),
    );
    n.attrs
        .insert("stroke".to_string(), escape_xml(&path.stroke_fill));
    n.attrs
        .insert("stroke-width".to_string(), fmt(path.stroke_width));
    if let Some(dash) = &path.stroke_dash {
        n.attrs
            .insert("stroke-dasharray".to_string(), escape_xml(dash));
    }
    if let Some(opacity) = path.opacity {
        n.attrs.insert("opacity".to_string(), fmt(opacity));
    }
    n
}

fn render_drawables(out: &mut String, drawables: &[DrawableElem], background: Option<(f64, f64, &str)>) {
    let mut arena: Vec<Node> = Vec::new();
    arena.push(node("g"));
    arena[0]
        .attrs
        .insert("class".to_string(), "main".to_string());

    if let Some((width, height, color)) = background {
        let mut bg = node("rect");
        bg.attrs.insert("width".to_string(), fmt(width));
        bg.attrs.insert("height".to_string(), fmt(height));
        bg.attrs
            .insert("class".to_string(), "background".to_string());
        bg.attrs.insert("fill".to_string(), escape_xml(color));
        push_child(&mut arena, 0, bg);
    }

    let mut groups_by_prefix: HashMap<String, usize> = HashMap::new();
    for elem in drawables {
        match elem {
            DrawableElem::Rect { group_texts, data } => {
                if data.is_empty() {
                    continue;
                }
                let parent = ensure_groups(&mut arena, &mut groups_by_prefix, group_texts);
                for rect in data {
                    push_child(&mut arena, parent, rect_node(rect));
                }
            }
            DrawableElem::Circle { group_texts, data } => {
                if data.is_empty() {
                    continue;
                }
                let parent = ensure_groups(&mut arena, &mut groups_by_prefix, group_texts);
                for circle in data {
                    push_child(&mut arena, parent, circle_node(circle));
                }
            }
            DrawableElem::Text { group_texts, data } => {
                if data.is_empty() {
                    continue;
                }
                let parent = ensure_groups(&mut arena, &mut groups_by_prefix, group_texts);
                for text in data {
                    push_child(&mut arena, parent, text_node(text));
                }
            }
            DrawableElem::Path { group_texts, data } => {
                if data.is_empty() {
                    continue;
                }
                let parent = ensure_groups(&mut arena, &mut groups_by_prefix, group_texts);
                for path in data {
                    push_child(&mut arena, parent, path_node(path));
                }
            }
        }
    }

    render_node(out, &arena, 0);
}

fn chart_css(diagram_id: &str) -> String {
    format!(
        "#{diagram_id} text{{font-family:\"trebuchet ms\",verdana,arial,sans-serif;}}\
         #{diagram_id} path{{stroke-linecap:round;}}\
         #{diagram_id} .pulse circle{{animation:{diagram_id}-pulse 2s ease-in-out infinite;}}\
         @keyframes {diagram_id}-pulse{{0%,100%{{fill-opacity:0.18;}}50%{{fill-opacity:0.05;}}}}"
    )
}

fn svg_document(
    diagram_id: &str,
    role: &str,
    width: f64,
    height: f64,
    background: &str,
    drawables: &[DrawableElem],
    with_background_rect: bool,
) -> String {
    let diagram_id_esc = escape_xml(diagram_id);
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{diagram_id_esc}" width="100%" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" style="max-width: {w}px; background-color: {bg};" role="graphics-document document" aria-roledescription="{role}">"#,
        w = fmt(width.max(1.0)),
        h = fmt(height.max(1.0)),
        bg = escape_xml(background),
    );
    let _ = write!(&mut out, "<style>{}</style>", chart_css(&diagram_id_esc));
    let bg_rect = with_background_rect.then_some((width, height, background));
    render_drawables(&mut out, drawables, bg_rect);
    out.push_str("</svg>");
    out
}

pub fn render_cluster_svg(layout: &ClusterChartLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("cluster-map");
    svg_document(
        diagram_id,
        "cluster-chart",
        layout.width,
        layout.height,
        &layout.background_color,
        &layout.drawables,
        true,
    )
}

pub fn render_trend_svg(layout: &TrendChartLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("trend");
    svg_document(
        diagram_id,
        "trend-chart",
        layout.width,
        layout.height,
        &layout.background_color,
        &layout.drawables,
        true,
    )
}

pub fn render_share_bar_svg(layout: &ShareBarLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("share-bar");
    svg_document(
        diagram_id,
        "share-bar",
        layout.width,
        layout.height,
        "transparent",
        &layout.drawables,
        false,
    )
}
