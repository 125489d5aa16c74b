//! Serializes a `Scene` to a standalone SVG document.
//!
//! Animations become SMIL `<animate>` elements that freeze on their final value, and tooltips
//! become `<title>` children, so the output is interactive without any script.

use crate::chart::curve::{PathData, Segment};
use crate::chart::scene::{
    Anchor, Animation, Annotation, Attr, Axis, Circle, Legend, Node, Orient, Path, Rect, Scene,
    Text, Tooltip, LEGEND_ROW, SWATCH,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::{self, Display, Formatter, Write};

/// Length of the tick marks on an axis.
const TICK_SIZE: f64 = 6.0;

/// Displays the wrapped scene as SVG markup.
pub struct Svg<'a>(pub &'a Scene);

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        write!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="10">"#,
            w = num(scene.width),
            h = num(scene.height)
        )?;
        write!(
            f,
            r#"<g transform="translate({},{})">"#,
            num(scene.margin.left),
            num(scene.margin.top)
        )?;
        for node in &scene.nodes {
            write_node(f, node)?;
        }
        f.write_str("</g></svg>")
    }
}

fn write_node(f: &mut impl Write, node: &Node) -> fmt::Result {
    match node {
        Node::Rect(rect) => write_rect(f, rect),
        Node::Path(path) => write_path(f, path),
        Node::Circle(circle) => write_circle(f, circle),
        Node::Text(text) => write_text(f, text),
        Node::Axis(axis) => write_axis(f, axis),
        Node::Legend(legend) => write_legend(f, legend),
        Node::Annotation(annotation) => write_annotation(f, annotation),
    }
}

/// The value an attribute shows before its first animation starts.
fn initial(value: f64, attr: Attr, animations: &[Animation]) -> f64 {
    animations
        .iter()
        .find(|a| a.attr == attr)
        .map(|a| a.from)
        .unwrap_or(value)
}

fn write_rect(f: &mut impl Write, rect: &Rect) -> fmt::Result {
    let anims = &rect.animations;
    write!(
        f,
        r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="{}">"#,
        encode_double_quoted_attribute(&rect.class),
        num(rect.x),
        num(initial(rect.y, Attr::Y, anims)),
        num(initial(rect.width, Attr::Width, anims)),
        num(initial(rect.height, Attr::Height, anims)),
        rect.fill
    )?;
    write_animations(f, anims)?;
    write_tooltip(f, rect.tooltip.as_ref())?;
    f.write_str("</rect>")
}

fn write_path(f: &mut impl Write, path: &Path) -> fmt::Result {
    write!(
        f,
        r#"<path class="{}" d="{}" fill="none" stroke="{}" stroke-width="2""#,
        encode_double_quoted_attribute(&path.class),
        path_data(&path.data),
        path.stroke
    )?;
    if let Some(dash) = path.dash {
        write!(
            f,
            r#" stroke-dasharray="{d} {d}" stroke-dashoffset="{}""#,
            num(initial(0.0, Attr::StrokeDashoffset, &path.animations)),
            d = num(dash)
        )?;
    }
    f.write_char('>')?;
    write_animations(f, &path.animations)?;
    f.write_str("</path>")
}

fn write_circle(f: &mut impl Write, circle: &Circle) -> fmt::Result {
    write!(
        f,
        r#"<circle class="{}" cx="{}" cy="{}" r="{}" fill="{}">"#,
        encode_double_quoted_attribute(&circle.class),
        num(circle.cx),
        num(circle.cy),
        num(initial(circle.r, Attr::R, &circle.animations)),
        circle.fill
    )?;
    write_animations(f, &circle.animations)?;
    f.write_str("</circle>")
}

fn write_text(f: &mut impl Write, text: &Text) -> fmt::Result {
    write!(
        f,
        r#"<text class="{}" x="{}" y="{}" text-anchor="{}""#,
        encode_double_quoted_attribute(&text.class),
        num(text.x),
        num(text.y),
        text.anchor.name()
    )?;
    if let Some(degrees) = text.rotate {
        write!(f, r#" transform="rotate({})""#, num(degrees))?;
    }
    write!(f, ">{}</text>", encode_text(&text.text))
}

fn write_axis(f: &mut impl Write, axis: &Axis) -> fmt::Result {
    let (start, end) = axis.extent;
    match axis.orient {
        Orient::Bottom => {
            write!(
                f,
                r#"<g class="axis" transform="translate(0,{})"><path class="domain" stroke="currentColor" d="M{},0H{}"/>"#,
                num(axis.offset),
                num(start),
                num(end)
            )?;
            for tick in &axis.ticks {
                write!(
                    f,
                    r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="{}"/><text fill="currentColor" y="9" dy="0.71em" text-anchor="middle">{}</text></g>"#,
                    num(tick.position),
                    num(TICK_SIZE),
                    encode_text(&tick.label)
                )?;
            }
        }
        Orient::Left => {
            write!(
                f,
                r#"<g class="axis" transform="translate({},0)"><path class="domain" stroke="currentColor" d="M0,{}V{}"/>"#,
                num(axis.offset),
                num(start),
                num(end)
            )?;
            for tick in &axis.ticks {
                write!(
                    f,
                    r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-{}"/><text fill="currentColor" x="-9" dy="0.32em" text-anchor="end">{}</text></g>"#,
                    num(tick.position),
                    num(TICK_SIZE),
                    encode_text(&tick.label)
                )?;
            }
        }
    }
    f.write_str("</g>")
}

fn write_legend(f: &mut impl Write, legend: &Legend) -> fmt::Result {
    write!(
        f,
        r#"<g class="legend" transform="translate({},{})">"#,
        num(legend.x),
        num(legend.y)
    )?;
    for (ix, entry) in legend.entries.iter().enumerate() {
        let y = ix as f64 * LEGEND_ROW;
        write!(
            f,
            r#"<rect y="{}" width="{s}" height="{s}" fill="{}"/><text x="20" y="{}">{}</text>"#,
            num(y),
            entry.color,
            num(y + 12.0),
            encode_text(&entry.label),
            s = num(SWATCH)
        )?;
    }
    f.write_str("</g>")
}

fn write_annotation(f: &mut impl Write, annotation: &Annotation) -> fmt::Result {
    let nx = annotation.x + annotation.dx;
    let ny = annotation.y + annotation.dy;
    write!(
        f,
        r#"<g class="annotation" opacity="0"><set attributeName="opacity" to="1" begin="{}" fill="freeze"/>"#,
        seconds(annotation.delay_ms)
    )?;
    write!(
        f,
        r#"<line stroke="currentColor" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
        num(annotation.x),
        num(annotation.y),
        num(nx),
        num(ny)
    )?;
    write!(
        f,
        r#"<text class="annotation-title" x="{x}" y="{}" font-weight="bold">{}</text><text class="annotation-label" x="{x}" y="{}">{}</text>"#,
        num(ny - 16.0),
        encode_text(&annotation.title),
        num(ny - 3.0),
        encode_text(&annotation.label),
        x = num(nx)
    )?;
    f.write_str("</g>")
}

fn write_animations(f: &mut impl Write, animations: &[Animation]) -> fmt::Result {
    for a in animations {
        write!(
            f,
            r#"<animate attributeName="{}" from="{}" to="{}" begin="{}" dur="{}" fill="freeze"/>"#,
            a.attr.name(),
            num(a.from),
            num(a.to),
            seconds(a.delay_ms),
            seconds(a.duration_ms)
        )?;
    }
    Ok(())
}

fn write_tooltip(f: &mut impl Write, tooltip: Option<&Tooltip>) -> fmt::Result {
    match tooltip {
        Some(t) => write!(f, "<title>{}</title>", encode_text(&t.text())),
        None => Ok(()),
    }
}

/// The SVG `d` attribute for a path.
pub fn path_data(data: &PathData) -> String {
    let mut d = String::new();
    for segment in data.segments() {
        match *segment {
            Segment::Move { x, y } => d.push_str(&format!("M{},{}", num(x), num(y))),
            Segment::Line { x, y } => d.push_str(&format!("L{},{}", num(x), num(y))),
            Segment::Cubic {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => d.push_str(&format!(
                "C{},{},{},{},{},{}",
                num(x1),
                num(y1),
                num(x2),
                num(y2),
                num(x),
                num(y)
            )),
        }
    }
    d
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        String::from("0")
    } else {
        s.to_string()
    }
}

fn seconds(ms: u32) -> String {
    format!("{}s", num(f64::from(ms) / 1000.0))
}
