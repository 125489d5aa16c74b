//! A declarative description of a drawn chart.
//!
//! A `Scene` is produced fresh by every render call. Marks carry their final geometry plus the
//! animations that bring them there, and optionally a tooltip shown on hover.

use crate::chart::curve::PathData;
use crate::model::Color;
use serde::Serialize;

/// Space between the outer edge of the chart and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// A chart: outer size, margin and the marks drawn inside the plot area. Node coordinates are
/// relative to the plot area's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Width of the plot area.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plot area.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Circle(c) => Some(c),
            _ => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Axis(a) => Some(a),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Rect(Rect),
    Path(Path),
    Circle(Circle),
    Text(Text),
    Axis(Axis),
    Legend(Legend),
    Annotation(Annotation),
}

/// An attribute that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attr {
    Y,
    Width,
    Height,
    R,
    StrokeDashoffset,
}

impl Attr {
    pub fn name(self) -> &'static str {
        match self {
            Attr::Y => "y",
            Attr::Width => "width",
            Attr::Height => "height",
            Attr::R => "r",
            Attr::StrokeDashoffset => "stroke-dashoffset",
        }
    }
}

/// Moves an attribute from `from` to `to` over `duration_ms`, starting after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Animation {
    pub attr: Attr,
    pub from: f64,
    pub to: f64,
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl Animation {
    pub fn new(attr: Attr, from: f64, to: f64, delay_ms: u32, duration_ms: u32) -> Self {
        Self {
            attr,
            from,
            to,
            delay_ms,
            duration_ms,
        }
    }
}

/// Content shown next to the pointer while hovering a mark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub heading: String,
    pub lines: Vec<TooltipLine>,
    /// Offset from the pointer position.
    pub offset: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLine {
    pub label: String,
    pub value: String,
}

/// Tooltips sit right of and slightly above the pointer.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -10.0);

impl Tooltip {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
            offset: TOOLTIP_OFFSET,
        }
    }

    pub fn line(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push(TooltipLine {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Plain text rendering, one line per entry.
    pub fn text(&self) -> String {
        let mut out = self.heading.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(&line.label);
            out.push_str(": ");
            out.push_str(&line.value);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub class: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub animations: Vec<Animation>,
    pub tooltip: Option<Tooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub class: String,
    pub data: PathData,
    pub stroke: Color,
    /// Dash pattern length, used by the reveal animation.
    pub dash: Option<f64>,
    pub animations: Vec<Animation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub class: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Color,
    pub animations: Vec<Animation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn name(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub class: String,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: Anchor,
    /// Rotation in degrees about the origin of the plot area.
    pub rotate: Option<f64>,
}

impl Text {
    /// An axis title.
    pub fn label(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            class: String::from("axis-label"),
            x,
            y,
            text: text.into(),
            anchor: Anchor::Middle,
            rotate: None,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// An axis line with labelled ticks. A bottom axis runs along `offset` on y, a left axis along
/// `offset` on x.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub orient: Orient,
    pub offset: f64,
    pub extent: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn bottom(offset: f64, extent: (f64, f64), ticks: Vec<Tick>) -> Self {
        Self {
            orient: Orient::Bottom,
            offset,
            extent,
            ticks,
        }
    }

    pub fn left(extent: (f64, f64), ticks: Vec<Tick>) -> Self {
        Self {
            orient: Orient::Left,
            offset: 0.0,
            extent,
            ticks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: Color,
    pub label: String,
}

/// Size of a legend swatch and the vertical distance between entries.
pub const SWATCH: f64 = 15.0;
pub const LEGEND_ROW: f64 = 25.0;

/// A callout pointing at (x, y) with its note placed at (x + dx, y + dy), shown after `delay_ms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub title: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub delay_ms: u32,
}

macro_rules! impl_into_node {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Node {
                fn from(value: $variant) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_into_node!(Rect, Path, Circle, Text, Axis, Legend, Annotation);
