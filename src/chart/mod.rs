//! Chart building blocks: scales, curves, the scene description and its SVG serialization.
mod curve;
mod scale;
mod scene;
mod svg;

pub use curve::{monotone_x, PathData, Segment};
pub use scale::{BandScale, LinearScale, TimeScale};
pub use scene::{
    Anchor, Animation, Annotation, Attr, Axis, Circle, Legend, LegendEntry, Margin, Node, Orient,
    Path, Rect, Scene, Text, Tick, Tooltip, TooltipLine, LEGEND_ROW, SWATCH, TOOLTIP_OFFSET,
};
pub use svg::{path_data, Svg};
