//! The four slides of the presentation.
//!
//! Each slide is a pure function of the dataset and the slide's current selection, returning a
//! fresh `Scene` on every call.

mod categories;
mod channels;
mod suppliers;
mod timeline;

use crate::aggregate::Dataset;
use crate::chart::{Axis, Margin, Scene, Text, Tick};
use crate::model::{Metric, Selection};
use crate::Result;
use anyhow::{bail, Context};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub use suppliers::truncate_label;

/// The number of slides in the presentation.
pub const SLIDE_COUNT: u8 = 4;

/// Outer size and margin of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Layout {
    /// Used by the category, timeline and channel slides.
    pub const STANDARD: Layout = Layout {
        width: 800.0,
        height: 400.0,
        margin: Margin {
            top: 40.0,
            right: 40.0,
            bottom: 80.0,
            left: 80.0,
        },
    };

    /// Used by the supplier slide, with room for long labels on the left.
    pub const TALL: Layout = Layout {
        width: 800.0,
        height: 500.0,
        margin: Margin {
            top: 40.0,
            right: 40.0,
            bottom: 120.0,
            left: 200.0,
        },
    };

    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn scene(&self) -> Scene {
        Scene::new(self.width, self.height, self.margin)
    }

    /// A rotated title centered beside the left axis.
    fn y_label(&self, text: &str) -> Text {
        Text::label(-self.inner_height() / 2.0, -self.margin.left + 20.0, text).rotated(-90.0)
    }

    /// A title centered under the bottom axis.
    fn x_label(&self, text: &str) -> Text {
        Text::label(
            self.inner_width() / 2.0,
            self.inner_height() + self.margin.bottom - 20.0,
            text,
        )
    }

    fn bottom_axis(&self, ticks: Vec<Tick>) -> Axis {
        Axis::bottom(self.inner_height(), (0.0, self.inner_width()), ticks)
    }

    fn left_axis(&self, ticks: Vec<Tick>) -> Axis {
        Axis::left((self.inner_height(), 0.0), ticks)
    }
}

/// Settings that shape the rendered slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    /// How many suppliers the supplier slide ranks.
    pub top_suppliers: usize,
    /// Supplier names longer than this many characters are shortened on the axis.
    pub label_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top_suppliers: 10,
            label_width: 30,
        }
    }
}

/// A slide together with its current selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlideView {
    /// Total sales per category.
    Categories,
    /// Monthly sales for every category or one item type.
    Timeline(Selection<String>),
    /// Retail against warehouse sales per category, for every year or one year.
    Channels(Selection<i32>),
    /// The top suppliers ranked by a metric.
    Suppliers(Metric),
}

impl SlideView {
    /// Resolves a slide number and an optional selection string, as given on the command line.
    ///
    /// # Errors
    /// - The slide number is outside `1..=4`.
    /// - The selection cannot be parsed for that slide, or slide 1 was given one.
    pub fn parse(number: u8, selection: Option<&str>) -> Result<Self> {
        let view = match number {
            1 => {
                if let Some(s) = selection {
                    bail!("Slide 1 does not take a selection, got '{s}'");
                }
                SlideView::Categories
            }
            2 => SlideView::Timeline(match selection {
                Some(s) => s.parse().context("Invalid item type selection")?,
                None => Selection::All,
            }),
            3 => SlideView::Channels(match selection {
                Some(s) => s
                    .parse()
                    .with_context(|| format!("Invalid year selection '{s}'"))?,
                None => Selection::All,
            }),
            4 => SlideView::Suppliers(match selection {
                Some(s) => s
                    .parse()
                    .with_context(|| format!("Invalid metric '{s}', expected retail, warehouse or total"))?,
                None => Metric::default(),
            }),
            n => bail!("There is no slide {n}, slides are numbered 1 to {SLIDE_COUNT}"),
        };
        Ok(view)
    }

    /// The default view of slide `number`.
    pub fn default_for(number: u8) -> Option<Self> {
        Self::parse(number, None).ok()
    }

    /// Every selectable view of slide `number`, default first.
    pub fn options(number: u8, data: &Dataset) -> Vec<SlideView> {
        match number {
            1 => vec![SlideView::Categories],
            2 => std::iter::once(Selection::All)
                .chain(
                    data.item_types()
                        .into_iter()
                        .map(|t| Selection::Only(t.to_string())),
                )
                .map(SlideView::Timeline)
                .collect(),
            3 => std::iter::once(Selection::All)
                .chain(data.years().into_iter().map(Selection::Only))
                .map(SlideView::Channels)
                .collect(),
            4 => [Metric::Total, Metric::Retail, Metric::Warehouse]
                .into_iter()
                .map(SlideView::Suppliers)
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            SlideView::Categories => 1,
            SlideView::Timeline(_) => 2,
            SlideView::Channels(_) => 3,
            SlideView::Suppliers(_) => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SlideView::Categories => "Sales by Product Category",
            SlideView::Timeline(_) => "Sales Over Time",
            SlideView::Channels(_) => "Retail vs Warehouse Sales",
            SlideView::Suppliers(_) => "Top Suppliers",
        }
    }

    /// The name of the selection control, if the slide has one.
    pub fn selection_name(&self) -> Option<&'static str> {
        match self {
            SlideView::Categories => None,
            SlideView::Timeline(_) => Some("Category"),
            SlideView::Channels(_) => Some("Year"),
            SlideView::Suppliers(_) => Some("Metric"),
        }
    }

    /// The current selection as text, if the slide has one.
    pub fn selection(&self) -> Option<String> {
        match self {
            SlideView::Categories => None,
            SlideView::Timeline(s) => Some(s.to_string()),
            SlideView::Channels(s) => Some(s.to_string()),
            SlideView::Suppliers(m) => Some(m.to_string()),
        }
    }

    pub fn is_default(&self) -> bool {
        match self {
            SlideView::Categories => true,
            SlideView::Timeline(s) => s.is_all(),
            SlideView::Channels(s) => s.is_all(),
            SlideView::Suppliers(m) => *m == Metric::default(),
        }
    }

    /// Draws the slide.
    pub fn render(&self, data: &Dataset, options: &RenderOptions) -> Scene {
        match self {
            SlideView::Categories => categories::render(data),
            SlideView::Timeline(item_type) => timeline::render(data, item_type),
            SlideView::Channels(year) => channels::render(data, year),
            SlideView::Suppliers(metric) => suppliers::render(data, *metric, options),
        }
    }
}

impl Display for SlideView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.selection() {
            Some(selection) => write!(f, "slide {} ({selection})", self.number()),
            None => write!(f, "slide {}", self.number()),
        }
    }
}

/// Clamps a bar extent so that negative sums draw as empty bars.
fn extent(value: f64) -> f64 {
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_records;

    #[test]
    fn test_layouts() {
        assert_eq!(680.0, Layout::STANDARD.inner_width());
        assert_eq!(280.0, Layout::STANDARD.inner_height());
        assert_eq!(560.0, Layout::TALL.inner_width());
        assert_eq!(340.0, Layout::TALL.inner_height());
    }

    #[test]
    fn test_parse() {
        assert_eq!(SlideView::Categories, SlideView::parse(1, None).unwrap());
        assert!(SlideView::parse(1, Some("all")).is_err());
        assert_eq!(
            SlideView::Timeline(Selection::Only(String::from("WINE"))),
            SlideView::parse(2, Some("WINE")).unwrap()
        );
        assert_eq!(
            SlideView::Channels(Selection::Only(2019)),
            SlideView::parse(3, Some("2019")).unwrap()
        );
        assert_eq!(
            SlideView::Channels(Selection::All),
            SlideView::parse(3, None).unwrap()
        );
        assert!(SlideView::parse(3, Some("last year")).is_err());
        assert_eq!(
            SlideView::Suppliers(Metric::Warehouse),
            SlideView::parse(4, Some("warehouse")).unwrap()
        );
        assert_eq!(
            SlideView::Suppliers(Metric::Total),
            SlideView::parse(4, None).unwrap()
        );
        assert!(SlideView::parse(4, Some("profit")).is_err());
        assert!(SlideView::parse(0, None).is_err());
        assert!(SlideView::parse(5, None).is_err());
    }

    #[test]
    fn test_options() {
        let data = Dataset::new(sample_records());
        let timeline = SlideView::options(2, &data);
        assert_eq!(4, timeline.len());
        assert!(timeline[0].is_default());
        assert_eq!(Some(String::from("BEER")), timeline[2].selection());

        let channels = SlideView::options(3, &data);
        assert_eq!(
            vec!["all", "2019", "2020"],
            channels
                .iter()
                .filter_map(|v| v.selection())
                .collect::<Vec<_>>()
        );

        let suppliers = SlideView::options(4, &data);
        assert_eq!(3, suppliers.len());
        assert!(suppliers[0].is_default());
        assert!(SlideView::options(9, &data).is_empty());
    }

    #[test]
    fn test_numbers_and_display() {
        for n in 1..=SLIDE_COUNT {
            let view = SlideView::default_for(n).unwrap();
            assert_eq!(n, view.number());
        }
        assert_eq!("slide 1", SlideView::Categories.to_string());
        assert_eq!(
            "slide 4 (retail)",
            SlideView::Suppliers(Metric::Retail).to_string()
        );
    }
}
