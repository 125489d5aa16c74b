//! Slide 4: the top suppliers by a chosen metric as horizontal bars.

use super::{extent, Layout, RenderOptions};
use crate::aggregate::Dataset;
use crate::chart::{Animation, Attr, Axis, BandScale, LinearScale, Rect, Scene, Tooltip};
use crate::model::{Amount, Category, Metric, SupplierSummary};

const DURATION_MS: u32 = 1000;
const STAGGER_MS: u32 = 100;

pub(super) fn render(data: &Dataset, metric: Metric, options: &RenderOptions) -> Scene {
    let layout = Layout::TALL;
    let width = layout.inner_width();
    let height = layout.inner_height();
    let mut scene = layout.scene();

    let top = data.top_suppliers(metric, options.top_suppliers);
    let max = top.iter().map(|s| s.summary().metric(metric)).reduce(f64::max);
    let x = LinearScale::zero_to(max, (0.0, width));
    let y = BandScale::new(
        top.iter()
            .map(|s| truncate_label(s.supplier(), options.label_width))
            .collect(),
        (0.0, height),
        0.1,
    );

    let ranked: &[&SupplierSummary] = match LinearScale::usable_max(max) {
        Some(_) => &top,
        None => &[],
    };
    for (ix, supplier) in ranked.iter().enumerate() {
        let summary = supplier.summary();
        let bar = x.apply(extent(summary.metric(metric)));
        scene.push(Rect {
            class: String::from("bar"),
            x: 0.0,
            y: y.at(ix),
            width: bar,
            height: y.bandwidth(),
            fill: Category::of(supplier.item_type()).color(),
            animations: vec![Animation::new(
                Attr::Width,
                0.0,
                bar,
                STAGGER_MS * ix as u32,
                DURATION_MS,
            )],
            tooltip: Some(
                Tooltip::new(supplier.supplier())
                    .line("Category", supplier.item_type())
                    .line("Retail", Amount::new(summary.retail_sales()).to_string())
                    .line("Warehouse", Amount::new(summary.warehouse_sales()).to_string())
                    .line("Total", Amount::new(summary.total_sales()).to_string()),
            ),
        });
    }

    scene.push(layout.bottom_axis(x.si_ticks(10)));
    scene.push(Axis::left((0.0, height), y.ticks()));
    scene
}

/// Shortens `name` to `max` characters followed by an ellipsis when it is longer than `max`.
pub fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let mut short = name.chars().take(max).collect::<String>();
        short.push_str("...");
        short
    } else {
        name.to_string()
    }
}
