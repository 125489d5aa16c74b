//! Slide 1: total sales per category as an animated bar chart with a callout on the leader.

use super::{extent, Layout};
use crate::aggregate::Dataset;
use crate::chart::{Animation, Annotation, Attr, BandScale, LinearScale, Rect, Scene, Tooltip};
use crate::model::{Amount, Category, CategorySummary};

const DURATION_MS: u32 = 1000;
const STAGGER_MS: u32 = 200;
const CALLOUT_DELAY_MS: u32 = 1500;

pub(super) fn render(data: &Dataset) -> Scene {
    let layout = Layout::STANDARD;
    let width = layout.inner_width();
    let height = layout.inner_height();
    let mut scene = layout.scene();

    let ranked = data.categories_by_total();
    let x = BandScale::new(
        ranked.iter().map(|c| c.item_type().to_string()).collect(),
        (0.0, width),
        0.2,
    );
    let max = ranked.first().map(|c| c.summary().total_sales());
    let y = LinearScale::zero_to(max, (height, 0.0));
    let leader = LinearScale::usable_max(max).and(ranked.first());
    let bars: &[&CategorySummary] = match leader {
        Some(_) => &ranked,
        None => &[],
    };

    for (ix, category) in bars.iter().enumerate() {
        let summary = category.summary();
        let top = y.apply(extent(summary.total_sales()));
        let delay = STAGGER_MS * ix as u32;
        scene.push(Rect {
            class: String::from("bar"),
            x: x.at(ix),
            y: top,
            width: x.bandwidth(),
            height: height - top,
            fill: Category::of(category.item_type()).color(),
            animations: vec![
                Animation::new(Attr::Y, height, top, delay, DURATION_MS),
                Animation::new(Attr::Height, 0.0, height - top, delay, DURATION_MS),
            ],
            tooltip: Some(
                Tooltip::new(category.item_type())
                    .line("Total", Amount::new(summary.total_sales()).to_string())
                    .line("Retail", Amount::new(summary.retail_sales()).to_string())
                    .line("Warehouse", Amount::new(summary.warehouse_sales()).to_string()),
            ),
        });
    }

    scene.push(layout.bottom_axis(x.ticks()));
    scene.push(layout.left_axis(y.si_ticks(10)));
    scene.push(layout.y_label("Total Sales ($)"));
    scene.push(layout.x_label("Product Category"));

    if let Some(leader) = leader {
        let total = leader.summary().total_sales();
        scene.push(Annotation {
            title: String::from("Market Leader"),
            label: format!("{} leads with ${}", leader.item_type(), Amount::new(total).si()),
            x: x.at(0) + x.bandwidth() / 2.0,
            y: y.apply(extent(total)),
            dx: 50.0,
            dy: -50.0,
            delay_ms: CALLOUT_DELAY_MS,
        });
    }
    scene
}
