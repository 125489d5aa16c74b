//! Slide 3: retail against warehouse sales per category, side by side, for one year or all.

use super::{extent, Layout};
use crate::aggregate::{ChannelTotals, Dataset};
use crate::chart::{
    Animation, Attr, BandScale, Legend, LegendEntry, LinearScale, Rect, Scene, Tooltip,
};
use crate::model::{Amount, Channel, Selection};

const DURATION_MS: u32 = 1000;
const STAGGER_MS: u32 = 200;
/// Extra delay for the warehouse bar of each pair.
const WAREHOUSE_LAG_MS: u32 = 500;

pub(super) fn render(data: &Dataset, year: &Selection<i32>) -> Scene {
    let layout = Layout::STANDARD;
    let width = layout.inner_width();
    let height = layout.inner_height();
    let mut scene = layout.scene();

    let totals = data.channel_totals(year);
    let x = BandScale::new(
        totals.iter().map(|t| t.item_type.clone()).collect(),
        (0.0, width),
        0.2,
    );
    let max = totals
        .iter()
        .map(|t| t.retail.max(t.warehouse))
        .reduce(f64::max);
    let y = LinearScale::zero_to(max, (height, 0.0));
    let bar_width = x.bandwidth() / 2.0;
    let groups: &[ChannelTotals] = match LinearScale::usable_max(max) {
        Some(_) => &totals,
        None => &[],
    };

    for (ix, group) in groups.iter().enumerate() {
        let delay = STAGGER_MS * ix as u32;
        let bars = [
            (Channel::Retail, group.retail, 0.0, delay),
            (
                Channel::Warehouse,
                group.warehouse,
                bar_width,
                delay + WAREHOUSE_LAG_MS,
            ),
        ];
        for (channel, value, shift, delay) in bars {
            let top = y.apply(extent(value));
            scene.push(Rect {
                class: match channel {
                    Channel::Retail => String::from("bar-retail"),
                    Channel::Warehouse => String::from("bar-warehouse"),
                },
                x: x.at(ix) + shift,
                y: top,
                width: bar_width,
                height: height - top,
                fill: channel.color(),
                animations: vec![
                    Animation::new(Attr::Y, height, top, delay, DURATION_MS),
                    Animation::new(Attr::Height, 0.0, height - top, delay, DURATION_MS),
                ],
                tooltip: Some(
                    Tooltip::new(&group.item_type)
                        .line(channel.label(), Amount::new(value).to_string()),
                ),
            });
        }
    }

    scene.push(layout.bottom_axis(x.ticks()));
    scene.push(layout.left_axis(y.si_ticks(10)));
    scene.push(Legend {
        x: width - 120.0,
        y: 20.0,
        entries: [Channel::Retail, Channel::Warehouse]
            .into_iter()
            .map(|c| LegendEntry {
                color: c.color(),
                label: c.label().to_string(),
            })
            .collect(),
    });
    scene
}
