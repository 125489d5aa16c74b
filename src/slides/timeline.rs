//! Slide 2: monthly sales as a line that draws itself, for every category or one item type.

use super::Layout;
use crate::aggregate::Dataset;
use crate::chart::{monotone_x, Animation, Attr, Circle, LinearScale, Path, Scene, TimeScale};
use crate::model::{Category, Color, Selection, ALL_CATEGORIES};

const LINE_MS: u32 = 2000;
const DOT_MS: u32 = 500;
const DOT_RADIUS: f64 = 4.0;

pub(super) fn render(data: &Dataset, item_type: &Selection<String>) -> Scene {
    let layout = Layout::STANDARD;
    let width = layout.inner_width();
    let height = layout.inner_height();
    let mut scene = layout.scene();

    let points = data.time_series(item_type);
    let color = stroke(item_type);
    let max = points.iter().map(|p| p.value).reduce(f64::max);
    let y = LinearScale::zero_to(max, (height, 0.0));

    match TimeScale::extent(points.iter().map(|p| p.date), (0.0, width)) {
        Some(x) if LinearScale::usable_max(max).is_none() => {
            scene.push(layout.bottom_axis(x.month_ticks(10)));
        }
        Some(x) => {
            let coords = points
                .iter()
                .map(|p| (x.apply(p.date), y.apply(p.value)))
                .collect::<Vec<_>>();
            let path = monotone_x(&coords);
            let length = path.length();
            scene.push(Path {
                class: String::from("line"),
                data: path,
                stroke: color,
                dash: Some(length),
                animations: vec![Animation::new(Attr::StrokeDashoffset, length, 0.0, 0, LINE_MS)],
            });
            for (cx, cy) in coords {
                scene.push(Circle {
                    class: String::from("dot"),
                    cx,
                    cy,
                    r: DOT_RADIUS,
                    fill: color,
                    animations: vec![Animation::new(Attr::R, 0.0, DOT_RADIUS, LINE_MS, DOT_MS)],
                });
            }
            scene.push(layout.bottom_axis(x.month_ticks(10)));
        }
        None => scene.push(layout.bottom_axis(Vec::new())),
    }

    scene.push(layout.left_axis(y.si_ticks(10)));
    scene.push(layout.y_label("Sales ($)"));
    scene.push(layout.x_label("Time Period"));
    scene
}

fn stroke(item_type: &Selection<String>) -> Color {
    match item_type {
        Selection::All => ALL_CATEGORIES,
        Selection::Only(t) => Category::of(t).color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Node, Orient};
    use crate::test::sample_records;

    fn line(scene: &Scene) -> Option<&Path> {
        scene.nodes.iter().find_map(|n| match n {
            Node::Path(p) => Some(p),
            _ => None,
        })
    }

    #[test]
    fn test_all_categories() {
        let scene = render(&Dataset::new(sample_records()), &Selection::All);
        let path = line(&scene).unwrap();
        assert_eq!("#3498db", path.stroke.as_str());
        let dots = scene.circles().collect::<Vec<_>>();
        assert_eq!(3, dots.len());
        // Chronological, spanning the full plot width.
        assert_eq!(0.0, dots[0].cx);
        assert_eq!(680.0, dots[2].cx);
        assert!(dots[0].cx < dots[1].cx);
    }

    #[test]
    fn test_line_reveal_then_dots() {
        let scene = render(&Dataset::new(sample_records()), &Selection::All);
        let path = line(&scene).unwrap();
        let length = path.data.length();
        assert!(length > 0.0);
        assert_eq!(Some(length), path.dash);
        let reveal = path.animations[0];
        assert_eq!(Attr::StrokeDashoffset, reveal.attr);
        assert_eq!(length, reveal.from);
        assert_eq!(0.0, reveal.to);
        assert_eq!(2000, reveal.duration_ms);

        for dot in scene.circles() {
            let grow = dot.animations[0];
            assert_eq!(Attr::R, grow.attr);
            assert_eq!(2000, grow.delay_ms);
            assert_eq!(500, grow.duration_ms);
            assert_eq!(4.0, grow.to);
        }
    }

    #[test]
    fn test_single_category() {
        let data = Dataset::new(sample_records());
        let scene = render(&data, &Selection::Only(String::from("WINE")));
        assert_eq!("#722f37", line(&scene).unwrap().stroke.as_str());
        assert_eq!(3, scene.circles().count());

        let scene = render(&data, &Selection::Only(String::from("BEER")));
        let dots = scene.circles().collect::<Vec<_>>();
        assert_eq!(1, dots.len());
        // A single month sits in the middle and at the top.
        assert_eq!(340.0, dots[0].cx);
        assert_eq!(0.0, dots[0].cy);
    }

    #[test]
    fn test_time_axis_labels() {
        let scene = render(&Dataset::new(sample_records()), &Selection::All);
        let bottom = scene
            .axes()
            .find(|a| a.orient == Orient::Bottom)
            .unwrap();
        let labels = bottom.ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["2019-12", "2020-01", "2020-02"], labels);
    }

    #[test]
    fn test_unknown_category_renders_empty_axes() {
        let data = Dataset::new(sample_records());
        let scene = render(&data, &Selection::Only(String::from("KEGS")));
        assert!(line(&scene).is_none());
        assert_eq!(0, scene.circles().count());
        assert_eq!(2, scene.axes().count());
    }

    #[test]
    fn test_all_zero_sales_have_axes_only() {
        let data = Dataset::new(vec![
            crate::test::record(2020, 1, "A", "WINE", 0.0, 0.0),
            crate::test::record(2020, 2, "B", "BEER", 0.0, 0.0),
        ]);
        let scene = render(&data, &Selection::All);
        assert!(line(&scene).is_none());
        assert_eq!(0, scene.circles().count());
        assert_eq!(2, scene.axes().count());
        let bottom = scene
            .axes()
            .find(|a| a.orient == Orient::Bottom)
            .unwrap();
        assert!(!bottom.ticks.is_empty());
    }
}
