use crate::args::Format;
use crate::chart::{Scene, Svg};
use crate::commands::Out;
use crate::slides::{RenderOptions, SlideView};
use crate::source::{self, DataSource};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A rendered slide, either as SVG markup or as the scene it was drawn from.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Svg(String),
    Scene(Scene),
}

impl Display for Rendered {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rendered::Svg(svg) => f.write_str(svg),
            Rendered::Scene(scene) => {
                let json = serde_json::to_string_pretty(scene).map_err(|_| std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Renders slide `number` with the selection `filter`.
///
/// # Errors
/// - The slide number or the filter is invalid for that slide.
/// - The data cannot be loaded.
pub async fn slide(
    config: &Config,
    number: u8,
    filter: Option<&str>,
    format: Format,
) -> Result<Out<Rendered>> {
    let view = SlideView::parse(number, filter)?;
    let source = source::source(&config.source());
    draw(source.as_ref(), &view, format, &config.render_options()).await
}

pub(super) async fn draw(
    source: &dyn DataSource,
    view: &SlideView,
    format: Format,
    options: &RenderOptions,
) -> Result<Out<Rendered>> {
    let data = source::load(source).await?;
    let scene = view.render(&data, options);
    let rendered = match format {
        Format::Svg => Rendered::Svg(Svg(&scene).to_string()),
        Format::Json => Rendered::Scene(scene),
    };
    Ok(Out::new(format!("Rendered {view} as {format}"), rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metric;
    use crate::source::MemorySource;
    use crate::test::SAMPLE_CSV;

    #[tokio::test]
    async fn test_draw_svg() {
        let out = draw(
            &MemorySource::new(SAMPLE_CSV),
            &SlideView::Categories,
            Format::Svg,
            &RenderOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!("Rendered slide 1 as svg", out.message());
        let text = out.structure().unwrap().to_string();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("Market Leader"));
    }

    #[tokio::test]
    async fn test_draw_json() {
        let out = draw(
            &MemorySource::new(SAMPLE_CSV),
            &SlideView::Suppliers(Metric::Retail),
            Format::Json,
            &RenderOptions::default(),
        )
        .await
        .unwrap();
        let text = out.structure().unwrap().to_string();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(800.0, json["width"]);
        assert_eq!(500.0, json["height"]);
        assert!(json["nodes"].is_array());
    }
}
