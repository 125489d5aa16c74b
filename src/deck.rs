//! Lays the slides out as a set of linked HTML pages.
//!
//! Every (slide, selection) pair gets its own page. The navigation bar links to the default page
//! of the neighboring slides and the selection list links to the sibling pages of the same slide,
//! so moving through the deck needs nothing but plain links.

use crate::aggregate::Dataset;
use crate::chart::Svg;
use crate::nav::{Navigation, Transition};
use crate::slides::{RenderOptions, SlideView, SLIDE_COUNT};
use crate::utils;
use html_escape::{encode_double_quoted_attribute, encode_text};
use crate::Result;
use std::collections::HashSet;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The page shown first.
pub const INDEX_HTML: &str = "index.html";

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;background:#f5f6f7;color:#2c3e50}\
header{padding:16px 32px;background:#2c3e50;color:#fff}\
header h1{margin:0;font-size:20px}\
main{max-width:880px;margin:24px auto;padding:24px;background:#fff;border-radius:6px}\
main h2{margin-top:0}\
.nav{display:flex;align-items:center;justify-content:center;gap:16px;margin:16px 0}\
.nav-button{padding:6px 14px;border-radius:4px;background:#3498db;color:#fff;text-decoration:none}\
.nav-button.disabled{background:#bdc3c7;cursor:default}\
.selection ul{display:inline;list-style:none;padding:0}\
.selection li{display:inline;margin-right:8px}\
.selection a.active{font-weight:bold;text-decoration:none;color:#2c3e50}\
.axis-label{font-size:12px}\
.annotation-title{font-size:12px}";

/// One HTML page of the deck.
#[derive(Debug, Clone)]
pub struct Page {
    file_name: String,
    view: SlideView,
    html: String,
}

impl Page {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn view(&self) -> &SlideView {
        &self.view
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

/// The whole presentation over one dataset.
#[derive(Debug)]
pub struct Deck<'a> {
    data: &'a Dataset,
    title: String,
    options: RenderOptions,
}

impl<'a> Deck<'a> {
    pub fn new(data: &'a Dataset, title: impl Into<String>, options: RenderOptions) -> Self {
        Self {
            data,
            title: title.into(),
            options,
        }
    }

    /// Renders every page, slide by slide, default selection first.
    pub fn pages(&self) -> Vec<Page> {
        let slides = (1..=SLIDE_COUNT)
            .map(|n| named_views(SlideView::options(n, self.data)))
            .collect::<Vec<_>>();

        let mut pages = Vec::new();
        for (ix, views) in slides.iter().enumerate() {
            let number = ix as u8 + 1;
            let Some(nav) = Navigation::at(number, SLIDE_COUNT) else {
                continue;
            };
            let previous = neighbor(&slides, nav, Navigation::retreat);
            let next = neighbor(&slides, nav, Navigation::advance);
            for (view, file_name) in views {
                let html = self.page(nav, previous, next, views, view);
                pages.push(Page {
                    file_name: file_name.clone(),
                    view: view.clone(),
                    html,
                });
            }
        }
        pages
    }

    /// Writes every page plus `index.html` to `dir`, returning the written paths.
    ///
    /// # Errors
    /// - The directory cannot be created or a file cannot be written.
    pub async fn write(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        utils::make_dir(dir).await?;
        let pages = self.pages();
        let mut written = Vec::with_capacity(pages.len() + 1);
        for page in &pages {
            let path = dir.join(&page.file_name);
            utils::write(&path, &page.html).await?;
            info!("Wrote {} to {}", page.view, path.display());
            written.push(path);
        }
        if let Some(first) = pages.first() {
            let path = dir.join(INDEX_HTML);
            utils::write(&path, &first.html).await?;
            info!("Wrote the index page to {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn page(
        &self,
        nav: Navigation,
        previous: Option<&str>,
        next: Option<&str>,
        siblings: &[(SlideView, String)],
        view: &SlideView,
    ) -> String {
        debug!("Rendering {view}");
        let scene = view.render(self.data, &self.options);
        let mut html = String::new();
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title} | {slide}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
             <header><h1>{title}</h1></header>\n<main>\n<h2>{slide}</h2>\n",
            title = encode_text(&self.title),
            slide = encode_text(view.title()),
        );
        write_selection(&mut html, view, siblings);
        let _ = writeln!(html, "<div class=\"chart\">{}</div>", Svg(&scene));
        write_nav(&mut html, nav, previous, next);
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }
}

/// Assigns a unique file name to each view. The default view of slide n is `slide-n.html`.
fn named_views(views: Vec<SlideView>) -> Vec<(SlideView, String)> {
    let mut taken = HashSet::new();
    views
        .into_iter()
        .map(|view| {
            let stem = match view.selection() {
                Some(selection) if !view.is_default() => {
                    format!("slide-{}-{}", view.number(), slug(&selection))
                }
                _ => format!("slide-{}", view.number()),
            };
            let mut name = format!("{stem}.html");
            let mut suffix = 2;
            while !taken.insert(name.clone()) {
                name = format!("{stem}-{suffix}.html");
                suffix += 1;
            }
            (view, name)
        })
        .collect()
}

/// Lowercase ASCII letters and digits, with every other run of characters collapsed to `-`.
fn slug(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("option");
    }
    slug
}

/// The default page of the slide reached by stepping `nav` with `step`.
fn neighbor<'s>(
    slides: &'s [Vec<(SlideView, String)>],
    mut nav: Navigation,
    step: fn(&mut Navigation) -> Option<Transition>,
) -> Option<&'s str> {
    let transition = step(&mut nav)?;
    slides
        .get(usize::from(transition.to) - 1)?
        .first()
        .map(|(_, name)| name.as_str())
}

fn write_selection(html: &mut String, view: &SlideView, siblings: &[(SlideView, String)]) {
    let Some(name) = view.selection_name() else {
        return;
    };
    let _ = write!(
        html,
        "<nav class=\"selection\"><span>{}:</span> <ul>",
        encode_text(name)
    );
    for (sibling, file_name) in siblings {
        let label = sibling.selection().unwrap_or_default();
        let class = if sibling == view { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<li><a{class} href=\"{}\">{}</a></li>",
            encode_double_quoted_attribute(file_name),
            encode_text(&label)
        );
    }
    html.push_str("</ul></nav>\n");
}

fn write_nav(html: &mut String, nav: Navigation, previous: Option<&str>, next: Option<&str>) {
    let controls = nav.controls();
    html.push_str("<nav class=\"nav\">");
    write_nav_button(html, "Previous", controls.previous, previous);
    let _ = write!(
        html,
        "<span class=\"counter\">{}</span>",
        encode_text(&nav.counter())
    );
    write_nav_button(html, "Next", controls.next, next);
    html.push_str("</nav>\n");
}

fn write_nav_button(html: &mut String, label: &str, enabled: bool, target: Option<&str>) {
    match target {
        Some(href) if enabled => {
            let _ = write!(
                html,
                "<a class=\"nav-button\" href=\"{}\">{label}</a>",
                encode_double_quoted_attribute(href)
            );
        }
        _ => {
            let _ = write!(
                html,
                "<span class=\"nav-button disabled\" aria-disabled=\"true\">{label}</span>"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_records;
    use tempfile::TempDir;

    fn deck(data: &Dataset) -> Deck<'_> {
        Deck::new(data, "Sales", RenderOptions::default())
    }

    #[test]
    fn test_page_names() {
        let data = Dataset::new(sample_records());
        let names = deck(&data)
            .pages()
            .iter()
            .map(|p| p.file_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                "slide-1.html",
                "slide-2.html",
                "slide-2-wine.html",
                "slide-2-beer.html",
                "slide-2-liquor.html",
                "slide-3.html",
                "slide-3-2019.html",
                "slide-3-2020.html",
                "slide-4.html",
                "slide-4-retail.html",
                "slide-4-warehouse.html",
            ],
            names
        );
    }

    #[test]
    fn test_navigation_bounds() {
        let data = Dataset::new(sample_records());
        let pages = deck(&data).pages();

        let first = &pages[0].html;
        assert!(first.contains(r#"<span class="nav-button disabled" aria-disabled="true">Previous</span>"#));
        assert!(first.contains(r#"<a class="nav-button" href="slide-2.html">Next</a>"#));
        assert!(first.contains("1 of 4"));
        assert!(!first.contains("class=\"selection\""));

        let last = &pages[pages.len() - 1].html;
        assert!(last.contains(r#"<a class="nav-button" href="slide-3.html">Previous</a>"#));
        assert!(last.contains(r#"<span class="nav-button disabled" aria-disabled="true">Next</span>"#));
        assert!(last.contains("4 of 4"));
    }

    #[test]
    fn test_selection_marks_active() {
        let data = Dataset::new(sample_records());
        let pages = deck(&data).pages();
        let beer = pages
            .iter()
            .find(|p| p.file_name() == "slide-2-beer.html")
            .unwrap();
        assert!(beer
            .html()
            .contains(r#"<li><a class="active" href="slide-2-beer.html">BEER</a></li>"#));
        assert!(beer
            .html()
            .contains(r#"<li><a href="slide-2.html">all</a></li>"#));
        assert!(beer.html().contains("<svg"));
        assert!(beer.html().contains("2 of 4"));
    }

    #[test]
    fn test_slug() {
        assert_eq!("wine", slug("WINE"));
        assert_eq!("str-supplies", slug("STR_SUPPLIES"));
        assert_eq!("non-alcohol", slug(" NON-ALCOHOL "));
        assert_eq!("option", slug("***"));
    }

    #[test]
    fn test_duplicate_slugs_are_numbered() {
        let views = vec![
            SlideView::Timeline(crate::model::Selection::All),
            SlideView::Timeline(crate::model::Selection::Only(String::from("A B"))),
            SlideView::Timeline(crate::model::Selection::Only(String::from("A-B"))),
        ];
        let names = named_views(views)
            .into_iter()
            .map(|(_, n)| n)
            .collect::<Vec<_>>();
        assert_eq!(
            vec!["slide-2.html", "slide-2-a-b.html", "slide-2-a-b-2.html"],
            names
        );
    }

    #[tokio::test]
    async fn test_write() {
        let data = Dataset::new(sample_records());
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("deck");
        let written = deck(&data).write(&out).await.unwrap();
        assert_eq!(12, written.len());
        let index = utils::read(&out.join(INDEX_HTML)).await.unwrap();
        let first = utils::read(&out.join("slide-1.html")).await.unwrap();
        assert_eq!(first, index);
    }

    #[test]
    fn test_empty_data_still_has_every_slide() {
        let data = Dataset::new(Vec::new());
        let pages = deck(&data).pages();
        assert_eq!(6, pages.len());
        assert!(pages.iter().all(|p| p.html().contains("<svg")));
    }

    #[test]
    fn test_title_is_escaped() {
        let data = Dataset::new(sample_records());
        let pages = Deck::new(&data, "Sales & <Co>", RenderOptions::default()).pages();
        assert!(pages[0].html().contains("<h1>Sales &amp; &lt;Co&gt;</h1>"));
    }
}
