use crate::domain::ports::{Document, Element};
use scraper::{ElementRef, Html, Selector};

/// A page parsed with `scraper`. Parsing is lenient and never fails.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Ignoring invalid selector '{}': {}", selector, e);
            None
        }
    }
}

impl Document for HtmlDocument {
    type Element<'a> = HtmlElement<'a>
    where
        Self: 'a;

    fn select_all(&self, selector: &str) -> Vec<HtmlElement<'_>> {
        parse_selector(selector)
            .map(|s| self.html.select(&s).map(HtmlElement).collect())
            .unwrap_or_default()
    }
}

impl<'a> Element for HtmlElement<'a> {
    fn select_all(&self, selector: &str) -> Vec<Self> {
        parse_selector(selector)
            .map(|s| self.0.select(&s).map(HtmlElement).collect())
            .unwrap_or_default()
    }

    fn text(&self, strip: bool) -> String {
        if strip {
            self.0.text().map(str::trim).collect()
        } else {
            self.0.text().collect()
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }
}
