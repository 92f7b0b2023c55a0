// HTML document wrapper used by the webpage reader
// Author: kelexine (https://github.com/kelexine)

use crate::error::{CacheError, Result};
use scraper::{Html, Selector};

/// Elements stripped by the default remover.
const DEFAULT_REMOVED: &str = "script, style";

/// A parsed HTML page.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Drop `script` and `style` elements.
    pub fn remove_default_elements(&mut self) {
        // Constant selector, cannot fail to parse
        if let Ok(selector) = Selector::parse(DEFAULT_REMOVED) {
            self.remove_matching(&selector);
        }
    }

    /// Drop every element matching a CSS selector.
    pub fn remove(&mut self, selector: &str) -> Result<()> {
        let selector =
            Selector::parse(selector).map_err(|e| CacheError::Html(format!("{}: {}", selector, e)))?;
        self.remove_matching(&selector);
        Ok(())
    }

    fn remove_matching(&mut self, selector: &Selector) {
        let ids: Vec<_> = self.html.select(selector).map(|element| element.id()).collect();
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    /// Page title, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|title| collapse_whitespace(&title.text().collect::<String>()))
    }

    /// Visible text of the document with whitespace runs collapsed.
    pub fn text(&self) -> String {
        let raw: Vec<&str> = self.html.root_element().text().collect();
        collapse_whitespace(&raw.join(" "))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
