//! Shared types used by the generate and output stages.

use crate::derive::DrillPage;
use serde::Serialize;

/// Navigation entry: one per curriculum page, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub title: String,
    pub url: String,
}

/// Output filename of a curriculum page: `<title>.html`.
pub fn page_filename(title: &str) -> String {
    format!("{title}.html")
}

/// Build the navigation list shared by every rendered page.
pub fn nav_items(pages: &[DrillPage]) -> Vec<NavItem> {
    pages
        .iter()
        .map(|p| NavItem {
            title: p.title.clone(),
            url: page_filename(&p.title),
        })
        .collect()
}
