//! Export live menu data as fixture JSON.
//!
//! Fixtures go stale when the storefront's menus change deliberately; these
//! helpers re-extract the live entries through the same regions the tests
//! use and write them in the shape the fixtures are committed in. Intended
//! for manual runs against a real driver, but they work with any
//! [`Document`] implementation.

use crate::records::ExpectedLink;
use crate::regions::{HeaderNav, HeaderTop};
use escaparate::{Document, MenuEntry, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

fn write_links(path: &Path, entries: &[MenuEntry]) -> Result<usize> {
    let links: Vec<ExpectedLink> = entries
        .iter()
        .map(|entry| ExpectedLink {
            text: entry.label.clone(),
            href: entry.href.clone().unwrap_or_default(),
        })
        .collect();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &links)?;
    info!(path = %path.display(), count = links.len(), "exported menu entries");
    Ok(links.len())
}

/// Extract the catalog submenu and write it as an ordered link fixture.
///
/// # Errors
///
/// Propagates capability and I/O faults.
pub fn export_nav_submenu<D: Document>(doc: &D, path: impl AsRef<Path>) -> Result<usize> {
    let entries = HeaderNav::new(doc).submenu_entries()?;
    write_links(path.as_ref(), &entries)
}

/// Extract the profile popup menu and write it as an ordered link fixture.
///
/// # Errors
///
/// Propagates capability and I/O faults.
pub fn export_profile_menu<D: Document>(doc: &D, path: impl AsRef<Path>) -> Result<usize> {
    let entries = HeaderTop::new(doc).profile_entries()?;
    write_links(path.as_ref(), &entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use escaparate::mock::{MockDocument, NodeSpec};
    use escaparate::Locator;

    #[test]
    fn test_export_round_trips_through_the_fixture_shape() {
        let doc = MockDocument::new("https://shop.example/");
        let link = Locator::css("ul.navbar__submenu li.navbar__submenu-item a.navbar__submenu-link");
        doc.insert(
            NodeSpec::new(link.clone())
                .text("Горные велосипеды")
                .attribute("href", "https://shop.example/catalog/gornye-velosipedy/"),
        );
        doc.insert(
            NodeSpec::new(link)
                .text("Аксессуары")
                .attribute("href", "https://shop.example/catalog/aksessuary/"),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submenu.json");
        let count = export_nav_submenu(&doc, &path).unwrap();
        assert_eq!(count, 2);

        let exported: Vec<ExpectedLink> =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(exported[0].text, "Горные велосипеды");
        assert!(exported[1].href.ends_with("/catalog/aksessuary/"));
    }
}
