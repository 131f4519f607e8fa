//! Record types for the committed expected-data files.

use escaparate::MenuEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Flat label → href-suffix map, the shape of the header-menu fixtures
pub type ExpectedMenu = BTreeMap<String, String>;

/// One entry of an ordered link fixture (submenu, exported menus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedLink {
    /// Visible label
    pub text: String,
    /// Link target or suffix
    pub href: String,
}

impl ExpectedLink {
    /// View as a comparator entry
    #[must_use]
    pub fn to_menu_entry(&self) -> MenuEntry {
        MenuEntry::linked(self.text.clone(), self.href.clone())
    }
}

/// One profile-menu destination and what its page must look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMenuEntry {
    /// Menu item label
    pub text: String,
    /// Path the item links to
    pub href: String,
    /// Expected breadcrumb trail on the target page
    pub breadcrumbs: Vec<String>,
    /// Expected page title
    pub title: String,
    /// Expected alert text, when the page shows one
    pub alert: Option<String>,
    /// Short identifier used in test ids and page dispatch
    pub source: String,
    /// Whether the destination requires an authorized session
    pub need_auth: bool,
}

/// One search scenario from the search fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCase {
    /// Human-readable scenario name
    pub description: String,
    /// Query typed into the search field
    pub query: String,
    /// Whether the query should yield results
    #[serde(default)]
    pub expect_results: bool,
    /// Minimum number of result blocks when results are expected
    #[serde(default)]
    pub min_results: usize,
    /// Whether submitting should navigate away from the base URL
    #[serde(default = "default_true")]
    pub expect_navigation: bool,
}

const fn default_true() -> bool {
    true
}

/// Absolute path of a committed expected-data file
#[must_use]
pub fn testdata_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}
