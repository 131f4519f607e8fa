//! Shared page-level behavior.
//!
//! Pages are composition roots: they *hold* regions rather than inheriting
//! shared behavior from a base class. What little genuinely page-wide state
//! exists (the document handle, the URL the page was opened with, and the
//! default wait policy) lives in this small utility value that every page
//! embeds.

use crate::conditions::url_changed_from;
use crate::driver::Document;
use crate::result::Result;
use crate::wait::{wait_for, WaitPolicy};
use tracing::info;

/// Document handle, base URL and wait policy for one navigable page
#[derive(Debug)]
pub struct PageHandle<'d, D: Document> {
    doc: &'d D,
    base_url: String,
    policy: WaitPolicy,
}

impl<'d, D: Document> PageHandle<'d, D> {
    /// Bind a page to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D, base_url: impl Into<String>) -> Self {
        Self {
            doc,
            base_url: base_url.into(),
            policy: WaitPolicy::default(),
        }
    }

    /// Override the page's default wait policy
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The wrapped document
    #[must_use]
    pub const fn document(&self) -> &'d D {
        self.doc
    }

    /// The URL this page opens with
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The page's default wait policy
    #[must_use]
    pub const fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// Navigate to the page's base URL.
    ///
    /// # Errors
    ///
    /// Propagates navigation faults from the capability.
    pub fn open(&self) -> Result<()> {
        info!(url = %self.base_url, "opening page");
        self.doc.navigate(&self.base_url)
    }

    /// Navigate to a path, absolute URLs passing through untouched.
    ///
    /// # Errors
    ///
    /// Propagates navigation faults from the capability.
    pub fn goto(&self, path: &str) -> Result<()> {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };
        info!(%url, "navigating");
        self.doc.navigate(&url)
    }

    /// The document's URL right now.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn current_url(&self) -> Result<String> {
        self.doc.current_url()
    }

    /// The document title right now.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn title(&self) -> Result<String> {
        self.doc.title()
    }

    /// Whether navigation away from the base URL happens within policy.
    ///
    /// `Ok(false)` on timeout: "still on the base URL" is an expected
    /// answer, asserted by the empty-search scenarios.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn url_changed_from_base(&self) -> Result<bool> {
        let outcome = wait_for(
            self.doc,
            &url_changed_from(self.base_url.clone()),
            self.policy,
        )?;
        Ok(outcome.is_success())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::MockDocument;
    use std::time::Duration;

    fn handle(doc: &MockDocument) -> PageHandle<'_, MockDocument> {
        PageHandle::new(doc, "https://shop.example/").with_policy(WaitPolicy::new(
            Duration::from_millis(60),
            Duration::from_millis(10),
        ))
    }

    #[test]
    fn test_open_navigates_to_base() {
        let doc = MockDocument::new("about:blank");
        handle(&doc).open().unwrap();
        assert_eq!(doc.current_url().unwrap(), "https://shop.example/");
    }

    #[test]
    fn test_goto_joins_relative_paths() {
        let doc = MockDocument::new("about:blank");
        handle(&doc).goto("/personal/").unwrap();
        assert_eq!(
            doc.current_url().unwrap(),
            "https://shop.example/personal/"
        );
    }

    #[test]
    fn test_goto_passes_absolute_urls_through() {
        let doc = MockDocument::new("about:blank");
        handle(&doc).goto("https://other.example/faq/").unwrap();
        assert_eq!(doc.current_url().unwrap(), "https://other.example/faq/");
    }

    #[test]
    fn test_url_change_detection() {
        let doc = MockDocument::new("https://shop.example/");
        let page = handle(&doc);
        assert!(!page.url_changed_from_base().unwrap());

        doc.set_url("https://shop.example/search/?q=bike");
        assert!(page.url_changed_from_base().unwrap());
    }
}
