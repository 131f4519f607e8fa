//! Remote-document capability boundary.
//!
//! Everything the engine knows about a live browser page goes through these
//! two traits. The concrete driver (WebDriver, CDP, an in-memory double) is
//! an external collaborator; the engine never depends on a specific driver's
//! API surface.
//!
//! Node handles are only trustworthy for the duration of one probe. The page
//! under test re-renders on its own schedule, so a handle may go stale at any
//! moment; node operations surface that as [`Error::StaleNode`], which the
//! poll loop, and only the poll loop, absorbs as "not yet".
//!
//! [`Error::StaleNode`]: crate::Error::StaleNode

use crate::locator::Locator;
use crate::result::Result;

/// Capability handle for one live, asynchronously-mutating document.
pub trait Document {
    /// Node handle type produced by queries
    type Node: Node;

    /// Find the first node matching the locator, if any.
    ///
    /// Zero matches is `Ok(None)`, not an error: absence is an ordinary
    /// answer that the poller turns into "ask again".
    fn find_one(&self, locator: &Locator) -> Result<Option<Self::Node>>;

    /// Find every node currently matching the locator
    fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Node>>;

    /// The document's current URL
    fn current_url(&self) -> Result<String>;

    /// Navigate the document to a URL
    fn navigate(&self, url: &str) -> Result<()>;

    /// The document title
    fn title(&self) -> Result<String>;

    /// PNG capture of the whole viewport
    fn screenshot(&self) -> Result<Vec<u8>>;
}

/// Operations on one located node.
///
/// Read operations answer about the node as it is right now; mutations
/// (click, clear, type) are raw commands whose observable effect the caller
/// is responsible for confirming.
pub trait Node {
    /// Whether the node is rendered and visible
    fn is_visible(&self) -> Result<bool>;

    /// Whether the node is enabled for interaction
    fn is_enabled(&self) -> Result<bool>;

    /// Whether the node (checkbox, option) is currently selected
    fn is_selected(&self) -> Result<bool>;

    /// The node's visible text, trimmed
    fn text(&self) -> Result<String>;

    /// An attribute value, if the attribute is present
    fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Click the node
    fn click(&self) -> Result<()>;

    /// Clear the node's value (text inputs)
    fn clear(&self) -> Result<()>;

    /// Type text into the node
    fn type_text(&self, text: &str) -> Result<()>;

    /// PNG capture of just this node
    fn screenshot(&self) -> Result<Vec<u8>>;
}
