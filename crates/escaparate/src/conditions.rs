//! The built-in condition family.
//!
//! Each condition is a small value owning the locator(s) it probes. All of
//! them follow the same edge-case rules:
//!
//! - a locator matching zero nodes is *pending*, not an error, until the
//!   poll budget runs out;
//! - multi-node conditions must hold for every match **on the same probe**;
//!   partial satisfaction across different probes does not count;
//! - none of them mutate the document.

use crate::compare::MenuEntry;
use crate::driver::{Document, Node};
use crate::locator::Locator;
use crate::result::Result;
use crate::wait::{Condition, Probe};

/// At least one node matches the locator
#[derive(Debug, Clone)]
pub struct Present {
    locator: Locator,
}

/// The condition that a node matching `locator` exists
#[must_use]
pub fn present(locator: Locator) -> Present {
    Present { locator }
}

impl<D: Document> Condition<D> for Present {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        Ok(match doc.find_one(&self.locator)? {
            Some(_) => Probe::Satisfied(()),
            None => Probe::Pending,
        })
    }

    fn describe(&self) -> String {
        format!("{} is present", self.locator)
    }
}

/// The first node matching the locator is visible
#[derive(Debug, Clone)]
pub struct Visible {
    locator: Locator,
}

/// The condition that a node matching `locator` is visible
#[must_use]
pub fn visible(locator: Locator) -> Visible {
    Visible { locator }
}

impl<D: Document> Condition<D> for Visible {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        match doc.find_one(&self.locator)? {
            Some(node) if node.is_visible()? => Ok(Probe::Satisfied(())),
            _ => Ok(Probe::Pending),
        }
    }

    fn describe(&self) -> String {
        format!("{} is visible", self.locator)
    }
}

/// Every node matching the locator is visible, simultaneously
#[derive(Debug, Clone)]
pub struct AllVisible {
    locator: Locator,
}

/// The condition that at least one node matches `locator` and all matches
/// are visible on the same probe
#[must_use]
pub fn all_visible(locator: Locator) -> AllVisible {
    AllVisible { locator }
}

impl<D: Document> Condition<D> for AllVisible {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        let nodes = doc.find_all(&self.locator)?;
        if nodes.is_empty() {
            return Ok(Probe::Pending);
        }
        for node in &nodes {
            if !node.is_visible()? {
                return Ok(Probe::Pending);
            }
        }
        Ok(Probe::Satisfied(()))
    }

    fn describe(&self) -> String {
        format!("all nodes matching {} are visible", self.locator)
    }
}

/// The first matching node is visible and enabled
#[derive(Debug, Clone)]
pub struct Clickable {
    locator: Locator,
}

/// The condition that a node matching `locator` is visible and enabled
#[must_use]
pub fn clickable(locator: Locator) -> Clickable {
    Clickable { locator }
}

impl<D: Document> Condition<D> for Clickable {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        match doc.find_one(&self.locator)? {
            Some(node) if node.is_visible()? && node.is_enabled()? => Ok(Probe::Satisfied(())),
            _ => Ok(Probe::Pending),
        }
    }

    fn describe(&self) -> String {
        format!("{} is clickable", self.locator)
    }
}

/// An attribute of the first matching node equals an expected value
#[derive(Debug, Clone)]
pub struct AttributeIs {
    locator: Locator,
    name: String,
    expected: String,
}

/// The condition that `locator`'s attribute `name` equals `expected`
#[must_use]
pub fn attribute_is(
    locator: Locator,
    name: impl Into<String>,
    expected: impl Into<String>,
) -> AttributeIs {
    AttributeIs {
        locator,
        name: name.into(),
        expected: expected.into(),
    }
}

impl<D: Document> Condition<D> for AttributeIs {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        match doc.find_one(&self.locator)? {
            Some(node) if node.attribute(&self.name)?.as_deref() == Some(&self.expected) => {
                Ok(Probe::Satisfied(()))
            }
            _ => Ok(Probe::Pending),
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} has {}={:?}",
            self.locator, self.name, self.expected
        )
    }
}

/// The first matching node's selection state equals an expected state
#[derive(Debug, Clone)]
pub struct SelectionIs {
    locator: Locator,
    selected: bool,
}

/// The condition that `locator`'s selection state is `selected`
#[must_use]
pub fn selection_is(locator: Locator, selected: bool) -> SelectionIs {
    SelectionIs { locator, selected }
}

impl<D: Document> Condition<D> for SelectionIs {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        match doc.find_one(&self.locator)? {
            Some(node) if node.is_selected()? == self.selected => Ok(Probe::Satisfied(())),
            _ => Ok(Probe::Pending),
        }
    }

    fn describe(&self) -> String {
        format!("{} selection is {}", self.locator, self.selected)
    }
}

/// The document URL differs from a baseline captured earlier
#[derive(Debug, Clone)]
pub struct UrlChangedFrom {
    baseline: String,
}

/// The condition that the current URL no longer equals `baseline`.
/// Satisfied with the new URL.
#[must_use]
pub fn url_changed_from(baseline: impl Into<String>) -> UrlChangedFrom {
    UrlChangedFrom {
        baseline: baseline.into(),
    }
}

impl<D: Document> Condition<D> for UrlChangedFrom {
    type Output = String;

    fn probe(&self, doc: &D) -> Result<Probe<String>> {
        let url = doc.current_url()?;
        if url == self.baseline {
            Ok(Probe::Pending)
        } else {
            Ok(Probe::Satisfied(url))
        }
    }

    fn describe(&self) -> String {
        format!("url changed from {:?}", self.baseline)
    }
}

/// The visible text of the first matching node
#[derive(Debug, Clone)]
pub struct TextOf {
    locator: Locator,
}

/// Satisfied with the text of the first node matching `locator`
#[must_use]
pub fn text_of(locator: Locator) -> TextOf {
    TextOf { locator }
}

impl<D: Document> Condition<D> for TextOf {
    type Output = String;

    fn probe(&self, doc: &D) -> Result<Probe<String>> {
        match doc.find_one(&self.locator)? {
            Some(node) => Ok(Probe::Satisfied(node.text()?)),
            None => Ok(Probe::Pending),
        }
    }

    fn describe(&self) -> String {
        format!("text of {}", self.locator)
    }
}

/// An attribute value of the first matching node
#[derive(Debug, Clone)]
pub struct AttributeOf {
    locator: Locator,
    name: String,
}

/// Satisfied with attribute `name` of the first node matching `locator`
/// (`None` when the node exists but lacks the attribute)
#[must_use]
pub fn attribute_of(locator: Locator, name: impl Into<String>) -> AttributeOf {
    AttributeOf {
        locator,
        name: name.into(),
    }
}

impl<D: Document> Condition<D> for AttributeOf {
    type Output = Option<String>;

    fn probe(&self, doc: &D) -> Result<Probe<Option<String>>> {
        match doc.find_one(&self.locator)? {
            Some(node) => Ok(Probe::Satisfied(node.attribute(&self.name)?)),
            None => Ok(Probe::Pending),
        }
    }

    fn describe(&self) -> String {
        format!("attribute {} of {}", self.name, self.locator)
    }
}

/// The texts of all matching nodes, once every one of them is visible
#[derive(Debug, Clone)]
pub struct TextsOf {
    locator: Locator,
}

/// Satisfied with the visible texts of every node matching `locator`,
/// once all of them are visible on the same probe
#[must_use]
pub fn texts_of(locator: Locator) -> TextsOf {
    TextsOf { locator }
}

impl<D: Document> Condition<D> for TextsOf {
    type Output = Vec<String>;

    fn probe(&self, doc: &D) -> Result<Probe<Vec<String>>> {
        let nodes = doc.find_all(&self.locator)?;
        if nodes.is_empty() {
            return Ok(Probe::Pending);
        }
        let mut texts = Vec::with_capacity(nodes.len());
        for node in &nodes {
            if !node.is_visible()? {
                return Ok(Probe::Pending);
            }
            texts.push(node.text()?);
        }
        Ok(Probe::Satisfied(texts))
    }

    fn describe(&self) -> String {
        format!("texts of all visible {}", self.locator)
    }
}

/// Label/link pairs extracted from every matching node
#[derive(Debug, Clone)]
pub struct EntriesOf {
    locator: Locator,
}

/// Satisfied with a [`MenuEntry`] per node matching `locator`: the label is
/// the node's `textContent` (falling back to visible text), trimmed, and
/// entries with empty labels are dropped; the link is the `href` attribute.
#[must_use]
pub fn entries_of(locator: Locator) -> EntriesOf {
    EntriesOf { locator }
}

impl<D: Document> Condition<D> for EntriesOf {
    type Output = Vec<MenuEntry>;

    fn probe(&self, doc: &D) -> Result<Probe<Vec<MenuEntry>>> {
        let nodes = doc.find_all(&self.locator)?;
        if nodes.is_empty() {
            return Ok(Probe::Pending);
        }
        let mut entries = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let label = match node.attribute("textContent")? {
                Some(content) => content.trim().to_string(),
                None => node.text()?,
            };
            if label.is_empty() {
                continue;
            }
            entries.push(MenuEntry::new(label, node.attribute("href")?));
        }
        Ok(Probe::Satisfied(entries))
    }

    fn describe(&self) -> String {
        format!("menu entries under {}", self.locator)
    }
}

/// Several conditions holding on the same probe.
///
/// The counterpart of chaining `and`-style expected conditions: every
/// sub-condition is re-evaluated together, so satisfaction is simultaneous
/// by construction.
pub struct AllOf<D: Document> {
    conditions: Vec<Box<dyn Condition<D, Output = ()>>>,
}

impl<D: Document> Default for AllOf<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> AllOf<D> {
    /// An empty conjunction (vacuously satisfied)
    #[must_use]
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Add a condition to the conjunction
    #[must_use]
    pub fn and(mut self, condition: impl Condition<D, Output = ()> + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }
}

impl<D: Document> std::fmt::Debug for AllOf<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllOf")
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

impl<D: Document> Condition<D> for AllOf<D> {
    type Output = ();

    fn probe(&self, doc: &D) -> Result<Probe<()>> {
        for condition in &self.conditions {
            match condition.probe(doc)? {
                Probe::Satisfied(()) => {}
                Probe::Pending => return Ok(Probe::Pending),
                Probe::Failed => return Ok(Probe::Failed),
            }
        }
        Ok(Probe::Satisfied(()))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.conditions.iter().map(|c| c.describe()).collect();
        parts.join(" AND ")
    }
}
