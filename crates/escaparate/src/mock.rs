//! In-memory scripted document for testing pollers, regions and flows.
//!
//! [`MockDocument`] implements the [`Document`]/[`Node`] capability traits
//! over a flat node table. Two features make it useful for synchronization
//! tests:
//!
//! - a **query clock**: every `find_one`/`find_all` advances a tick counter,
//!   and node visibility can be scheduled against it (`visible_from`,
//!   `visible_between`), so "appears on the third probe" scenarios are
//!   deterministic without threads or sleeps;
//! - **click effects**: a click on a scripted node mutates the document
//!   (show/hide/detach nodes, rewrite text, navigate), which is how modal
//!   opening, tab switching and form submission are simulated.
//!
//! Detached nodes stop matching queries, and any operation through a handle
//! to one returns [`Error::StaleNode`], the same transience a live page
//! produces when it re-renders.

use crate::driver::{Document, Node};
use crate::locator::Locator;
use crate::result::{Error, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// When a scripted node is visible, in query-clock ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Visible on every probe
    Always,
    /// Present in the DOM but never visible
    Never,
    /// Visible from the given tick onwards
    From(u64),
    /// Visible until (exclusive) the given tick
    Until(u64),
    /// Visible in `[from, until)`
    Between(u64, u64),
}

impl Visibility {
    fn holds_at(self, tick: u64) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::From(from) => tick >= from,
            Self::Until(until) => tick < until,
            Self::Between(from, until) => tick >= from && tick < until,
        }
    }
}

/// A document mutation applied when a scripted node is clicked
#[derive(Debug, Clone)]
pub enum Effect {
    /// Make every node matching the locator visible
    Show(Locator),
    /// Make every node matching the locator invisible
    Hide(Locator),
    /// Remove every node matching the locator from the document
    Detach(Locator),
    /// Replace the text of every node matching the locator
    SetText(Locator, String),
    /// Set an attribute on every node matching the locator
    SetAttribute(Locator, String, String),
    /// Flip an attribute between two values on every node matching the
    /// locator (anything other than the first value becomes the first)
    ToggleAttribute(Locator, String, String, String),
    /// Set the selection state of every node matching the locator
    SetSelected(Locator, bool),
    /// Flip the selection state of every node matching the locator
    ToggleSelected(Locator),
    /// Change the document URL
    Navigate(String),
    /// Change the document title
    SetTitle(String),
}

/// Builder for one scripted node
#[derive(Debug, Clone)]
pub struct NodeSpec {
    selectors: Vec<Locator>,
    text: String,
    attributes: BTreeMap<String, String>,
    visibility: Visibility,
    enabled: bool,
    selected: bool,
}

impl NodeSpec {
    /// A visible, enabled node matching one locator
    #[must_use]
    pub fn new(locator: Locator) -> Self {
        Self {
            selectors: vec![locator],
            text: String::new(),
            attributes: BTreeMap::new(),
            visibility: Visibility::Always,
            enabled: true,
            selected: false,
        }
    }

    /// Also match an additional locator
    #[must_use]
    pub fn also_matches(mut self, locator: Locator) -> Self {
        self.selectors.push(locator);
        self
    }

    /// Set the node text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Present but never visible
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::Never;
        self
    }

    /// Visible from the given query tick onwards
    #[must_use]
    pub fn visible_from(mut self, tick: u64) -> Self {
        self.visibility = Visibility::From(tick);
        self
    }

    /// Visible only in `[from, until)` query ticks
    #[must_use]
    pub fn visible_between(mut self, from: u64, until: u64) -> Self {
        self.visibility = Visibility::Between(from, until);
        self
    }

    /// Disabled for interaction
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Initially selected (checkboxes)
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

#[derive(Debug)]
struct NodeData {
    id: usize,
    selectors: Vec<Locator>,
    text: String,
    attributes: BTreeMap<String, String>,
    visibility: Visibility,
    enabled: bool,
    selected: bool,
    detached: bool,
}

impl NodeData {
    fn matches(&self, locator: &Locator) -> bool {
        !self.detached && self.selectors.contains(locator)
    }
}

#[derive(Debug)]
struct DocInner {
    url: String,
    title: String,
    clock: u64,
    next_id: usize,
    nodes: Vec<NodeData>,
    click_effects: BTreeMap<usize, Vec<Effect>>,
}

impl DocInner {
    fn node(&self, id: usize) -> Result<&NodeData> {
        self.nodes
            .iter()
            .find(|n| n.id == id && !n.detached)
            .ok_or(Error::StaleNode)
    }

    fn node_mut(&mut self, id: usize) -> Result<&mut NodeData> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id && !n.detached)
            .ok_or(Error::StaleNode)
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Show(locator) => self.for_matching(locator, |n| {
                n.visibility = Visibility::Always;
            }),
            Effect::Hide(locator) => self.for_matching(locator, |n| {
                n.visibility = Visibility::Never;
            }),
            Effect::Detach(locator) => self.for_matching(locator, |n| {
                n.detached = true;
            }),
            Effect::SetText(locator, text) => self.for_matching(locator, |n| {
                n.text.clone_from(text);
            }),
            Effect::SetAttribute(locator, name, value) => self.for_matching(locator, |n| {
                let _ = n.attributes.insert(name.clone(), value.clone());
            }),
            Effect::ToggleAttribute(locator, name, first, second) => {
                self.for_matching(locator, |n| {
                    let next = if n.attributes.get(name) == Some(first) {
                        second.clone()
                    } else {
                        first.clone()
                    };
                    let _ = n.attributes.insert(name.clone(), next);
                });
            }
            Effect::SetSelected(locator, selected) => self.for_matching(locator, |n| {
                n.selected = *selected;
            }),
            Effect::ToggleSelected(locator) => self.for_matching(locator, |n| {
                n.selected = !n.selected;
            }),
            Effect::Navigate(url) => self.url.clone_from(url),
            Effect::SetTitle(title) => self.title.clone_from(title),
        }
    }

    fn for_matching(&mut self, locator: &Locator, mut f: impl FnMut(&mut NodeData)) {
        for node in self.nodes.iter_mut().filter(|n| n.matches(locator)) {
            f(node);
        }
    }
}

/// A scripted in-memory document
#[derive(Debug, Clone)]
pub struct MockDocument {
    inner: Rc<RefCell<DocInner>>,
}

impl MockDocument {
    /// An empty document at the given URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DocInner {
                url: url.into(),
                title: String::new(),
                clock: 0,
                next_id: 0,
                nodes: Vec::new(),
                click_effects: BTreeMap::new(),
            })),
        }
    }

    /// Add a scripted node
    pub fn insert(&self, spec: NodeSpec) {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.nodes.push(NodeData {
            id,
            selectors: spec.selectors,
            text: spec.text,
            attributes: spec.attributes,
            visibility: spec.visibility,
            enabled: spec.enabled,
            selected: spec.selected,
            detached: false,
        });
    }

    /// Attach click effects to the first node matching the locator.
    ///
    /// # Panics
    ///
    /// Panics if no node matches, which is a scripting mistake in the test
    /// itself.
    pub fn on_click(&self, locator: &Locator, effects: Vec<Effect>) {
        let mut inner = self.inner.borrow_mut();
        let id = inner
            .nodes
            .iter()
            .find(|n| n.matches(locator))
            .map(|n| n.id)
            .unwrap_or_else(|| panic!("no node matches {locator} to attach click effects to"));
        inner.click_effects.entry(id).or_default().extend(effects);
    }

    /// Apply an effect directly, outside any click
    pub fn apply(&self, effect: &Effect) {
        self.inner.borrow_mut().apply(effect);
    }

    /// Current query-clock tick
    #[must_use]
    pub fn clock(&self) -> u64 {
        self.inner.borrow().clock
    }

    /// Change the document URL (simulates out-of-band navigation)
    pub fn set_url(&self, url: impl Into<String>) {
        self.inner.borrow_mut().url = url.into();
    }

    /// Change the document title
    pub fn set_title(&self, title: impl Into<String>) {
        self.inner.borrow_mut().title = title.into();
    }
}

impl Document for MockDocument {
    type Node = MockNode;

    fn find_one(&self, locator: &Locator) -> Result<Option<MockNode>> {
        let mut inner = self.inner.borrow_mut();
        inner.clock += 1;
        Ok(inner
            .nodes
            .iter()
            .find(|n| n.matches(locator))
            .map(|n| MockNode {
                inner: Rc::clone(&self.inner),
                id: n.id,
            }))
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<MockNode>> {
        let mut inner = self.inner.borrow_mut();
        inner.clock += 1;
        Ok(inner
            .nodes
            .iter()
            .filter(|n| n.matches(locator))
            .map(|n| MockNode {
                inner: Rc::clone(&self.inner),
                id: n.id,
            })
            .collect())
    }

    fn current_url(&self) -> Result<String> {
        Ok(self.inner.borrow().url.clone())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.inner.borrow_mut().url = url.to_string();
        Ok(())
    }

    fn title(&self) -> Result<String> {
        Ok(self.inner.borrow().title.clone())
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        let inner = self.inner.borrow();
        Ok(format!("mock-screenshot:{}@{}", inner.url, inner.clock).into_bytes())
    }
}

/// Handle to one scripted node
#[derive(Debug, Clone)]
pub struct MockNode {
    inner: Rc<RefCell<DocInner>>,
    id: usize,
}

impl MockNode {
    fn interactable(inner: &DocInner, id: usize) -> Result<()> {
        let node = inner.node(id)?;
        if !node.visibility.holds_at(inner.clock) {
            return Err(Error::driver("element is not visible"));
        }
        if !node.enabled {
            return Err(Error::driver("element is not enabled"));
        }
        Ok(())
    }
}

impl Node for MockNode {
    fn is_visible(&self) -> Result<bool> {
        let inner = self.inner.borrow();
        let node = inner.node(self.id)?;
        Ok(node.visibility.holds_at(inner.clock))
    }

    fn is_enabled(&self) -> Result<bool> {
        Ok(self.inner.borrow().node(self.id)?.enabled)
    }

    fn is_selected(&self) -> Result<bool> {
        Ok(self.inner.borrow().node(self.id)?.selected)
    }

    fn text(&self) -> Result<String> {
        let inner = self.inner.borrow();
        let node = inner.node(self.id)?;
        if node.visibility.holds_at(inner.clock) {
            Ok(node.text.trim().to_string())
        } else {
            Ok(String::new())
        }
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        let inner = self.inner.borrow();
        let node = inner.node(self.id)?;
        if name == "textContent" {
            return Ok(Some(node.text.clone()));
        }
        Ok(node.attributes.get(name).cloned())
    }

    fn click(&self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        Self::interactable(&inner, self.id)?;
        let effects = inner.click_effects.get(&self.id).cloned().unwrap_or_default();
        for effect in &effects {
            inner.apply(effect);
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        Self::interactable(&inner, self.id)?;
        let node = inner.node_mut(self.id)?;
        let _ = node.attributes.insert("value".into(), String::new());
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        Self::interactable(&inner, self.id)?;
        let node = inner.node_mut(self.id)?;
        node.attributes
            .entry("value".into())
            .or_default()
            .push_str(text);
        Ok(())
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        let inner = self.inner.borrow();
        let node = inner.node(self.id)?;
        Ok(format!("mock-node-screenshot:{}", node.id).into_bytes())
    }
}
