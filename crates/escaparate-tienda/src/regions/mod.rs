//! Regions: one wrapper per coherent subtree of the storefront.
//!
//! Every region owns its locators (built once, at construction), a shared
//! document reference and a wait policy, and nothing else; live state is
//! recomputed on every call. The verb vocabulary is uniform:
//!
//! - **checkers** answer `Result<bool>` and turn a timeout into `Ok(false)`;
//! - **getters** answer `Result<Option<_>>` / `Result<Vec<_>>` and turn a
//!   timeout into an empty value;
//! - **actions** issue one mutation and confirm its observable effect
//!   before reporting success.
//!
//! Capability faults always propagate through `?`.

mod account;
mod auth_modal;
mod header_nav;
mod header_top;
mod search;

pub use account::{AuthForm, PageChrome};
pub use auth_modal::{AuthModal, ModalTab};
pub use header_nav::HeaderNav;
pub use header_top::HeaderTop;
pub use search::SearchBox;

use escaparate::conditions::{attribute_is, clickable, present, selection_is};
use escaparate::{wait_for, Document, Locator, Node, Result, WaitPolicy};

/// Clear a field, type a value, and confirm the field converged to it.
///
/// Returns `Ok(false)` when the field never became clickable or the typed
/// value did not stick within policy.
pub(crate) fn set_field<D: Document>(
    doc: &D,
    locator: &Locator,
    value: &str,
    policy: WaitPolicy,
) -> Result<bool> {
    if !wait_for(doc, &clickable(locator.clone()), policy)?.is_success() {
        return Ok(false);
    }
    let Some(node) = doc.find_one(locator)? else {
        return Ok(false);
    };
    node.clear()?;
    node.type_text(value)?;
    Ok(wait_for(doc, &attribute_is(locator.clone(), "value", value), policy)?.is_success())
}

/// Drive a checkbox to the requested state and confirm it converged.
///
/// Clicks the label only when the input's current state differs, then waits
/// for the selection state to settle on the requested value.
pub(crate) fn set_checkbox<D: Document>(
    doc: &D,
    input: &Locator,
    label: &Locator,
    on: bool,
    policy: WaitPolicy,
) -> Result<bool> {
    if !wait_for(doc, &present(input.clone()), policy)?.is_success() {
        return Ok(false);
    }
    let Some(node) = doc.find_one(input)? else {
        return Ok(false);
    };
    if node.is_selected()? != on {
        if !wait_for(doc, &clickable(label.clone()), policy)?.is_success() {
            return Ok(false);
        }
        match doc.find_one(label)? {
            Some(label_node) => label_node.click()?,
            None => return Ok(false),
        }
    }
    Ok(wait_for(doc, &selection_is(input.clone(), on), policy)?.is_success())
}

/// Split block texts into trimmed, non-empty lines
pub(crate) fn text_lines(texts: &[String]) -> Vec<String> {
    texts
        .iter()
        .flat_map(|text| text.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
