//! Search box: the expandable panel behind the top-bar search button.

use crate::regions::set_field;
use escaparate::conditions::{attribute_of, clickable, visible, AllOf};
use escaparate::{
    wait_for, wait_until_absent, Document, Locator, Node, PollOutcome, Result, WaitPolicy,
};
use tracing::info;

/// Wrapper for the search panel
#[derive(Debug)]
pub struct SearchBox<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    field: Locator,
    submit_button: Locator,
    cancel_button: Locator,
}

impl<'d, D: Document> SearchBox<'d, D> {
    /// Bind the region to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            field: Locator::id("input__search"),
            submit_button: Locator::css(".form-actions .button-style.button-style--red"),
            cancel_button: Locator::css(".form-actions .search-close-btn"),
        }
    }

    /// Override the region's wait policy
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn poll<C: escaparate::Condition<D>>(&self, condition: &C) -> Result<PollOutcome<C::Output>> {
        wait_for(self.doc, condition, self.policy)
    }

    /// Whether the whole panel is operable: field, submit and cancel all
    /// visible and clickable on the same probe
    pub fn panel_ready(&self) -> Result<bool> {
        let ready = AllOf::new()
            .and(clickable(self.field.clone()))
            .and(visible(self.submit_button.clone()))
            .and(clickable(self.submit_button.clone()))
            .and(visible(self.cancel_button.clone()))
            .and(clickable(self.cancel_button.clone()));
        Ok(self.poll(&ready)?.is_success())
    }

    /// The query currently in the field
    pub fn query(&self) -> Result<Option<String>> {
        Ok(self
            .poll(&attribute_of(self.field.clone(), "value"))?
            .into_option()
            .flatten())
    }

    /// Type a query and confirm the field converged to it
    pub fn set_query(&self, query: &str) -> Result<bool> {
        set_field(self.doc, &self.field, query, self.policy)
    }

    /// Click the submit button.
    ///
    /// A trigger verb: what submitting leads to depends on the query (a
    /// results page, or nothing at all for an empty query), so the caller
    /// asserts the outcome through page verbs.
    pub fn submit(&self) -> Result<bool> {
        if !self.poll(&clickable(self.submit_button.clone()))?.is_success() {
            return Ok(false);
        }
        match self.doc.find_one(&self.submit_button)? {
            Some(button) => {
                button.click()?;
                info!("search submitted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Close the panel and confirm the field collapsed
    pub fn cancel(&self) -> Result<bool> {
        if !self.poll(&clickable(self.cancel_button.clone()))?.is_success() {
            return Ok(false);
        }
        let Some(button) = self.doc.find_one(&self.cancel_button)? else {
            return Ok(false);
        };
        button.click()?;
        let collapsed = wait_until_absent(self.doc, &visible(self.field.clone()), self.policy)?;
        Ok(collapsed.is_success())
    }
}
