//! Account-page chrome and the standalone authorization form.
//!
//! Every page reached from the profile menu shares the same chrome
//! (breadcrumb trail, `h1` title, optional danger alert), wrapped by
//! [`PageChrome`]. The standalone authorization page adds the login form
//! wrapped by [`AuthForm`].

use crate::regions::{set_checkbox, set_field};
use escaparate::conditions::{clickable, present, text_of, texts_of, visible};
use escaparate::{wait_for, Document, Locator, Node, PollOutcome, Result, WaitPolicy};
use tracing::info;

/// Breadcrumbs, title and alert block shared by account pages
#[derive(Debug)]
pub struct PageChrome<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    breadcrumbs: Locator,
    title: Locator,
    alert: Locator,
}

impl<'d, D: Document> PageChrome<'d, D> {
    /// Bind the region to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            breadcrumbs: Locator::css("div.breadcrumbs-item"),
            title: Locator::css("h1.page-title"),
            alert: Locator::css("div.alert-danger"),
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

    /// The breadcrumb trail, in order
    pub fn breadcrumbs(&self) -> Result<Vec<String>> {
        Ok(self
            .poll(&texts_of(self.breadcrumbs.clone()))?
            .unwrap_or_default())
    }

    /// The page title
    pub fn title_text(&self) -> Result<Option<String>> {
        Ok(self.poll(&text_of(self.title.clone()))?.into_option())
    }

    /// The danger alert text; `None` is a valid answer for pages without one
    pub fn alert_text(&self) -> Result<Option<String>> {
        if !self.poll(&visible(self.alert.clone()))?.is_success() {
            return Ok(None);
        }
        Ok(self.poll(&text_of(self.alert.clone()))?.into_option())
    }
}

/// The standalone authorization form on `/personal/`
#[derive(Debug)]
pub struct AuthForm<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    login_field: Locator,
    password_field: Locator,
    remember_me: Locator,
    submit_button: Locator,
    auxiliary_links: Locator,
}

impl<'d, D: Document> AuthForm<'d, D> {
    /// Bind the region to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            login_field: Locator::css("input[name='USER_LOGIN']"),
            password_field: Locator::css("input[name='USER_PASSWORD']"),
            remember_me: Locator::css("label.bx-filter-param-label"),
            submit_button: Locator::css(
                "div.bx-authform-formgroup-container button.button-style[type='submit']",
            ),
            auxiliary_links: Locator::css("div.bx-authform-link-container a"),
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

    fn field_enabled(&self, locator: &Locator) -> Result<bool> {
        if !self.poll(&present(locator.clone()))?.is_success() {
            return Ok(false);
        }
        match self.doc.find_one(locator)? {
            Some(node) => node.is_enabled(),
            None => Ok(false),
        }
    }

    // Checkers

    /// Whether the login field is present and enabled
    pub fn login_field_enabled(&self) -> Result<bool> {
        self.field_enabled(&self.login_field)
    }

    /// Whether the password field is present and enabled
    pub fn password_field_enabled(&self) -> Result<bool> {
        self.field_enabled(&self.password_field)
    }

    /// Whether the remember-me checkbox is clickable
    pub fn remember_me_clickable(&self) -> Result<bool> {
        Ok(self.poll(&clickable(self.remember_me.clone()))?.is_success())
    }

    /// Whether the submit button is clickable
    pub fn submit_clickable(&self) -> Result<bool> {
        Ok(self
            .poll(&clickable(self.submit_button.clone()))?
            .is_success())
    }

    // Getters

    /// The submit button text
    pub fn submit_text(&self) -> Result<Option<String>> {
        Ok(self.poll(&text_of(self.submit_button.clone()))?.into_option())
    }

    /// The forgot-password and registration link targets, in document order
    pub fn auxiliary_link_hrefs(&self) -> Result<Vec<String>> {
        if !self
            .poll(&visible(self.auxiliary_links.clone()))?
            .is_success()
        {
            return Ok(Vec::new());
        }
        let mut hrefs = Vec::new();
        for node in self.doc.find_all(&self.auxiliary_links)? {
            if let Some(href) = node.attribute("href")? {
                hrefs.push(href);
            }
        }
        Ok(hrefs)
    }

    // Actions

    /// Fill the login field and confirm it converged
    pub fn set_login(&self, value: &str) -> Result<bool> {
        set_field(self.doc, &self.login_field, value, self.policy)
    }

    /// Fill the password field and confirm it converged
    pub fn set_password(&self, value: &str) -> Result<bool> {
        set_field(self.doc, &self.password_field, value, self.policy)
    }

    /// Drive the remember-me checkbox to the requested state
    pub fn set_remember_me(&self, on: bool) -> Result<bool> {
        set_checkbox(self.doc, &self.remember_me, &self.remember_me, on, self.policy)
    }

    /// Click the submit button
    pub fn click_submit(&self) -> Result<bool> {
        if !self.submit_clickable()? {
            return Ok(false);
        }
        match self.doc.find_one(&self.submit_button)? {
            Some(button) => {
                button.click()?;
                info!("authorization form submitted");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
