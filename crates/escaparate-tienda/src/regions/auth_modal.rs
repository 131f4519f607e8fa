//! Authorization/registration modal overlay.
//!
//! The modal has two tabs sharing one container. Checkers and getters here
//! follow the region contract (timeout ⇒ `false`/empty); the state machine
//! sequencing tab switches and submits lives in [`crate::flow`], built on
//! top of these verbs.

use crate::regions::{set_checkbox, set_field, text_lines};
use escaparate::conditions::{attribute_of, clickable, text_of, texts_of, visible};
use escaparate::{
    wait_for, wait_until_absent, Document, Locator, Node, PollOutcome, Result, WaitPolicy,
};

/// Which tab of the modal a verb refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTab {
    /// The login tab, shown when the modal opens
    Authorization,
    /// The registration tab
    Registration,
}

/// Wrapper for the modal overlay
#[derive(Debug)]
pub struct AuthModal<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    window: Locator,
    title: Locator,
    close_button: Locator,
    inactive_tab_link: Locator,
    registration_tab: Locator,

    auth_email_field: Locator,
    auth_email_label: Locator,
    auth_password_field: Locator,
    auth_password_label: Locator,
    password_toggle: Locator,
    remember_me_label: Locator,
    remember_me_input: Locator,
    forgot_password_link: Locator,
    auth_submit: Locator,
    auth_success_block: Locator,

    reg_first_name_field: Locator,
    reg_first_name_label: Locator,
    reg_last_name_field: Locator,
    reg_last_name_label: Locator,
    reg_email_field: Locator,
    reg_email_label: Locator,
    policy_label: Locator,
    policy_input: Locator,
    policy_link: Locator,
    reg_submit: Locator,
    reg_success_block: Locator,

    error_block: Locator,
}

impl<'d, D: Document> AuthModal<'d, D> {
    /// Bind the region to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            window: Locator::css("div.popup-auth__inner"),
            title: Locator::css("h3.auth__title"),
            close_button: Locator::css(".close-auth"),
            inactive_tab_link: Locator::css(".auth__tab .ajax-link"),
            registration_tab: Locator::css(".auth__tab a#regst"),

            auth_email_field: Locator::css("input[name='USER_LOGIN']"),
            auth_email_label: Locator::xpath(
                "//div[@class='input-style'][.//input[@name='USER_LOGIN']]/label",
            ),
            auth_password_field: Locator::css("input[name='USER_PASSWORD']"),
            auth_password_label: Locator::xpath(
                "//div[@class='input-style'][.//input[@name='USER_PASSWORD']]/label",
            ),
            password_toggle: Locator::css(".input-style .pass-view"),
            remember_me_label: Locator::css(".input-checkbox-circle"),
            remember_me_input: Locator::css(".input-checkbox-circle input"),
            forgot_password_link: Locator::css(".forgot-pass"),
            auth_submit: Locator::css("button[type='submit'][name='Login']"),
            auth_success_block: Locator::css(".uk-modal-content div"),

            reg_first_name_field: Locator::css("input[name='REGISTER[NAME]']"),
            reg_first_name_label: Locator::xpath(
                "//div[@class='input-style'][.//input[@name='REGISTER[NAME]']]/label",
            ),
            reg_last_name_field: Locator::css("input[name='REGISTER[LAST_NAME]']"),
            reg_last_name_label: Locator::xpath(
                "//div[@class='input-style'][.//input[@name='REGISTER[LAST_NAME]']]/label",
            ),
            reg_email_field: Locator::css("input[name='REGISTER[EMAIL]']"),
            reg_email_label: Locator::xpath(
                "//div[@class='input-style'][.//input[@name='REGISTER[EMAIL]']]/label",
            ),
            policy_label: Locator::css(".input-checkbox-circle"),
            policy_input: Locator::css(".input-checkbox-circle input"),
            policy_link: Locator::css(".policy-info a"),
            reg_submit: Locator::css("button[type='submit'][name='register_submit_button']"),
            reg_success_block: Locator::css(".uk-modal-content p"),

            error_block: Locator::css(".errortext"),
        }
    }

    /// Override the region's wait policy
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The region's wait policy
    #[must_use]
    pub const fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// The wrapped document
    #[must_use]
    pub(crate) const fn document(&self) -> &'d D {
        self.doc
    }

    fn poll<C: escaparate::Condition<D>>(&self, condition: &C) -> Result<PollOutcome<C::Output>> {
        wait_for(self.doc, condition, self.policy)
    }

    fn click_when_clickable(&self, locator: &Locator) -> Result<bool> {
        if !self.poll(&clickable(locator.clone()))?.is_success() {
            return Ok(false);
        }
        match self.doc.find_one(locator)? {
            Some(node) => {
                node.click()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn placeholder(&self, label: &Locator) -> Result<Option<String>> {
        Ok(self.poll(&text_of(label.clone()))?.into_option())
    }

    fn link_href(&self, locator: &Locator) -> Result<Option<String>> {
        Ok(self
            .poll(&attribute_of(locator.clone(), "href"))?
            .into_option()
            .flatten())
    }

    fn button_text_and_value(&self, locator: &Locator) -> Result<Option<(String, Option<String>)>> {
        if !self.poll(&clickable(locator.clone()))?.is_success() {
            return Ok(None);
        }
        let Some(button) = self.doc.find_one(locator)? else {
            return Ok(None);
        };
        Ok(Some((button.text()?, button.attribute("value")?)))
    }

    fn block_lines(&self, locator: &Locator) -> Result<Vec<String>> {
        let texts = self.poll(&texts_of(locator.clone()))?.unwrap_or_default();
        Ok(text_lines(&texts))
    }

    // Modal chrome

    /// Whether the modal window is visible
    pub fn is_visible(&self) -> Result<bool> {
        Ok(self.poll(&visible(self.window.clone()))?.is_success())
    }

    /// Whether the modal disappears within the given budget
    pub fn closed_within(&self, policy: WaitPolicy) -> Result<bool> {
        let gone = wait_until_absent(self.doc, &visible(self.window.clone()), policy)?;
        Ok(gone.is_success())
    }

    /// Whether the close button is visible
    pub fn close_button_visible(&self) -> Result<bool> {
        Ok(self.poll(&visible(self.close_button.clone()))?.is_success())
    }

    /// The visible tab's title
    pub fn title_text(&self) -> Result<Option<String>> {
        Ok(self.poll(&text_of(self.title.clone()))?.into_option())
    }

    /// The link behind the currently inactive tab
    pub fn inactive_tab_href(&self) -> Result<Option<String>> {
        self.link_href(&self.inactive_tab_link)
    }

    /// Click the close button
    pub fn click_close(&self) -> Result<bool> {
        self.click_when_clickable(&self.close_button)
    }

    /// Click the registration tab link
    pub fn click_registration_tab(&self) -> Result<bool> {
        self.click_when_clickable(&self.registration_tab)
    }

    // Authorization tab

    /// Whether the e-mail field is visible
    pub fn auth_email_visible(&self) -> Result<bool> {
        Ok(self
            .poll(&visible(self.auth_email_field.clone()))?
            .is_success())
    }

    /// The e-mail field's label text
    pub fn auth_email_placeholder(&self) -> Result<Option<String>> {
        self.placeholder(&self.auth_email_label)
    }

    /// Whether the password field is visible
    pub fn auth_password_visible(&self) -> Result<bool> {
        Ok(self
            .poll(&visible(self.auth_password_field.clone()))?
            .is_success())
    }

    /// The password field's label text
    pub fn auth_password_placeholder(&self) -> Result<Option<String>> {
        self.placeholder(&self.auth_password_label)
    }

    /// Whether the password is currently rendered as plain text
    pub fn password_revealed(&self) -> Result<bool> {
        let field_type = self
            .poll(&attribute_of(self.auth_password_field.clone(), "type"))?
            .into_option()
            .flatten();
        Ok(field_type.as_deref() == Some("text"))
    }

    /// Whether the password visibility toggle is clickable
    pub fn password_toggle_clickable(&self) -> Result<bool> {
        Ok(self
            .poll(&clickable(self.password_toggle.clone()))?
            .is_success())
    }

    /// Click the password visibility toggle.
    ///
    /// The toggle flips the field between masked and revealed; the caller
    /// observes the result through [`Self::password_revealed`].
    pub fn click_password_toggle(&self) -> Result<bool> {
        self.click_when_clickable(&self.password_toggle)
    }

    /// Whether the remember-me checkbox is clickable
    pub fn remember_me_clickable(&self) -> Result<bool> {
        Ok(self
            .poll(&clickable(self.remember_me_label.clone()))?
            .is_success())
    }

    /// Whether the remember-me checkbox is currently checked
    pub fn remember_me_checked(&self) -> Result<bool> {
        match self.doc.find_one(&self.remember_me_input)? {
            Some(node) => node.is_selected(),
            None => Ok(false),
        }
    }

    /// Drive the remember-me checkbox to the requested state
    pub fn set_remember_me(&self, on: bool) -> Result<bool> {
        set_checkbox(
            self.doc,
            &self.remember_me_input,
            &self.remember_me_label,
            on,
            self.policy,
        )
    }

    /// The forgot-password link target
    pub fn forgot_password_href(&self) -> Result<Option<String>> {
        self.link_href(&self.forgot_password_link)
    }

    /// Whether the authorization submit button is clickable
    pub fn auth_submit_clickable(&self) -> Result<bool> {
        Ok(self.poll(&clickable(self.auth_submit.clone()))?.is_success())
    }

    /// The authorization submit button's text and value attribute
    pub fn auth_submit_text_and_value(&self) -> Result<Option<(String, Option<String>)>> {
        self.button_text_and_value(&self.auth_submit)
    }

    /// Fill the e-mail field and confirm it converged
    pub fn set_auth_email(&self, email: &str) -> Result<bool> {
        set_field(self.doc, &self.auth_email_field, email, self.policy)
    }

    /// Fill the password field and confirm it converged
    pub fn set_auth_password(&self, password: &str) -> Result<bool> {
        set_field(self.doc, &self.auth_password_field, password, self.policy)
    }

    /// Click the authorization submit button
    pub fn click_auth_submit(&self) -> Result<bool> {
        self.click_when_clickable(&self.auth_submit)
    }

    /// Validation errors shown on the authorization tab
    pub fn auth_error_lines(&self) -> Result<Vec<String>> {
        self.block_lines(&self.error_block)
    }

    /// Success text shown after a completed authorization
    pub fn auth_success_lines(&self) -> Result<Vec<String>> {
        self.block_lines(&self.auth_success_block)
    }

    // Registration tab

    /// Whether the first-name field is clickable
    pub fn reg_first_name_clickable(&self) -> Result<bool> {
        Ok(self
            .poll(&clickable(self.reg_first_name_field.clone()))?
            .is_success())
    }

    /// The first-name field's label text
    pub fn reg_first_name_placeholder(&self) -> Result<Option<String>> {
        self.placeholder(&self.reg_first_name_label)
    }

    /// Whether the last-name field is clickable
    pub fn reg_last_name_clickable(&self) -> Result<bool> {
        Ok(self
            .poll(&clickable(self.reg_last_name_field.clone()))?
            .is_success())
    }

    /// The last-name field's label text
    pub fn reg_last_name_placeholder(&self) -> Result<Option<String>> {
        self.placeholder(&self.reg_last_name_label)
    }

    /// Whether the registration e-mail field is clickable
    pub fn reg_email_clickable(&self) -> Result<bool> {
        Ok(self
            .poll(&clickable(self.reg_email_field.clone()))?
            .is_success())
    }

    /// The registration e-mail field's label text
    pub fn reg_email_placeholder(&self) -> Result<Option<String>> {
        self.placeholder(&self.reg_email_label)
    }

    /// Whether the policy checkbox is clickable
    pub fn policy_checkbox_clickable(&self) -> Result<bool> {
        Ok(self.poll(&clickable(self.policy_label.clone()))?.is_success())
    }

    /// Drive the policy checkbox to the requested state
    pub fn set_policy_checkbox(&self, on: bool) -> Result<bool> {
        set_checkbox(
            self.doc,
            &self.policy_input,
            &self.policy_label,
            on,
            self.policy,
        )
    }

    /// The policy link target
    pub fn policy_link_href(&self) -> Result<Option<String>> {
        self.link_href(&self.policy_link)
    }

    /// Whether the registration submit button is clickable
    pub fn reg_submit_clickable(&self) -> Result<bool> {
        Ok(self.poll(&clickable(self.reg_submit.clone()))?.is_success())
    }

    /// The registration submit button's text and value attribute
    pub fn reg_submit_text_and_value(&self) -> Result<Option<(String, Option<String>)>> {
        self.button_text_and_value(&self.reg_submit)
    }

    /// Fill the first-name field and confirm it converged
    pub fn set_reg_first_name(&self, first_name: &str) -> Result<bool> {
        set_field(self.doc, &self.reg_first_name_field, first_name, self.policy)
    }

    /// Fill the last-name field and confirm it converged
    pub fn set_reg_last_name(&self, last_name: &str) -> Result<bool> {
        set_field(self.doc, &self.reg_last_name_field, last_name, self.policy)
    }

    /// Fill the registration e-mail field and confirm it converged
    pub fn set_reg_email(&self, email: &str) -> Result<bool> {
        set_field(self.doc, &self.reg_email_field, email, self.policy)
    }

    /// Click the registration submit button
    pub fn click_reg_submit(&self) -> Result<bool> {
        self.click_when_clickable(&self.reg_submit)
    }

    /// Validation errors shown on the registration tab
    pub fn reg_error_lines(&self) -> Result<Vec<String>> {
        self.block_lines(&self.error_block)
    }

    /// Success text shown after a completed registration
    pub fn reg_success_lines(&self) -> Result<Vec<String>> {
        self.block_lines(&self.reg_success_block)
    }

    // Flow support

    /// The submit button for a tab
    pub(crate) fn submit_locator(&self, tab: ModalTab) -> &Locator {
        match tab {
            ModalTab::Authorization => &self.auth_submit,
            ModalTab::Registration => &self.reg_submit,
        }
    }

    /// The (success, error) markup locators a submit can settle on
    pub(crate) fn submit_markers(&self, tab: ModalTab) -> (Locator, Locator) {
        let success = match tab {
            ModalTab::Authorization => self.auth_success_block.clone(),
            ModalTab::Registration => self.reg_success_block.clone(),
        };
        (success, self.error_block.clone())
    }

    /// Locator of the registration first-name field, the marker that the
    /// registration tab finished rendering
    pub(crate) fn registration_marker(&self) -> &Locator {
        &self.reg_first_name_field
    }

    /// Locator of the modal window itself
    pub(crate) fn window_locator(&self) -> &Locator {
        &self.window
    }
}
