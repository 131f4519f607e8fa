//! Top header bar: logo, site menu, search button, profile popup, login.

use escaparate::conditions::{
    attribute_of, clickable, entries_of, present, text_of, visible, AllOf,
};
use escaparate::{wait_for, Document, Locator, MenuEntry, Node, PollOutcome, Result, WaitPolicy};
use tracing::info;

/// Text of the account button once a session is authorized
pub const LOGGED_IN_LABEL: &str = "ВЫЙТИ";

/// Wrapper for the top header bar
#[derive(Debug)]
pub struct HeaderTop<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    logo: Locator,
    logo_image: Locator,
    menu_links: Locator,
    overflow_menu_links: Locator,
    search_button: Locator,
    search_field: Locator,
    profile_links: Locator,
    login_button: Locator,
    account_label: Locator,
}

impl<'d, D: Document> HeaderTop<'d, D> {
    /// Bind the region to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            logo: Locator::css("a.logo-image"),
            logo_image: Locator::css("a.logo-image img"),
            menu_links: Locator::css(".header__menu-list li a"),
            overflow_menu_links: Locator::css(".hidden-menu .animate__animated a"),
            search_button: Locator::css("div.button-header.button-search"),
            search_field: Locator::id("input__search"),
            profile_links: Locator::css("div.button-header.button-profile .profile-popup__link"),
            login_button: Locator::css("div.button-header.button-acc"),
            account_label: Locator::css(".button-header.button-acc span"),
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

    // Checkers

    /// Whether the site logo is visible
    pub fn logo_visible(&self) -> Result<bool> {
        Ok(self.poll(&visible(self.logo.clone()))?.is_success())
    }

    /// Whether the search button is visible and clickable
    pub fn search_button_ready(&self) -> Result<bool> {
        let ready = AllOf::new()
            .and(visible(self.search_button.clone()))
            .and(clickable(self.search_button.clone()));
        Ok(self.poll(&ready)?.is_success())
    }

    /// Whether the account button shows an authorized session
    pub fn is_authorized(&self) -> Result<bool> {
        Ok(self.account_label_text()?.as_deref() == Some(LOGGED_IN_LABEL))
    }

    // Getters

    /// The logo image source path
    pub fn logo_src(&self) -> Result<Option<String>> {
        Ok(self
            .poll(&attribute_of(self.logo_image.clone(), "src"))?
            .into_option()
            .flatten())
    }

    /// The link the logo points at
    pub fn logo_link(&self) -> Result<Option<String>> {
        Ok(self
            .poll(&attribute_of(self.logo.clone(), "href"))?
            .into_option()
            .flatten())
    }

    /// PNG capture of the logo, for the run report
    pub fn logo_capture(&self) -> Result<Option<Vec<u8>>> {
        if !self.poll(&present(self.logo.clone()))?.is_success() {
            return Ok(None);
        }
        match self.doc.find_one(&self.logo)? {
            Some(node) => Ok(Some(node.screenshot()?)),
            None => Ok(None),
        }
    }

    /// Every top-menu item, including the hidden overflow list.
    ///
    /// Either list may legitimately be absent; absence contributes nothing
    /// rather than failing the extraction.
    pub fn menu_entries(&self) -> Result<Vec<MenuEntry>> {
        let mut entries = self
            .poll(&entries_of(self.menu_links.clone()))?
            .unwrap_or_default();
        entries.extend(
            self.poll(&entries_of(self.overflow_menu_links.clone()))?
                .unwrap_or_default(),
        );
        Ok(entries)
    }

    /// Every profile-popup link
    pub fn profile_entries(&self) -> Result<Vec<MenuEntry>> {
        Ok(self
            .poll(&entries_of(self.profile_links.clone()))?
            .unwrap_or_default())
    }

    /// The account button text, if the label is present
    pub fn account_label_text(&self) -> Result<Option<String>> {
        Ok(self
            .poll(&text_of(self.account_label.clone()))?
            .into_option())
    }

    // Actions

    /// Open the search panel and confirm the search field appears
    pub fn open_search(&self) -> Result<bool> {
        if !self.poll(&clickable(self.search_button.clone()))?.is_success() {
            return Ok(false);
        }
        let Some(button) = self.doc.find_one(&self.search_button)? else {
            return Ok(false);
        };
        button.click()?;
        info!("search button clicked");
        Ok(self.poll(&visible(self.search_field.clone()))?.is_success())
    }

    /// Click the login button.
    ///
    /// This is the modal's open trigger; the modal-visible wait belongs to
    /// the flow driving the overlay, not to this region.
    pub fn click_login_button(&self) -> Result<bool> {
        if !self.poll(&clickable(self.login_button.clone()))?.is_success() {
            return Ok(false);
        }
        match self.doc.find_one(&self.login_button)? {
            Some(button) => {
                button.click()?;
                info!("login button clicked");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
