//! Navigation header: catalog logo, nav menu, ordered catalog submenu.

use escaparate::conditions::{attribute_of, entries_of, visible};
use escaparate::{wait_for, Document, Locator, MenuEntry, PollOutcome, Result, WaitPolicy};

/// Wrapper for the navigation header below the top bar
#[derive(Debug)]
pub struct HeaderNav<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    logo: Locator,
    logo_image: Locator,
    menu_links: Locator,
    submenu_links: Locator,
}

impl<'d, D: Document> HeaderNav<'d, D> {
    /// Bind the region to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            logo: Locator::css("a.header__nav-logo"),
            logo_image: Locator::css("a.header__nav-logo img"),
            menu_links: Locator::css(".navbar__menu .navbar__item .navbar__link"),
            submenu_links: Locator::css(
                "ul.navbar__submenu li.navbar__submenu-item a.navbar__submenu-link",
            ),
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

    /// Whether the navigation logo is visible
    pub fn logo_visible(&self) -> Result<bool> {
        Ok(self.poll(&visible(self.logo.clone()))?.is_success())
    }

    /// The navigation logo image source path
    pub fn logo_src(&self) -> Result<Option<String>> {
        Ok(self
            .poll(&attribute_of(self.logo_image.clone(), "src"))?
            .into_option()
            .flatten())
    }

    /// The link the navigation logo points at
    pub fn logo_link(&self) -> Result<Option<String>> {
        Ok(self
            .poll(&attribute_of(self.logo.clone(), "href"))?
            .into_option()
            .flatten())
    }

    /// Every nav-menu item
    pub fn menu_entries(&self) -> Result<Vec<MenuEntry>> {
        Ok(self
            .poll(&entries_of(self.menu_links.clone()))?
            .unwrap_or_default())
    }

    /// The catalog submenu, in document order.
    ///
    /// Order matters: the submenu is verified positionally against an
    /// ordered fixture.
    pub fn submenu_entries(&self) -> Result<Vec<MenuEntry>> {
        Ok(self
            .poll(&entries_of(self.submenu_links.clone()))?
            .unwrap_or_default())
    }
}
