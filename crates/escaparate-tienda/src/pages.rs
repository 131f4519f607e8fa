//! Pages: composition roots for the navigable screens.
//!
//! A page *holds* its regions; there is no base-page inheritance. The
//! shared page-wide behavior (base URL, navigation, URL-change detection)
//! comes from the embedded [`PageHandle`].

use crate::flow::{FlowError, ModalFlow};
use crate::regions::{AuthForm, AuthModal, HeaderNav, HeaderTop, PageChrome, SearchBox};
use escaparate::conditions::present;
use escaparate::{wait_for, Document, Locator, PageHandle, Result, WaitPolicy};

/// The storefront main page: top header, nav header and search box
#[derive(Debug)]
pub struct MainPage<'d, D: Document> {
    handle: PageHandle<'d, D>,
    header_top: HeaderTop<'d, D>,
    header_nav: HeaderNav<'d, D>,
    search: SearchBox<'d, D>,
}

impl<'d, D: Document> MainPage<'d, D> {
    /// Bind the page to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D, base_url: impl Into<String>) -> Self {
        Self {
            handle: PageHandle::new(doc, base_url),
            header_top: HeaderTop::new(doc),
            header_nav: HeaderNav::new(doc),
            search: SearchBox::new(doc),
        }
    }

    /// Override the wait policy for the page and all its regions
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.handle = self.handle.with_policy(policy);
        self.header_top = self.header_top.with_policy(policy);
        self.header_nav = self.header_nav.with_policy(policy);
        self.search = self.search.with_policy(policy);
        self
    }

    /// Page-wide navigation and URL state
    #[must_use]
    pub const fn handle(&self) -> &PageHandle<'d, D> {
        &self.handle
    }

    /// The top header region
    #[must_use]
    pub const fn header_top(&self) -> &HeaderTop<'d, D> {
        &self.header_top
    }

    /// The navigation header region
    #[must_use]
    pub const fn header_nav(&self) -> &HeaderNav<'d, D> {
        &self.header_nav
    }

    /// The search box region
    #[must_use]
    pub const fn search(&self) -> &SearchBox<'d, D> {
        &self.search
    }

    /// Navigate to the page's base URL.
    ///
    /// # Errors
    ///
    /// Propagates navigation faults.
    pub fn open(&self) -> Result<()> {
        self.handle.open()
    }

    /// The document title.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn title(&self) -> Result<String> {
        self.handle.title()
    }

    /// Whether the document left the base URL within policy.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn url_changed_from_base(&self) -> Result<bool> {
        self.handle.url_changed_from_base()
    }

    /// Open the login overlay and return a flow positioned on the
    /// authorization tab.
    ///
    /// # Errors
    ///
    /// [`FlowError`] when the trigger or the modal-visible wait fails.
    pub fn open_auth_modal(&self) -> std::result::Result<ModalFlow<'d, D>, FlowError> {
        let modal = AuthModal::new(self.handle.document()).with_policy(self.handle.policy());
        ModalFlow::open(&self.header_top, modal)
    }
}

/// The standalone authorization page under `/personal/`
#[derive(Debug)]
pub struct AuthorizationPage<'d, D: Document> {
    handle: PageHandle<'d, D>,
    chrome: PageChrome<'d, D>,
    form: AuthForm<'d, D>,
}

impl<'d, D: Document> AuthorizationPage<'d, D> {
    /// Bind the page to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D, page_url: impl Into<String>) -> Self {
        Self {
            handle: PageHandle::new(doc, page_url),
            chrome: PageChrome::new(doc),
            form: AuthForm::new(doc),
        }
    }

    /// Override the wait policy for the page and all its regions
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.handle = self.handle.with_policy(policy);
        self.chrome = self.chrome.with_policy(policy);
        self.form = self.form.with_policy(policy);
        self
    }

    /// Page-wide navigation and URL state
    #[must_use]
    pub const fn handle(&self) -> &PageHandle<'d, D> {
        &self.handle
    }

    /// The breadcrumbs/title/alert chrome
    #[must_use]
    pub const fn chrome(&self) -> &PageChrome<'d, D> {
        &self.chrome
    }

    /// The login form region
    #[must_use]
    pub const fn form(&self) -> &AuthForm<'d, D> {
        &self.form
    }

    /// Navigate to the page.
    ///
    /// # Errors
    ///
    /// Propagates navigation faults.
    pub fn open(&self) -> Result<()> {
        self.handle.open()
    }

    /// Fill credentials and submit.
    ///
    /// Reports whether every step was confirmed; whether the session
    /// actually became authorized is observed on the main page afterwards.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn sign_in(&self, login: &str, password: &str) -> Result<bool> {
        Ok(self.form.set_login(login)?
            && self.form.set_password(password)?
            && self.form.click_submit()?)
    }
}

/// The search results listing
#[derive(Debug)]
pub struct SearchResultsPage<'d, D: Document> {
    doc: &'d D,
    policy: WaitPolicy,
    product_block: Locator,
}

impl<'d, D: Document> SearchResultsPage<'d, D> {
    /// Bind the page to a document with the default wait policy
    #[must_use]
    pub fn new(doc: &'d D) -> Self {
        Self {
            doc,
            policy: WaitPolicy::default(),
            product_block: Locator::css(".product__block"),
        }
    }

    /// Override the page's wait policy
    #[must_use]
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of result blocks on the page; zero when none render in time.
    ///
    /// # Errors
    ///
    /// Propagates capability faults.
    pub fn result_count(&self) -> Result<usize> {
        let appeared = wait_for(self.doc, &present(self.product_block.clone()), self.policy)?;
        if !appeared.is_success() {
            return Ok(0);
        }
        Ok(self.doc.find_all(&self.product_block)?.len())
    }
}
