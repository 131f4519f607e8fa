//! Shared mock storefront for the integration tests.
//!
//! Builds a scripted in-memory document whose markup mirrors the committed
//! fixtures, so the fixture-driven tests verify against the same data the
//! mock renders. Tests add their own click effects on top for the
//! scenario they exercise.

// Not every test binary uses every helper.
#![allow(dead_code)]

use escaparate::mock::{Effect, MockDocument, NodeSpec};
use escaparate::testdata::load_required;
use escaparate::{Locator, WaitPolicy};
use escaparate_tienda::records::{testdata_path, ExpectedLink, ExpectedMenu};
use std::collections::BTreeMap;
use std::sync::Once;
use std::time::Duration;

pub const BASE_URL: &str = "https://shop.example/";

/// A tight policy so negative waits don't slow the suite down
pub fn quick() -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(200), Duration::from_millis(10))
}

pub fn init_tracing() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Locators mirroring the storefront markup the regions expect
pub mod sel {
    use escaparate::Locator;

    pub fn logo() -> Locator {
        Locator::css("a.logo-image")
    }
    pub fn logo_image() -> Locator {
        Locator::css("a.logo-image img")
    }
    pub fn nav_logo() -> Locator {
        Locator::css("a.header__nav-logo")
    }
    pub fn nav_logo_image() -> Locator {
        Locator::css("a.header__nav-logo img")
    }
    pub fn top_menu_link() -> Locator {
        Locator::css(".header__menu-list li a")
    }
    pub fn nav_menu_link() -> Locator {
        Locator::css(".navbar__menu .navbar__item .navbar__link")
    }
    pub fn submenu_link() -> Locator {
        Locator::css("ul.navbar__submenu li.navbar__submenu-item a.navbar__submenu-link")
    }
    pub fn profile_link() -> Locator {
        Locator::css("div.button-header.button-profile .profile-popup__link")
    }
    pub fn search_button() -> Locator {
        Locator::css("div.button-header.button-search")
    }
    pub fn search_field() -> Locator {
        Locator::id("input__search")
    }
    pub fn search_submit() -> Locator {
        Locator::css(".form-actions .button-style.button-style--red")
    }
    pub fn search_cancel() -> Locator {
        Locator::css(".form-actions .search-close-btn")
    }
    pub fn login_button() -> Locator {
        Locator::css("div.button-header.button-acc")
    }
    pub fn account_label() -> Locator {
        Locator::css(".button-header.button-acc span")
    }

    pub fn modal_window() -> Locator {
        Locator::css("div.popup-auth__inner")
    }
    pub fn modal_title() -> Locator {
        Locator::css("h3.auth__title")
    }
    pub fn modal_close() -> Locator {
        Locator::css(".close-auth")
    }
    pub fn inactive_tab_link() -> Locator {
        Locator::css(".auth__tab .ajax-link")
    }
    pub fn registration_tab() -> Locator {
        Locator::css(".auth__tab a#regst")
    }
    pub fn auth_email() -> Locator {
        Locator::css("input[name='USER_LOGIN']")
    }
    pub fn auth_email_label() -> Locator {
        Locator::xpath("//div[@class='input-style'][.//input[@name='USER_LOGIN']]/label")
    }
    pub fn auth_password() -> Locator {
        Locator::css("input[name='USER_PASSWORD']")
    }
    pub fn auth_password_label() -> Locator {
        Locator::xpath("//div[@class='input-style'][.//input[@name='USER_PASSWORD']]/label")
    }
    pub fn password_toggle() -> Locator {
        Locator::css(".input-style .pass-view")
    }
    pub fn checkbox_label() -> Locator {
        Locator::css(".input-checkbox-circle")
    }
    pub fn checkbox_input() -> Locator {
        Locator::css(".input-checkbox-circle input")
    }
    pub fn forgot_password() -> Locator {
        Locator::css(".forgot-pass")
    }
    pub fn auth_submit() -> Locator {
        Locator::css("button[type='submit'][name='Login']")
    }
    pub fn reg_first_name() -> Locator {
        Locator::css("input[name='REGISTER[NAME]']")
    }
    pub fn reg_first_name_label() -> Locator {
        Locator::xpath("//div[@class='input-style'][.//input[@name='REGISTER[NAME]']]/label")
    }
    pub fn reg_last_name() -> Locator {
        Locator::css("input[name='REGISTER[LAST_NAME]']")
    }
    pub fn reg_last_name_label() -> Locator {
        Locator::xpath("//div[@class='input-style'][.//input[@name='REGISTER[LAST_NAME]']]/label")
    }
    pub fn reg_email() -> Locator {
        Locator::css("input[name='REGISTER[EMAIL]']")
    }
    pub fn reg_email_label() -> Locator {
        Locator::xpath("//div[@class='input-style'][.//input[@name='REGISTER[EMAIL]']]/label")
    }
    pub fn policy_link() -> Locator {
        Locator::css(".policy-info a")
    }
    pub fn reg_submit() -> Locator {
        Locator::css("button[type='submit'][name='register_submit_button']")
    }
    pub fn error_block() -> Locator {
        Locator::css(".errortext")
    }
    pub fn auth_success_block() -> Locator {
        Locator::css(".uk-modal-content div")
    }
    pub fn reg_success_block() -> Locator {
        Locator::css(".uk-modal-content p")
    }

    pub fn breadcrumb() -> Locator {
        Locator::css("div.breadcrumbs-item")
    }
    pub fn page_title() -> Locator {
        Locator::css("h1.page-title")
    }
    pub fn alert() -> Locator {
        Locator::css("div.alert-danger")
    }
    pub fn product_block() -> Locator {
        Locator::css(".product__block")
    }
}

fn absolute(suffix: &str) -> String {
    format!("{}{}", BASE_URL.trim_end_matches('/'), suffix)
}

fn insert_menu_from_map(doc: &MockDocument, locator: &Locator, fixture: &str) {
    let expected: ExpectedMenu = load_required(testdata_path(fixture)).expect("fixture parses");
    for (label, suffix) in &expected {
        doc.insert(
            NodeSpec::new(locator.clone())
                .text(label.clone())
                .attribute("href", absolute(suffix)),
        );
    }
}

fn insert_menu_from_links(doc: &MockDocument, locator: &Locator, links: &[ExpectedLink]) {
    for link in links {
        doc.insert(
            NodeSpec::new(locator.clone())
                .text(link.text.clone())
                .attribute("href", absolute(&link.href)),
        );
    }
}

/// The storefront main page as the guest sees it
pub fn storefront() -> MockDocument {
    init_tracing();
    let doc = MockDocument::new(BASE_URL);
    doc.set_title("Velera — веломагазин");

    // Header logos
    doc.insert(NodeSpec::new(sel::logo()).attribute("href", BASE_URL));
    doc.insert(NodeSpec::new(sel::logo_image()).attribute("src", absolute("/images/logo.png")));
    doc.insert(NodeSpec::new(sel::nav_logo()).attribute("href", BASE_URL));
    doc.insert(
        NodeSpec::new(sel::nav_logo_image()).attribute("src", absolute("/images/velera-nav.png")),
    );

    // Menus, mirrored from the committed fixtures
    insert_menu_from_map(&doc, &sel::top_menu_link(), "expected_top_header_items.json");
    insert_menu_from_map(&doc, &sel::nav_menu_link(), "expected_nav_header_items.json");

    let submenu: Vec<ExpectedLink> =
        load_required(testdata_path("expected_navbar_submenu.json")).expect("fixture parses");
    insert_menu_from_links(&doc, &sel::submenu_link(), &submenu);

    let profile: Vec<escaparate_tienda::records::ProfileMenuEntry> =
        load_required(testdata_path("expected_profile_menu_guest.json")).expect("fixture parses");
    let profile_links: Vec<ExpectedLink> = profile
        .iter()
        .map(|entry| ExpectedLink {
            text: entry.text.clone(),
            href: entry.href.clone(),
        })
        .collect();
    insert_menu_from_links(&doc, &sel::profile_link(), &profile_links);

    // Account button (guest)
    doc.insert(NodeSpec::new(sel::login_button()));
    doc.insert(NodeSpec::new(sel::account_label()).text("ВОЙТИ"));

    // Search panel, collapsed until the search button is clicked
    doc.insert(NodeSpec::new(sel::search_button()));
    doc.insert(NodeSpec::new(sel::search_field()).hidden());
    doc.insert(NodeSpec::new(sel::search_submit()).hidden());
    doc.insert(NodeSpec::new(sel::search_cancel()).hidden());
    doc.on_click(
        &sel::search_button(),
        vec![
            Effect::Show(sel::search_field()),
            Effect::Show(sel::search_submit()),
            Effect::Show(sel::search_cancel()),
        ],
    );
    doc.on_click(
        &sel::search_cancel(),
        vec![
            Effect::Hide(sel::search_field()),
            Effect::Hide(sel::search_submit()),
            Effect::Hide(sel::search_cancel()),
        ],
    );

    doc
}

/// Add the (hidden) auth modal and wire the login button to open it
pub fn with_auth_modal(doc: &MockDocument) {
    doc.insert(NodeSpec::new(sel::modal_window()).hidden());
    doc.insert(NodeSpec::new(sel::modal_title()).text("АВТОРИЗАЦИЯ").hidden());
    doc.insert(NodeSpec::new(sel::modal_close()).hidden());
    doc.insert(
        NodeSpec::new(sel::registration_tab())
            .also_matches(sel::inactive_tab_link())
            .text("Регистрация")
            .attribute("href", absolute("/local/ajax/auth.php?register=yes"))
            .hidden(),
    );

    // Authorization tab
    doc.insert(NodeSpec::new(sel::auth_email()).hidden());
    doc.insert(NodeSpec::new(sel::auth_email_label()).text("Эл. почта").hidden());
    doc.insert(
        NodeSpec::new(sel::auth_password())
            .attribute("type", "password")
            .hidden(),
    );
    doc.insert(NodeSpec::new(sel::auth_password_label()).text("Пароль").hidden());
    doc.insert(NodeSpec::new(sel::password_toggle()).hidden());
    doc.insert(NodeSpec::new(sel::checkbox_label()).hidden());
    doc.insert(NodeSpec::new(sel::checkbox_input()).hidden());
    doc.insert(
        NodeSpec::new(sel::forgot_password())
            .attribute(
                "href",
                absolute("/local/ajax/auth.php?forgot_password=yes"),
            )
            .hidden(),
    );
    doc.insert(
        NodeSpec::new(sel::auth_submit())
            .text("ВОЙТИ")
            .attribute("value", "Войти")
            .hidden(),
    );

    // Registration tab, rendered after the tab switch
    doc.insert(NodeSpec::new(sel::reg_first_name()).hidden());
    doc.insert(NodeSpec::new(sel::reg_first_name_label()).text("Имя:").hidden());
    doc.insert(NodeSpec::new(sel::reg_last_name()).hidden());
    doc.insert(NodeSpec::new(sel::reg_last_name_label()).text("Фамилия:").hidden());
    doc.insert(NodeSpec::new(sel::reg_email()).hidden());
    doc.insert(NodeSpec::new(sel::reg_email_label()).text("Адрес e-mail:").hidden());
    doc.insert(
        NodeSpec::new(sel::policy_link())
            .text("политикой конфиденциальности")
            .attribute("href", absolute("/policy/"))
            .hidden(),
    );
    doc.insert(
        NodeSpec::new(sel::reg_submit())
            .text("РЕГИСТРАЦИЯ")
            .attribute("value", "Регистрация")
            .hidden(),
    );

    doc.on_click(
        &sel::login_button(),
        vec![
            Effect::Show(sel::modal_window()),
            Effect::Show(sel::modal_title()),
            Effect::Show(sel::modal_close()),
            Effect::Show(sel::registration_tab()),
            Effect::Show(sel::auth_email()),
            Effect::Show(sel::auth_email_label()),
            Effect::Show(sel::auth_password()),
            Effect::Show(sel::auth_password_label()),
            Effect::Show(sel::password_toggle()),
            Effect::Show(sel::checkbox_label()),
            Effect::Show(sel::checkbox_input()),
            Effect::Show(sel::forgot_password()),
            Effect::Show(sel::auth_submit()),
        ],
    );
    doc.on_click(
        &sel::registration_tab(),
        vec![
            Effect::SetText(sel::modal_title(), "РЕГИСТРАЦИЯ".into()),
            Effect::Hide(sel::auth_email()),
            Effect::Hide(sel::auth_email_label()),
            Effect::Hide(sel::auth_password()),
            Effect::Hide(sel::auth_password_label()),
            Effect::Hide(sel::password_toggle()),
            Effect::Hide(sel::forgot_password()),
            Effect::Hide(sel::auth_submit()),
            Effect::Show(sel::reg_first_name()),
            Effect::Show(sel::reg_first_name_label()),
            Effect::Show(sel::reg_last_name()),
            Effect::Show(sel::reg_last_name_label()),
            Effect::Show(sel::reg_email()),
            Effect::Show(sel::reg_email_label()),
            Effect::Show(sel::policy_link()),
            Effect::Show(sel::reg_submit()),
        ],
    );
    doc.on_click(&sel::modal_close(), vec![Effect::Hide(sel::modal_window())]);
    doc.on_click(
        &sel::checkbox_label(),
        vec![Effect::ToggleSelected(sel::checkbox_input())],
    );
    doc.on_click(
        &sel::password_toggle(),
        vec![Effect::ToggleAttribute(
            sel::auth_password(),
            "type".into(),
            "text".into(),
            "password".into(),
        )],
    );
}

/// An account page: chrome built from the given expectations
pub fn account_page(
    url: &str,
    breadcrumbs: &[String],
    title: &str,
    alert: Option<&str>,
) -> MockDocument {
    init_tracing();
    let doc = MockDocument::new(url.to_string());
    for crumb in breadcrumbs {
        doc.insert(NodeSpec::new(sel::breadcrumb()).text(crumb.clone()));
    }
    doc.insert(NodeSpec::new(sel::page_title()).text(title));
    if let Some(alert_text) = alert {
        doc.insert(NodeSpec::new(sel::alert()).text(alert_text));
    }
    doc
}

/// Map a profile fixture's records to a label → href map for comparison
pub fn profile_map(entries: &[escaparate_tienda::records::ProfileMenuEntry]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|entry| (entry.text.clone(), entry.href.clone()))
        .collect()
}
