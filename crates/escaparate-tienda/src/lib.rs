//! Storefront verification suite built on the `escaparate` engine.
//!
//! One region per coherent subtree of the shop's UI (top header, nav
//! header, search box, auth modal, account-page chrome), composed into
//! pages by reference; an explicit state machine drives the login/
//! registration overlay; extracted menus are verified against the JSON
//! fixtures under `testdata/` without fail-fast.
//!
//! The integration tests under `tests/` drive the whole suite through the
//! engine's in-memory mock document, so they exercise the real verbs,
//! waits and comparisons without a browser.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod export;
pub mod flow;
pub mod pages;
pub mod records;
pub mod regions;

pub use flow::{FlowError, ModalFlow, ModalState, SubmitResult};
pub use pages::{AuthorizationPage, MainPage, SearchResultsPage};
pub use records::{ExpectedLink, ExpectedMenu, ProfileMenuEntry, SearchCase};
pub use regions::{AuthForm, AuthModal, HeaderNav, HeaderTop, ModalTab, PageChrome, SearchBox};
