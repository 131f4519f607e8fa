//! Escaparate: synchronization engine and page/component model for
//! verifying a live, asynchronously-rendered storefront UI.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     ESCAPARATE Architecture                      │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌───────────┐     ┌─────────────┐     ┌───────────────────┐    │
//! │   │  Regions   │────►│ Conditions  │────►│ Remote document   │    │
//! │   │  & Pages   │     │ + Poller    │     │ capability        │    │
//! │   └───────────┘     └─────────────┘     │ (driver / mock)   │    │
//! │        │                                └───────────────────┘    │
//! │        ▼                                                         │
//! │   ┌───────────┐     ┌─────────────┐                              │
//! │   │ Comparator │────►│ Checks +    │                              │
//! │   │ (fixtures) │     │ attachments │                              │
//! │   └───────────┘     └─────────────┘                              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The page under test mutates on its own schedule, so every question is a
//! bounded poll ([`wait_for`] / [`wait_until_absent`]) over a re-evaluated
//! [`Condition`], never a single-shot read. Regions group the verbs for one
//! subtree behind checkers (timeout ⇒ `false`), getters (timeout ⇒ empty)
//! and confirmed actions; pages compose regions by reference. Extracted
//! menus are compared against JSON fixtures without fail-fast, and every
//! failed expectation can carry a diagnostic attachment.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod compare;
pub mod conditions;
pub mod config;
pub mod driver;
pub mod locator;
pub mod mock;
pub mod page;
pub mod persona;
pub mod report;
mod result;
pub mod testdata;
pub mod wait;

pub use compare::{
    compare_by_label, compare_in_order, render_ordered_report, ComparisonResult, LengthMismatch,
    MenuEntry, OrderedComparison,
};
pub use config::Config;
pub use driver::{Document, Node};
pub use locator::{Locator, Selector};
pub use page::PageHandle;
pub use persona::{Persona, PersonaGenerator};
pub use report::{Attachment, AttachmentKind, CheckFailures, Checks};
pub use result::{Error, Result};
pub use wait::{
    wait_for, wait_until_absent, Condition, FnCondition, PollOutcome, Probe, WaitPolicy,
};
