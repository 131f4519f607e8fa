//! Non-fail-fast comparison of live extractions against expected fixtures.
//!
//! A single run should surface every menu regression at once, so nothing in
//! this module stops at the first mismatch and nothing here performs I/O:
//! comparison produces one result per item, and the human-readable report is
//! a pure derived value.
//!
//! Expected link values are path *suffixes*, not full origins: the live
//! site may serve from a rotating host prefix, so matching is `ends_with`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// One live menu item: a label and the link it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Visible label, trimmed
    pub label: String,
    /// Link target, if the item carries one
    pub href: Option<String>,
}

impl MenuEntry {
    /// Create an entry
    #[must_use]
    pub fn new(label: impl Into<String>, href: Option<String>) -> Self {
        Self {
            label: label.into(),
            href,
        }
    }

    /// An entry with a link
    #[must_use]
    pub fn linked(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }
}

/// Verdict on one compared item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// What was compared (a label, or an index for ordered fixtures)
    pub subject: String,
    /// Whether the live item matched the expectation
    pub matched: bool,
    /// Why it did not match, when it did not
    pub reason: Option<String>,
}

impl ComparisonResult {
    fn ok(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            matched: true,
            reason: None,
        }
    }

    fn mismatch(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            matched: false,
            reason: Some(reason.into()),
        }
    }
}

/// Compare live menu items against a label → href-suffix map.
///
/// Membership is checked by label first: a live label absent from the map is
/// one mismatch. For known labels the live href must end with the expected
/// suffix. Every live item gets a verdict; nothing short-circuits.
#[must_use]
pub fn compare_by_label(
    live: &[MenuEntry],
    expected: &BTreeMap<String, String>,
) -> Vec<ComparisonResult> {
    live.iter()
        .map(|entry| {
            let Some(suffix) = expected.get(&entry.label) else {
                return ComparisonResult::mismatch(
                    &entry.label,
                    format!(
                        "unexpected item {:?}: not among the {} expected labels",
                        entry.label,
                        expected.len()
                    ),
                );
            };
            match &entry.href {
                Some(href) if href.ends_with(suffix) => ComparisonResult::ok(&entry.label),
                Some(href) => ComparisonResult::mismatch(
                    &entry.label,
                    format!("href {href:?} does not end with {suffix:?}"),
                ),
                None => ComparisonResult::mismatch(
                    &entry.label,
                    format!("item carries no href, expected suffix {suffix:?}"),
                ),
            }
        })
        .collect()
}

/// Length disagreement between a live extraction and an ordered fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    /// Number of live items
    pub live: usize,
    /// Number of expected items
    pub expected: usize,
}

/// Result of a positional comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedComparison {
    /// One verdict per compared index (`min(live, expected)` of them)
    pub results: Vec<ComparisonResult>,
    /// Set when the two sequences have different lengths
    pub length_mismatch: Option<LengthMismatch>,
}

impl OrderedComparison {
    /// Whether every index matched and the lengths agree
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.length_mismatch.is_none() && self.results.iter().all(|r| r.matched)
    }

    /// Number of mismatched indices (the length flag counts as one)
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.results.iter().filter(|r| !r.matched).count()
            + usize::from(self.length_mismatch.is_some())
    }
}

/// Compare an ordered live extraction against an ordered fixture.
///
/// Comparison is positional over the shorter of the two sequences; a length
/// disagreement is its own reportable discrepancy, never a silent
/// truncation. At each index the labels must be equal and, when the fixture
/// names a link, the live href must end with it.
#[must_use]
pub fn compare_in_order(live: &[MenuEntry], expected: &[MenuEntry]) -> OrderedComparison {
    let results = live
        .iter()
        .zip(expected)
        .enumerate()
        .map(|(idx, (actual, wanted))| {
            let subject = format!("#{} {}", idx + 1, wanted.label);
            if actual.label != wanted.label {
                return ComparisonResult::mismatch(
                    subject,
                    format!("label {:?}, expected {:?}", actual.label, wanted.label),
                );
            }
            match (&actual.href, &wanted.href) {
                (_, None) => ComparisonResult::ok(subject),
                (Some(href), Some(suffix)) if href.ends_with(suffix.as_str()) => {
                    ComparisonResult::ok(subject)
                }
                (Some(href), Some(suffix)) => ComparisonResult::mismatch(
                    subject,
                    format!("href {href:?} does not end with {suffix:?}"),
                ),
                (None, Some(suffix)) => ComparisonResult::mismatch(
                    subject,
                    format!("item carries no href, expected suffix {suffix:?}"),
                ),
            }
        })
        .collect();

    let length_mismatch = (live.len() != expected.len()).then_some(LengthMismatch {
        live: live.len(),
        expected: expected.len(),
    });

    OrderedComparison {
        results,
        length_mismatch,
    }
}

/// Render the numbered expected-vs-actual report for an ordered comparison.
///
/// Covers every index of the longer sequence; a side that ran out is shown
/// as `<absent>`. Pure string building, suitable for attaching to a run
/// report.
#[must_use]
pub fn render_ordered_report(live: &[MenuEntry], expected: &[MenuEntry]) -> String {
    fn rendered(entry: Option<&MenuEntry>) -> String {
        entry.map_or_else(
            || "<absent>".to_string(),
            |e| serde_json::to_string(e).unwrap_or_else(|_| format!("{e:?}")),
        )
    }

    let mut out = String::new();
    for idx in 0..live.len().max(expected.len()) {
        let _ = writeln!(
            out,
            "{}. EXPECTED: {}",
            idx + 1,
            rendered(expected.get(idx))
        );
        let _ = writeln!(out, "   ACTUAL:   {}", rendered(live.get(idx)));
    }
    out
}
