//! Bounded-poll synchronization.
//!
//! The page under test mutates on its own clock, so a single-shot query
//! proves nothing: every question is asked by re-reading the document until
//! the answer holds or a time budget runs out.
//!
//! # Design Philosophy
//!
//! - **Timeout is a value**: "not found in time" comes back as
//!   [`PollOutcome::TimedOut`], never as a raised fault. Callers decide
//!   whether that is a failure or an expected negative.
//! - **Fresh reads only**: a [`Condition`] re-queries the document on every
//!   probe; nothing is cached across probes.
//! - **Staleness is transience**: a node detaching between find and read is
//!   normalized to "not yet", not surfaced as a different error class.
//!   Capability faults unrelated to timing still propagate.

use crate::driver::Document;
use crate::result::{Error, Result};
use std::marker::PhantomData;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default wait budget (5 seconds)
pub const DEFAULT_DURATION_MS: u64 = 5_000;

/// Default polling interval (250ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

// =============================================================================
// WAIT POLICY
// =============================================================================

/// Time budget and cadence for one poll loop.
///
/// Invariant: `poll_interval <= duration` (the interval is clamped at
/// construction). A zero or near-zero duration degrades to a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    duration: Duration,
    poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_DURATION_MS),
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        )
    }
}

impl WaitPolicy {
    /// Create a policy, clamping the interval into the budget
    #[must_use]
    pub fn new(duration: Duration, poll_interval: Duration) -> Self {
        Self {
            duration,
            poll_interval: poll_interval.min(duration),
        }
    }

    /// Set the total budget
    #[must_use]
    pub fn with_duration(self, duration: Duration) -> Self {
        Self::new(duration, self.poll_interval)
    }

    /// Set the cadence
    #[must_use]
    pub fn with_poll_interval(self, poll_interval: Duration) -> Self {
        Self::new(self.duration, poll_interval)
    }

    /// Total budget
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Cadence between probes
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

// =============================================================================
// PROBE & OUTCOME
// =============================================================================

/// One probe's verdict on a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<T> {
    /// The condition does not hold yet; ask again
    Pending,
    /// The condition holds; here is the satisfying value
    Satisfied(T),
    /// The condition can never hold; further probing is pointless
    Failed,
}

impl<T> Probe<T> {
    /// Whether this probe satisfied the condition
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied(_))
    }

    /// Map the satisfying value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Probe<U> {
        match self {
            Self::Pending => Probe::Pending,
            Self::Satisfied(value) => Probe::Satisfied(f(value)),
            Self::Failed => Probe::Failed,
        }
    }
}

/// Final outcome of a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The condition held within budget
    Success(T),
    /// The budget elapsed without the condition holding
    TimedOut,
}

impl<T> PollOutcome<T> {
    /// Whether the condition held
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The satisfying value, if any
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::TimedOut => None,
        }
    }
}

impl<T: Default> PollOutcome<T> {
    /// The satisfying value, or the type's empty value on timeout.
    ///
    /// This is the getters' contract: an absent menu is an empty list, not
    /// an exception.
    pub fn unwrap_or_default(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::TimedOut => T::default(),
        }
    }
}

// =============================================================================
// CONDITION
// =============================================================================

/// A re-evaluated predicate over the remote document.
///
/// Implementations must be idempotent, side-effect-free reads: a condition
/// may query as many nodes as it likes, but it never clicks, types, or
/// navigates. Anything it learns is thrown away between probes.
pub trait Condition<D: Document> {
    /// Value produced when the condition is satisfied
    type Output;

    /// Evaluate the condition against the document as it is right now
    fn probe(&self, doc: &D) -> Result<Probe<Self::Output>>;

    /// Human-readable description for diagnostics
    fn describe(&self) -> String;
}

/// A closure-backed condition
pub struct FnCondition<F, T> {
    func: F,
    description: String,
    _output: PhantomData<T>,
}

impl<F, T> FnCondition<F, T> {
    /// Wrap a closure as a condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
            _output: PhantomData,
        }
    }
}

impl<F, T> std::fmt::Debug for FnCondition<F, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<D, F, T> Condition<D> for FnCondition<F, T>
where
    D: Document,
    F: Fn(&D) -> Result<Probe<T>>,
{
    type Output = T;

    fn probe(&self, doc: &D) -> Result<Probe<T>> {
        (self.func)(doc)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

// =============================================================================
// POLLER
// =============================================================================

/// Poll until the condition holds or the budget elapses.
///
/// Probes at the policy's cadence; every call gets its own fresh budget.
/// `Err(StaleNode)` from a probe counts as "not yet" (the document
/// re-rendered between find and read); any other capability fault
/// propagates immediately. A [`Probe::Failed`] verdict stops the loop early
/// and reports `TimedOut`, keeping the outcome vocabulary two-valued.
///
/// # Errors
///
/// Returns the first non-staleness capability fault raised by a probe.
pub fn wait_for<D, C>(doc: &D, condition: &C, policy: WaitPolicy) -> Result<PollOutcome<C::Output>>
where
    D: Document,
    C: Condition<D>,
{
    let start = Instant::now();
    loop {
        match condition.probe(doc) {
            Ok(Probe::Satisfied(value)) => {
                trace!(condition = %condition.describe(), elapsed = ?start.elapsed(), "condition satisfied");
                return Ok(PollOutcome::Success(value));
            }
            Ok(Probe::Failed) => {
                debug!(condition = %condition.describe(), "condition reported unsatisfiable");
                return Ok(PollOutcome::TimedOut);
            }
            Ok(Probe::Pending) => {}
            Err(Error::StaleNode) => {
                trace!(condition = %condition.describe(), "stale node during probe, retrying");
            }
            Err(fault) => return Err(fault),
        }
        if start.elapsed() >= policy.duration() {
            debug!(condition = %condition.describe(), budget = ?policy.duration(), "wait timed out");
            return Ok(PollOutcome::TimedOut);
        }
        std::thread::sleep(policy.poll_interval());
    }
}

/// Poll until the condition stops holding.
///
/// The dual of [`wait_for`], used for "modal closed" and "panel collapsed"
/// checks: the first probe on which the condition is *not* satisfied is
/// success. Staleness counts as absence: a handle that died points at an
/// element that is gone.
///
/// # Errors
///
/// Returns the first non-staleness capability fault raised by a probe.
pub fn wait_until_absent<D, C>(
    doc: &D,
    condition: &C,
    policy: WaitPolicy,
) -> Result<PollOutcome<()>>
where
    D: Document,
    C: Condition<D>,
{
    let start = Instant::now();
    loop {
        match condition.probe(doc) {
            Ok(Probe::Pending | Probe::Failed) | Err(Error::StaleNode) => {
                trace!(condition = %condition.describe(), elapsed = ?start.elapsed(), "condition absent");
                return Ok(PollOutcome::Success(()));
            }
            Ok(Probe::Satisfied(_)) => {}
            Err(fault) => return Err(fault),
        }
        if start.elapsed() >= policy.duration() {
            debug!(condition = %condition.describe(), budget = ?policy.duration(), "condition still holding at deadline");
            return Ok(PollOutcome::TimedOut);
        }
        std::thread::sleep(policy.poll_interval());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::MockDocument;
    use std::cell::Cell;

    fn counting_condition(
        satisfied_on: u32,
        counter: &Cell<u32>,
    ) -> FnCondition<impl Fn(&MockDocument) -> Result<Probe<u32>> + '_, u32> {
        FnCondition::new(
            move |_doc: &MockDocument| {
                let n = counter.get() + 1;
                counter.set(n);
                if n >= satisfied_on {
                    Ok(Probe::Satisfied(n))
                } else {
                    Ok(Probe::Pending)
                }
            },
            "counting condition",
        )
    }

    mod policy_tests {
        use super::*;

        #[test]
        fn test_default_policy() {
            let policy = WaitPolicy::default();
            assert_eq!(policy.duration(), Duration::from_millis(5_000));
            assert_eq!(policy.poll_interval(), Duration::from_millis(250));
        }

        #[test]
        fn test_interval_clamped_to_duration() {
            let policy = WaitPolicy::new(Duration::from_millis(100), Duration::from_secs(10));
            assert_eq!(policy.poll_interval(), Duration::from_millis(100));
        }

        #[test]
        fn test_with_duration_reclamps() {
            let policy = WaitPolicy::new(Duration::from_secs(5), Duration::from_secs(1))
                .with_duration(Duration::from_millis(200));
            assert_eq!(policy.poll_interval(), Duration::from_millis(200));
        }

        #[test]
        fn test_builder_chain() {
            let policy = WaitPolicy::default()
                .with_duration(Duration::from_secs(2))
                .with_poll_interval(Duration::from_millis(20));
            assert_eq!(policy.duration(), Duration::from_secs(2));
            assert_eq!(policy.poll_interval(), Duration::from_millis(20));
        }
    }

    mod probe_tests {
        use super::*;

        #[test]
        fn test_probe_map() {
            let probe = Probe::Satisfied(2).map(|n| n * 10);
            assert_eq!(probe, Probe::Satisfied(20));
            assert_eq!(Probe::<u32>::Pending.map(|n| n * 10), Probe::Pending);
        }

        #[test]
        fn test_outcome_accessors() {
            assert!(PollOutcome::Success(1).is_success());
            assert!(!PollOutcome::<u32>::TimedOut.is_success());
            assert_eq!(PollOutcome::Success(7).into_option(), Some(7));
            assert_eq!(PollOutcome::<u32>::TimedOut.into_option(), None);
            assert_eq!(
                PollOutcome::<Vec<u32>>::TimedOut.unwrap_or_default(),
                Vec::<u32>::new()
            );
        }
    }

    mod wait_for_tests {
        use super::*;

        #[test]
        fn test_immediate_success() {
            let doc = MockDocument::new("https://example.test/");
            let probes = Cell::new(0);
            let condition = counting_condition(1, &probes);
            let policy = WaitPolicy::new(Duration::from_millis(100), Duration::from_millis(10));
            let outcome = wait_for(&doc, &condition, policy).unwrap();
            assert_eq!(outcome, PollOutcome::Success(1));
        }

        #[test]
        fn test_success_after_retries() {
            let doc = MockDocument::new("https://example.test/");
            let probes = Cell::new(0);
            let condition = counting_condition(4, &probes);
            let policy = WaitPolicy::new(Duration::from_millis(500), Duration::from_millis(5));
            let outcome = wait_for(&doc, &condition, policy).unwrap();
            assert_eq!(outcome, PollOutcome::Success(4));
        }

        #[test]
        fn test_timeout_for_never_condition() {
            let doc = MockDocument::new("https://example.test/");
            let condition = FnCondition::new(
                |_doc: &MockDocument| Ok(Probe::<()>::Pending),
                "never satisfied",
            );
            let policy = WaitPolicy::new(Duration::from_millis(80), Duration::from_millis(10));

            let start = Instant::now();
            let outcome = wait_for(&doc, &condition, policy).unwrap();
            let elapsed = start.elapsed();

            assert_eq!(outcome, PollOutcome::TimedOut);
            // Blocks at least duration - poll_interval, and not wildly more.
            assert!(elapsed >= Duration::from_millis(70), "elapsed {elapsed:?}");
            assert!(elapsed < Duration::from_millis(500), "elapsed {elapsed:?}");
        }

        #[test]
        fn test_zero_duration_probes_exactly_once() {
            let doc = MockDocument::new("https://example.test/");
            let probes = Cell::new(0);
            let condition = counting_condition(u32::MAX, &probes);
            let policy = WaitPolicy::new(Duration::ZERO, Duration::from_millis(10));
            let outcome = wait_for(&doc, &condition, policy).unwrap();
            assert_eq!(outcome, PollOutcome::TimedOut);
            assert_eq!(probes.get(), 1);
        }

        #[test]
        fn test_fresh_budget_per_call() {
            let doc = MockDocument::new("https://example.test/");
            let policy = WaitPolicy::new(Duration::from_millis(40), Duration::from_millis(10));
            let condition = FnCondition::new(
                |_doc: &MockDocument| Ok(Probe::<()>::Pending),
                "never satisfied",
            );
            for _ in 0..2 {
                let start = Instant::now();
                let outcome = wait_for(&doc, &condition, policy).unwrap();
                assert_eq!(outcome, PollOutcome::TimedOut);
                assert!(start.elapsed() >= Duration::from_millis(30));
            }
        }

        #[test]
        fn test_failed_probe_short_circuits() {
            let doc = MockDocument::new("https://example.test/");
            let probes = Cell::new(0);
            let condition = FnCondition::new(
                |_doc: &MockDocument| {
                    probes.set(probes.get() + 1);
                    Ok(Probe::<()>::Failed)
                },
                "unsatisfiable",
            );
            let policy = WaitPolicy::new(Duration::from_secs(5), Duration::from_millis(10));
            let start = Instant::now();
            let outcome = wait_for(&doc, &condition, policy).unwrap();
            assert_eq!(outcome, PollOutcome::TimedOut);
            assert_eq!(probes.get(), 1);
            assert!(start.elapsed() < Duration::from_millis(500));
        }

        #[test]
        fn test_stale_node_is_absorbed() {
            let doc = MockDocument::new("https://example.test/");
            let probes = Cell::new(0u32);
            let condition = FnCondition::new(
                |_doc: &MockDocument| {
                    let n = probes.get() + 1;
                    probes.set(n);
                    if n < 3 {
                        Err(Error::StaleNode)
                    } else {
                        Ok(Probe::Satisfied(()))
                    }
                },
                "stale twice then satisfied",
            );
            let policy = WaitPolicy::new(Duration::from_millis(500), Duration::from_millis(5));
            let outcome = wait_for(&doc, &condition, policy).unwrap();
            assert!(outcome.is_success());
        }

        #[test]
        fn test_capability_fault_propagates() {
            let doc = MockDocument::new("https://example.test/");
            let condition = FnCondition::new(
                |_doc: &MockDocument| Err::<Probe<()>, _>(Error::driver("session lost")),
                "faulting",
            );
            let policy = WaitPolicy::new(Duration::from_millis(100), Duration::from_millis(10));
            let err = wait_for(&doc, &condition, policy).unwrap_err();
            assert!(matches!(err, Error::Driver { .. }));
        }
    }

    mod wait_until_absent_tests {
        use super::*;

        #[test]
        fn test_absent_immediately() {
            let doc = MockDocument::new("https://example.test/");
            let condition =
                FnCondition::new(|_doc: &MockDocument| Ok(Probe::<()>::Pending), "absent");
            let policy = WaitPolicy::new(Duration::from_millis(100), Duration::from_millis(10));
            let outcome = wait_until_absent(&doc, &condition, policy).unwrap();
            assert!(outcome.is_success());
        }

        #[test]
        fn test_becomes_absent() {
            let doc = MockDocument::new("https://example.test/");
            let probes = Cell::new(0u32);
            let condition = FnCondition::new(
                |_doc: &MockDocument| {
                    let n = probes.get() + 1;
                    probes.set(n);
                    if n < 3 {
                        Ok(Probe::Satisfied(()))
                    } else {
                        Ok(Probe::Pending)
                    }
                },
                "present twice then gone",
            );
            let policy = WaitPolicy::new(Duration::from_millis(500), Duration::from_millis(5));
            let outcome = wait_until_absent(&doc, &condition, policy).unwrap();
            assert!(outcome.is_success());
        }

        #[test]
        fn test_still_present_times_out() {
            let doc = MockDocument::new("https://example.test/");
            let condition = FnCondition::new(
                |_doc: &MockDocument| Ok(Probe::Satisfied(())),
                "always present",
            );
            let policy = WaitPolicy::new(Duration::from_millis(60), Duration::from_millis(10));
            let outcome = wait_until_absent(&doc, &condition, policy).unwrap();
            assert_eq!(outcome, PollOutcome::TimedOut);
        }

        #[test]
        fn test_stale_counts_as_absent() {
            let doc = MockDocument::new("https://example.test/");
            let condition = FnCondition::new(
                |_doc: &MockDocument| Err::<Probe<()>, _>(Error::StaleNode),
                "stale handle",
            );
            let policy = WaitPolicy::new(Duration::from_millis(100), Duration::from_millis(10));
            let outcome = wait_until_absent(&doc, &condition, policy).unwrap();
            assert!(outcome.is_success());
        }
    }
}
