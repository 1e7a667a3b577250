//! Verdicts: pass/fail суждения о состоянии SUT.
//!
//! `VerdictEvent` создаётся один раз на каждую проверку инварианта и пишется
//! в `VerdictLog` агента. Хост (bevy) дополнительно пересылает новые verdicts
//! как bevy events.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Результат одной проверки инварианта
#[derive(Event, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictEvent {
    pub label: String,
    pub message: String,
    pub passed: bool,
}

impl VerdictEvent {
    pub fn new(label: impl Into<String>, message: impl Into<String>, passed: bool) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
            passed,
        }
    }

    pub fn pass(label: impl Into<String>) -> Self {
        Self::new(label, "", true)
    }

    pub fn fail(label: impl Into<String>) -> Self {
        Self::new(label, "", false)
    }
}

#[derive(Debug, Default)]
struct VerdictRecords {
    events: Vec<VerdictEvent>,
    /// Сколько событий уже отдано через `take_unreported`
    reported: usize,
}

/// Verdict sink агента (cloneable handle, все клоны пишут в один log)
#[derive(Debug, Clone, Default)]
pub struct VerdictLog {
    inner: Arc<Mutex<VerdictRecords>>,
}

impl VerdictLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, VerdictRecords> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, verdict: VerdictEvent) {
        let outcome = if verdict.passed { "PASS" } else { "FAIL" };
        crate::log_info(&format!("Verdict {}: {}", outcome, verdict.label));
        self.records().events.push(verdict);
    }

    pub fn verdicts(&self) -> Vec<VerdictEvent> {
        self.records().events.clone()
    }

    pub fn len(&self) -> usize {
        self.records().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn passed_count(&self) -> usize {
        self.records().events.iter().filter(|v| v.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records().events.iter().filter(|v| !v.passed).count()
    }

    /// Пустой log тоже считается "всё прошло"
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Verdicts, записанные после предыдущего вызова
    pub fn take_unreported(&self) -> Vec<VerdictEvent> {
        let mut records = self.records();
        let total = records.events.len();
        let fresh = records.events[records.reported..].to_vec();
        records.reported = total;
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::{VerdictEvent, VerdictLog};

    #[test]
    fn test_clones_share_one_log() {
        let log = VerdictLog::new();
        let handle = log.clone();

        handle.record(VerdictEvent::pass("Object-check door1"));
        handle.record(VerdictEvent::fail("Object-check npc1"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.passed_count(), 1);
        assert_eq!(log.failed_count(), 1);
        assert!(!log.all_passed());
    }

    #[test]
    fn test_take_unreported_returns_each_verdict_once() {
        let log = VerdictLog::new();
        log.record(VerdictEvent::pass("a"));

        assert_eq!(log.take_unreported(), vec![VerdictEvent::pass("a")]);
        assert!(log.take_unreported().is_empty());

        log.record(VerdictEvent::fail("b"));
        assert_eq!(log.take_unreported(), vec![VerdictEvent::fail("b")]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_verdict_message_defaults_to_empty() {
        let verdict = VerdictEvent::fail("Object-check npc1");
        assert_eq!(verdict.message, "");
        assert!(!verdict.passed);
    }
}
