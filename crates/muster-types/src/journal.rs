//! Diagnostic journal for batch planning operations
//!
//! Soft-constraint violations never abort an operation; they are written
//! here instead, alongside provenance notes for automatic repairs. A
//! fresh journal is started per user-triggered batch and is deliberately
//! not part of persisted session state.

/// How serious a journal line is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Informational provenance (what a repair pass did)
    Note,
    /// A soft constraint was left violated
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One journal line
#[derive(Clone, Debug, PartialEq)]
pub struct JournalEntry {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Append-only log of one batch operation
#[derive(Clone, Debug, Default)]
pub struct PlanJournal {
    entries: Vec<JournalEntry>,
}

impl PlanJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.entries.push(JournalEntry {
            severity: Severity::Note,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push(JournalEntry {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable rendering, in insertion order
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}
