//! Bounded calculation history
//!
//! Keeps at most `max_size` entries in insertion order. Appending past the
//! bound evicts the oldest entries. Readers always receive owned copies.

use crate::error::{CalcError, Result};
use crate::number::Number;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use tracing::{debug, trace};

/// Default capacity of a [`HistoryBuffer`]
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Default absolute tolerance for [`HistoryBuffer::search_by_result`]
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

const EMPTY_EXPORT: &str = "No calculation history";

/// One recorded calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub operation: String,
    pub operands: Vec<Number>,
    pub result: Number,
}

impl HistoryEntry {
    pub fn new(operation: impl Into<String>, operands: Vec<Number>, result: Number) -> Self {
        Self {
            operation: operation.into(),
            operands,
            result,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", operand)?;
        }
        write!(f, ") = {}", self.result)
    }
}

/// Aggregate counts over the whole buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStatistics {
    pub total: usize,
    pub operations: BTreeMap<String, usize>,
}

/// Insertion-ordered log with drop-oldest eviction
///
/// Not synchronized; wrap it in a lock when sharing across threads.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    max_size: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    /// Buffer holding up to [`DEFAULT_MAX_SIZE`] entries
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Buffer holding up to `max_size` entries
    ///
    /// # Errors
    /// [`CalcError::InvalidConfig`] if `max_size` is zero.
    pub fn with_max_size(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(CalcError::invalid_config(
                "history max_size must be at least 1",
            ));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(max_size.min(DEFAULT_MAX_SIZE)),
            max_size,
        })
    }

    /// Append an entry, evicting the oldest ones beyond `max_size`
    ///
    /// Operands are stored as given; they are not checked against the
    /// operation's arity.
    pub fn add(&mut self, operation: impl Into<String>, operands: Vec<Number>, result: Number) {
        self.push(HistoryEntry::new(operation, operands, result));
    }

    /// Append a prepared entry
    pub fn push(&mut self, entry: HistoryEntry) {
        trace!(operation = %entry.operation, result = %entry.result, "history add");
        self.entries.push_back(entry);

        let mut evicted = 0usize;
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, max_size = self.max_size, "history trimmed");
        }
    }

    /// The `n` most recent entries, oldest first
    pub fn get_last(&self, n: usize) -> Vec<HistoryEntry> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(start).cloned().collect()
    }

    /// Copy of every entry in insertion order
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn filter_by_operation(&self, operation: &str) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.operation == operation)
            .cloned()
            .collect()
    }

    /// Entries whose result matches `value`
    ///
    /// Integer results are compared exactly against integer queries; any
    /// float on either side is matched within `tolerance`.
    pub fn search_by_result(&self, value: Number, tolerance: f64) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| match (e.result, value) {
                (Number::Int(stored), Number::Int(wanted)) => stored == wanted,
                (stored, wanted) => (stored.as_f64() - wanted.as_f64()).abs() <= tolerance,
            })
            .cloned()
            .collect()
    }

    pub fn get_statistics(&self) -> HistoryStatistics {
        let mut operations = BTreeMap::new();
        for entry in &self.entries {
            *operations.entry(entry.operation.clone()).or_insert(0) += 1;
        }
        HistoryStatistics {
            total: self.entries.len(),
            operations,
        }
    }

    /// Human-readable report, one numbered line per entry
    pub fn export_as_string(&self) -> String {
        if self.entries.is_empty() {
            return EMPTY_EXPORT.to_string();
        }

        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push("Calculation History:".to_string());
        lines.push("=".repeat(50));
        for (i, entry) in self.entries.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, entry));
        }
        lines.join("\n")
    }

    /// Entries as a pretty-printed JSON array
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.entries.len(), "history cleared");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl fmt::Display for HistoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HistoryBuffer(size={}, max_size={})",
            self.entries.len(),
            self.max_size
        )
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn int(v: i64) -> Number {
        Number::Int(v)
    }

    fn float(v: f64) -> Number {
        Number::Float(v)
    }

    #[test]
    fn test_add_entry() {
        let mut history = HistoryBuffer::new();
        history.add("add", vec![int(2), int(3)], int(5));
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_get_last() {
        let mut history = HistoryBuffer::new();
        history.add("add", vec![int(2), int(3)], int(5));
        history.add("multiply", vec![int(4), int(5)], int(20));

        let last = history.get_last(1);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].operation, "multiply");

        // Chronological order inside the window
        let last_two = history.get_last(2);
        assert_eq!(last_two[0].operation, "add");
        assert_eq!(last_two[1].operation, "multiply");

        assert_eq!(history.get_last(10).len(), 2);
        assert!(history.get_last(0).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryBuffer::new();
        history.add("add", vec![int(2), int(3)], int(5));
        history.clear();
        assert_eq!(history.len(), 0);
        assert_eq!(history.export_as_string(), "No calculation history");
    }

    #[test]
    fn test_max_size() {
        let mut history = HistoryBuffer::with_max_size(2).unwrap();
        history.add("add", vec![int(1), int(1)], int(2));
        history.add("add", vec![int(2), int(2)], int(4));
        history.add("add", vec![int(3), int(3)], int(6));

        assert_eq!(history.len(), 2);
        let all = history.get_all();
        assert_eq!(all[0].result, int(4));
        assert_eq!(all[1].result, int(6));
    }

    #[test]
    fn test_zero_max_size_rejected() {
        assert!(matches!(
            HistoryBuffer::with_max_size(0),
            Err(CalcError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_get_all_is_a_copy() {
        let mut history = HistoryBuffer::new();
        history.add("add", vec![int(1), int(2)], int(3));

        let first = history.get_all();
        let mut second = history.get_all();
        assert_eq!(first, second);

        second.clear();
        second.push(HistoryEntry::new("bogus", vec![], int(0)));
        assert_eq!(history.len(), 1);
        assert_eq!(history.get_all(), first);
    }

    #[test]
    fn test_filter_by_operation() {
        let mut history = HistoryBuffer::new();
        history.add("add", vec![int(1), int(2)], int(3));
        history.add("multiply", vec![int(2), int(3)], int(6));
        history.add("add", vec![int(4), int(5)], int(9));

        let adds = history.filter_by_operation("add");
        assert_eq!(adds.len(), 2);
        assert_eq!(adds[0].result, int(3));
        assert_eq!(adds[1].result, int(9));
        assert!(history.filter_by_operation("divide").is_empty());
    }

    #[test]
    fn test_search_by_result() {
        let mut history = HistoryBuffer::new();
        history.add("divide", vec![int(10), int(2)], float(5.00001));
        history.add("add", vec![int(2), int(3)], int(5));
        history.add("add", vec![float(2.5), float(2.5002)], float(5.0002));

        let hits = history.search_by_result(float(5.0), DEFAULT_TOLERANCE);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].operation, "divide");
        assert_eq!(hits[1].result, int(5));

        // Float results are still matched by tolerance against an integer query
        assert_eq!(history.search_by_result(int(5), DEFAULT_TOLERANCE).len(), 2);

        let exact = history.search_by_result(int(5), 0.0);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].result, int(5));

        assert!(history.search_by_result(int(7), DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn test_statistics() {
        let mut history = HistoryBuffer::new();
        assert_eq!(history.get_statistics(), HistoryStatistics::default());

        history.add("add", vec![int(1), int(1)], int(2));
        history.add("add", vec![int(2), int(2)], int(4));
        history.add("multiply", vec![int(2), int(3)], int(6));

        let stats = history.get_statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.operations.get("add"), Some(&2));
        assert_eq!(stats.operations.get("multiply"), Some(&1));
        assert_eq!(stats.operations.len(), 2);
    }

    #[test]
    fn test_export_as_string() {
        let mut history = HistoryBuffer::new();
        history.add("add", vec![int(2), int(3)], int(5));
        history.add("square_root", vec![int(16)], float(4.0));

        let report = history.export_as_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Calculation History:");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "1. add(2, 3) = 5");
        assert_eq!(lines[3], "2. square_root(16) = 4.0");
    }

    #[test]
    fn test_export_json() {
        let mut history = HistoryBuffer::new();
        history.add("divide", vec![int(5), int(2)], float(2.5));

        let json = history.export_json().unwrap();
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history.get_all());
    }

    #[test]
    fn test_display() {
        let mut history = HistoryBuffer::with_max_size(5).unwrap();
        history.add("add", vec![int(1), int(1)], int(2));
        assert_eq!(history.to_string(), "HistoryBuffer(size=1, max_size=5)");
    }
}
