//! Integration tests for dispatch and history working together
//!
//! Drives the public API the way an external caller would: dispatch with
//! `calculate`, then record successful results in a `HistoryBuffer`.

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use calc_core::{
    calculate, parse_batch, Arity, CalcConfig, CalcError, Calculator, HistoryBuffer, Number,
    Operation, DEFAULT_TOLERANCE,
};
use std::io::Write;

fn int(v: i64) -> Number {
    Number::Int(v)
}

#[test]
fn binary_operations_match_direct_arithmetic() {
    let pairs = [(7, 3), (-7, 3), (7, -3), (0, 5), (12, 4), (-9, -2)];

    for (a, b) in pairs {
        let (x, y) = (int(a), int(b));
        assert_eq!(calculate("add", x, Some(y)).unwrap(), int(a + b));
        assert_eq!(calculate("subtract", x, Some(y)).unwrap(), int(a - b));
        assert_eq!(calculate("multiply", x, Some(y)).unwrap(), int(a * b));
        // Remainder takes the sign of the divisor
        assert_eq!(
            calculate("modulo", x, Some(y)).unwrap(),
            int(((a % b) + b) % b)
        );
        assert_eq!(
            calculate("floor_divide", x, Some(y)).unwrap(),
            int((a as f64 / b as f64).floor() as i64)
        );

        let quotient = calculate("divide", x, Some(y)).unwrap().as_f64();
        assert!((quotient - a as f64 / b as f64).abs() < 1e-12);

        let pct = calculate("percentage", x, Some(y)).unwrap().as_f64();
        assert!((pct - (a * b) as f64 / 100.0).abs() < 1e-12);
    }
}

#[test]
fn zero_divisors_are_domain_errors() {
    for op in ["divide", "floor_divide"] {
        let err = calculate(op, int(5), Some(int(0))).unwrap_err();
        assert_eq!(err, CalcError::Domain("Cannot divide by zero".to_string()));
    }
    let err = calculate("modulo", int(5), Some(Number::Float(0.0))).unwrap_err();
    assert_eq!(
        err,
        CalcError::Domain("Cannot perform modulo with zero".to_string())
    );
}

#[test]
fn square_root_round_trips() {
    for x in [0.0, 1.0, 2.0, 16.0, 1234.5678] {
        let r = calculate("square_root", Number::Float(x), None)
            .unwrap()
            .as_f64();
        assert!((r * r - x).abs() < 1e-9);
    }
    assert_eq!(
        calculate("square_root", int(16), None).unwrap(),
        Number::Float(4.0)
    );
}

#[test]
fn every_registered_name_dispatches() {
    for op in Operation::ALL {
        let b = (op.arity() == Arity::Binary).then_some(int(2));
        assert!(
            calculate(op.name(), int(3), b).is_ok(),
            "{} should accept (3, {:?})",
            op,
            b
        );
    }
}

#[test]
fn history_keeps_last_entries_in_order() {
    let mut history = HistoryBuffer::with_max_size(2).unwrap();
    for (a, b) in [(1, 1), (2, 2), (3, 3)] {
        let result = calculate("add", int(a), Some(int(b))).unwrap();
        history.add("add", vec![int(a), int(b)], result);
    }

    let results: Vec<Number> = history.get_all().iter().map(|e| e.result).collect();
    assert_eq!(results, vec![int(4), int(6)]);
}

#[test]
fn statistics_and_search_over_a_session() {
    let mut calc = Calculator::default();
    calc.calculate("add", int(2), Some(int(3))).unwrap();
    calc.calculate("add", int(1), Some(int(1))).unwrap();
    calc.calculate("multiply", int(4), Some(int(5))).unwrap();
    calc.calculate("divide", int(10), Some(int(2))).unwrap();

    let stats = calc.history().get_statistics();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.operations["add"], 2);
    assert_eq!(stats.operations["multiply"], 1);
    assert_eq!(stats.operations["divide"], 1);

    // 2 + 3 = 5 and 10 / 2 = 5.0
    let fives = calc
        .history()
        .search_by_result(Number::Float(5.0), DEFAULT_TOLERANCE);
    assert_eq!(fives.len(), 2);

    let report = calc.history().export_as_string();
    assert!(report.contains("1. add(2, 3) = 5"));
    assert!(report.contains("4. divide(10, 2) = 5.0"));
}

#[test]
fn batch_from_file_runs_through_calculator() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[["add", 1, 2], {{"operation": "factorial", "operands": [5]}}, ["unknown", 1, 2]]"#
    )
    .unwrap();

    let json = std::fs::read_to_string(file.path()).unwrap();
    let items = parse_batch(&json).unwrap();

    let mut calc = Calculator::default();
    let results = calc.calculate_batch(&items);
    assert_eq!(results[0], Ok(int(3)));
    assert_eq!(results[1], Ok(int(120)));
    assert_eq!(
        results[2],
        Err(CalcError::UnknownOperation("unknown".to_string()))
    );
    assert_eq!(calc.history().len(), 2);
}

#[test]
fn config_file_sets_history_bound() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calc.json");
    std::fs::write(&path, r#"{"max_history_size": 3}"#).unwrap();

    let config = CalcConfig::load(Some(&path)).unwrap();
    let mut calc = Calculator::new(config).unwrap();
    for i in 0..10 {
        calc.calculate("absolute", int(-i), None).unwrap();
    }
    assert_eq!(calc.history().len(), 3);
    assert_eq!(calc.history().max_size(), 3);
}
