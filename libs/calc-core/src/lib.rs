//! calc-core - arithmetic operations with name-based dispatch and history
//!
//! # Features
//!
//! - **Operation set**: pure arithmetic functions with domain validation
//! - **Dispatch**: `calculate("name", a, b)` over a closed set of operations
//! - **History**: bounded, insertion-ordered log with filtering and statistics
//!
//! # Example
//!
//! ```rust
//! use calc_core::{calculate, HistoryBuffer, Number, DEFAULT_TOLERANCE};
//!
//! let a = Number::Int(6);
//! let b = Number::Int(7);
//! let product = calculate("multiply", a, Some(b)).unwrap();
//! assert_eq!(product, Number::Int(42));
//!
//! // The caller decides what goes into history
//! let mut history = HistoryBuffer::new();
//! history.add("multiply", vec![a, b], product);
//! assert_eq!(history.search_by_result(Number::Float(42.0), DEFAULT_TOLERANCE).len(), 1);
//!
//! assert!(calculate("square_root", Number::Int(-1), None).is_err());
//! ```
//!
//! # Operations
//!
//! | Operation | Arity | Fails when |
//! |-----------|-------|------------|
//! | `add`, `subtract`, `multiply` | 2 | integer overflow |
//! | `divide`, `floor_divide` | 2 | divisor is zero |
//! | `modulo` | 2 | divisor is zero |
//! | `power` | 2 | zero to a negative power, negative base to a fractional power |
//! | `percentage` | 2 | never |
//! | `square_root` | 1 | operand is negative |
//! | `absolute` | 1 | integer overflow |
//! | `factorial` | 1 | operand is a float or negative, or 21! and beyond |

pub mod batch;
pub mod calculator;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod history;
pub mod number;
pub mod operations;
pub mod validation;

// Re-exports for convenience
pub use batch::{calculate_batch, calculate_chain, parse_batch, BatchItem, ChainStep};
pub use calculator::Calculator;
pub use config::CalcConfig;
pub use dispatcher::{calculate, Arity, Operation};
pub use error::{CalcError, Result};
pub use format::{format_result, round_to, DEFAULT_PRECISION};
pub use history::{
    HistoryBuffer, HistoryEntry, HistoryStatistics, DEFAULT_MAX_SIZE, DEFAULT_TOLERANCE,
};
pub use number::Number;
pub use validation::{parse_operand, validate_operands};
