//! Calculator - dispatch plus history recording
//!
//! Computation stays in [`crate::dispatcher`]; the calculator is the caller
//! that feeds successful results into its [`HistoryBuffer`].

use crate::batch::{BatchItem, ChainStep};
use crate::config::CalcConfig;
use crate::dispatcher::calculate;
use crate::error::Result;
use crate::format::format_result;
use crate::history::HistoryBuffer;
use crate::number::Number;
use tracing::debug;

/// Calculator with a bounded history of successful calculations
///
/// # Example
/// ```rust
/// use calc_core::{Calculator, Number};
///
/// let mut calc = Calculator::default();
/// let sum = calc.calculate("add", Number::Int(2), Some(Number::Int(3))).unwrap();
/// assert_eq!(sum, Number::Int(5));
/// assert_eq!(calc.history().len(), 1);
///
/// // Failures are returned and not recorded
/// assert!(calc.calculate("divide", Number::Int(1), Some(Number::Int(0))).is_err());
/// assert_eq!(calc.history().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalcConfig,
    history: HistoryBuffer,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            config: CalcConfig::default(),
            history: HistoryBuffer::new(),
        }
    }
}

impl Calculator {
    /// Create a calculator from a validated configuration
    pub fn new(config: CalcConfig) -> Result<Self> {
        config.validate()?;
        let history = HistoryBuffer::with_max_size(config.max_history_size)?;
        Ok(Self { config, history })
    }

    /// Dispatch `operation` and record the result on success
    ///
    /// Float results are rounded to `decimal_precision` places.
    pub fn calculate(&mut self, operation: &str, a: Number, b: Option<Number>) -> Result<Number> {
        match calculate(operation, a, b) {
            Ok(result) => {
                let result = format_result(result, self.config.decimal_precision);
                debug!(operation, %a, b = ?b, %result, "calculated");
                self.history.add(operation, operands(a, b), result);
                Ok(result)
            },
            Err(e) => {
                debug!(operation, %a, b = ?b, error = %e, "calculation failed");
                Err(e)
            },
        }
    }

    /// Evaluate every item, recording each success
    pub fn calculate_batch(&mut self, items: &[BatchItem]) -> Vec<Result<Number>> {
        items
            .iter()
            .map(|item| {
                let (a, b) = item.split_operands()?;
                self.calculate(&item.operation, a, b)
            })
            .collect()
    }

    /// Pipe `initial` through `steps`, recording each intermediate step
    pub fn calculate_chain(&mut self, initial: Number, steps: &[ChainStep]) -> Result<Number> {
        steps.iter().try_fold(initial, |value, step| {
            self.calculate(&step.operation, value, step.operand)
        })
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.history
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }
}

fn operands(a: Number, b: Option<Number>) -> Vec<Number> {
    std::iter::once(a).chain(b).collect()
}
