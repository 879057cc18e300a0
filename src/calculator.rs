use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};

use crate::{
    env::SymbolTable,
    error::{CalcError, UNHANDLED_ERROR},
    format::{format_result, Config},
    lexer, solver,
};

/// Solves expressions one at a time, remembering the last result as `ans`.
///
/// ```
/// use calclib::Calculator;
///
/// let mut calc = Calculator::default();
/// assert_eq!(calc.solve("2+3*4"), "14");
/// assert_eq!(calc.solve("ans/4"), "3.5");
/// assert_eq!(calc.solve("1/0"), "Division by zero");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    symbols: SymbolTable,
    config: Config,
}

/// Accepts `,` as a decimal separator.
pub fn normalize(expression: &str) -> String {
    expression.replace(',', ".")
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Self {
            symbols: SymbolTable::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn ans(&self) -> f64 {
        self.symbols.ans()
    }

    pub fn format(&self, value: f64) -> String {
        format_result(value, &self.config)
    }

    /// Solves `expression`. Blank input gives back the last answer.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64, CalcError> {
        let tokens = lexer::tokenize(&normalize(expression))?;
        if tokens.is_empty() {
            return Ok(self.symbols.ans());
        }

        solver::solve_tokens(tokens, &mut self.symbols)
    }

    /// Solves `expression` and renders the outcome: either the formatted
    /// number or a diagnostic such as `Syntax error`, `Err` or
    /// `Division by zero`. Never panics.
    pub fn solve(&mut self, expression: &str) -> String {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.evaluate(expression)));

        match outcome {
            Ok(Ok(value)) => self.format(value),
            Ok(Err(e)) => {
                debug!("failed to solve '{expression}': {e}");
                e.user_message()
            }
            // Every input ends in a value or a `CalcError`; this arm only
            // fires on a bug in the solver passes.
            Err(_) => {
                error!("panicked while solving '{expression}'");
                UNHANDLED_ERROR.to_string()
            }
        }
    }
}
