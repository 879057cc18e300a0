use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum CalcError {
    #[error("syntax error: {0}")]
    #[diagnostic(code(calclib::syntax_error))]
    Syntax(String),

    #[error("non number tokens around operator '{0}'")]
    #[diagnostic(code(calclib::operand_shape))]
    OperandShape(String),

    #[error("invalid function '{name}' with {arity} argument(s)")]
    #[diagnostic(code(calclib::invalid_function))]
    InvalidFunction { name: String, arity: usize },

    #[error("function end not found")]
    #[diagnostic(code(calclib::function_syntax))]
    FunctionSyntax,

    #[error("expression did not reduce to a single number")]
    #[diagnostic(code(calclib::unresolved))]
    Unresolved,

    #[error("Division by zero")]
    #[diagnostic(code(calclib::division_by_zero))]
    DivisionByZero,

    #[error("{0}: Undefined for argument domain")]
    #[diagnostic(code(calclib::domain_error))]
    Domain(&'static str),

    #[error("internal error: {0}")]
    #[diagnostic(code(calclib::internal_error))]
    Internal(&'static str),
}

pub const SYNTAX_ERROR: &str = "Syntax error";
pub const GENERIC_ERROR: &str = "Err";
pub const UNHANDLED_ERROR: &str = "Unhandled error in library";

impl CalcError {
    /// The text a caller of `Calculator::solve` sees for this error.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::Syntax(_) => SYNTAX_ERROR.to_string(),
            CalcError::OperandShape(_)
            | CalcError::InvalidFunction { .. }
            | CalcError::FunctionSyntax
            | CalcError::Unresolved => GENERIC_ERROR.to_string(),
            CalcError::DivisionByZero | CalcError::Domain(_) => self.to_string(),
            CalcError::Internal(_) => UNHANDLED_ERROR.to_string(),
        }
    }
}

impl From<miette::Report> for CalcError {
    fn from(report: miette::Report) -> Self {
        CalcError::Syntax(report.to_string())
    }
}
