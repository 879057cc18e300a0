pub mod calculator;
pub mod env;
pub mod error;
pub mod format;
pub mod lexer;
pub mod math;
pub mod operator;
pub mod solver;
pub mod stream;
pub mod token;

pub use calculator::Calculator;
pub use error::CalcError;
pub use format::{Config, ResultFormat};
