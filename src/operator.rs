use crate::{error::CalcError, math};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Mod,
    Pow,
    Div,
    Mul,
    Sub,
    Add,
}

impl BinaryOperator {
    /// Reduction order, tightest binding first.
    pub const PRECEDENCE: [BinaryOperator; 6] = [
        BinaryOperator::Mod,
        BinaryOperator::Pow,
        BinaryOperator::Div,
        BinaryOperator::Mul,
        BinaryOperator::Sub,
        BinaryOperator::Add,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "^",
            BinaryOperator::Div => "/",
            BinaryOperator::Mul => "*",
            BinaryOperator::Sub => "-",
            BinaryOperator::Add => "+",
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            BinaryOperator::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        Ok(match self {
            BinaryOperator::Mod => math::modulo(lhs, rhs)?,
            BinaryOperator::Pow => math::pow(lhs, rhs),
            BinaryOperator::Div => math::div(lhs, rhs)?,
            BinaryOperator::Mul => math::mul(lhs, rhs),
            BinaryOperator::Sub => math::sub(lhs, rhs),
            BinaryOperator::Add => math::add(lhs, rhs),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub(crate) fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            _ => None,
        }
    }

    pub fn apply(self, num: f64) -> f64 {
        match self {
            UnaryOperator::Plus => num,
            UnaryOperator::Minus => -num,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Root,
    Log,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "sqrt" => Some(Self::Sqrt),
            "root" => Some(Self::Root),
            "log" => Some(Self::Log),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sqrt => "sqrt",
            Function::Root => "root",
            Function::Log => "log",
        }
    }

    /// `root` and `log` take `(degree: num)` / `(base: num)`. Called with a
    /// single argument they fall back to the square root and base-10 log.
    pub fn call(self, args: &[f64]) -> Result<f64, CalcError> {
        match (self, args) {
            (Function::Sin, &[num]) => Ok(math::sin(num)),
            (Function::Cos, &[num]) => Ok(math::cos(num)),
            (Function::Tan, &[num]) => math::tan(num),
            (Function::Sqrt | Function::Root, &[num]) => math::sqrt(num),
            (Function::Log, &[num]) => Ok(math::log10(num)),
            (Function::Root, &[degree, num]) => math::root(degree, num),
            (Function::Log, &[base, num]) => math::log(base, num),
            _ => Err(CalcError::InvalidFunction {
                name: self.name().to_string(),
                arity: args.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        let symbols: Vec<_> = BinaryOperator::PRECEDENCE
            .iter()
            .map(|op| op.symbol())
            .collect();
        assert_eq!(symbols, ["%", "^", "/", "*", "-", "+"]);
        assert_eq!(BinaryOperator::Pow.associativity(), Associativity::Right);
        assert_eq!(BinaryOperator::Sub.associativity(), Associativity::Left);
    }

    #[test]
    fn binary_dispatch() {
        assert_eq!(BinaryOperator::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(BinaryOperator::Sub.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(BinaryOperator::Mul.apply(2.0, 3.0), Ok(6.0));
        assert_eq!(BinaryOperator::Pow.apply(2.0, 3.0), Ok(8.0));
        assert_eq!(BinaryOperator::Mod.apply(8.0, 3.0), Ok(2.0));
        assert_eq!(
            BinaryOperator::Div.apply(2.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn unary_dispatch() {
        assert_eq!(UnaryOperator::from_symbol("-").map(|op| op.apply(2.0)), Some(-2.0));
        assert_eq!(UnaryOperator::from_symbol("+").map(|op| op.apply(2.0)), Some(2.0));
        assert_eq!(UnaryOperator::from_symbol("*"), None);
    }

    #[test]
    fn function_arity() {
        assert_eq!(Function::from_name("sqrt").unwrap().call(&[9.0]), Ok(3.0));
        assert_eq!(Function::from_name("log").unwrap().call(&[100.0]), Ok(2.0));
        assert_eq!(
            Function::Sin.call(&[1.0, 2.0]),
            Err(CalcError::InvalidFunction {
                name: "sin".into(),
                arity: 2
            })
        );
        assert_eq!(
            Function::Root.call(&[]),
            Err(CalcError::InvalidFunction {
                name: "root".into(),
                arity: 0
            })
        );
        assert_eq!(Function::from_name("exp"), None);
    }

    // Pinned behaviour: a single-argument `root` is a square root rather than
    // an arity error.
    #[test]
    fn single_argument_root_is_square_root() {
        assert_eq!(Function::Root.call(&[9.0]), Ok(3.0));
    }
}
