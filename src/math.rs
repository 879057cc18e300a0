//! The numeric operations behind every fold. Trigonometric functions take
//! their argument in degrees.

use crate::error::CalcError;

pub fn add(lhs: f64, rhs: f64) -> f64 {
    lhs + rhs
}

pub fn sub(lhs: f64, rhs: f64) -> f64 {
    lhs - rhs
}

pub fn mul(lhs: f64, rhs: f64) -> f64 {
    lhs * rhs
}

pub fn div(lhs: f64, rhs: f64) -> Result<f64, CalcError> {
    if rhs == 0.0 {
        return Err(CalcError::DivisionByZero);
    }

    Ok(lhs / rhs)
}

/// Remainder of truncating division, so the sign follows `lhs`.
pub fn modulo(lhs: f64, rhs: f64) -> Result<f64, CalcError> {
    let quotient = div(lhs, rhs)?;
    Ok(lhs - rhs * quotient.trunc())
}

pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

pub fn root(degree: f64, num: f64) -> Result<f64, CalcError> {
    if num < 0.0 {
        return Err(CalcError::Domain("root"));
    }

    Ok(pow(num, div(1.0, degree)?))
}

pub fn sqrt(num: f64) -> Result<f64, CalcError> {
    root(2.0, num)
}

pub fn log(base: f64, num: f64) -> Result<f64, CalcError> {
    div(log10(num), log10(base))
}

pub fn log10(num: f64) -> f64 {
    num.log10()
}

pub fn sin(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

pub fn cos(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

pub fn tan(degrees: f64) -> Result<f64, CalcError> {
    if degrees == 90.0 || degrees == -90.0 {
        return Err(CalcError::DivisionByZero);
    }

    Ok(degrees.to_radians().tan())
}

const FACTORIAL_LIMIT: f64 = 100.0;

/// NaN for negative or fractional input, infinity above 100.
pub fn factorial(n: f64) -> f64 {
    if n < 0.0 || n.fract() != 0.0 {
        return f64::NAN;
    }
    if n > FACTORIAL_LIMIT {
        return f64::INFINITY;
    }
    if n <= 1.0 {
        return 1.0;
    }

    n * factorial(n - 1.0)
}
