#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ResultFormat {
    /// Always print exactly `precision` fractional digits.
    Fixed,
    /// Print up to `precision` fractional digits, dropping trailing zeros.
    #[default]
    VariableTrim,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: ResultFormat,
    pub precision: usize,
}

impl Config {
    pub const DEFAULT_PRECISION: usize = 8;

    pub fn new(format: ResultFormat, precision: usize) -> Self {
        Self { format, precision }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(ResultFormat::default(), Self::DEFAULT_PRECISION)
    }
}

/// Fixed-point rendering of `value`. NaN and infinities keep their usual
/// textual form (`NaN`, `inf`, `-inf`).
pub fn format_result(value: f64, config: &Config) -> String {
    let mut text = format!("{:.*}", config.precision, value);

    if config.format == ResultFormat::VariableTrim && text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED_4: Config = Config {
        format: ResultFormat::Fixed,
        precision: 4,
    };

    #[test]
    fn fixed_keeps_every_digit() {
        assert_eq!(format_result(2.0, &FIXED_4), "2.0000");
        assert_eq!(format_result(1.0 / 3.0, &FIXED_4), "0.3333");
        assert_eq!(format_result(-2.5, &FIXED_4), "-2.5000");
        assert_eq!(
            format_result(2.0, &Config::new(ResultFormat::Fixed, 0)),
            "2"
        );
    }

    #[test]
    fn variable_trims_zeros_and_point() {
        let config = Config::default();
        assert_eq!(format_result(2.0, &config), "2");
        assert_eq!(format_result(2.5, &config), "2.5");
        assert_eq!(format_result(0.1 + 0.2, &config), "0.3");
        assert_eq!(format_result(1.0 / 3.0, &config), "0.33333333");
        assert_eq!(format_result(-14.0, &config), "-14");
    }

    #[test]
    fn variable_leaves_integers_alone() {
        let config = Config::new(ResultFormat::VariableTrim, 0);
        assert_eq!(format_result(100.0, &config), "100");
        assert_eq!(format_result(2.4, &config), "2");
    }

    #[test]
    fn non_finite_values() {
        let config = Config::default();
        assert_eq!(format_result(f64::NAN, &config), "NaN");
        assert_eq!(format_result(f64::INFINITY, &config), "inf");
        assert_eq!(format_result(f64::NEG_INFINITY, &FIXED_4), "-inf");
    }

    #[test]
    fn formatting_is_idempotent() {
        for config in [Config::default(), FIXED_4] {
            for value in [0.0, 2.0, 1.0 / 7.0, -123.456, 1e20] {
                assert_eq!(format_result(value, &config), format_result(value, &config));
            }
        }
    }
}
