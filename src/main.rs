use std::io::BufRead;

use calclib::{calculator, lexer, token::TokenValue, Calculator, Config, ResultFormat};
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, LabeledSpan};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// Expressions to solve, in order. Reads one expression per line from
    /// stdin when none are given.
    expressions: Vec<String>,

    /// How results are printed
    #[clap(long, value_enum, default_value_t = Format::Variable)]
    format: Format,

    /// Number of fractional digits
    #[clap(long, default_value_t = Config::DEFAULT_PRECISION)]
    precision: usize,

    /// Debug the lexer, printing out each token. Does not solve anything.
    #[clap(long, default_value = "false")]
    debug_lexer: bool,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum Format {
    /// Always print every fractional digit
    Fixed,
    /// Drop trailing zeros
    Variable,
}

impl From<Format> for ResultFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Fixed => ResultFormat::Fixed,
            Format::Variable => ResultFormat::VariableTrim,
        }
    }
}

fn main() -> miette::Result<()> {
    env_logger::init();

    let Input {
        expressions,
        format,
        precision,
        debug_lexer,
    } = Input::parse();

    let mut expressions: Box<dyn Iterator<Item = miette::Result<String>>> =
        if expressions.is_empty() {
            Box::new(std::io::stdin().lock().lines().map(|l| l.into_diagnostic()))
        } else {
            Box::new(expressions.into_iter().map(Ok))
        };

    if debug_lexer {
        for expression in expressions {
            run_debug_lexer(&calculator::normalize(&expression?));
        }
        return Ok(());
    }

    let mut calc = Calculator::new(Config::new(format.into(), precision));
    expressions.try_for_each(|expression| {
        println!("{}", calc.solve(&expression?));
        Ok(())
    })
}

fn run_debug_lexer(source: &str) {
    let tokens = match lexer::tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{:?}", e);
            return;
        }
    };

    for t in tokens {
        let label = match t.value() {
            TokenValue::Number(n) => format!("{:?}({})", t.kind(), n),
            TokenValue::Text(s) => format!("{:?}({:?})", t.kind(), s),
        };
        let diag = miette::miette!(
            labels = vec![LabeledSpan::at(t.span.start..t.span.end, label)],
            severity = miette::Severity::Advice,
            "found a token",
        )
        .with_source_code(source.to_string());
        eprintln!("{:?}", diag);
    }
}
