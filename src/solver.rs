//! Reduces a token sequence to a single number by rewriting it in place.
//!
//! Every pass walks the stream and folds one class of tokens into numbers.
//! Precedence comes entirely from the order of the passes: constants, unary
//! signs, function calls, unary signs again (a sign may precede a function
//! that only just became a number), factorials, then one pass per binary
//! operator from `%` down to `+`.

use log::{debug, trace};

use crate::{
    env::{SymbolTable, SUBSTITUTED},
    error::CalcError,
    math,
    operator::{Associativity, BinaryOperator, Function, UnaryOperator},
    stream::{NodeId, TokenStream},
    token::{Span, Token, TokenKind},
};

pub fn solve_tokens(tokens: Vec<Token>, symbols: &mut SymbolTable) -> Result<f64, CalcError> {
    let mut stream: TokenStream = tokens.into_iter().collect();
    debug!("solving: {stream}");

    for name in SUBSTITUTED {
        if let Some(value) = symbols.get(name) {
            substitute_symbol(&mut stream, name, value);
        }
    }
    fold_unary_signs(&mut stream)?;
    evaluate_functions(&mut stream)?;
    fold_unary_signs(&mut stream)?;
    fold_factorials(&mut stream)?;
    for op in BinaryOperator::PRECEDENCE {
        reduce_binary(&mut stream, op)?;
    }

    let result = match stream.token(stream.first()) {
        Some(token) if stream.len() == 1 => token.as_number(),
        _ => None,
    };
    let Some(result) = result else {
        debug!("left unresolved: {stream}");
        return Err(CalcError::Unresolved);
    };

    symbols.set_ans(result);
    Ok(result)
}

/// Replaces every symbol called `name` with `value`.
pub fn substitute_symbol(stream: &mut TokenStream, name: &str, value: f64) {
    let mut cursor = stream.first();
    while let Some(id) = cursor {
        cursor = stream.next(id);

        let token = stream.get(id);
        if token.matches(TokenKind::Symbol, name) {
            let span = token.span;
            stream.replace(id, Token::number(value, span));
        }
    }
    trace!("substituted {name}: {stream}");
}

fn unary_operator(token: &Token) -> Option<UnaryOperator> {
    if token.kind() != TokenKind::Operator {
        return None;
    }
    token.as_text().and_then(UnaryOperator::from_symbol)
}

/// Folds `+`/`-` into the number after it when nothing that could be a left
/// operand (a number, `)` or `!`) comes before it. One left-to-right sweep.
pub fn fold_unary_signs(stream: &mut TokenStream) -> Result<(), CalcError> {
    let mut cursor = stream.first();
    while let Some(id) = cursor {
        cursor = stream.next(id);

        let Some(op) = unary_operator(stream.get(id)) else {
            continue;
        };
        let after_operand = stream.token(stream.prev(id)).is_some_and(|prev| {
            prev.is_number() || prev.kind() == TokenKind::RightBracket || prev.is_factorial_marker()
        });
        if after_operand {
            continue;
        }
        let Some((operand, num)) = number_at(stream, cursor) else {
            continue;
        };

        let span = Span::new(stream.get(id).span.start, stream.get(operand).span.end);
        stream.replace(operand, Token::number(op.apply(num), span));
        stream.erase(id)?;
        trace!("folded unary {op:?}: {stream}");
    }

    debug!("after unary signs: {stream}");
    Ok(())
}

struct Call {
    args: Vec<f64>,
    close: NodeId,
}

/// Reads `num (: num)* )` after the bracket at `open`.
fn read_call(stream: &TokenStream, open: NodeId) -> Option<Call> {
    let mut args = Vec::new();
    let mut cursor = stream.next(open);
    loop {
        let (arg, num) = number_at(stream, cursor)?;
        args.push(num);

        let separator = stream.next(arg)?;
        match stream.get(separator).kind() {
            TokenKind::RightBracket => {
                return Some(Call {
                    args,
                    close: separator,
                })
            }
            TokenKind::Colon => cursor = stream.next(separator),
            _ => return None,
        }
    }
}

/// Evaluates every `name(args)` whose arguments are plain numbers, starting
/// over after each call so that enclosing calls get their turn. Fails when a
/// sweep ends with a call that never got numeric arguments.
pub fn evaluate_functions(stream: &mut TokenStream) -> Result<(), CalcError> {
    let mut malformed = false;
    let mut cursor = second(stream);
    while let Some(open) = cursor {
        cursor = stream.next(open);

        let Some(name_id) = stream.prev(open) else {
            continue;
        };
        let name = stream.get(name_id);
        let is_call = matches!(name.kind(), TokenKind::Symbol | TokenKind::FunctionMarker)
            && stream.get(open).kind() == TokenKind::LeftBracket;
        if !is_call {
            continue;
        }

        let Some(call) = read_call(stream, open) else {
            trace!("call at {:?} has no numeric arguments yet", name.span);
            malformed = true;
            continue;
        };

        let name_text = name.as_text().unwrap_or_default();
        let function =
            Function::from_name(name_text).ok_or_else(|| CalcError::InvalidFunction {
                name: name_text.to_string(),
                arity: call.args.len(),
            })?;
        let value = function.call(&call.args)?;

        let span = Span::new(name.span.start, stream.get(call.close).span.end);
        stream.erase_range(open, call.close)?;
        stream.replace(name_id, Token::number(value, span));
        trace!("evaluated {}: {stream}", function.name());

        malformed = false;
        cursor = second(stream);
    }

    if malformed {
        return Err(CalcError::FunctionSyntax);
    }

    debug!("after functions: {stream}");
    Ok(())
}

/// Applies each `!` to the number directly before it, left-most first.
pub fn fold_factorials(stream: &mut TokenStream) -> Result<(), CalcError> {
    while let Some(marker) = stream.find(Token::is_factorial_marker) {
        let (operand, num) = number_at(stream, stream.prev(marker))
            .ok_or_else(|| CalcError::OperandShape("!".to_string()))?;

        let span = Span::new(stream.get(operand).span.start, stream.get(marker).span.end);
        stream.replace(operand, Token::number(math::factorial(num), span));
        stream.erase(marker)?;
        trace!("folded factorial: {stream}");
    }

    debug!("after factorials: {stream}");
    Ok(())
}

/// Folds every occurrence of `op` with its two neighbours. Right-associative
/// operators are folded starting from the right end.
pub fn reduce_binary(stream: &mut TokenStream, op: BinaryOperator) -> Result<(), CalcError> {
    let symbol = op.symbol();
    let is_op = |token: &Token| token.matches(TokenKind::Operator, symbol);

    loop {
        let found = match op.associativity() {
            Associativity::Left => stream.find(is_op),
            Associativity::Right => stream.rfind(is_op),
        };
        let Some(id) = found else {
            break;
        };

        let operands = (
            number_at(stream, stream.prev(id)),
            number_at(stream, stream.next(id)),
        );
        let ((lhs_id, lhs), (rhs_id, rhs)) = match operands {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => return Err(CalcError::OperandShape(symbol.to_string())),
        };

        let value = op.apply(lhs, rhs)?;
        let span = Span::new(stream.get(lhs_id).span.start, stream.get(rhs_id).span.end);
        stream.replace(lhs_id, Token::number(value, span));
        stream.erase_range(id, rhs_id)?;
        trace!("folded {symbol}: {stream}");
    }

    debug!("after {symbol}: {stream}");
    Ok(())
}

fn second(stream: &TokenStream) -> Option<NodeId> {
    stream.first().and_then(|id| stream.next(id))
}

fn number_at(stream: &TokenStream, id: Option<NodeId>) -> Option<(NodeId, f64)> {
    let id = id?;
    Some((id, stream.get(id).as_number()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn stream(input: &str) -> TokenStream {
        tokenize(input)
            .unwrap_or_else(|e| panic!("failed to tokenize '{input}': {e:?}"))
            .into_iter()
            .collect()
    }

    fn solve(input: &str) -> Result<f64, CalcError> {
        solve_tokens(tokenize(input).unwrap(), &mut SymbolTable::new())
    }

    #[test]
    fn substitution_only_touches_symbols() {
        let mut s = stream("pi + pi(2) + tau");
        substitute_symbol(&mut s, "pi", 3.0);
        assert_eq!(s.to_string(), "3 + pi ( 2 ) + tau");
    }

    #[test]
    fn unary_signs() {
        for (input, expected) in [
            ("-2", "-2"),
            ("2*-3", "2 * -3"),
            ("2-3", "2 - 3"),
            ("(-3)", "( -3 )"),
            ("3!-1", "3 ! - 1"),
            ("sqrt(4)-1", "sqrt ( 4 ) - 1"),
            ("2^+3", "2 ^ 3"),
            // One sweep only, the outer sign stays.
            ("--2", "- -2"),
            ("-sin(30)", "- sin ( 30 )"),
        ] {
            let mut s = stream(input);
            fold_unary_signs(&mut s).unwrap();
            assert_eq!(s.to_string(), expected, "when folding '{input}'");
        }
    }

    #[test]
    fn functions_fold_innermost_first() {
        let mut s = stream("sqrt(sqrt(16)) + log(2:8)");
        evaluate_functions(&mut s).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.token(s.first()).and_then(Token::as_number), Some(2.0));
    }

    #[test]
    fn malformed_calls() {
        for input in ["sin(1+2)", "sin()", "sin(1:)", "log(2::3)"] {
            let mut s = stream(input);
            assert_eq!(
                evaluate_functions(&mut s),
                Err(CalcError::FunctionSyntax),
                "when evaluating '{input}'"
            );
        }
    }

    #[test]
    fn unknown_functions_and_arity() {
        let mut s = stream("foo(1)");
        assert_eq!(
            evaluate_functions(&mut s),
            Err(CalcError::InvalidFunction {
                name: "foo".into(),
                arity: 1
            })
        );

        let mut s = stream("cos(1:2:3)");
        assert!(matches!(
            evaluate_functions(&mut s),
            Err(CalcError::InvalidFunction { arity: 3, .. })
        ));
    }

    #[test]
    fn factorials_fold_left_first() {
        let mut s = stream("3!!");
        fold_factorials(&mut s).unwrap();
        assert_eq!(s.to_string(), "720");

        let mut s = stream("2.5!");
        fold_factorials(&mut s).unwrap();
        assert_eq!(s.to_string(), "NaN");

        let mut s = stream("!3");
        assert_eq!(
            fold_factorials(&mut s),
            Err(CalcError::OperandShape("!".into()))
        );
    }

    #[test]
    fn power_folds_from_the_right() {
        let mut s = stream("2^3^2");
        reduce_binary(&mut s, BinaryOperator::Pow).unwrap();
        assert_eq!(s.to_string(), "512");
    }

    #[test]
    fn subtraction_folds_from_the_left() {
        let mut s = stream("10-2-3");
        reduce_binary(&mut s, BinaryOperator::Sub).unwrap();
        assert_eq!(s.to_string(), "5");
    }

    #[test]
    fn binary_needs_numbers_on_both_sides() {
        let mut s = stream("2*");
        assert_eq!(
            reduce_binary(&mut s, BinaryOperator::Mul),
            Err(CalcError::OperandShape("*".into()))
        );

        let mut s = stream("x+1");
        assert_eq!(
            reduce_binary(&mut s, BinaryOperator::Add),
            Err(CalcError::OperandShape("+".into()))
        );
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(solve("2+3*4"), Ok(14.0));
        assert_eq!(solve("8/2*4"), Ok(16.0));
        assert_eq!(solve("1-2+3"), Ok(2.0));
        assert_eq!(solve("-7%3"), Ok(-1.0));
        assert_eq!(solve("2^-1"), Ok(0.5));
        assert_eq!(solve("2^3!"), Ok(64.0));
        assert_eq!(solve("1/0"), Err(CalcError::DivisionByZero));
        assert_eq!(solve("2 3"), Err(CalcError::Unresolved));
        assert_eq!(solve("(2)"), Err(CalcError::Unresolved));
    }

    #[test]
    fn ans_is_written_only_on_success() {
        let mut symbols = SymbolTable::new();
        assert_eq!(solve_tokens(tokenize("6*7").unwrap(), &mut symbols), Ok(42.0));
        assert_eq!(symbols.ans(), 42.0);

        assert!(solve_tokens(tokenize("1/0").unwrap(), &mut symbols).is_err());
        assert!(solve_tokens(tokenize("2 3").unwrap(), &mut symbols).is_err());
        assert_eq!(symbols.ans(), 42.0);

        assert_eq!(solve_tokens(tokenize("ans+1").unwrap(), &mut symbols), Ok(43.0));
    }
}
