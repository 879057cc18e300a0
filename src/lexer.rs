use crate::token::{Span, Token, TokenKind};
use miette::{miette, Context, LabeledSpan};

pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source str,
    pub position: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
        }
    }

    pub fn get_source_code(&self) -> String {
        self.source.to_string()
    }
}

enum State {
    Number,
    Ident,
}

macro_rules! token {
    ($kind:ident, $text:literal, $start:ident, $self:ident) => {
        return Some(Ok(Token::text(
            TokenKind::$kind,
            $text,
            Span {
                start: $start,
                end: $self.position,
            },
        )))
    };
}

impl<'source> Iterator for Lexer<'source> {
    type Item = miette::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let c_start = self.position;

            self.rest = chars.as_str();
            self.position += c.len_utf8();

            let state = match c {
                '+' => token!(Operator, "+", c_start, self),
                '-' => token!(Operator, "-", c_start, self),
                '*' => token!(Operator, "*", c_start, self),
                '/' => token!(Operator, "/", c_start, self),
                '%' => token!(Operator, "%", c_start, self),
                '^' => token!(Operator, "^", c_start, self),
                '!' => token!(None, "!", c_start, self),
                '(' => token!(LeftBracket, "(", c_start, self),
                ')' => token!(RightBracket, ")", c_start, self),
                ':' => token!(Colon, ":", c_start, self),

                '0'..='9' | '.' => State::Number,
                'a'..='z' | 'A'..='Z' | '_' => State::Ident,

                c if c.is_whitespace() => continue,

                _ => {
                    return Some(Err(miette!(
                        labels = vec![LabeledSpan::at(
                            c_start..self.position,
                            "unexpected character"
                        )],
                        "unexpected token {c}"
                    )
                    .with_source_code(self.get_source_code())))
                }
            };

            break Some(match state {
                State::Number => self
                    .parse_number(c_start)
                    .wrap_err("when parsing number literal"),
                State::Ident => Ok(self.parse_ident(c_start)),
            });
        }
    }
}

impl<'source> Lexer<'source> {
    fn parse_ident(&mut self, start: usize) -> Token {
        let end = self
            .rest
            .find(|c: char| !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_'))
            .unwrap_or(self.rest.len());
        self.position += end;
        self.rest = &self.rest[end..];

        Token::text(
            TokenKind::Symbol,
            &self.source[start..self.position],
            Span {
                start,
                end: self.position,
            },
        )
    }

    /// Decimal literals with an optional fraction and exponent. The first
    /// character (a digit or `.`) has already been consumed.
    fn parse_number(&mut self, start: usize) -> miette::Result<Token> {
        let source = self.source;
        let bytes = source.as_bytes();
        let digits_from = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut has_fraction = bytes[start] == b'.';
        let mut end = digits_from(start + 1);
        if !has_fraction && bytes.get(end) == Some(&b'.') {
            has_fraction = true;
            end = digits_from(end + 1);
        }

        // An exponent only counts when digits follow, so `2e` stays `2 e`.
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }
            if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
                end = digits_from(exponent);
            }
        }

        self.rest = &self.rest[end - self.position..];
        self.position = end;

        let literal = &source[start..end];
        if literal == "." || (has_fraction && self.rest.starts_with('.')) {
            return Err(miette!(
                labels = vec![LabeledSpan::at(start..end, "this literal")],
                "invalid number literal"
            )
            .with_source_code(self.get_source_code()));
        }

        let value = literal.parse::<f64>().map_err(|e| {
            miette!(
                labels = vec![LabeledSpan::at(start..end, "this literal")],
                "failed to parse number literal: {e}"
            )
            .with_source_code(self.get_source_code())
        })?;

        Ok(Token::number(value, Span { start, end }))
    }
}

/// Lexes `source` and prepares the tokens for the solver: brackets are
/// checked, function names marked and implicit multiplications inserted.
pub fn tokenize(source: &str) -> miette::Result<Vec<Token>> {
    let mut tokens = Lexer::new(source).collect::<miette::Result<Vec<_>>>()?;

    check_brackets(&tokens).map_err(|e| e.with_source_code(source.to_string()))?;
    mark_function_names(&mut tokens);
    insert_implicit_multiplication(&mut tokens);

    Ok(tokens)
}

pub fn check_brackets(tokens: &[Token]) -> miette::Result<()> {
    let mut open = Vec::new();
    for token in tokens {
        match token.kind() {
            TokenKind::LeftBracket => open.push(token.span),
            TokenKind::RightBracket => {
                if open.pop().is_none() {
                    return Err(miette!(
                        labels = vec![LabeledSpan::at(
                            token.span.start..token.span.end,
                            "no matching '('"
                        )],
                        "unbalanced brackets"
                    ));
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(span) => Err(miette!(
            labels = vec![LabeledSpan::at(span.start..span.end, "never closed")],
            "unbalanced brackets"
        )),
        None => Ok(()),
    }
}

pub fn mark_function_names(tokens: &mut [Token]) {
    for i in 1..tokens.len() {
        if tokens[i].kind() == TokenKind::LeftBracket {
            tokens[i - 1].mark_as_function();
        }
    }
}

/// Makes multiplication explicit between adjacent operands, e.g. `2pi`,
/// `3(4)` or `(1)(2)`.
pub fn insert_implicit_multiplication(tokens: &mut Vec<Token>) {
    let mut i = 1;
    while i < tokens.len() {
        let implied = matches!(
            (tokens[i - 1].kind(), tokens[i].kind()),
            (
                TokenKind::Number,
                TokenKind::Symbol | TokenKind::FunctionMarker | TokenKind::LeftBracket
            ) | (
                TokenKind::Symbol,
                TokenKind::Number | TokenKind::Symbol | TokenKind::FunctionMarker
            ) | (
                TokenKind::RightBracket,
                TokenKind::Number
                    | TokenKind::Symbol
                    | TokenKind::FunctionMarker
                    | TokenKind::LeftBracket
            )
        );

        if implied {
            let at = tokens[i].span.start;
            tokens.insert(i, Token::text(TokenKind::Operator, "*", Span::new(at, at)));
            i += 1;
        }
        i += 1;
    }
}
