#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Operator,
    Symbol,
    LeftBracket,
    RightBracket,
    Colon,
    /// An identifier directly followed by an opening bracket.
    FunctionMarker,
    /// Anything the lexer does not classify further (e.g. `!`). As a pattern
    /// in [`Token::matches`] it matches every kind.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Text(String),
}

/// A token of an expression. Number tokens always hold [`TokenValue::Number`],
/// every other kind holds [`TokenValue::Text`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    value: TokenValue,
    pub span: Span,
}

impl Token {
    pub fn number(value: f64, span: Span) -> Self {
        Self {
            kind: TokenKind::Number,
            value: TokenValue::Number(value),
            span,
        }
    }

    /// Builds a non-number token.
    ///
    /// # Panics
    ///
    /// Panics when `kind` is [`TokenKind::Number`]; use [`Token::number`].
    pub fn text(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        assert_ne!(kind, TokenKind::Number, "number tokens carry a float");
        Self {
            kind,
            value: TokenValue::Text(text.into()),
            span,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            TokenValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            TokenValue::Number(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }

    /// Matches by kind and text, except that a `TokenKind::None` pattern
    /// ignores the kind and compares the text only.
    pub fn matches(&self, kind: TokenKind, text: &str) -> bool {
        (self.kind == kind || kind == TokenKind::None) && self.as_text() == Some(text)
    }

    pub(crate) fn is_factorial_marker(&self) -> bool {
        self.matches(TokenKind::None, "!")
    }

    /// Turns a symbol into a function name.
    pub(crate) fn mark_as_function(&mut self) {
        if self.kind == TokenKind::Symbol {
            self.kind = TokenKind::FunctionMarker;
        }
    }
}
