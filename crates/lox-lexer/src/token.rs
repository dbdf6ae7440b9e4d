//! Token types for the Lox lexer.

use std::fmt;

/// Token kinds for the Lox language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Special
    Eof,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Star,

    // One or two character operators
    Equal,
    EqualEqual,
    Bang,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Slash,

    // Literals
    String,
    Number,
    Identifier,

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: [TokenKind; 39] = [
        TokenKind::Eof,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Semicolon,
        TokenKind::Star,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
        TokenKind::Slash,
        TokenKind::String,
        TokenKind::Number,
        TokenKind::Identifier,
        TokenKind::And,
        TokenKind::Class,
        TokenKind::Else,
        TokenKind::False,
        TokenKind::For,
        TokenKind::Fun,
        TokenKind::If,
        TokenKind::Nil,
        TokenKind::Or,
        TokenKind::Print,
        TokenKind::Return,
        TokenKind::Super,
        TokenKind::This,
        TokenKind::True,
        TokenKind::Var,
        TokenKind::While,
    ];

    /// The display label used when printing tokens.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Slash => "SLASH",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
        }
    }

    /// The fixed lexeme for this kind.
    ///
    /// Empty for `Eof` and for kinds whose lexeme comes from the source text
    /// (strings, numbers, identifiers).
    pub fn default_lexeme(self) -> &'static str {
        match self {
            TokenKind::Eof => "",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Star => "*",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Slash => "/",
            TokenKind::String | TokenKind::Number | TokenKind::Identifier => "",
            TokenKind::And => "and",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Fun => "fun",
            TokenKind::If => "if",
            TokenKind::Nil => "nil",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::Var => "var",
            TokenKind::While => "while",
        }
    }

    /// Whether tokens of this kind always carry a literal value.
    pub fn has_literal(self) -> bool {
        matches!(self, TokenKind::String | TokenKind::Number)
    }

    /// Whether this kind is a reserved word.
    pub fn is_keyword(self) -> bool {
        (self as u8) >= (TokenKind::And as u8)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up an identifier to see if it's a keyword.
///
/// Matches the whole spelling only; `classify` is an identifier, not `class`.
pub fn lookup_identifier(ident: &str) -> TokenKind {
    match ident {
        "and" => TokenKind::And,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "fun" => TokenKind::Fun,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        _ => TokenKind::Identifier,
    }
}

/// Decoded value carried by string and number tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Text between the quotes, undecoded (there are no escapes).
    String(String),
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(s),
            Literal::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Format a number in its canonical display form.
///
/// Uses the shortest decimal that round-trips, never an exponent, and always
/// keeps one fractional digit for integral values (`3` becomes `3.0`).
pub fn format_number(value: f64) -> String {
    let mut formatted = value.to_string();
    if !formatted.contains('.') {
        formatted.push_str(".0");
    }
    formatted
}

/// A token produced by the lexer.
///
/// Fields are private so that only strings and numbers can carry a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    literal: Option<Literal>,
    line: usize,
}

impl Token {
    fn new(kind: TokenKind, lexeme: String, literal: Option<Literal>, line: usize) -> Self {
        debug_assert_eq!(kind.has_literal(), literal.is_some());
        Self {
            kind,
            lexeme,
            literal,
            line,
        }
    }

    /// Stamp out a token from its kind's template.
    ///
    /// The lexeme is the kind's fixed spelling. Strings and numbers get an
    /// empty string and zero as their literal.
    pub fn from_kind(kind: TokenKind, line: usize) -> Self {
        let literal = match kind {
            TokenKind::String => Some(Literal::String(String::new())),
            TokenKind::Number => Some(Literal::Number(0.0)),
            _ => None,
        };
        Self::new(kind, kind.default_lexeme().to_string(), literal, line)
    }

    /// The end-of-input marker.
    pub fn eof(line: usize) -> Self {
        Self::from_kind(TokenKind::Eof, line)
    }

    /// A string token. `lexeme` includes the quotes, `value` does not.
    pub fn string(lexeme: String, value: String, line: usize) -> Self {
        let literal = Some(Literal::String(value));
        Self::new(TokenKind::String, lexeme, literal, line)
    }

    /// A number token.
    pub fn number(lexeme: String, value: f64, line: usize) -> Self {
        let literal = Some(Literal::Number(value));
        Self::new(TokenKind::Number, lexeme, literal, line)
    }

    /// An identifier token. Keywords should go through [`Token::from_kind`].
    pub fn identifier(lexeme: String, line: usize) -> Self {
        Self::new(TokenKind::Identifier, lexeme, None, line)
    }

    /// The kind of token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The display label of the token's kind, e.g. `LEFT_PAREN`.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// The source text that produced the token.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Decoded value, set for strings and numbers only.
    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    /// 1-indexed line the token starts on.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Renders `<kind> <lexeme> <literal>`, with `null` for a missing literal.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}
