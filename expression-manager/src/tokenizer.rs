use std::fmt;
use std::str::SplitWhitespace;

use crate::error::TokenizerError;

pub const OPEN: &str = "({[";
pub const CLOSE: &str = ")}]";
pub const OPERATORS: &str = "+-*/%";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Mult),
            '/' => Some(Op::Div),
            '%' => Some(Op::Mod),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Mult => '*',
            Op::Div => '/',
            Op::Mod => '%',
        }
    }

    /// Multiplicative operators bind tighter than additive ones.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 1,
            Op::Mult | Op::Div | Op::Mod => 2,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One of the three bracket shapes. The opening and closing characters of a
/// shape sit at the same index of [`OPEN`] and [`CLOSE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Round,
    Curly,
    Square,
}

impl Bracket {
    const ALL: [Bracket; 3] = [Bracket::Round, Bracket::Curly, Bracket::Square];

    pub fn from_open(c: char) -> Option<Self> {
        OPEN.find(c).map(|idx| Self::ALL[idx])
    }

    pub fn from_close(c: char) -> Option<Self> {
        CLOSE.find(c).map(|idx| Self::ALL[idx])
    }

    pub fn open(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Curly => '{',
            Bracket::Square => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Curly => '}',
            Bracket::Square => ']',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// An integer literal. `literal` keeps the text exactly as written so
    /// that conversions echo the input spelling (`+7`, `007`).
    Number { value: i64, literal: &'a str },
    Operator(Op),
    Open(Bracket),
    Close(Bracket),
}

impl<'a> Token<'a> {
    /// Classifies a single whitespace-free word, returning `None` when it is
    /// neither an integer literal, an operator, nor a bracket.
    pub fn classify(word: &'a str) -> Option<Self> {
        if let Some(c) = single_char(word) {
            if let Some(op) = Op::from_char(c) {
                return Some(Token::Operator(op));
            }
            if let Some(bracket) = Bracket::from_open(c) {
                return Some(Token::Open(bracket));
            }
            if let Some(bracket) = Bracket::from_close(c) {
                return Some(Token::Close(bracket));
            }
        }

        parse_integer(word).map(|value| Token::Number {
            value,
            literal: word,
        })
    }

    /// Returns the reduction rank used by the shunting-yard pass, or `None`
    /// for integer literals which have no rank.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Token::Close(_) => Some(3),
            Token::Operator(op) => Some(op.precedence()),
            Token::Open(_) => Some(0),
            Token::Number { .. } => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number { literal, .. } => write!(f, "{}", literal),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Open(bracket) => write!(f, "{}", bracket.open()),
            Token::Close(bracket) => write!(f, "{}", bracket.close()),
        }
    }
}

fn single_char(word: &str) -> Option<char> {
    let mut chars = word.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn parse_integer(word: &str) -> Option<i64> {
    if word.contains('.') {
        return None;
    }
    word.parse().ok()
}

pub fn is_open_bracket(token: &str) -> bool {
    single_char(token).is_some_and(|c| OPEN.contains(c))
}

pub fn is_close_bracket(token: &str) -> bool {
    single_char(token).is_some_and(|c| CLOSE.contains(c))
}

/// True when `open` and `close` are brackets of the same shape.
pub fn is_paired_bracket(open: &str, close: &str) -> bool {
    match (single_char(open), single_char(close)) {
        (Some(o), Some(c)) => match (Bracket::from_open(o), Bracket::from_close(c)) {
            (Some(o), Some(c)) => o == c,
            _ => false,
        },
        _ => false,
    }
}

pub fn is_operator(token: &str) -> bool {
    single_char(token).is_some_and(|c| OPERATORS.contains(c))
}

pub fn is_integer_literal(token: &str) -> bool {
    parse_integer(token).is_some()
}

/// Precedence of a bracket or operator token. Anything else has no rank.
pub fn precedence(token: &str) -> Option<u8> {
    Token::classify(token).and_then(|token| token.precedence())
}

/// True when the first character of `text` is one of the operator symbols.
/// Used to reject results such as `+ 3` or a lone `-4`.
pub fn starts_with_operator(text: &str) -> bool {
    text.chars().next().is_some_and(|c| OPERATORS.contains(c))
}

/// Splits an expression on whitespace and classifies each word lazily, so
/// callers can stop at the first word they cannot use.
pub struct Tokenizer<'a> {
    words: SplitWhitespace<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            words: input.split_whitespace(),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let word = self.words.next()?;
        let token = Token::classify(word)
            .ok_or_else(|| TokenizerError::UnexpectedToken(word.to_string()));
        tracing::trace!(word, ?token, "classified");
        Some(token)
    }
}
