//! Recursive-descent parser for one side of an equation.
//!
//! Grammar (Python operator precedence, `^` accepted as a power operator):
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary (('**' | '^') unary)?
//! primary := NUMBER | NAME | '(' sum ')'
//! ```
//!
//! Operand chains are collected iteratively. Only nesting (parentheses,
//! prefix signs and exponents) recurses, and it is capped at
//! [`MAX_NESTING`] levels.

use super::expr::{ProductOp, SumOp};
use super::{Expr, ParseError, Rational, Vocabulary};

/// Deepest nesting of parentheses, prefix signs and exponents accepted.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(String),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::Number(s) | Token::Name(s) => s.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Caret => "**".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                if literal.matches('.').count() > 1 || !literal.chars().any(|c| c.is_ascii_digit()) {
                    return Err(ParseError::UnexpectedToken {
                        found: literal,
                        pos: start,
                    });
                }
                tokens.push((Token::Number(literal), start));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push((Token::Name(chars[start..i].iter().collect()), start));
                continue;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Caret
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(ParseError::UnexpectedChar { ch: other, pos: start }),
        };
        i += 1;
        tokens.push((token, start));
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
    vocabulary: &'a Vocabulary,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_product()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.eat(&Token::Plus) {
                SumOp::Plus
            } else if self.eat(&Token::Minus) {
                SumOp::Minus
            } else {
                return Ok(Expr::sum(first, rest));
            };
            rest.push((op, self.parse_product()?));
        }
    }

    fn parse_product(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_unary()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.eat(&Token::Star) {
                ProductOp::Times
            } else if self.eat(&Token::Slash) {
                ProductOp::Over
            } else {
                return Ok(Expr::product(first, rest));
            };
            rest.push((op, self.parse_unary()?));
        }
    }

    /// Every nested construct passes through here, so this is where the
    /// nesting depth is counted.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep { limit: MAX_NESTING });
        }
        self.depth += 1;
        let result = self.parse_signed();
        self.depth -= 1;
        result
    }

    fn parse_signed(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&Token::Plus) {
            return self.parse_unary();
        }
        if self.eat(&Token::Minus) {
            let inner = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        if self.eat(&Token::Caret) {
            // Right-associative: x**2**3 == x**(2**3)
            let exp = self.parse_unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.next() {
            Some((Token::Number(literal), _)) => Rational::from_decimal(&literal)
                .map(Expr::Number)
                .map_err(|_| ParseError::NumberOutOfRange(literal)),
            Some((Token::Name(name), _)) => self.resolve_name(name),
            Some((Token::LParen, _)) => {
                let inner = self.parse_sum()?;
                if self.eat(&Token::RParen) {
                    Ok(inner)
                } else {
                    Err(ParseError::UnbalancedParens)
                }
            }
            Some((Token::RParen, _)) => Err(ParseError::UnbalancedParens),
            Some((token, pos)) => Err(ParseError::UnexpectedToken {
                found: token.text(),
                pos,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Resolve a name against the vocabulary. A run such as `xy` that is not a
    /// symbol itself but spells out single-letter symbols is read as their
    /// product. Unknowns are lowercase, so `X` resolves to `x`.
    fn resolve_name(&self, name: String) -> Result<Expr, ParseError> {
        if self.vocabulary.contains(&name) {
            return Ok(Expr::Symbol(name));
        }
        let folded = name.to_ascii_lowercase();
        if self.vocabulary.contains(&folded) {
            return Ok(Expr::Symbol(folded));
        }

        let mut factors = folded
            .chars()
            .map(|c| c.to_string())
            .map(|s| {
                if self.vocabulary.contains(&s) {
                    Ok((ProductOp::Times, Expr::Symbol(s)))
                } else {
                    Err(ParseError::UnknownSymbol(name.clone()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if factors.is_empty() {
            return Err(ParseError::UnknownSymbol(name));
        }
        let (_, first) = factors.remove(0);
        Ok(Expr::product(first, factors))
    }
}

/// Parse one side of an equation into an expression over `vocabulary`.
pub fn parse_expression(input: &str, vocabulary: &Vocabulary) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        vocabulary,
    };
    let expr = parser.parse_sum()?;

    match parser.next() {
        None => Ok(expr),
        Some((Token::RParen, _)) => Err(ParseError::UnbalancedParens),
        Some((token, pos)) => Err(ParseError::UnexpectedToken {
            found: token.text(),
            pos,
        }),
    }
}
