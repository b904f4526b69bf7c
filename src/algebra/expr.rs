//! Expression trees produced by the parser.
//!
//! Chains of `+`/`-` and of `*`/`/` are stored flat, so a long sum is a
//! single node with many operands rather than a deep tree.

use super::Rational;
use std::fmt;

/// Operator joining an operand to the sum before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumOp {
    Plus,
    Minus,
}

/// Operator joining an operand to the product before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOp {
    Times,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(Rational),
    Symbol(String),
    Neg(Box<Expr>),
    /// `first ± rest[0] ± rest[1] ...`
    Sum(Box<Expr>, Vec<(SumOp, Expr)>),
    /// `first */ rest[0] */ rest[1] ...`
    Product(Box<Expr>, Vec<(ProductOp, Expr)>),
    Pow(Box<Expr>, Box<Expr>),
}

// Binding strength used to decide where parentheses are needed when rendering.
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_UNARY: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    pub fn number(value: Rational) -> Self {
        Expr::Number(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sum(Box::new(lhs), vec![(SumOp::Minus, rhs)])
    }

    /// Wraps `first` into a sum unless there is nothing to add.
    pub(crate) fn sum(first: Expr, rest: Vec<(SumOp, Expr)>) -> Self {
        if rest.is_empty() {
            first
        } else {
            Expr::Sum(Box::new(first), rest)
        }
    }

    pub(crate) fn product(first: Expr, rest: Vec<(ProductOp, Expr)>) -> Self {
        if rest.is_empty() {
            first
        } else {
            Expr::Product(Box::new(first), rest)
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(n) if n.is_negative() => PREC_UNARY,
            Expr::Number(n) if !n.is_integer() => PREC_PRODUCT,
            Expr::Number(_) | Expr::Symbol(_) => PREC_ATOM,
            Expr::Neg(_) => PREC_UNARY,
            Expr::Sum(..) => PREC_SUM,
            Expr::Product(..) => PREC_PRODUCT,
            Expr::Pow(..) => PREC_POWER,
        }
    }

    /// Names of every symbol appearing in the tree, in order of first use.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Number(_) => {}
            Expr::Symbol(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Neg(inner) => inner.collect_symbols(out),
            Expr::Sum(first, rest) => {
                first.collect_symbols(out);
                rest.iter().for_each(|(_, e)| e.collect_symbols(out));
            }
            Expr::Product(first, rest) => {
                first.collect_symbols(out);
                rest.iter().for_each(|(_, e)| e.collect_symbols(out));
            }
            Expr::Pow(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Symbol(name) => write!(f, "{name}"),
            Expr::Neg(inner) => {
                write!(f, "-")?;
                write_operand(f, inner, matches!(inner.precedence(), PREC_SUM | PREC_UNARY))
            }
            Expr::Sum(first, rest) => {
                write_operand(f, first, false)?;
                for (op, operand) in rest {
                    let prec = operand.precedence();
                    match op {
                        SumOp::Plus => {
                            write!(f, " + ")?;
                            write_operand(f, operand, prec == PREC_UNARY)?;
                        }
                        SumOp::Minus => {
                            write!(f, " - ")?;
                            write_operand(f, operand, prec <= PREC_SUM || prec == PREC_UNARY)?;
                        }
                    }
                }
                Ok(())
            }
            Expr::Product(first, rest) => {
                write_operand(f, first, first.precedence() < PREC_PRODUCT)?;
                for (op, operand) in rest {
                    let prec = operand.precedence();
                    match op {
                        ProductOp::Times => {
                            write!(f, "*")?;
                            write_operand(f, operand, prec < PREC_PRODUCT || prec == PREC_UNARY)?;
                        }
                        ProductOp::Over => {
                            write!(f, "/")?;
                            write_operand(f, operand, prec <= PREC_UNARY)?;
                        }
                    }
                }
                Ok(())
            }
            Expr::Pow(base, exp) => {
                write_operand(f, base, base.precedence() <= PREC_POWER)?;
                write!(f, "**")?;
                write_operand(f, exp, exp.precedence() < PREC_ATOM)
            }
        }
    }
}
