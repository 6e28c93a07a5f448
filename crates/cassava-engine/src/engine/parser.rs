//! Cell text parsing.
//!
//! There is no tokenizer. With only four left-associative binary operators
//! and no parentheses, an expression can be parsed by splitting the text at
//! operators, lowest precedence first:
//!
//! - If `+` or `-` occurs in infix position, split at the *last* occurrence
//!   (`+` preferred). Everything before it is the left operand, so
//!   `10-2-1` becomes `(10-2)-1`.
//! - Otherwise do the same for `*` and `/` (`*` preferred).
//! - Otherwise the text is a terminal: an integer, a float, a cell
//!   reference, or empty (a blank cell).
//!
//! An operator in the first position is a sign, not a split point, which is
//! how `-9` and `A1+-2` parse. Each recursion rescans its substring, which is
//! quadratic in the cell length and fine at cell scale.

use regex::Regex;
use std::sync::OnceLock;

use super::address::address_re;
use super::error::{EngineError, Result};
use super::{Address, Expr, Operator};

/// Operators grouped by precedence, lowest first; within a tier the first
/// operator found in infix position wins.
const PRECEDENCE_TIERS: [[Operator; 2]; 2] = [
    [Operator::Add, Operator::Subtract],
    [Operator::Multiply, Operator::Divide],
];

/// Parse cell text into an expression tree.
///
/// Surrounding whitespace is ignored. Fails with
/// [`EngineError::MalformedExpression`] on any character outside digits,
/// `.`, uppercase letters, the operators and whitespace, or on text that
/// matches no grammar rule.
pub fn parse(text: &str) -> Result<Expr> {
    if let Some(bad) = text.chars().find(|c| !is_cell_char(*c)) {
        return Err(EngineError::malformed(
            text,
            format!("unsupported character '{}'", bad),
        ));
    }
    parse_expression(text)
}

fn is_cell_char(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_ascii_uppercase()
        || c == '.'
        || c.is_whitespace()
        || Operator::from_symbol(c).is_some()
}

fn parse_expression(text: &str) -> Result<Expr> {
    let text = text.trim();

    for tier in PRECEDENCE_TIERS {
        if let Some(operator) = tier.into_iter().find(|op| has_infix(text, op.symbol())) {
            return parse_binary(text, operator);
        }
    }

    parse_terminal(text)
}

/// True if `symbol` occurs with at least one character on each side.
fn has_infix(text: &str, symbol: char) -> bool {
    text.char_indices()
        .any(|(i, c)| c == symbol && i > 0 && i + c.len_utf8() < text.len())
}

/// Split `text` at the last occurrence of `operator` and parse both sides.
pub fn parse_binary(text: &str, operator: Operator) -> Result<Expr> {
    let text = text.trim();
    let symbol = operator.symbol();

    if text.is_empty() {
        return Err(EngineError::malformed(text, "empty binary expression"));
    }
    let Some((left, right)) = text.rsplit_once(symbol) else {
        return Err(EngineError::malformed(
            text,
            format!("no '{}' to split on", symbol),
        ));
    };
    if left.trim().is_empty() || right.trim().is_empty() {
        return Err(EngineError::malformed(
            text,
            format!("'{}' is missing an operand", symbol),
        ));
    }

    Ok(Expr::binary(
        operator,
        parse_expression(left)?,
        parse_expression(right)?,
    ))
}

/// Parse a leaf: integer, float, cell reference or blank.
pub fn parse_terminal(text: &str) -> Result<Expr> {
    let text = text.trim();

    if integer_re().is_match(text) {
        return text
            .parse::<i64>()
            .map(Expr::Integer)
            .map_err(|e| EngineError::malformed(text, format!("integer out of range ({})", e)));
    }
    if float_re().is_match(text) {
        return text
            .parse::<f64>()
            .map(Expr::Float)
            .map_err(|e| EngineError::malformed(text, format!("bad float ({})", e)));
    }
    if address_re().is_match(text) {
        return text
            .parse::<Address>()
            .map(Expr::Reference)
            .map_err(|_| EngineError::malformed(text, "invalid cell address"));
    }
    if text.is_empty() {
        return Ok(Expr::Null);
    }

    Err(EngineError::malformed(text, "unsupported terminal value"))
}

fn integer_re() -> &'static Regex {
    static INTEGER_RE: OnceLock<Regex> = OnceLock::new();
    INTEGER_RE.get_or_init(|| Regex::new(r"^-?[0-9]+$").expect("integer regex must compile"))
}

fn float_re() -> &'static Regex {
    static FLOAT_RE: OnceLock<Regex> = OnceLock::new();
    FLOAT_RE.get_or_init(|| Regex::new(r"^-?[0-9]*\.[0-9]+$").expect("float regex must compile"))
}
