//! Cell expressions.
//!
//! Every cell holds one [`Expr`] tree. Leaves are numeric constants, blank
//! markers and references to other cells; the four arithmetic operations own
//! their two operands outright, so trees are never shared between cells.

use std::fmt;

use super::error::{EngineError, Result};
use super::format::format_number;
use super::{Address, CycleGuard, Grid};

/// The binary arithmetic operators, lowest precedence first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Operator> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An expression stored in a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Integer(i64),
    Float(f64),
    /// A blank cell. Prints as nothing, cannot be evaluated.
    Null,
    Reference(Address),
    Add(Box<Expr>, Box<Expr>),
    Subtract(Box<Expr>, Box<Expr>),
    Multiply(Box<Expr>, Box<Expr>),
    Divide(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn binary(operator: Operator, left: Expr, right: Expr) -> Expr {
        let (left, right) = (Box::new(left), Box::new(right));
        match operator {
            Operator::Add => Expr::Add(left, right),
            Operator::Subtract => Expr::Subtract(left, right),
            Operator::Multiply => Expr::Multiply(left, right),
            Operator::Divide => Expr::Divide(left, right),
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::Add(..) => Some(Operator::Add),
            Expr::Subtract(..) => Some(Operator::Subtract),
            Expr::Multiply(..) => Some(Operator::Multiply),
            Expr::Divide(..) => Some(Operator::Divide),
            Expr::Integer(_) | Expr::Float(_) | Expr::Null | Expr::Reference(_) => None,
        }
    }

    /// Left and right operands of an operation.
    pub fn operands(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::Add(l, r) | Expr::Subtract(l, r) | Expr::Multiply(l, r) | Expr::Divide(l, r) => {
                Some((l, r))
            }
            Expr::Integer(_) | Expr::Float(_) | Expr::Null | Expr::Reference(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.operator().is_none()
    }

    /// Evaluate as a top-level read.
    ///
    /// References need a grid; without one they fail with
    /// [`EngineError::AddressOutOfRange`].
    pub fn eval(&self, grid: Option<&Grid>) -> Result<f64> {
        self.eval_with(grid, &mut CycleGuard::new())
    }

    /// Evaluate as part of a read that already owns `guard`.
    pub fn eval_with(&self, grid: Option<&Grid>, guard: &mut CycleGuard) -> Result<f64> {
        match self {
            Expr::Integer(value) => Ok(*value as f64),
            Expr::Float(value) => Ok(*value),
            Expr::Null => Err(EngineError::EmptyCellEvaluated),
            Expr::Reference(address) => dereference(*address, grid, guard),
            Expr::Add(l, r) => Ok(l.eval_with(grid, guard)? + r.eval_with(grid, guard)?),
            Expr::Subtract(l, r) => Ok(l.eval_with(grid, guard)? - r.eval_with(grid, guard)?),
            Expr::Multiply(l, r) => Ok(l.eval_with(grid, guard)? * r.eval_with(grid, guard)?),
            Expr::Divide(l, r) => Ok(l.eval_with(grid, guard)? / r.eval_with(grid, guard)?),
        }
    }

    /// Output text for this expression as a top-level read.
    ///
    /// A bare blank prints as an empty string; everything else is evaluated
    /// and formatted, so a blank nested inside an operation still fails.
    pub fn display_string(&self, grid: Option<&Grid>, precision: usize) -> Result<String> {
        self.display_string_with(grid, precision, &mut CycleGuard::new())
    }

    pub fn display_string_with(
        &self,
        grid: Option<&Grid>,
        precision: usize,
        guard: &mut CycleGuard,
    ) -> Result<String> {
        match self {
            Expr::Null => Ok(String::new()),
            _ => Ok(format_number(self.eval_with(grid, guard)?, precision)),
        }
    }
}

fn dereference(address: Address, grid: Option<&Grid>, guard: &mut CycleGuard) -> Result<f64> {
    let grid = match grid {
        Some(grid) if grid.in_bounds(&address) => grid,
        _ => return Err(EngineError::AddressOutOfRange { address }),
    };

    let target = grid.contents(&address);
    if matches!(target, Some(Expr::Reference(inner)) if *inner == address) {
        return Err(EngineError::SelfReference(address));
    }

    guard.visit(address)?;
    log::trace!("dereferencing {}", address);

    match target {
        Some(expr) => expr.eval_with(Some(grid), guard),
        None => Err(EngineError::EmptyCellEvaluated),
    }
}

/// Infix rendering, mostly for debugging. Numbers show two decimals.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(value) => write!(f, "{:.2}", *value as f64),
            Expr::Float(value) => write!(f, "{:.2}", value),
            Expr::Null => Ok(()),
            Expr::Reference(address) => write!(f, "{}", address),
            Expr::Add(l, r) | Expr::Subtract(l, r) | Expr::Multiply(l, r) | Expr::Divide(l, r) => {
                let symbol = self.operator().map(Operator::symbol).unwrap_or('?');
                write!(f, "{} {} {}", l, symbol, r)
            }
        }
    }
}
