use std::collections::HashSet;
use std::fmt;

use crate::common::value::Value;

/// Positional address of a column in a producing operator's output:
/// the producer's table index plus the column's position in its output.
///
/// A binding stays valid only while no operator between producer and
/// consumer changes its output column count or order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnBinding {
    pub table: usize,
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnRef {
    pub name: String,
    pub binding: ColumnBinding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,

    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,

    And,
    Or,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Column(ColumnRef),

    Literal(Value),

    Call(FunctionCall),

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    Null,
}

impl Expr {
    pub fn col(name: impl Into<String>, table: usize, column: usize) -> Self {
        Expr::Column(ColumnRef {
            name: name.into(),
            binding: ColumnBinding { table, column },
        })
    }

    pub fn lit(value: Value) -> Self {
        Expr::Literal(value)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(FunctionCall {
            name: name.into(),
            args,
        })
    }

    pub fn bin(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Literal(_) | Expr::Null => true,
            Expr::Column(_) => false,
            Expr::Call(call) => call.args.iter().all(Expr::is_constant),
            Expr::Unary { expr, .. } => expr.is_constant(),
            Expr::Binary { left, right, .. } => left.is_constant() && right.is_constant(),
        }
    }

    /// The value behind a plain literal node. Composite expressions over
    /// literals are not compile-time constants for the rewrite's purposes.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expr::Literal(value) => Some(value),
            _ => None,
        }
    }
}

/// Record every column binding referenced anywhere inside `expr`.
pub fn collect_column_bindings(expr: &Expr, out: &mut HashSet<ColumnBinding>) {
    match expr {
        Expr::Column(c) => {
            out.insert(c.binding);
        }
        Expr::Call(call) => {
            for arg in &call.args {
                collect_column_bindings(arg, out);
            }
        }
        Expr::Unary { expr, .. } => collect_column_bindings(expr, out),
        Expr::Binary { left, right, .. } => {
            collect_column_bindings(left, out);
            collect_column_bindings(right, out);
        }
        Expr::Literal(_) | Expr::Null => {}
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(c) => write!(f, "{}", c.name),
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Call(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Null => write!(f, "NULL"),
            Expr::Unary { op, expr } => {
                write!(f, "{:?} {}", op, expr)
            }
            Expr::Binary { left, op, right } => {
                write!(f, "{} {:?} {}", left, op, right)
            }
        }
    }
}
