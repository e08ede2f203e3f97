use super::{expr_parse, Path, Value};

/// A compiled `test`, `value` or `collection` expression.
///
/// Expressions are parsed once when a mapper is loaded and evaluated against
/// an [`Input`](super::Input) on every execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All operands are truthy
    And(Vec<Expr>),

    /// Comparison of two operands
    BinaryOp {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },

    /// `a + b + ...`: string concatenation or numeric addition
    Concat(Vec<Expr>),

    /// Logical negation
    Not(Box<Expr>),

    /// At least one operand is truthy
    Or(Vec<Expr>),

    /// Property path lookup
    Path(Path),

    /// `path.size()` / `path.length()`
    Size(Box<Expr>),

    /// Literal value
    Value(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Expr {
    /// Compiles an expression.
    ///
    /// Never fails: text that is not a recognized expression falls back to a
    /// truthiness check of its leading property path.
    pub fn parse(src: &str) -> Expr {
        match expr_parse::parse(src) {
            Some(expr) => expr,
            None => {
                tracing::debug!(expr = src, "unrecognized expression; using truthiness check");
                expr_parse::fallback(src)
            }
        }
    }

    pub fn path(path: Path) -> Expr {
        Expr::Path(path)
    }

    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        Expr::BinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<Path> for Expr {
    fn from(value: Path) -> Self {
        Expr::Path(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Value(value.into())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Value(value.into())
    }
}

impl core::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        })
    }
}
