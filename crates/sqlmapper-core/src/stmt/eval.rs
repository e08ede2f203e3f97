use super::{BinaryOp, Expr, Path, Value};

use std::cmp::Ordering;

/// Source of values for property paths referenced by an expression.
pub trait Input {
    /// Resolves `path`, returning `None` when any segment is missing.
    fn resolve(&self, path: &Path) -> Option<&Value>;
}

impl Input for Value {
    fn resolve(&self, path: &Path) -> Option<&Value> {
        self.entry(path)
    }
}

impl<T: Input + ?Sized> Input for &T {
    fn resolve(&self, path: &Path) -> Option<&Value> {
        (**self).resolve(path)
    }
}

impl Expr {
    /// Evaluates the expression to a value.
    ///
    /// Evaluation never fails: missing paths resolve to null and operators
    /// applied to incompatible operands yield `false` or null.
    pub fn eval(&self, input: &impl Input) -> Value {
        match self {
            Expr::Value(value) => value.clone(),
            Expr::Path(path) => input.resolve(path).cloned().unwrap_or_default(),
            Expr::Size(expr) => match expr.eval(input).size() {
                Some(size) => Value::I64(size as i64),
                None => Value::Null,
            },
            Expr::Concat(operands) => concat(operands.iter().map(|operand| operand.eval(input))),
            Expr::And(_) | Expr::Or(_) | Expr::Not(_) | Expr::BinaryOp { .. } => {
                Value::Bool(self.eval_bool(input))
            }
        }
    }

    /// Evaluates the expression as a condition.
    pub fn eval_bool(&self, input: &impl Input) -> bool {
        match self {
            Expr::And(operands) => operands.iter().all(|operand| operand.eval_bool(input)),
            Expr::Or(operands) => operands.iter().any(|operand| operand.eval_bool(input)),
            Expr::Not(expr) => !expr.eval_bool(input),
            Expr::BinaryOp { lhs, op, rhs } => {
                let lhs = lhs.eval(input);
                let rhs = rhs.eval(input);

                match op {
                    BinaryOp::Eq => lhs.loose_eq(&rhs),
                    BinaryOp::Ne => !lhs.loose_eq(&rhs),
                    BinaryOp::Lt => lhs.loose_cmp(&rhs) == Some(Ordering::Less),
                    BinaryOp::Le => matches!(
                        lhs.loose_cmp(&rhs),
                        Some(Ordering::Less | Ordering::Equal)
                    ),
                    BinaryOp::Gt => lhs.loose_cmp(&rhs) == Some(Ordering::Greater),
                    BinaryOp::Ge => matches!(
                        lhs.loose_cmp(&rhs),
                        Some(Ordering::Greater | Ordering::Equal)
                    ),
                }
            }
            Expr::Path(path) => input.resolve(path).is_some_and(Value::is_truthy),
            _ => self.eval(input).is_truthy(),
        }
    }
}

fn concat(operands: impl Iterator<Item = Value>) -> Value {
    let operands: Vec<_> = operands.collect();

    if operands.iter().any(|operand| matches!(operand, Value::String(_))) {
        let mut ret = String::new();
        for operand in operands.iter().filter(|operand| !operand.is_null()) {
            ret.push_str(&operand.to_string());
        }
        return Value::String(ret);
    }

    if operands
        .iter()
        .all(|operand| matches!(operand, Value::I32(_) | Value::I64(_)))
    {
        let sum = operands
            .iter()
            .filter_map(Value::to_i64)
            .try_fold(0i64, i64::checked_add);
        if let Some(sum) = sum {
            return Value::I64(sum);
        }
    }

    operands
        .iter()
        .map(Value::to_f64)
        .sum::<Option<f64>>()
        .map(Value::F64)
        .unwrap_or(Value::Null)
}
