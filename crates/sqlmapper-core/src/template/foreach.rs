use super::{Context, EmptyCollection, Node};
use crate::{
    stmt::{Expr, Value},
    Error, Result,
};

/// `<foreach>`: applies its body once per element of a collection.
///
/// For a list, `item` names the element and `index` its position. For a map,
/// `item` names the value and `index` the key.
#[derive(Debug, Clone, PartialEq)]
pub struct ForEach {
    pub collection: Expr,

    /// The `collection` attribute as written, for diagnostics
    pub collection_src: String,

    pub item: Option<String>,
    pub index: Option<String>,
    pub open: String,
    pub separator: String,
    pub close: String,
    pub body: Box<Node>,
}

impl ForEach {
    pub(super) fn apply(&self, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
        let collection = self.collection.eval(&*cx);

        let entries: Vec<(Value, Value)> = match collection {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (Value::I64(i as i64), item))
                .collect(),
            Value::Map(map) => map
                .into_iter()
                .map(|(key, value)| (Value::String(key), value))
                .collect(),
            Value::Null => {
                return Err(Error::expression_evaluation_failed(format!(
                    "foreach collection `{}` is null or missing",
                    self.collection_src
                )));
            }
            other => {
                return Err(Error::expression_evaluation_failed(format!(
                    "foreach collection `{}` is not iterable (found {})",
                    self.collection_src,
                    other.variant_name()
                )));
            }
        };

        if entries.is_empty() {
            match cx.options().empty_collection {
                EmptyCollection::Error => {
                    return Err(Error::expression_evaluation_failed(format!(
                        "foreach collection `{}` is empty",
                        self.collection_src
                    )));
                }
                EmptyCollection::Render => {
                    push_fragment(dst, &format!("{}{}", self.open, self.close));
                    return Ok(());
                }
            }
        }

        let mut sql = self.open.clone();
        let mut first = true;

        for (index, item) in entries {
            let mark = cx.scope_mark();

            if let Some(name) = &self.index {
                cx.push_scoped(name, index, "frch");
            }
            if let Some(name) = &self.item {
                cx.push_scoped(name, item, "frch");
            }

            let mut part = String::new();
            let ret = self.body.apply(cx, &mut part);
            cx.truncate_scopes(mark);
            ret?;

            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if !first {
                sql.push_str(&self.separator);
            }
            sql.push_str(part);
            first = false;
        }

        sql.push_str(&self.close);
        push_fragment(dst, &sql);

        Ok(())
    }
}

fn push_fragment(dst: &mut String, sql: &str) {
    if sql.is_empty() {
        return;
    }
    if dst.chars().next_back().is_some_and(|ch| !ch.is_whitespace()) {
        dst.push(' ');
    }
    dst.push_str(sql);
}
