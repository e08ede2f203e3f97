use super::{Context, Node};
use crate::{stmt::Expr, Result};

/// `<choose>`: applies the first `<when>` whose test holds, otherwise the
/// `<otherwise>` body if present.
#[derive(Debug, Clone, PartialEq)]
pub struct Choose {
    pub whens: Vec<When>,
    pub otherwise: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct When {
    pub test: Expr,
    pub test_src: String,
    pub body: Node,
}

impl Choose {
    pub(super) fn apply(&self, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
        let branch = self
            .whens
            .iter()
            .find(|when| when.test.eval_bool(&*cx))
            .map(|when| &when.body)
            .or(self.otherwise.as_deref());

        if let Some(body) = branch {
            body.apply_scoped(cx, dst)?;
        }

        Ok(())
    }
}
