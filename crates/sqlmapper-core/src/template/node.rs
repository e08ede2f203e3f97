use super::{trim, Choose, Context, ForEach, Text, Trim};
use crate::{stmt::Expr, Result};

/// A node of a compiled statement body.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `<bind name value>`: introduces a name visible to later siblings
    Bind(Bind),

    /// `<choose>`: first matching `<when>`, else `<otherwise>`
    Choose(Choose),

    /// `<foreach>`: body once per element of a collection
    ForEach(ForEach),

    /// `<if test>`: body when the test holds
    If(If),

    /// Children applied in document order
    Mixed(Vec<Node>),

    /// `<set>`
    Set(Box<Node>),

    /// Static text with placeholders
    Text(Text),

    /// `<trim>`
    Trim(Trim),

    /// `<where>`
    Where(Box<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub test: Expr,

    /// The `test` attribute as written, for diagnostics
    pub test_src: String,

    pub body: Box<Node>,
}

impl Node {
    pub fn text(sql: &str) -> Result<Node> {
        Ok(Node::Text(Text::new(sql)?))
    }

    pub fn mixed(nodes: impl IntoIterator<Item = Node>) -> Node {
        Node::Mixed(nodes.into_iter().collect())
    }

    /// Returns `true` if applying the node never depends on the parameter.
    pub fn is_static(&self) -> bool {
        match self {
            Node::Text(text) => text.is_static(),
            Node::Mixed(nodes) => nodes.iter().all(Node::is_static),
            _ => false,
        }
    }

    /// Renders the node against `cx`, returning the SQL text with its
    /// placeholders still in place.
    pub fn render(&self, cx: &mut Context<'_>) -> Result<String> {
        let mut dst = String::new();
        self.apply(cx, &mut dst)?;
        Ok(dst)
    }

    /// Appends the node's SQL text to `dst`.
    pub fn apply(&self, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
        match self {
            Node::Bind(bind) => {
                let value = bind.value.eval(&*cx);
                cx.push_scoped(&bind.name, value, "bind");
            }
            Node::Choose(choose) => choose.apply(cx, dst)?,
            Node::ForEach(foreach) => foreach.apply(cx, dst)?,
            Node::If(node) => {
                if node.test.eval_bool(&*cx) {
                    node.body.apply_scoped(cx, dst)?;
                }
            }
            Node::Mixed(nodes) => {
                for node in nodes {
                    node.apply(cx, dst)?;
                }
            }
            Node::Set(body) => trim::apply_set(body, cx, dst)?,
            Node::Text(text) => text.apply(cx, dst),
            Node::Trim(node) => node.apply(cx, dst)?,
            Node::Where(body) => trim::apply_where(body, cx, dst)?,
        }

        Ok(())
    }

    /// Applies the node, dropping any names it introduces once it finishes.
    pub(super) fn apply_scoped(&self, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
        let mark = cx.scope_mark();
        let ret = self.apply(cx, dst);
        cx.truncate_scopes(mark);
        ret
    }

    pub(super) fn render_scoped(&self, cx: &mut Context<'_>) -> Result<String> {
        let mut dst = String::new();
        self.apply_scoped(cx, &mut dst)?;
        Ok(dst)
    }
}

impl From<Text> for Node {
    fn from(value: Text) -> Self {
        Node::Text(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Mixed(value)
    }
}
