use crate::element::{abbreviate, Content, Element};

use sqlmapper_core::{
    bail,
    stmt::Expr,
    template::{Bind, Choose, ForEach, If, Node, Trim, When},
    Result,
};

/// Compiles an include-expanded statement body into its node tree.
///
/// A body of a single piece compiles to that piece; anything else becomes a
/// [`Node::Mixed`].
pub(crate) fn compile(contents: &[Content]) -> Result<Node> {
    let mut nodes = vec![];
    let mut text = String::new();

    for content in contents {
        match content {
            Content::Text(t) => text.push_str(t),
            Content::Element(el) => {
                flush(&mut text, &mut nodes)?;
                nodes.push(compile_element(el)?);
            }
        }
    }

    flush(&mut text, &mut nodes)?;

    Ok(if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        Node::Mixed(nodes)
    })
}

fn flush(text: &mut String, nodes: &mut Vec<Node>) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    let node = Node::text(text)
        .map_err(|e| e.context(format!("in text `{}`", abbreviate(text))))?;
    nodes.push(node);
    text.clear();

    Ok(())
}

fn compile_element(el: &Element) -> Result<Node> {
    Ok(match el.name.as_str() {
        "if" => {
            let test = el.require("test")?;
            Node::If(If {
                test: Expr::parse(test),
                test_src: test.to_string(),
                body: Box::new(compile(&el.children)?),
            })
        }
        "where" => Node::Where(Box::new(compile(&el.children)?)),
        "set" => Node::Set(Box::new(compile(&el.children)?)),
        "trim" => Node::Trim(Trim {
            prefix: el.attr("prefix").map(str::to_string),
            suffix: el.attr("suffix").map(str::to_string),
            prefix_overrides: el
                .attr("prefixOverrides")
                .map(Trim::parse_overrides)
                .unwrap_or_default(),
            suffix_overrides: el
                .attr("suffixOverrides")
                .map(Trim::parse_overrides)
                .unwrap_or_default(),
            body: Box::new(compile(&el.children)?),
        }),
        "foreach" => {
            let collection = el.require("collection")?;
            Node::ForEach(ForEach {
                collection: Expr::parse(collection),
                collection_src: collection.to_string(),
                item: el.attr("item").map(str::to_string),
                index: el.attr("index").map(str::to_string),
                open: el.attr("open").unwrap_or_default().to_string(),
                separator: el.attr("separator").unwrap_or_default().to_string(),
                close: el.attr("close").unwrap_or_default().to_string(),
                body: Box::new(compile(&el.children)?),
            })
        }
        "choose" => Node::Choose(compile_choose(el)?),
        "bind" => {
            if let Some(text) = el.stray_text() {
                bail!("`<bind>` cannot have a body; found `{}`", abbreviate(text));
            }
            Node::Bind(Bind {
                name: el.require("name")?.to_string(),
                value: Expr::parse(el.require("value")?),
            })
        }
        "when" | "otherwise" => bail!("`{}` outside of `<choose>`", el.snippet()),
        _ => bail!("unknown tag `{}`", el.snippet()),
    })
}

fn compile_choose(el: &Element) -> Result<Choose> {
    if let Some(text) = el.stray_text() {
        bail!("text directly inside `<choose>`: `{}`", abbreviate(text));
    }

    let mut whens = vec![];
    let mut otherwise = None;

    for child in el.elements() {
        match child.name.as_str() {
            "when" if otherwise.is_none() => {
                let test = child.require("test")?;
                whens.push(When {
                    test: Expr::parse(test),
                    test_src: test.to_string(),
                    body: compile(&child.children)?,
                });
            }
            "otherwise" if otherwise.is_none() => {
                otherwise = Some(Box::new(compile(&child.children)?));
            }
            "when" | "otherwise" => {
                bail!("`{}` after `<otherwise>` in `<choose>`", child.snippet())
            }
            _ => bail!("unexpected `{}` inside `<choose>`", child.snippet()),
        }
    }

    if whens.is_empty() {
        bail!("`<choose>` requires at least one `<when>`");
    }

    Ok(Choose { whens, otherwise })
}
