use super::{Context, Node};
use crate::Result;

const NONE: &[&str] = &[];

/// `<trim>`: strips override tokens from the ends of its body and wraps it in
/// a prefix and suffix, but only when the body is not blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Trim {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub prefix_overrides: Vec<String>,
    pub suffix_overrides: Vec<String>,
    pub body: Box<Node>,
}

impl Trim {
    /// Splits a `prefixOverrides` / `suffixOverrides` attribute on `|`.
    pub fn parse_overrides(src: &str) -> Vec<String> {
        src.split('|')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub(super) fn apply(&self, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
        let body = self.body.render_scoped(cx)?;

        if let Some(sql) = wrap(
            &body,
            self.prefix.as_deref(),
            self.suffix.as_deref(),
            &self.prefix_overrides,
            &self.suffix_overrides,
        ) {
            push_clause(dst, &sql);
        }

        Ok(())
    }
}

/// `<where>`: drops one leading `AND` / `OR` and prefixes `WHERE`.
pub(super) fn apply_where(body: &Node, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
    const OVERRIDES: &[&str] = &["AND", "OR"];

    let body = body.render_scoped(cx)?;
    if let Some(sql) = wrap(&body, Some("WHERE"), None, OVERRIDES, NONE) {
        push_clause(dst, &sql);
    }
    Ok(())
}

/// `<set>`: drops one trailing (or leading) comma and prefixes `SET`.
pub(super) fn apply_set(body: &Node, cx: &mut Context<'_>, dst: &mut String) -> Result<()> {
    const OVERRIDES: &[&str] = &[","];

    let body = body.render_scoped(cx)?;
    if let Some(sql) = wrap(&body, Some("SET"), None, OVERRIDES, OVERRIDES) {
        push_clause(dst, &sql);
    }
    Ok(())
}

/// Appends a clause, keeping it from running into preceding text.
fn push_clause(dst: &mut String, sql: &str) {
    if dst.chars().next_back().is_some_and(|ch| !ch.is_whitespace()) {
        dst.push(' ');
    }
    dst.push_str(sql);
}

fn wrap(
    body: &str,
    prefix: Option<&str>,
    suffix: Option<&str>,
    prefix_overrides: &[impl AsRef<str>],
    suffix_overrides: &[impl AsRef<str>],
) -> Option<String> {
    let mut sql = body.trim();

    if sql.is_empty() {
        return None;
    }

    if let Some(rest) = prefix_overrides
        .iter()
        .find_map(|token| strip_prefix_token(sql, token.as_ref()))
    {
        // One separator after the token goes with it
        sql = rest
            .strip_prefix(char::is_whitespace)
            .unwrap_or(rest);
    }

    if let Some(rest) = suffix_overrides
        .iter()
        .find_map(|token| strip_suffix_token(sql, token.as_ref()))
    {
        sql = rest.trim_end();
    }

    if sql.is_empty() {
        return None;
    }

    let mut ret = String::with_capacity(sql.len() + 16);

    if let Some(prefix) = prefix {
        ret.push_str(prefix);
        if prefix.ends_with(is_word_char) {
            ret.push(' ');
        }
    }

    ret.push_str(sql);

    if let Some(suffix) = suffix {
        if suffix.starts_with(is_word_char) {
            ret.push(' ');
        }
        ret.push_str(suffix);
    }

    Some(ret)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Case-insensitive prefix match that does not split a word: `OR` matches
/// `OR x = 1` but not `ORDER BY`.
fn strip_prefix_token<'a>(sql: &'a str, token: &str) -> Option<&'a str> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let head = sql.get(..token.len())?;
    if !head.eq_ignore_ascii_case(token) {
        return None;
    }

    let rest = &sql[token.len()..];
    if token.ends_with(is_word_char) && rest.starts_with(is_word_char) {
        return None;
    }

    Some(rest)
}

fn strip_suffix_token<'a>(sql: &'a str, token: &str) -> Option<&'a str> {
    let token = token.trim();
    if token.is_empty() || sql.len() < token.len() {
        return None;
    }

    let split = sql.len() - token.len();
    let tail = sql.get(split..)?;
    if !tail.eq_ignore_ascii_case(token) {
        return None;
    }

    let rest = &sql[..split];
    if token.starts_with(is_word_char) && rest.ends_with(is_word_char) {
        return None;
    }

    Some(rest)
}
