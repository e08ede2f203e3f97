use crate::stmt::{Input, Path, Value, ValueMap};

use serde::Deserialize;

/// What a `foreach` does when its collection is empty.
///
/// An absent, null or non-collection value is always an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCollection {
    /// Fail the execution with an expression evaluation error
    #[default]
    Error,

    /// Emit `open` immediately followed by `close`, e.g. `()`
    Render,
}

/// Evaluation settings shared by every node of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub empty_collection: EmptyCollection,
}

/// Per-call evaluation state: the parameter plus names introduced while
/// applying the template.
///
/// Names introduced by `foreach` and `bind` are scoped: they are visible to
/// later siblings and their descendants and vanish when the enclosing node
/// finishes. Placeholders that reference a scoped name are rewritten to a
/// generated binding which stays resolvable after evaluation, so the final
/// placeholder scan sees per-iteration values.
#[derive(Debug)]
pub struct Context<'a> {
    param: &'a Value,
    options: Options,
    scopes: Vec<Scoped>,
    bindings: ValueMap,
    next_binding: usize,
}

#[derive(Debug)]
struct Scoped {
    name: String,
    value: Value,
    prefix: &'static str,
    generated: Option<String>,
}

/// Name under which the whole parameter is always reachable.
const PARAMETER: &str = "_parameter";

impl<'a> Context<'a> {
    pub fn new(param: &'a Value) -> Context<'a> {
        Context::with_options(param, Options::default())
    }

    pub fn with_options(param: &'a Value, options: Options) -> Context<'a> {
        Context {
            param,
            options,
            scopes: vec![],
            bindings: ValueMap::new(),
            next_binding: 0,
        }
    }

    pub fn param(&self) -> &'a Value {
        self.param
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Generated bindings created during evaluation.
    pub fn bindings(&self) -> &ValueMap {
        &self.bindings
    }

    /// Resolves a placeholder path after evaluation: generated bindings
    /// first, then the parameter.
    pub fn resolve_bound(&self, path: &Path) -> Option<&Value> {
        if let Some(value) = self.bindings.get(path.root()) {
            return value.entry(&path.tail());
        }

        self.resolve_param(path)
    }

    pub(crate) fn scope_mark(&self) -> usize {
        self.scopes.len()
    }

    pub(crate) fn truncate_scopes(&mut self, mark: usize) {
        self.scopes.truncate(mark);
    }

    pub(crate) fn push_scoped(&mut self, name: &str, value: Value, prefix: &'static str) {
        self.scopes.push(Scoped {
            name: name.to_string(),
            value,
            prefix,
            generated: None,
        });
    }

    /// Returns the generated binding name for a scoped `name`, creating it on
    /// first use. Returns `None` when `name` is not currently scoped.
    pub(crate) fn scoped_binding(&mut self, name: &str) -> Option<String> {
        let scoped = self.scopes.iter_mut().rev().find(|scoped| scoped.name == name)?;

        if let Some(generated) = &scoped.generated {
            return Some(generated.clone());
        }

        let generated = format!("__{}_{}_{}", scoped.prefix, scoped.name, self.next_binding);
        self.next_binding += 1;
        self.bindings.insert(generated.clone(), scoped.value.clone());
        scoped.generated = Some(generated.clone());
        Some(generated)
    }

    fn resolve_param(&self, path: &Path) -> Option<&'a Value> {
        if path.root() == PARAMETER {
            return self.param.entry(&path.tail());
        }

        match self.param {
            Value::Record(_) | Value::Map(_) => self.param.entry(path),
            // A scalar or list parameter answers to any root name
            param => param.entry(&path.tail()),
        }
    }
}

impl Input for Context<'_> {
    fn resolve(&self, path: &Path) -> Option<&Value> {
        let root = path.root();

        if let Some(scoped) = self.scopes.iter().rev().find(|scoped| scoped.name == root) {
            return scoped.value.entry(&path.tail());
        }

        if let Some(value) = self.bindings.get(root) {
            return value.entry(&path.tail());
        }

        self.resolve_param(path)
    }
}
