mod fragment;
pub use fragment::Fragment;

mod result_map;
pub use result_map::{NestedKind, NestedMapping, NestedTarget, ResultMap, ResultMapping};

mod statement;
pub use statement::{GeneratedKeys, Statement, StatementKind};

use indexmap::IndexMap;
use std::sync::Arc;

/// One loaded mapper document.
///
/// Everything in a mapper is immutable once built; the registry hands out
/// `Arc`s so executions never hold a lock while evaluating.
#[derive(Debug, Default)]
pub struct Mapper {
    /// Namespace scoping every id below
    pub namespace: String,

    /// Mapped statements by local id, in document order
    pub statements: IndexMap<String, Arc<Statement>>,

    /// Result maps by local id
    pub result_maps: IndexMap<String, Arc<ResultMap>>,

    /// SQL fragments by local id, with includes already expanded
    pub fragments: IndexMap<String, Fragment>,
}

impl Mapper {
    pub fn new(namespace: impl Into<String>) -> Mapper {
        Mapper {
            namespace: namespace.into(),
            ..Mapper::default()
        }
    }

    pub fn statement(&self, id: &str) -> Option<&Arc<Statement>> {
        self.statements.get(id)
    }

    pub fn result_map(&self, id: &str) -> Option<&Arc<ResultMap>> {
        self.result_maps.get(id)
    }

    pub fn fragment(&self, id: &str) -> Option<&Fragment> {
        self.fragments.get(id)
    }
}

/// Joins a namespace and a local id into `"<namespace>.<id>"`.
pub fn qualify(namespace: &str, id: &str) -> String {
    format!("{namespace}.{id}")
}

/// Splits `"<namespace>.<id>"` at the last dot.
///
/// Namespaces may themselves contain dots (`com.example.UserMapper`), ids
/// may not.
pub fn split_qualified(id: &str) -> Option<(&str, &str)> {
    let (namespace, local) = id.rsplit_once('.')?;

    if namespace.is_empty() || local.is_empty() {
        return None;
    }

    Some((namespace, local))
}

/// Resolves a possibly-unqualified reference made from within `namespace`.
///
/// `ref_id` is treated as local when it has no dot, or when its namespace
/// part equals `namespace`.
pub fn resolve_ref(namespace: &str, ref_id: &str) -> String {
    match split_qualified(ref_id) {
        Some(_) => ref_id.to_string(),
        None => qualify(namespace, ref_id),
    }
}
