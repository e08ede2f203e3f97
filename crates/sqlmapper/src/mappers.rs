mod builder;
pub use builder::Builder;

use crate::{exec, project::Projector, BoundStatement, Row, Settings};

use indexmap::IndexMap;
use sqlmapper_core::{
    mapper::{self, NestedTarget, ResultMap, Statement, StatementKind},
    stmt::Value,
    bail, Error, Mapper, Result,
};
use sqlmapper_xml::{FragmentSource, Parser};
use std::{
    fs,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

/// Registry of loaded mappers and the entry point for executing statements.
///
/// Loaded mappers are immutable and shared through `Arc`s; the registry lock
/// is only held to look a namespace up or swap one in, never while a
/// template is evaluated. `Mappers` is `Send + Sync` and is meant to be
/// shared by every caller.
#[derive(Debug, Default)]
pub struct Mappers {
    registry: RwLock<IndexMap<String, Arc<Mapper>>>,
    settings: Settings,
}

impl Mappers {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Creates an empty registry.
    pub fn new(settings: Settings) -> Mappers {
        Mappers {
            registry: RwLock::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parses a mapper document and registers it.
    ///
    /// A document whose namespace is already loaded replaces the earlier one.
    /// Includes of other namespaces resolve against mappers loaded so far.
    pub fn load_str(&self, src: &str) -> Result<Arc<Mapper>> {
        let mapper = Parser::new().fragments(self).parse(src)?;
        Ok(self.register(mapper))
    }

    /// Reads and registers a mapper document from disk.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Arc<Mapper>> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|e| {
            Error::from(e).context(format!("failed to read mapper `{}`", path.display()))
        })?;

        let mapper = Parser::new()
            .file(path.display().to_string())
            .fragments(self)
            .parse(&src)?;

        Ok(self.register(mapper))
    }

    /// Registers every `*.xml` file directly inside `dir`, in file name
    /// order.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<Arc<Mapper>>> {
        let dir = dir.as_ref();
        let context = || format!("failed to list mappers in `{}`", dir.display());

        let mut paths = vec![];
        for entry in fs::read_dir(dir).map_err(|e| Error::from(e).context(context()))? {
            let path = entry.map_err(|e| Error::from(e).context(context()))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "xml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| self.load_file(path)).collect()
    }

    /// Registers an already parsed mapper, replacing any mapper with the same
    /// namespace.
    pub fn register(&self, mapper: Mapper) -> Arc<Mapper> {
        let mapper = Arc::new(mapper);
        let namespace = mapper.namespace.clone();

        let previous = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.clone(), mapper.clone());

        tracing::debug!(
            namespace = %namespace,
            statements = mapper.statements.len(),
            replaced = previous.is_some(),
            "loaded mapper"
        );

        mapper
    }

    /// Namespaces currently loaded, in load order.
    pub fn namespaces(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn mapper(&self, namespace: &str) -> Option<Arc<Mapper>> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(namespace)
            .cloned()
    }

    /// Looks up a statement by `"<namespace>.<id>"`.
    pub fn statement(&self, id: &str) -> Result<Arc<Statement>> {
        mapper::split_qualified(id)
            .and_then(|(namespace, local)| self.mapper(namespace)?.statement(local).cloned())
            .ok_or_else(|| Error::statement_not_found(id))
    }

    /// Looks up a result map by `"<namespace>.<id>"`, with the mappings of
    /// any `extends` ancestors folded in.
    pub fn result_map(&self, id: &str) -> Result<Arc<ResultMap>> {
        self.result_map_with(id, &mut vec![])
    }

    fn result_map_with(&self, id: &str, chain: &mut Vec<String>) -> Result<Arc<ResultMap>> {
        let result_map = mapper::split_qualified(id)
            .and_then(|(namespace, local)| self.mapper(namespace)?.result_map(local).cloned())
            .ok_or_else(|| Error::result_map_not_found(id))?;

        self.inherit(result_map, chain)
    }

    fn inherit(&self, result_map: Arc<ResultMap>, chain: &mut Vec<String>) -> Result<Arc<ResultMap>> {
        let Some(parent_id) = &result_map.extends else {
            return Ok(result_map);
        };

        let id = result_map.qualified_id();
        if chain.contains(&id) {
            chain.push(id);
            bail!("result map inheritance cycle: {}", chain.join(" -> "));
        }

        chain.push(id);
        let parent = self.result_map_with(parent_id, chain)?;
        chain.pop();

        Ok(Arc::new(result_map.inherit(&parent)))
    }

    /// Resolves the result map a nested mapping points at.
    pub(crate) fn nested_result_map(&self, target: &NestedTarget) -> Result<Option<Arc<ResultMap>>> {
        match target {
            NestedTarget::Ref(id) => self.result_map(id).map(Some),
            NestedTarget::Inline(inline) => self.inherit(inline.clone(), &mut vec![]).map(Some),
            NestedTarget::Select { .. } => Ok(None),
        }
    }

    /// Executes any statement, returning its SQL and bound arguments.
    pub fn execute(&self, id: &str, param: &Value) -> Result<BoundStatement> {
        let stmt = self.statement(id)?;
        self.bind(&stmt, param)
    }

    /// Executes a `<select>`.
    pub fn select(&self, id: &str, param: &Value) -> Result<BoundStatement> {
        self.execute_kind(id, StatementKind::Select, param)
    }

    /// Executes an `<insert>`.
    pub fn insert(&self, id: &str, param: &Value) -> Result<BoundStatement> {
        self.execute_kind(id, StatementKind::Insert, param)
    }

    /// Executes an `<update>`.
    pub fn update(&self, id: &str, param: &Value) -> Result<BoundStatement> {
        self.execute_kind(id, StatementKind::Update, param)
    }

    /// Executes a `<delete>`.
    pub fn delete(&self, id: &str, param: &Value) -> Result<BoundStatement> {
        self.execute_kind(id, StatementKind::Delete, param)
    }

    fn execute_kind(&self, id: &str, kind: StatementKind, param: &Value) -> Result<BoundStatement> {
        let stmt = self.statement(id)?;

        if stmt.kind != kind {
            return Err(Error::statement_kind_mismatch(id, kind, stmt.kind));
        }

        self.bind(&stmt, param)
    }

    fn bind(&self, stmt: &Statement, param: &Value) -> Result<BoundStatement> {
        let bound = exec::bind(stmt, param, &self.settings)
            .map_err(|e| e.context(format!("failed to execute `{}`", stmt.qualified_id())))?;

        tracing::trace!(
            statement = %bound.statement_id,
            sql = %bound.sql,
            args = bound.args.len(),
            "bound statement"
        );

        Ok(bound)
    }

    /// Shapes one row with a result map.
    ///
    /// Columns the row lacks are skipped; the matching properties are simply
    /// absent from the returned record.
    pub fn project(&self, row: &Row, result_map: &str) -> Result<Value> {
        let result_map = self.result_map(result_map)?;
        Projector::new(self).project(row, &result_map)
    }

    /// Shapes a result set with a result map.
    ///
    /// Rows sharing the values of the map's `id` columns fold into one record,
    /// and their `collection` mappings gather into lists.
    pub fn project_rows(&self, rows: &[Row], result_map: &str) -> Result<Vec<Value>> {
        let result_map = self.result_map(result_map)?;
        Projector::new(self).project_rows(rows, &result_map)
    }
}

impl FragmentSource for Mappers {
    fn fragment(&self, qualified_id: &str) -> Option<String> {
        let (namespace, local) = mapper::split_qualified(qualified_id)?;
        let mapper = self.mapper(namespace)?;
        mapper.fragment(local).map(|fragment| fragment.body.clone())
    }
}
