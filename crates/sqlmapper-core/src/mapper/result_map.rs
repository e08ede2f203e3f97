use std::sync::Arc;

/// Column to property projection rules for shaping a raw row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultMap {
    /// Namespace of the owning mapper
    pub namespace: String,

    /// Local id. Inline nested maps get a synthesized id.
    pub id: String,

    /// Declared `type`, carried onto projected records
    pub ty: Option<String>,

    /// Parent result map whose mappings are inherited
    pub extends: Option<String>,

    /// Copy through columns no mapping consumed
    pub auto_mapping: bool,

    /// Identifier mappings; also the grouping key for nested collections
    pub ids: Vec<ResultMapping>,

    /// Plain property mappings, including constructor arguments
    pub results: Vec<ResultMapping>,

    /// `association` and `collection` mappings
    pub nested: Vec<NestedMapping>,
}

/// One `column` to `property` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMapping {
    pub property: String,
    pub column: String,

    /// Declared value type used for coercion
    pub java_type: Option<String>,

    pub jdbc_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    /// One-to-one
    Association,

    /// One-to-many
    Collection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NestedTarget {
    /// Reference to another result map, qualified
    Ref(String),

    /// Result map declared inline
    Inline(Arc<ResultMap>),

    /// Nested select; requires running another query and is left to the
    /// caller
    Select { statement: String, column: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NestedMapping {
    pub kind: NestedKind,
    pub property: String,
    pub target: NestedTarget,

    /// Prefix prepended to every column of the nested map
    pub column_prefix: Option<String>,

    /// `javaType` / `ofType`
    pub ty: Option<String>,
}

impl ResultMap {
    pub fn qualified_id(&self) -> String {
        super::qualify(&self.namespace, &self.id)
    }

    /// Identifier and plain mappings, identifiers first.
    pub fn mappings(&self) -> impl Iterator<Item = &ResultMapping> {
        self.ids.iter().chain(self.results.iter())
    }

    /// Folds a parent map underneath this one.
    ///
    /// Mappings declared here win over inherited mappings for the same
    /// property.
    pub fn inherit(&self, parent: &ResultMap) -> ResultMap {
        fn merge(parent: &[ResultMapping], child: &[ResultMapping]) -> Vec<ResultMapping> {
            parent
                .iter()
                .filter(|p| child.iter().all(|c| c.property != p.property))
                .chain(child.iter())
                .cloned()
                .collect()
        }

        let nested = parent
            .nested
            .iter()
            .filter(|p| self.nested.iter().all(|c| c.property != p.property))
            .chain(self.nested.iter())
            .cloned()
            .collect();

        ResultMap {
            namespace: self.namespace.clone(),
            id: self.id.clone(),
            ty: self.ty.clone().or_else(|| parent.ty.clone()),
            extends: parent.extends.clone(),
            auto_mapping: self.auto_mapping,
            ids: merge(&parent.ids, &self.ids),
            results: merge(&parent.results, &self.results),
            nested,
        }
    }
}
