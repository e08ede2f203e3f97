use crate::template::Node;

/// The kind of a mapped statement, given by its element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    /// Parses a statement element name.
    pub fn from_tag(tag: &str) -> Option<StatementKind> {
        Some(match tag {
            "select" => StatementKind::Select,
            "insert" => StatementKind::Insert,
            "update" => StatementKind::Update,
            "delete" => StatementKind::Delete,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        }
    }

    pub fn is_select(self) -> bool {
        matches!(self, StatementKind::Select)
    }
}

impl core::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated key settings of an `insert`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedKeys {
    pub properties: Vec<String>,
    pub columns: Vec<String>,
}

/// A compiled, identified SQL template.
#[derive(Debug)]
pub struct Statement {
    /// Namespace of the owning mapper
    pub namespace: String,

    /// Local id within the namespace
    pub id: String,

    pub kind: StatementKind,

    /// Body markup as written in the document, before includes are expanded
    pub body: String,

    /// Compiled template
    pub root: Node,

    pub parameter_type: Option<String>,

    pub result_type: Option<String>,

    /// Result map reference, qualified with the namespace when it had none
    pub result_map: Option<String>,

    /// Defaults to `true` for selects and `false` otherwise
    pub use_cache: bool,

    /// Timeout hint in seconds
    pub timeout: Option<u64>,

    pub fetch_size: Option<u64>,

    /// `STATEMENT`, `PREPARED` or `CALLABLE`, stored verbatim
    pub statement_type: Option<String>,

    /// Present for inserts declaring `useGeneratedKeys="true"` or a key property
    pub generated_keys: Option<GeneratedKeys>,
}

impl Statement {
    /// Returns `"<namespace>.<id>"`.
    pub fn qualified_id(&self) -> String {
        super::qualify(&self.namespace, &self.id)
    }
}
