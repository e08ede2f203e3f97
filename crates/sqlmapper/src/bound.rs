use sqlmapper_core::{mapper::StatementKind, stmt::Value};

/// The outcome of executing a mapped statement: SQL ready for a driver plus
/// the arguments to bind, in marker order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    /// SQL text with positional markers
    pub sql: String,

    /// The N-th argument binds the N-th marker in `sql`
    pub args: Vec<Value>,

    pub kind: StatementKind,

    /// `"<namespace>.<id>"` of the executed statement
    pub statement_id: String,

    /// Qualified result map for shaping returned rows
    pub result_map: Option<String>,

    pub result_type: Option<String>,

    /// Timeout hint in seconds
    pub timeout: Option<u64>,

    /// Properties receiving generated keys, for inserts that declare them
    pub key_properties: Vec<String>,

    /// Columns holding generated keys
    pub key_columns: Vec<String>,
}
