/// A reusable `<sql>` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Local id within the namespace
    pub id: String,

    /// Raw markup with nested includes already substituted
    pub body: String,
}
