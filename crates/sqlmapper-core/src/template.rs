//! Dynamic SQL templates.
//!
//! A statement body compiles to a tree of [`Node`]s. Applying the tree to a
//! [`Context`] appends SQL text, still containing `#{...}` placeholders, to
//! a buffer. Nodes carry no execution state, so one compiled tree can be
//! applied by many callers at once.

mod choose;
pub use choose::{Choose, When};

mod context;
pub use context::{Context, EmptyCollection, Options};

mod foreach;
pub use foreach::ForEach;

mod node;
pub use node::{Bind, If, Node};

pub mod placeholder;

mod text;
pub use text::Text;

mod trim;
pub use trim::Trim;
