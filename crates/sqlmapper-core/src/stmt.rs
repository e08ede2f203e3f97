mod eval;
pub use eval::Input;

mod expr;
pub use expr::{BinaryOp, Expr};

mod expr_parse;

mod num;

mod path;
pub use path::{Path, Segment};

mod value;
pub use value::Value;

mod value_chrono;

mod value_cmp;

mod value_coerce;

mod value_json;

mod value_map;
pub use value_map::ValueMap;

mod value_record;
pub use value_record::ValueRecord;
