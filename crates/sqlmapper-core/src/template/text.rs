use super::{
    placeholder::{self, Piece},
    Context,
};
use crate::{stmt::Path, Error, Result};

/// Static SQL text, pre-split around its `#{...}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pieces: Vec<TextPiece>,
}

#[derive(Debug, Clone, PartialEq)]
enum TextPiece {
    Sql(String),
    Placeholder {
        path: Path,
        options: Option<String>,
        raw: String,
    },
}

impl Text {
    /// Compiles static text.
    ///
    /// Fails on `${...}` raw substitution, on an unterminated `#{`, and on a
    /// placeholder whose property is not a valid path.
    pub fn new(sql: &str) -> Result<Text> {
        let mut pieces = vec![];

        for piece in placeholder::scan(sql) {
            match piece {
                Piece::Sql(sql) => pieces.push(TextPiece::Sql(sql.to_string())),
                Piece::Placeholder(inner) => {
                    let (property, options) = placeholder::split_options(inner);
                    let Some(path) = Path::parse(property) else {
                        crate::bail!("invalid placeholder `#{{{inner}}}`");
                    };
                    pieces.push(TextPiece::Placeholder {
                        path,
                        options: options.map(str::to_string),
                        raw: inner.to_string(),
                    });
                }
                Piece::Raw(inner) => {
                    return Err(Error::unsupported_feature(format!(
                        "raw substitution `${{{inner}}}` is not supported; use `#{{{inner}}}`"
                    )));
                }
                Piece::Unterminated(rest) => {
                    crate::bail!("unterminated placeholder `{rest}`");
                }
            }
        }

        Ok(Text { pieces })
    }

    /// Returns `true` if the text contains no placeholders.
    pub fn is_static(&self) -> bool {
        self.pieces
            .iter()
            .all(|piece| matches!(piece, TextPiece::Sql(_)))
    }

    pub(super) fn apply(&self, cx: &mut Context<'_>, dst: &mut String) {
        for piece in &self.pieces {
            match piece {
                TextPiece::Sql(sql) => dst.push_str(sql),
                TextPiece::Placeholder { path, options, raw } => {
                    match cx.scoped_binding(path.root()) {
                        Some(generated) => {
                            dst.push_str("#{");
                            dst.push_str(&path.with_root(generated).to_string());
                            if let Some(options) = options {
                                dst.push_str(", ");
                                dst.push_str(options);
                            }
                            dst.push('}');
                        }
                        None => {
                            dst.push_str("#{");
                            dst.push_str(raw);
                            dst.push('}');
                        }
                    }
                }
            }
        }
    }
}

impl core::fmt::Display for Text {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for piece in &self.pieces {
            match piece {
                TextPiece::Sql(sql) => f.write_str(sql)?,
                TextPiece::Placeholder { raw, .. } => write!(f, "#{{{raw}}}")?,
            }
        }
        Ok(())
    }
}
