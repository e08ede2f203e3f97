//! Scanning of `#{...}` placeholders in SQL text.

/// A piece of SQL text produced by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// Literal SQL
    Sql(&'a str),

    /// Contents of a `#{...}` placeholder
    Placeholder(&'a str),

    /// Contents of a `${...}` raw substitution, which is not supported
    Raw(&'a str),

    /// A `#{` or `${` with no closing brace, through the end of the text
    Unterminated(&'a str),
}

/// Splits `sql` into literal text and placeholders, left to right.
pub fn scan(sql: &str) -> Scan<'_> {
    Scan { rest: sql }
}

pub struct Scan<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Scan<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        if self.rest.is_empty() {
            return None;
        }

        let start = find_open(self.rest);

        match start {
            None => {
                let sql = self.rest;
                self.rest = "";
                Some(Piece::Sql(sql))
            }
            Some(0) => {
                let raw = self.rest.starts_with('$');
                match self.rest.find('}') {
                    Some(end) => {
                        let inner = &self.rest[2..end];
                        self.rest = &self.rest[end + 1..];
                        Some(if raw {
                            Piece::Raw(inner)
                        } else {
                            Piece::Placeholder(inner)
                        })
                    }
                    None => {
                        let text = self.rest;
                        self.rest = "";
                        Some(Piece::Unterminated(text))
                    }
                }
            }
            Some(start) => {
                let sql = &self.rest[..start];
                self.rest = &self.rest[start..];
                Some(Piece::Sql(sql))
            }
        }
    }
}

fn find_open(sql: &str) -> Option<usize> {
    let hash = sql.find("#{");
    let dollar = sql.find("${");

    match (hash, dollar) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Splits placeholder contents into the property and its options:
/// `id, jdbcType=INTEGER` yields `("id", Some("jdbcType=INTEGER"))`.
pub fn split_options(inner: &str) -> (&str, Option<&str>) {
    match inner.split_once(',') {
        Some((property, options)) => (property.trim(), Some(options.trim())),
        None => (inner.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_mixed() {
        let pieces: Vec<_> = scan("SELECT * FROM t WHERE id = #{id} AND name = #{name}").collect();
        assert_eq!(
            pieces,
            [
                Piece::Sql("SELECT * FROM t WHERE id = "),
                Piece::Placeholder("id"),
                Piece::Sql(" AND name = "),
                Piece::Placeholder("name"),
            ]
        );
    }

    #[test]
    fn scan_adjacent_and_raw() {
        let pieces: Vec<_> = scan("#{a}#{b}${c}").collect();
        assert_eq!(
            pieces,
            [Piece::Placeholder("a"), Piece::Placeholder("b"), Piece::Raw("c")]
        );
    }

    #[test]
    fn scan_unterminated() {
        let pieces: Vec<_> = scan("x = #{id").collect();
        assert_eq!(pieces, [Piece::Sql("x = "), Piece::Unterminated("#{id")]);
    }

    #[test]
    fn scan_plain_text() {
        let pieces: Vec<_> = scan("SELECT 1 # not a placeholder { }").collect();
        assert_eq!(pieces, [Piece::Sql("SELECT 1 # not a placeholder { }")]);
    }

    #[test]
    fn options_are_split_off() {
        assert_eq!(
            split_options(" id , jdbcType=INTEGER"),
            ("id", Some("jdbcType=INTEGER"))
        );
        assert_eq!(split_options("name"), ("name", None));
    }
}
