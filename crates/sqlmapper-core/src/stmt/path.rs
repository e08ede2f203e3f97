/// A dotted property path such as `user.address.city` or `items[0].id`.
///
/// Paths are resolved against a [`Value`](super::Value) with
/// [`Value::entry`](super::Value::entry); resolution short-circuits to "not
/// found" at the first missing segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Named field of a record, key of a map, or a numeric list position
    /// written with dot syntax
    Field(String),

    /// Bracketed list position, `[n]`
    Index(usize),
}

impl Path {
    /// Parses a path. Returns `None` if `src` is not a well-formed path.
    pub fn parse(src: &str) -> Option<Path> {
        let src = src.trim();
        let mut segments = vec![];
        let mut chars = src.char_indices().peekable();
        let mut expect_field = true;

        while let Some(&(start, ch)) = chars.peek() {
            match ch {
                '.' if !expect_field => {
                    chars.next();
                    expect_field = true;
                    continue;
                }
                '[' if !expect_field => {
                    chars.next();
                    let mut end = None;
                    for (i, ch) in chars.by_ref() {
                        if ch == ']' {
                            end = Some(i);
                            break;
                        }
                    }
                    let index = src[start + 1..end?].trim().parse::<usize>().ok()?;
                    segments.push(Segment::Index(index));
                    expect_field = false;
                }
                ch if expect_field && is_ident_char(ch) => {
                    let mut end = src.len();
                    while let Some(&(i, ch)) = chars.peek() {
                        if !is_ident_char(ch) {
                            end = i;
                            break;
                        }
                        chars.next();
                    }
                    segments.push(Segment::Field(src[start..end].to_string()));
                    expect_field = false;
                }
                _ => return None,
            }
        }

        if expect_field {
            return None;
        }

        Some(Path { segments })
    }

    /// Path with a single field segment.
    pub fn field(name: impl Into<String>) -> Path {
        Path {
            segments: vec![Segment::Field(name.into())],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Name of the first segment, which is looked up in bindings or the
    /// parameter before the rest of the path is walked.
    pub fn root(&self) -> &str {
        match self.segments.first() {
            Some(Segment::Field(name)) => name,
            _ => "",
        }
    }

    /// The path without its first segment.
    pub fn tail(&self) -> Path {
        Path {
            segments: self.segments[1..].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a copy of the path whose first segment is replaced.
    pub fn with_root(&self, root: impl Into<String>) -> Path {
        let mut segments = self.segments.clone();
        segments[0] = Segment::Field(root.into());
        Path { segments }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

impl core::fmt::Display for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl core::str::FromStr for Path {
    type Err = crate::Error;

    fn from_str(src: &str) -> crate::Result<Path> {
        Path::parse(src).ok_or_else(|| crate::err!("invalid property path `{src}`"))
    }
}
