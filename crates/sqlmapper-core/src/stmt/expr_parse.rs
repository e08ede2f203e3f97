use super::{BinaryOp, Expr, Path, Value};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    And,
    Call(String),
    Cmp(BinaryOp),
    False,
    Float(f64),
    Int(i64),
    LParen,
    Not,
    Null,
    Or,
    Path(Path),
    Plus,
    RParen,
    Str(String),
    True,
}

/// Parses an expression, returning `None` if `src` is not in the grammar.
pub(super) fn parse(src: &str) -> Option<Expr> {
    let tokens = tokenize(src)?;

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;

    if parser.pos != parser.tokens.len() {
        return None;
    }

    Some(expr)
}

/// Truthiness check of the leading property path of `src`.
pub(super) fn fallback(src: &str) -> Expr {
    let src = src.trim();
    let end = src
        .char_indices()
        .find(|(_, ch)| !(is_path_char(*ch) || *ch == '.' || *ch == '[' || *ch == ']'))
        .map(|(i, _)| i)
        .unwrap_or(src.len());

    let mut candidate = src[..end].trim_end_matches('.');

    // `name.trim() != ''` checks `name`
    if src[end..].trim_start().starts_with('(') {
        candidate = candidate.rsplit_once('.').map_or("", |(target, _)| target);
    }

    match Path::parse(candidate) {
        Some(path) => Expr::Path(path),
        None => Expr::Value(Value::Null),
    }
}

fn is_path_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn tokenize(src: &str) -> Option<Vec<Token>> {
    let mut tokens = vec![];
    let bytes = src.as_bytes();
    let mut pos = 0;

    while pos < src.len() {
        let ch = src[pos..].chars().next()?;
        let next = bytes.get(pos + 1).copied();

        match ch {
            ch if ch.is_whitespace() => {
                pos += ch.len_utf8();
            }
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            '&' if next == Some(b'&') => {
                tokens.push(Token::And);
                pos += 2;
            }
            '|' if next == Some(b'|') => {
                tokens.push(Token::Or);
                pos += 2;
            }
            '=' if next == Some(b'=') => {
                tokens.push(Token::Cmp(BinaryOp::Eq));
                pos += 2;
            }
            '!' if next == Some(b'=') => {
                tokens.push(Token::Cmp(BinaryOp::Ne));
                pos += 2;
            }
            '!' => {
                tokens.push(Token::Not);
                pos += 1;
            }
            '<' | '>' => {
                let op = match (ch, next == Some(b'=')) {
                    ('<', false) => BinaryOp::Lt,
                    ('<', true) => BinaryOp::Le,
                    ('>', false) => BinaryOp::Gt,
                    _ => BinaryOp::Ge,
                };
                tokens.push(Token::Cmp(op));
                pos += if next == Some(b'=') { 2 } else { 1 };
            }
            '\'' | '"' => {
                let (value, len) = lex_string(&src[pos..], ch)?;
                tokens.push(Token::Str(value));
                pos += len;
            }
            '-' if next.is_some_and(|b| b.is_ascii_digit()) && expects_operand(&tokens) => {
                let (token, len) = lex_number(&src[pos + 1..])?;
                tokens.push(match token {
                    Token::Int(v) => Token::Int(-v),
                    Token::Float(v) => Token::Float(-v),
                    _ => return None,
                });
                pos += len + 1;
            }
            ch if ch.is_ascii_digit() => {
                let (token, len) = lex_number(&src[pos..])?;
                tokens.push(token);
                pos += len;
            }
            ch if is_path_char(ch) => {
                let len = src[pos..]
                    .char_indices()
                    .find(|(_, ch)| !(is_path_char(*ch) || *ch == '.' || *ch == '[' || *ch == ']'))
                    .map(|(i, _)| i)
                    .unwrap_or(src.len() - pos);
                let word = &src[pos..pos + len];
                pos += len;

                if let Some(token) = keyword(word) {
                    tokens.push(token);
                    continue;
                }

                // `path.size()` style calls
                let rest = src[pos..].trim_start();
                if let Some(after_call) = rest.strip_prefix('(') {
                    let (target, method) = word.rsplit_once('.')?;
                    let after_call = after_call.trim_start();
                    let after_call = after_call.strip_prefix(')')?;
                    tokens.push(Token::Path(Path::parse(target)?));
                    tokens.push(Token::Call(method.to_string()));
                    pos = src.len() - after_call.len();
                    continue;
                }

                tokens.push(Token::Path(Path::parse(word)?));
            }
            _ => return None,
        }
    }

    Some(tokens)
}

fn keyword(word: &str) -> Option<Token> {
    Some(match word {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "null" => Token::Null,
        "true" => Token::True,
        "false" => Token::False,
        "eq" => Token::Cmp(BinaryOp::Eq),
        "neq" | "ne" => Token::Cmp(BinaryOp::Ne),
        "lt" => Token::Cmp(BinaryOp::Lt),
        "lte" | "le" => Token::Cmp(BinaryOp::Le),
        "gt" => Token::Cmp(BinaryOp::Gt),
        "gte" | "ge" => Token::Cmp(BinaryOp::Ge),
        _ => return None,
    })
}

fn expects_operand(tokens: &[Token]) -> bool {
    !matches!(
        tokens.last(),
        Some(
            Token::Path(_)
                | Token::Int(_)
                | Token::Float(_)
                | Token::Str(_)
                | Token::Null
                | Token::True
                | Token::False
                | Token::RParen
                | Token::Call(_)
        )
    )
}

/// Lexes a quoted string starting at `src[0]`. Returns the value and the
/// number of bytes consumed.
fn lex_string(src: &str, quote: char) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut chars = src.char_indices().skip(1);

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            ch if ch == quote => return Some((value, i + 1)),
            ch => value.push(ch),
        }
    }

    None
}

fn lex_number(src: &str) -> Option<(Token, usize)> {
    let mut len = 0;
    let mut seen_dot = false;

    for (i, ch) in src.char_indices() {
        match ch {
            '0'..='9' => len = i + 1,
            '.' if !seen_dot && src[i + 1..].starts_with(|c: char| c.is_ascii_digit()) => {
                seen_dot = true;
                len = i + 1;
            }
            _ => break,
        }
    }

    let text = &src[..len];

    if seen_dot {
        Some((Token::Float(text.parse().ok()?), len))
    } else {
        Some((Token::Int(text.parse().ok()?), len))
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut operands = vec![self.parse_and()?];

        while self.eat(&Token::Or) {
            operands.push(self.parse_and()?);
        }

        Some(if operands.len() == 1 {
            operands.remove(0)
        } else {
            Expr::Or(operands)
        })
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut operands = vec![self.parse_not()?];

        while self.eat(&Token::And) {
            operands.push(self.parse_not()?);
        }

        Some(if operands.len() == 1 {
            operands.remove(0)
        } else {
            Expr::And(operands)
        })
    }

    fn parse_not(&mut self) -> Option<Expr> {
        if self.eat(&Token::Not) {
            return Some(Expr::not(self.parse_not()?));
        }

        self.parse_cmp()
    }

    fn parse_cmp(&mut self) -> Option<Expr> {
        let lhs = self.parse_sum()?;

        if let Some(Token::Cmp(op)) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.parse_sum()?;
            return Some(Expr::binary_op(lhs, op, rhs));
        }

        Some(lhs)
    }

    fn parse_sum(&mut self) -> Option<Expr> {
        let mut operands = vec![self.parse_primary()?];

        while self.eat(&Token::Plus) {
            operands.push(self.parse_primary()?);
        }

        Some(if operands.len() == 1 {
            operands.remove(0)
        } else {
            Expr::Concat(operands)
        })
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        Some(match self.next()? {
            Token::Null => Expr::Value(Value::Null),
            Token::True => Expr::Value(Value::Bool(true)),
            Token::False => Expr::Value(Value::Bool(false)),
            Token::Int(v) => Expr::Value(Value::I64(v)),
            Token::Float(v) => Expr::Value(Value::F64(v)),
            Token::Str(v) => Expr::Value(Value::String(v)),
            Token::Path(path) => match self.peek() {
                Some(Token::Call(method)) => {
                    let expr = match method.as_str() {
                        "size" | "length" => Expr::Size(Box::new(Expr::Path(path))),
                        "isEmpty" => Expr::not(Expr::Path(path)),
                        _ => return None,
                    };
                    self.pos += 1;
                    expr
                }
                _ => Expr::Path(path),
            },
            Token::LParen => {
                let expr = self.parse_or()?;
                if !self.eat(&Token::RParen) {
                    return None;
                }
                expr
            }
            _ => return None,
        })
    }
}
