//! Old-style (OpenStep) property lists
//!
//! `project.pbxproj` is written in the ASCII plist dialect: dictionaries
//! `{ key = value; }`, arrays `( a, b, )` and strings that are either bare
//! words or double-quoted with C-style escapes. Comments are dropped on read;
//! the pbxproj writer regenerates the ones Xcode expects.

use passvault_core::error::{Error, Result};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Dictionary with keys in the sorted order Xcode writes them
pub type Dict = BTreeMap<String, Value>;

/// A property list value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Array(Vec<Value>),
    Dict(Dict),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// String items of an array, skipping anything else
    pub fn string_items(&self) -> Vec<&str> {
        self.as_array()
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Value::Dict(dict)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Parse an ASCII property list document
pub fn parse(input: &str) -> Result<Value> {
    let mut parser = Parser::new(input);
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.peek().is_some() {
        return Err(parser.error("Unexpected content after the root value"));
    }
    Ok(value)
}

/// Quote a string for writing, leaving safe words bare
pub fn quote(s: &str) -> Cow<'_, str> {
    if is_bare(s) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

fn is_bare(s: &str) -> bool {
    !s.is_empty()
        && !s.contains("//")
        && !s.contains("/*")
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'/' | b':' | b'.'))
}

fn is_word_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'{' | b'}' | b'(' | b')' | b'=' | b';' | b',' | b'"')
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            src: input.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::project_parse(format!("{} at line {}", message, self.line))
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(b), _) if b.is_ascii_whitespace() => {
                    self.bump();
                }
                (Some(b'/'), Some(b'/')) => {
                    while let Some(b) = self.bump() {
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.pos += 2;
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some(b'*'), Some(b'/')) => {
                                self.pos += 2;
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => return Err(self.error("Unterminated comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        self.skip_trivia()?;
        match self.bump() {
            Some(b) if b == expected => Ok(()),
            Some(b) => Err(self.error(&format!(
                "Expected '{}' but found '{}'",
                expected as char, b as char
            ))),
            None => Err(self.error(&format!(
                "Expected '{}' but reached end of input",
                expected as char
            ))),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'{') => self.parse_dict(),
            Some(b'(') => self.parse_array(),
            Some(_) => self.parse_string().map(Value::String),
            None => Err(self.error("Unexpected end of input")),
        }
    }

    fn parse_dict(&mut self) -> Result<Value> {
        self.expect(b'{')?;
        let mut dict = Dict::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.bump();
                return Ok(Value::Dict(dict));
            }
            let key = self.parse_string()?;
            self.expect(b'=')?;
            let value = self.parse_value()?;
            self.expect(b';')?;
            dict.insert(key, value);
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect(b'(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b')') {
                self.bump();
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => {
                    self.bump();
                }
                Some(b')') => {}
                _ => return Err(self.error("Expected ',' or ')' in array")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'"') => self.parse_quoted(),
            Some(b) if is_word_byte(b) => Ok(self.parse_bare()),
            Some(b) => Err(self.error(&format!("Unexpected '{}'", b as char))),
            None => Err(self.error("Unexpected end of input")),
        }
    }

    fn parse_bare(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            let comment_start = b == b'/' && matches!(self.peek_at(1), Some(b'/' | b'*'));
            if !is_word_byte(b) || comment_start {
                break;
            }
            self.bump();
        }
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    fn parse_quoted(&mut self) -> Result<String> {
        self.bump();
        let mut bytes = Vec::new();
        loop {
            match self.bump() {
                Some(b'"') => break,
                Some(b'\\') => match self.bump() {
                    Some(b'n') => bytes.push(b'\n'),
                    Some(b't') => bytes.push(b'\t'),
                    Some(b'r') => bytes.push(b'\r'),
                    Some(b'U') => {
                        let c = self.parse_unicode_escape()?;
                        let mut buf = [0u8; 4];
                        bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    }
                    Some(other) => bytes.push(other),
                    None => return Err(self.error("Unterminated escape")),
                },
                Some(b) => bytes.push(b),
                None => return Err(self.error("Unterminated string")),
            }
        }
        String::from_utf8(bytes).map_err(|_| self.error("Invalid UTF-8 in string"))
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let end = self.pos + 4;
        let digits = self
            .src
            .get(self.pos..end)
            .and_then(|d| std::str::from_utf8(d).ok())
            .ok_or_else(|| self.error("Truncated \\U escape"))?;
        let code =
            u32::from_str_radix(digits, 16).map_err(|_| self.error("Invalid \\U escape"))?;
        self.pos = end;
        char::from_u32(code).ok_or_else(|| self.error("Invalid \\U escape"))
    }
}
