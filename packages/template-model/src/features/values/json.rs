//! Lenient JSON value parsing
//!
//! Well-formed text goes through `serde_json`. Anything else is read by a
//! small recursive reader that accepts comments and trailing commas and, on
//! truncated input, keeps every complete member parsed so far.

use serde_json::{Map, Number, Value};

/// Container nesting the reader will follow, same as `serde_json`
const MAX_DEPTH: usize = 128;

/// Parse `text`, salvaging as much of a broken document as possible
pub fn parse_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    let mut reader = Reader::new(text);
    reader.skip_trivia();
    if reader.at_end() {
        return None;
    }
    match reader.value() {
        Parsed::Complete(value) | Parsed::Partial(value) => Some(value),
        Parsed::Failed => {
            tracing::debug!(offset = reader.pos, "JSON value parse failed");
            None
        }
    }
}

enum Parsed {
    Complete(Value),
    /// Input stopped inside this value; nothing after it is usable
    Partial(Value),
    Failed,
}

struct Reader<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                self.pos += 1;
            }
            if self.src[self.pos..].starts_with("//") {
                match self.src[self.pos..].find('\n') {
                    Some(offset) => self.pos += offset + 1,
                    None => self.pos = self.bytes.len(),
                }
            } else if self.src[self.pos..].starts_with("/*") {
                match self.src[self.pos + 2..].find("*/") {
                    Some(offset) => self.pos += offset + 4,
                    None => self.pos = self.bytes.len(),
                }
            } else {
                return;
            }
        }
    }

    fn value(&mut self) -> Parsed {
        self.skip_trivia();
        match self.peek() {
            Some(b'{' | b'[') => self.container(),
            Some(b'"') => match self.string() {
                Some(s) => Parsed::Complete(Value::String(s)),
                None => Parsed::Failed,
            },
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(_) => self.literal(),
            None => Parsed::Failed,
        }
    }

    /// Object or array at the cursor; too deep a nesting fails and the
    /// enclosing container keeps what it has
    fn container(&mut self) -> Parsed {
        if self.depth >= MAX_DEPTH {
            return Parsed::Failed;
        }
        self.depth += 1;
        let parsed = if self.peek() == Some(b'{') {
            self.object()
        } else {
            self.array()
        };
        self.depth -= 1;
        parsed
    }

    fn object(&mut self) -> Parsed {
        self.pos += 1;
        let mut map = Map::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    return Parsed::Complete(Value::Object(map));
                }
                Some(b'"') => {}
                _ => return Parsed::Partial(Value::Object(map)),
            }

            let Some(key) = self.string() else {
                return Parsed::Partial(Value::Object(map));
            };
            self.skip_trivia();
            if self.peek() != Some(b':') {
                return Parsed::Partial(Value::Object(map));
            }
            self.pos += 1;

            match self.value() {
                Parsed::Complete(value) => {
                    map.insert(key, value);
                }
                Parsed::Partial(value) => {
                    map.insert(key, value);
                    return Parsed::Partial(Value::Object(map));
                }
                Parsed::Failed => return Parsed::Partial(Value::Object(map)),
            }

            self.skip_trivia();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Parsed::Complete(Value::Object(map));
                }
                _ => return Parsed::Partial(Value::Object(map)),
            }
        }
    }

    fn array(&mut self) -> Parsed {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Parsed::Complete(Value::Array(items));
                }
                None => return Parsed::Partial(Value::Array(items)),
                Some(_) => {}
            }

            match self.value() {
                Parsed::Complete(value) => items.push(value),
                Parsed::Partial(value) => {
                    items.push(value);
                    return Parsed::Partial(Value::Array(items));
                }
                Parsed::Failed => return Parsed::Partial(Value::Array(items)),
            }

            self.skip_trivia();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Parsed::Complete(Value::Array(items));
                }
                _ => return Parsed::Partial(Value::Array(items)),
            }
        }
    }

    /// Quoted string at the cursor, or `None` if it is unterminated or invalid
    fn string(&mut self) -> Option<String> {
        let start = self.pos;
        let mut i = start + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'"' => {
                    let parsed = serde_json::from_str::<String>(&self.src[start..=i]).ok()?;
                    self.pos = i + 1;
                    return Some(parsed);
                }
                b'\n' => return None,
                _ => i += 1,
            }
        }
        None
    }

    fn number(&mut self) -> Parsed {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
        ) {
            self.pos += 1;
        }
        match serde_json::from_str::<Number>(&self.src[start..self.pos]) {
            Ok(number) => Parsed::Complete(Value::Number(number)),
            Err(_) => Parsed::Failed,
        }
    }

    fn literal(&mut self) -> Parsed {
        let rest = &self.src[self.pos..];
        for (word, value) in [
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("null", Value::Null),
        ] {
            if rest.starts_with(word) {
                self.pos += word.len();
                return Parsed::Complete(value);
            }
        }
        Parsed::Failed
    }
}
