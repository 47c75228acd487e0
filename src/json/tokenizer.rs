//! Single-pass push tokenizer.
//!
//! [`Tokenizer::run`] walks the document once, validating JSON syntax and
//! emitting one event per structural element. It never allocates for
//! document content: string and number events borrow the input buffer.
//! The only state that grows is a stack of open-container tags, capped by
//! [`Limits::max_depth`].

use crate::error::{Error, Result};
use crate::json::limits::Limits;

/// Receiver for tokenizer events.
///
/// Scalar events hand over the raw bytes of the lexeme. For strings that
/// is the span between the quotes with escape sequences left intact, and
/// with no UTF-8 guarantee; for numbers it is the full lexeme including
/// sign, fraction and exponent. Interpreting the bytes is the sink's job.
///
/// Any `Err` returned from a callback aborts the pass and is propagated
/// out of [`Tokenizer::run`] unchanged.
pub trait EventSink {
    /// An object opened.
    fn object_start(&mut self) -> Result<()>;
    /// The innermost open object closed.
    fn object_end(&mut self) -> Result<()>;
    /// An array opened.
    fn array_start(&mut self) -> Result<()>;
    /// The innermost open array closed.
    fn array_end(&mut self) -> Result<()>;
    /// An object member name. The member's value events follow.
    fn key(&mut self, raw: &[u8]) -> Result<()>;
    /// A string value.
    fn string(&mut self, raw: &[u8]) -> Result<()>;
    /// A number value.
    fn number(&mut self, raw: &[u8]) -> Result<()>;
    /// A `true` or `false` literal. Ignored by default.
    fn boolean(&mut self, _value: bool) -> Result<()> {
        Ok(())
    }
    /// A `null` literal. Ignored by default.
    fn null(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Kind of open container on the scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

/// What to do after [`Tokenizer::begin_value`] returns.
enum Step {
    /// A container opened and holds at least one element; parse it next.
    Descend,
    /// The value is complete; close containers and look for a separator.
    Unwind,
}

/// Cursor over one JSON document.
///
/// Construct with [`Tokenizer::new`], then call [`Tokenizer::run`] exactly
/// once.
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    scopes: Vec<Scope>,
    limits: Limits,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`, rejecting oversized documents up
    /// front.
    pub fn new(input: &'a [u8], limits: Limits) -> Result<Self> {
        if input.len() > limits.max_input_size {
            return Err(Error::InputTooLarge(input.len(), limits.max_input_size));
        }
        Ok(Self {
            input,
            pos: 0,
            scopes: Vec::new(),
            limits,
        })
    }

    /// Tokenize the whole document, pushing events into `sink`.
    ///
    /// Exactly one top-level value is consumed; trailing non-whitespace is
    /// a syntax error.
    pub fn run<S: EventSink>(&mut self, sink: &mut S) -> Result<()> {
        'value: loop {
            self.skip_whitespace();
            match self.begin_value(sink)? {
                Step::Descend => continue 'value,
                Step::Unwind => {}
            }
            // A complete value just ended. Close every container that ends
            // here, then either resume after a comma or finish.
            loop {
                match self.scopes.last().copied() {
                    None => {
                        self.skip_whitespace();
                        if self.pos != self.input.len() {
                            return Err(self.syntax());
                        }
                        return Ok(());
                    }
                    Some(Scope::Object) => {
                        self.skip_whitespace();
                        match self.peek() {
                            Some(b',') => {
                                self.pos += 1;
                                self.skip_whitespace();
                                self.read_key(sink)?;
                                continue 'value;
                            }
                            Some(b'}') => {
                                self.pos += 1;
                                sink.object_end()?;
                                self.scopes.pop();
                            }
                            _ => return Err(self.syntax()),
                        }
                    }
                    Some(Scope::Array) => {
                        self.skip_whitespace();
                        match self.peek() {
                            Some(b',') => {
                                self.pos += 1;
                                continue 'value;
                            }
                            Some(b']') => {
                                self.pos += 1;
                                sink.array_end()?;
                                self.scopes.pop();
                            }
                            _ => return Err(self.syntax()),
                        }
                    }
                }
            }
        }
    }

    /// Parse the start of a value at the cursor.
    ///
    /// Scalars and empty containers are consumed whole. A non-empty object
    /// additionally consumes its first key and colon, so that on
    /// [`Step::Descend`] the cursor always sits at the start of the next
    /// value.
    fn begin_value<S: EventSink>(&mut self, sink: &mut S) -> Result<Step> {
        match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                self.enter_scope(Scope::Object)?;
                sink.object_start()?;
                self.skip_whitespace();
                if self.peek() == Some(b'}') {
                    self.pos += 1;
                    sink.object_end()?;
                    self.scopes.pop();
                    return Ok(Step::Unwind);
                }
                self.read_key(sink)?;
                Ok(Step::Descend)
            }
            Some(b'[') => {
                self.pos += 1;
                self.enter_scope(Scope::Array)?;
                sink.array_start()?;
                self.skip_whitespace();
                if self.peek() == Some(b']') {
                    self.pos += 1;
                    sink.array_end()?;
                    self.scopes.pop();
                    return Ok(Step::Unwind);
                }
                Ok(Step::Descend)
            }
            Some(b'"') => {
                let raw = self.lex_string()?;
                sink.string(raw)?;
                Ok(Step::Unwind)
            }
            Some(b'-') | Some(b'0'..=b'9') => {
                let raw = self.lex_number()?;
                sink.number(raw)?;
                Ok(Step::Unwind)
            }
            Some(b't') => {
                self.expect(b"true")?;
                sink.boolean(true)?;
                Ok(Step::Unwind)
            }
            Some(b'f') => {
                self.expect(b"false")?;
                sink.boolean(false)?;
                Ok(Step::Unwind)
            }
            Some(b'n') => {
                self.expect(b"null")?;
                sink.null()?;
                Ok(Step::Unwind)
            }
            _ => Err(self.syntax()),
        }
    }

    /// Read a member name and its colon. The cursor must sit on the
    /// opening quote.
    fn read_key<S: EventSink>(&mut self, sink: &mut S) -> Result<()> {
        if self.peek() != Some(b'"') {
            return Err(self.syntax());
        }
        let raw = self.lex_string()?;
        sink.key(raw)?;
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return Err(self.syntax());
        }
        self.pos += 1;
        Ok(())
    }

    /// Lex a string starting at the opening quote, returning the raw span
    /// between the quotes. Escape sequences are validated but not decoded.
    fn lex_string(&mut self) -> Result<&'a [u8]> {
        let input = self.input;
        self.pos += 1; // opening quote
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b'"') => {
                    let raw = &input[start..self.pos];
                    self.pos += 1;
                    return Ok(raw);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'"') | Some(b'\\') | Some(b'/') | Some(b'b') | Some(b'f')
                        | Some(b'n') | Some(b'r') | Some(b't') => self.pos += 1,
                        Some(b'u') => {
                            self.pos += 1;
                            for _ in 0..4 {
                                match self.peek() {
                                    Some(b) if b.is_ascii_hexdigit() => self.pos += 1,
                                    _ => return Err(self.syntax()),
                                }
                            }
                        }
                        _ => return Err(self.syntax()),
                    }
                }
                // Unescaped control characters are forbidden inside strings.
                Some(b) if b < 0x20 => return Err(self.syntax()),
                Some(_) => self.pos += 1,
                None => return Err(self.syntax()),
            }
        }
    }

    /// Lex a number lexeme: sign, integer part, optional fraction and
    /// exponent.
    fn lex_number(&mut self) -> Result<&'a [u8]> {
        let input = self.input;
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        // Integer part is a lone zero or a run starting with 1-9.
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.digit_run(),
            _ => return Err(self.syntax()),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.digit_run_nonempty()?;
        }
        if let Some(b'e') | Some(b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+') | Some(b'-') = self.peek() {
                self.pos += 1;
            }
            self.digit_run_nonempty()?;
        }
        Ok(&input[start..self.pos])
    }

    fn digit_run(&mut self) {
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            self.pos += 1;
        }
    }

    fn digit_run_nonempty(&mut self) -> Result<()> {
        match self.peek() {
            Some(b) if b.is_ascii_digit() => {
                self.digit_run();
                Ok(())
            }
            _ => Err(self.syntax()),
        }
    }

    fn expect(&mut self, literal: &'static [u8]) -> Result<()> {
        let end = self.pos + literal.len();
        if self.input.len() < end || &self.input[self.pos..end] != literal {
            return Err(self.syntax());
        }
        self.pos = end;
        Ok(())
    }

    fn enter_scope(&mut self, scope: Scope) -> Result<()> {
        if self.scopes.len() >= self.limits.max_depth {
            return Err(Error::DepthLimit(self.limits.max_depth));
        }
        self.scopes.push(scope);
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn syntax(&self) -> Error {
        Error::Syntax(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Ev {
        ObjStart,
        ObjEnd,
        ArrStart,
        ArrEnd,
        Key(Vec<u8>),
        Str(Vec<u8>),
        Num(Vec<u8>),
        Bool(bool),
        Null,
    }

    #[derive(Default)]
    struct Recorder(Vec<Ev>);

    impl EventSink for Recorder {
        fn object_start(&mut self) -> Result<()> {
            self.0.push(Ev::ObjStart);
            Ok(())
        }
        fn object_end(&mut self) -> Result<()> {
            self.0.push(Ev::ObjEnd);
            Ok(())
        }
        fn array_start(&mut self) -> Result<()> {
            self.0.push(Ev::ArrStart);
            Ok(())
        }
        fn array_end(&mut self) -> Result<()> {
            self.0.push(Ev::ArrEnd);
            Ok(())
        }
        fn key(&mut self, raw: &[u8]) -> Result<()> {
            self.0.push(Ev::Key(raw.to_vec()));
            Ok(())
        }
        fn string(&mut self, raw: &[u8]) -> Result<()> {
            self.0.push(Ev::Str(raw.to_vec()));
            Ok(())
        }
        fn number(&mut self, raw: &[u8]) -> Result<()> {
            self.0.push(Ev::Num(raw.to_vec()));
            Ok(())
        }
        fn boolean(&mut self, value: bool) -> Result<()> {
            self.0.push(Ev::Bool(value));
            Ok(())
        }
        fn null(&mut self) -> Result<()> {
            self.0.push(Ev::Null);
            Ok(())
        }
    }

    fn events(doc: &str) -> Result<Vec<Ev>> {
        let mut sink = Recorder::default();
        let mut tokenizer = Tokenizer::new(doc.as_bytes(), Limits::consensus())?;
        tokenizer.run(&mut sink)?;
        Ok(sink.0)
    }

    #[test]
    fn test_scalar_document() {
        assert_eq!(events("42").unwrap(), vec![Ev::Num(b"42".to_vec())]);
    }

    #[test]
    fn test_object_events_follow_document_order() {
        let evs = events(r#"{"version":2,"locktime":0}"#).unwrap();
        assert_eq!(
            evs,
            vec![
                Ev::ObjStart,
                Ev::Key(b"version".to_vec()),
                Ev::Num(b"2".to_vec()),
                Ev::Key(b"locktime".to_vec()),
                Ev::Num(b"0".to_vec()),
                Ev::ObjEnd,
            ]
        );
    }

    #[test]
    fn test_nested_containers() {
        let evs = events(r#"{"vin":[{}]}"#).unwrap();
        assert_eq!(
            evs,
            vec![
                Ev::ObjStart,
                Ev::Key(b"vin".to_vec()),
                Ev::ArrStart,
                Ev::ObjStart,
                Ev::ObjEnd,
                Ev::ArrEnd,
                Ev::ObjEnd,
            ]
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(events("{}").unwrap(), vec![Ev::ObjStart, Ev::ObjEnd]);
        assert_eq!(events("[]").unwrap(), vec![Ev::ArrStart, Ev::ArrEnd]);
    }

    #[test]
    fn test_string_spans_are_raw() {
        let evs = events(r#"{"k":"a\"b\u00ff"}"#).unwrap();
        assert_eq!(evs[2], Ev::Str(br#"a\"b\u00ff"#.to_vec()));
    }

    #[test]
    fn test_non_ascii_bytes_pass_through() {
        let evs = events("{\"k\":\"caf\u{00e9}\"}").unwrap();
        assert_eq!(evs[2], Ev::Str("caf\u{00e9}".as_bytes().to_vec()));
    }

    #[test]
    fn test_number_lexemes_keep_sign_fraction_exponent() {
        let evs = events("[-1,0.5,1e9]").unwrap();
        assert_eq!(
            evs,
            vec![
                Ev::ArrStart,
                Ev::Num(b"-1".to_vec()),
                Ev::Num(b"0.5".to_vec()),
                Ev::Num(b"1e9".to_vec()),
                Ev::ArrEnd,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let evs = events("[true,false,null]").unwrap();
        assert_eq!(
            evs,
            vec![
                Ev::ArrStart,
                Ev::Bool(true),
                Ev::Bool(false),
                Ev::Null,
                Ev::ArrEnd,
            ]
        );
    }

    #[test]
    fn test_depth_limit_enforced() {
        let ok = format!("{}{}", "[".repeat(32), "]".repeat(32));
        assert!(events(&ok).is_ok());

        let too_deep = format!("{}{}", "[".repeat(33), "]".repeat(33));
        assert_eq!(events(&too_deep), Err(Error::DepthLimit(32)));
    }

    #[test]
    fn test_input_size_limit_enforced() {
        let limits = Limits {
            max_input_size: 8,
            max_depth: 32,
        };
        let err = Tokenizer::new(b"[1,2,3,4]", limits).err();
        assert_eq!(err, Some(Error::InputTooLarge(9, 8)));
    }

    #[test]
    fn test_syntax_errors_carry_offsets() {
        assert_eq!(events(r#"{"a":zz}"#), Err(Error::Syntax(5)));
        assert_eq!(events(""), Err(Error::Syntax(0)));
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert!(events("{} x").is_err());
        assert!(events("1 2").is_err());
    }

    #[test]
    fn test_malformed_documents_rejected() {
        for doc in [
            "{\"a\" 1}",    // missing colon
            "{\"a\":1 2}",  // missing comma
            "[1,]",         // trailing comma
            "{,}",          // leading comma
            "[01]",         // leading zero
            "\"\\q\"",      // bad escape
            "\"\u{0001}\"", // raw control character
            "{\"a\":1",     // unterminated object
            "tru",          // truncated literal
            "-",            // bare sign
        ] {
            assert!(events(doc).is_err(), "accepted: {doc:?}");
        }
    }

    #[test]
    fn test_sink_errors_abort_the_pass() {
        struct Bomb;
        impl EventSink for Bomb {
            fn object_start(&mut self) -> Result<()> {
                Ok(())
            }
            fn object_end(&mut self) -> Result<()> {
                Ok(())
            }
            fn array_start(&mut self) -> Result<()> {
                Ok(())
            }
            fn array_end(&mut self) -> Result<()> {
                Ok(())
            }
            fn key(&mut self, _raw: &[u8]) -> Result<()> {
                Ok(())
            }
            fn string(&mut self, _raw: &[u8]) -> Result<()> {
                Err(Error::BadTxid)
            }
            fn number(&mut self, _raw: &[u8]) -> Result<()> {
                Ok(())
            }
        }
        let mut tokenizer = Tokenizer::new(b"{\"k\":\"v\"}", Limits::consensus()).unwrap();
        assert_eq!(tokenizer.run(&mut Bomb), Err(Error::BadTxid));
    }
}
