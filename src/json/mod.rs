//! Streaming JSON tokenizer.
//!
//! The decoder in [`crate::tx`] never builds a document tree. Instead the
//! [`Tokenizer`] walks the input bytes once and pushes structural events
//! (container boundaries, keys, scalars) into an [`EventSink`]. Scalar
//! events carry raw byte spans of the input; interpreting them (hex
//! decode, integer parse, UTF-8 concerns) is the sink's job.
//!
//! Memory use is bounded by the nesting depth: the tokenizer keeps one
//! scope tag per open container and nothing else.
//!
//! # Example
//!
//! ```
//! use scriptmeter::json::{EventSink, Limits, Tokenizer};
//!
//! struct KeyCounter(usize);
//!
//! impl EventSink for KeyCounter {
//!     fn object_start(&mut self) -> scriptmeter::Result<()> { Ok(()) }
//!     fn object_end(&mut self) -> scriptmeter::Result<()> { Ok(()) }
//!     fn array_start(&mut self) -> scriptmeter::Result<()> { Ok(()) }
//!     fn array_end(&mut self) -> scriptmeter::Result<()> { Ok(()) }
//!     fn key(&mut self, _raw: &[u8]) -> scriptmeter::Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//!     fn string(&mut self, _raw: &[u8]) -> scriptmeter::Result<()> { Ok(()) }
//!     fn number(&mut self, _raw: &[u8]) -> scriptmeter::Result<()> { Ok(()) }
//! }
//!
//! let mut sink = KeyCounter(0);
//! let mut tokenizer = Tokenizer::new(b"{\"version\":2}", Limits::consensus()).unwrap();
//! tokenizer.run(&mut sink).unwrap();
//! assert_eq!(sink.0, 1);
//! ```

pub mod limits;
pub mod tokenizer;

pub use limits::Limits;
pub use tokenizer::{EventSink, Tokenizer};
