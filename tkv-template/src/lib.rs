//! # tkv Typed Template
//!
//! Purpose: Demonstrate the one design decision this project exists for:
//! a typed key-value template whose value codec must match the format that
//! external writers of the same keys use.
//!
//! A command-line writer stores counters as plain decimal text. A template
//! configured with the binary codec reads those keys as *absent*, because
//! the stored bytes are not in its format and "not my format" is defined as
//! "no value retrievable", not a decode fault. The fix is configuring
//! [`DecimalIntCodec`], which reads and writes the same decimal text the
//! external writer does. [`AppContext::bootstrap`] wires the fixed
//! configuration.

mod codec;
mod context;
mod template;

pub use codec::{
    BincodeValueCodec, CodecError, DecimalIntCodec, KeyCodec, Utf8KeyCodec, ValueCodec,
};
pub use context::AppContext;
pub use template::{KvTemplate, TemplateError, TemplateResult};
