//! Input parsing: decoding, tokenization and grid construction.

mod cell;
mod grid;
mod parser;
mod source;
mod tokenizer;

pub use cell::{classify, format_number, parse_float_prefix, Cell};
pub use grid::{Grid, GridBuilder, Row};
pub use parser::{Parser, ParserConfig};
pub use source::{decode_bytes, encoding_for_label, hash_bytes, DecodedText, SourceMetadata};
pub use tokenizer::{tokenize, Dialect, RowKind};
