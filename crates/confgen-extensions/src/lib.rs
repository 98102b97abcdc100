//! Extension availability table parser.
//!
//! Turns the markdown document listing which runtime versions ship each
//! extension into an ordered [`ExtensionTable`].
//!
//! # Example
//!
//! ```
//! use confgen_extensions::parse_extensions;
//!
//! let doc = "| Extension | 7.4 | 8.0 |\n| --- | --- | --- |\n| `intl` | X |  |\n";
//! let table = parse_extensions(doc).unwrap();
//! assert_eq!(table.get("intl").unwrap().supported_versions, vec!["7.4"]);
//! ```

pub mod table;
pub mod tokenizer;

pub use confgen_core::ExtensionTable;
pub use table::{parse_extensions, TableError};
pub use tokenizer::split_row;

/// Parse raw document bytes; invalid UTF-8 sequences are replaced, not rejected.
pub fn parse_extensions_bytes(bytes: &[u8]) -> Result<ExtensionTable, TableError> {
    parse_extensions(&String::from_utf8_lossy(bytes))
}
