//! Chart description tests
//!
//! Parsing and markup generation for single chart blocks, independent of any document.

mod parse;
mod properties;
