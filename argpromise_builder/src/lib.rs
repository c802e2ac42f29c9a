//! Builder module for `argpromise`.
//! See [documentation root](https://docs.rs/argpromise/latest/argpromise/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use parser::{ConfigError, ParseError, Parser};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
