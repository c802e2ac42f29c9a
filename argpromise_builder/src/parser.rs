mod base;
mod middleware;
mod printer;
mod tokens;

pub use base::*;
pub(crate) use tokens::TokenSets;
