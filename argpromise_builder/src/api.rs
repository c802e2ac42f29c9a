mod capture;
mod core;
mod field;
mod parameter;
mod path;

pub use self::field::*;
pub use self::parameter::*;
pub use self::path::*;

pub(crate) use self::capture::{Fulfill, Rejection};
