pub mod calc;
pub mod defaults;
pub mod recommend;
pub mod validate;

pub use calc::*;
pub use recommend::*;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
