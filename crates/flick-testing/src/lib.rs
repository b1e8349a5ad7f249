//! Testing utilities and harness for Flick

pub mod harness;
pub mod robot;

pub use harness::*;
pub use robot::*;

pub mod prelude {
    pub use crate::harness::*;
    pub use crate::robot::*;
}
