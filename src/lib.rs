pub mod chart;
pub mod compiler;
pub mod error;
pub mod logging;

pub use compiler::Compiler;
pub use error::Error;
