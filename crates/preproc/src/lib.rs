//! # depfind preproc
//!
//! Include discovery backed by a gcc-compatible preprocessor. A run with
//! `-E` stops at the first header it cannot find; the diagnostic names
//! that header, which is all the resolver needs to look up a library.

mod error;
mod extract;
mod oracle;

pub use error::{PreprocError, Result};
pub use extract::missing_includes;
pub use oracle::{GccOracle, PreprocessorConfig};
