//! # depfind catalog
//!
//! Filesystem side of include resolution: which libraries exist, which
//! files a source folder holds, and whether a set of imported libraries
//! is usable.
//!
//! ## Library layouts
//!
//! ```text
//! <root>/Wire/                 recursive layout
//!     library.properties       optional: name=, version=
//!     src/Wire.h               exposed header
//!     src/utility/twi.c        compiled (src/ is scanned recursively)
//!
//! <root>/Servo/                flat layout
//!     Servo.h                  exposed header
//!     Servo.cpp                compiled
//!     utility/ServoTimers.c    compiled (utility/ is scanned, not recursively)
//! ```

mod catalog;
mod error;
mod manifest;
mod scanner;
mod validator;

pub use catalog::FsCatalog;
pub use error::{CatalogError, Result};
pub use manifest::{LibraryManifest, MANIFEST_FILE};
pub use scanner::FolderScanner;
pub use validator::LibraryValidator;
