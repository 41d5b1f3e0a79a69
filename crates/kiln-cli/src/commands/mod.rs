//! Command implementations for the Kiln CLI.
//!
//! - [`resolve`] - Print the resolved configuration for one mode
//! - [`check`] - Resolve every declared variant
//! - [`lookup`] - Resolve a module request
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod lookup;
pub mod resolve;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use lookup::execute as lookup_execute;
pub use resolve::execute as resolve_execute;
