//! Running external diagnostic binaries.
//!
//! Arguments are always passed as a discrete vector, no shell is ever
//! involved. Exit codes are advisory: any captured stdout counts as success,
//! including output captured before a deadline killed the process.

pub mod binary;
pub mod executor;
pub mod runner;

pub use binary::resolve_binary;
pub use executor::{ProcessOutput, execute};
pub use runner::{CommandRunner, SystemRunner};
