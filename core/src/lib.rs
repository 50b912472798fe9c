pub mod diagnostics;
pub mod dns;
pub mod ipc;
pub mod parsers;
pub mod platform;
pub mod process;
pub mod scanner;
pub mod system;
pub mod vendors;

pub use diagnostics::Diagnostics;
