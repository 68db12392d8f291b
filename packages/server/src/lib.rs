// LinuxFleet registration backend.
//
// A generic object store over SQLite tables plus the registration workflow
// that turns emailed signup tokens into confirmed administrator accounts.

pub mod common;
pub mod config;
pub mod data;
pub mod domains;
pub mod html;
pub mod kernel;
pub mod opts;
pub mod server;

pub use config::*;
