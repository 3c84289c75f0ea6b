//! Library side of the `ftab` command line tool.

pub mod config;
pub mod logging;
pub mod output;
