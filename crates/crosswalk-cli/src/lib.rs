//! Library side of the `crosswalk` command-line tool.

pub mod logging;
pub mod pipeline;
