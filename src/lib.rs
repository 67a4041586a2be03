pub mod config;
pub mod graph;
pub mod logging;
pub mod papers;
pub mod physics;
pub mod viewport;

mod util;

pub use util::truncate_chars;
