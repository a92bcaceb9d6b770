//! Builds daily time reports out of `plus! <spent>/<target>` comments left on Trello cards.
//! Spend is grouped into projects and categories by card labels, and written both as a markdown
//! outline and as json.
//!

pub mod board;
pub mod cli;
pub mod report;
pub mod settings;
pub mod utils;
