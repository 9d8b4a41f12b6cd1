//! Plain-text activity log to day-by-day timeline.
//! Every line of the log marks the moment an activity started; an activity lasts until the next
//! line. The [timeline] module turns such a log into a [timeline::report::Report] split by local
//! calendar days, which [render] then prints as HTML, a terminal strip or JSON.
//!

pub mod cli;
pub mod config;
pub mod render;
pub mod storage;
pub mod timeline;
pub mod utils;
