//! The event-duration and day-segmentation engine.
//!
//! Data flows through the submodules in a fixed order:
//! [parse] → [duration] → [day] → [aggregate] → [present]. [report] composes all of them.
//! Every stage is generic over a [chrono::TimeZone]; the application uses [chrono::Local].

pub mod aggregate;
pub mod day;
pub mod duration;
pub mod error;
pub mod event;
pub mod parse;
pub mod present;
pub mod report;
