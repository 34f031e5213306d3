//! Line-based screens that temporarily own stdin/stdout while the timer
//! keeps running in the background.

pub mod chat;
pub mod color_picker;
pub mod stats_view;
