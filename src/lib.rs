//! A small blog: posts stored in SQLite, rendered from markdown, edited
//! through an admin form whose single action creates, updates or deletes
//! depending on the submitted intent.

pub mod api;
pub mod db;
pub mod markdown;
pub mod paths;
