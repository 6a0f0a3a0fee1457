//! Infrastructure layer - engine, collaborators, and process plumbing

pub mod logging;
pub mod matching;
pub mod room;
