//! Collaborator implementations

pub mod random_source;
pub mod process_control;
pub mod failure_reporter;

#[cfg(test)]
pub mod tests;

pub use random_source::*;
pub use process_control::*;
pub use failure_reporter::*;
