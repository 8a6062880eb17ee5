//! Tests for chaos collaborator services

pub mod random_source;
pub mod failure_reporter;
