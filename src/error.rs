use thiserror::Error;

use crate::models::WorkloadKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors are scoped to one resource class or one object; a failure never
/// takes down a whole report cycle.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to list {resource} in namespace {namespace}: {reason}")]
    ResourceUnavailable {
        resource: &'static str,
        namespace: String,
        reason: String,
    },

    #[error("malformed {resource} in namespace {namespace}: {reason}")]
    MalformedResource {
        resource: &'static str,
        namespace: String,
        reason: String,
    },

    #[error("failed to scale {kind} {name} in namespace {namespace}: {reason}")]
    WriteFailed {
        kind: WorkloadKind,
        name: String,
        namespace: String,
        reason: String,
    },
}
