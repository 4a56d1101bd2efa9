//! Availability Resolver.
//!
//! Decides whether a successful list response actually carries data. A
//! missing body, a JSON `null` and an empty array are all the same thing to
//! the orchestrator: the backend has nothing cached yet.

/// Whether a successful response carried data.
#[derive(Clone, Debug, PartialEq)]
pub enum Availability<T> {
    Present(Vec<T>),
    Absent,
}

/// Classify a successful gateway body.
pub fn resolve<T>(body: Option<Vec<T>>) -> Availability<T> {
    match body {
        Some(items) if !items.is_empty() => Availability::Present(items),
        _ => Availability::Absent,
    }
}
