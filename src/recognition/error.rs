//! Errors raised by the recognition algorithms.

use thiserror::Error;

/// Errors that abort a recognition algorithm.
///
/// Out-of-domain queries (a recognizer called on a triangulation with the
/// wrong shape) are *not* errors: they answer `false`. Errors are reserved
/// for configurations the algorithms cannot resolve.
///
/// # Examples
///
/// ```rust
/// use crushing::recognition::error::RecognitionError;
///
/// let error = RecognitionError::Precondition {
///     operation: "summands",
///     requirement: "a valid, closed, connected triangulation",
/// };
/// assert_eq!(
///     error.to_string(),
///     "summands requires a valid, closed, connected triangulation"
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecognitionError {
    /// Crushing produced an invalid triangulation.
    ///
    /// This happens exactly when the crushed surface encloses an embedded
    /// two-sided projective plane, a class of manifolds the algorithm does
    /// not handle. The whole computation is abandoned.
    #[error(
        "Unsolved case: crushing produced an invalid triangulation (the manifold contains an embedded two-sided projective plane)"
    )]
    UnsolvedCase,

    /// An operation with no boolean answer was called outside its domain.
    #[error("{operation} requires {requirement}")]
    Precondition {
        /// The operation that was called.
        operation: &'static str,
        /// What the input must satisfy.
        requirement: &'static str,
    },

    /// A state that the topology rules out was reached.
    #[error("Internal inconsistency in {operation}: {message}")]
    Inconsistent {
        /// The operation that detected the inconsistency.
        operation: &'static str,
        /// Description of the impossible state.
        message: String,
    },
}
