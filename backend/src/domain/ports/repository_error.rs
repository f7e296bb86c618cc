//! Failure taxonomy shared by every repository port.

use super::define_port_error;

define_port_error! {
    /// Normalised outcome of a failed store operation.
    ///
    /// Adapters classify store failures into exactly one of these kinds;
    /// inbound adapters decide how each kind is presented.
    pub enum RepositoryError {
        /// No record exists for the requested identifier.
        NotFound { message: String } => "{message}",
        /// A uniqueness or referential-integrity rule blocked the write.
        ConstraintViolation { message: String } => "{message}",
        /// Any unclassified store failure (connection loss, pool
        /// exhaustion, unexpected driver errors).
        Fault { message: String } => "{message}",
    }
}
