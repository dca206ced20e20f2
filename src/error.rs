use thiserror::Error;

use crate::rings::finite_field::FiniteFieldImplementation;

///
/// Errors raised when constructing a residue field from invalid or unsupported input.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{ideal} is not a prime ideal")]
    NotPrime {
        ideal: String
    },
    #[error("unsupported ring: {reason}")]
    UnsupportedRing {
        reason: String
    },
    #[error("unknown finite field implementation \"{0}\", expected one of modn, givaro, ntl, pari")]
    UnknownImplementation(String),
    #[error("finite field implementation {implementation} cannot represent a field of characteristic {characteristic} and degree {degree}")]
    IncompatibleImplementation {
        implementation: FiniteFieldImplementation,
        characteristic: u64,
        degree: usize
    }
}

///
/// Errors raised when evaluating a partial map at a point where it is not defined.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionError {
    #[error("cannot reduce {element} modulo {ideal}, since it has negative valuation")]
    NegativeValuation {
        element: String,
        ideal: String
    }
}
