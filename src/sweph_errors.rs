use thiserror::Error;

/// Failures raised by this crate before or around an engine call.
///
/// Engine status codes are never converted into a [`SwephError`]: they travel back to
/// the caller verbatim inside the per-element results.
#[derive(Error, Debug)]
pub enum SwephError {
    #[error(
        "The number of elements in '{left}' ({left_len}) and the number of elements in '{right}' ({right_len}) must be identical!"
    )]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("{description} '{name}' must have at least length {required} (got {actual})")]
    AuxiliaryTooShort {
        name: &'static str,
        description: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Name '{name}' does not fit in a buffer of {capacity} bytes")]
    NameTooLong { name: String, capacity: usize },

    #[error("Name '{0}' contains a NUL byte")]
    NameContainsNul(String),

    #[error("Invalid house system: {0:?}")]
    InvalidHouseSystem(char),

    #[error("Invalid path for the engine: {0}")]
    InvalidPath(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),
}

impl PartialEq for SwephError {
    fn eq(&self, other: &Self) -> bool {
        use SwephError::*;
        match (self, other) {
            (
                LengthMismatch {
                    left: a,
                    left_len: al,
                    right: b,
                    right_len: bl,
                },
                LengthMismatch {
                    left: c,
                    left_len: cl,
                    right: d,
                    right_len: dl,
                },
            ) => a == c && al == cl && b == d && bl == dl,
            (
                AuxiliaryTooShort {
                    name: a,
                    required: ar,
                    actual: aa,
                    ..
                },
                AuxiliaryTooShort {
                    name: b,
                    required: br,
                    actual: ba,
                    ..
                },
            ) => a == b && ar == br && aa == ba,
            (
                NameTooLong {
                    name: a,
                    capacity: ac,
                },
                NameTooLong {
                    name: b,
                    capacity: bc,
                },
            ) => a == b && ac == bc,
            (NameContainsNul(a), NameContainsNul(b)) => a == b,
            (InvalidHouseSystem(a), InvalidHouseSystem(b)) => a == b,
            (InvalidPath(a), InvalidPath(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,

            // lock and ownership failures carry free-form text: same variant is enough
            (EngineUnavailable(_), EngineUnavailable(_)) => true,

            _ => false,
        }
    }
}
