//! Install spec errors

use super::QuiverError;

/// Creates an invalid install spec error
pub fn invalid(input: impl Into<String>, reason: impl Into<String>) -> QuiverError {
    QuiverError::InvalidSpec {
        input: input.into(),
        reason: reason.into(),
    }
}

/// Creates an unknown artifact kind error
pub fn unknown_kind(segment: impl Into<String>, path: impl Into<String>) -> QuiverError {
    QuiverError::UnknownArtifactKind {
        segment: segment.into(),
        path: path.into(),
    }
}
