use std::path::PathBuf;
use thiserror::Error;

/// Reference resolution failures
///
/// Fatal in strict mode; in degraded mode the same values are reported as
/// warnings next to a best-effort output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("base class '{base}' skipped because its expected source file does not exist: {}", expected_path.display())]
    MissingBaseClass { base: String, expected_path: PathBuf },

    #[error("needed imports missing: {}. Make sure file names match the contained class/enum name.", names.join(", "))]
    MissingImports { names: Vec<String> },
}

pub type EmitResult<T> = Result<T, EmitError>;
