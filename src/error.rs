//! Process-level error type.
//!
//! Every fallible stage in the pipeline returns `AppError`, which carries both
//! a message and the exit code the binary should terminate with:
//!
//! - `2` — input problems (missing file, bad CSV header, invalid flags)
//! - `3` — data problems (no usable rows, empty split after filtering)
//! - `4` — model problems (singular design matrix, unseen category level)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input error (exit code 2): bad path, bad header, bad flag values.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Data error (exit code 3): the dataset cannot support the analysis.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Model error (exit code 4): fitting or prediction failed.
    pub fn model(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
