use crate::domain::c_binds::SqlReturn;

#[derive(Debug, thiserror::Error)]
pub enum InformixError {
    /// A statement mixed by-position and by-name use bindings.
    #[error("Binding for use elements must be either by position or by name.")]
    BindingMethodConflict,
    #[error("Unable to find name '{0}' to bind to")]
    UnknownName(String),
    /// A CLI call returned something other than success.
    #[error("{message} (status {code})")]
    Native { message: String, code: SqlReturn },
}

impl InformixError {
    pub fn native(message: impl Into<String>, code: SqlReturn) -> Self {
        InformixError::Native {
            message: message.into(),
            code,
        }
    }

    /// Status code returned by the CLI, if this error came from a native call.
    pub fn native_code(&self) -> Option<SqlReturn> {
        match self {
            InformixError::Native { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, InformixError>;
