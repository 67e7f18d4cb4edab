use crate::domain::c_binds::{SqlLen, SqlReturn, SqlSmallInt, SqlULen, SqlUSmallInt};
use std::fmt;
use std::os::raw::c_void;

/// Arguments of one `SQLBindParameter` call.
#[derive(Debug, Clone, Copy)]
pub struct BindRequest {
    pub position: SqlUSmallInt,
    pub io_type: SqlSmallInt,
    pub c_type: SqlSmallInt,
    pub sql_type: SqlSmallInt,
    pub column_size: SqlULen,
    pub decimal_digits: SqlSmallInt,
    pub value_ptr: *const c_void,
    pub buffer_length: SqlLen,
    pub indicator_ptr: *const SqlLen,
}

/// First diagnostic record of a handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub state: String,
    pub native_error: i32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SQLSTATE = {}, Native Error = {}, Message = {}",
            self.state, self.native_error, self.message
        )
    }
}

/// The statement-level CLI calls the binder makes.
///
/// The pointers inside a [`BindRequest`] are read by the driver when the statement
/// executes, not when it is bound.
pub trait CliHandle {
    fn bind_parameter(&self, request: &BindRequest) -> SqlReturn;
    fn execute(&self) -> SqlReturn;
    fn diagnostic(&self) -> Diagnostic;
}

#[cfg(feature = "ifcli")]
pub use native::CliStatement;

#[cfg(feature = "ifcli")]
mod native {
    use super::{BindRequest, CliHandle, Diagnostic};
    use crate::domain::c_binds::{
        SQLBindParameter, SQLExecute, SQLGetDiagRec, SqlReturn, SQL_HANDLE_STMT,
    };
    use std::ffi::CStr;
    use std::os::raw::{c_char, c_short, c_void};

    /// Statement handle allocated and freed by a higher layer.
    ///
    /// Holds the raw pointer as is, so the handle stays on the thread that owns it.
    #[derive(Debug)]
    pub struct CliStatement {
        handle: *mut c_void,
    }

    impl CliStatement {
        /// # Safety
        ///
        /// `handle` must be a prepared `SQL_HANDLE_STMT` that stays allocated for as
        /// long as this value and every statement built on it are in use.
        pub unsafe fn from_raw(handle: *mut c_void) -> Self {
            CliStatement { handle }
        }

        pub fn as_ptr(&self) -> *mut c_void {
            self.handle
        }
    }

    impl CliHandle for CliStatement {
        fn bind_parameter(&self, request: &BindRequest) -> SqlReturn {
            unsafe {
                SQLBindParameter(
                    self.handle,
                    request.position,
                    request.io_type,
                    request.c_type,
                    request.sql_type,
                    request.column_size,
                    request.decimal_digits,
                    request.value_ptr,
                    request.buffer_length,
                    request.indicator_ptr,
                )
            }
        }

        fn execute(&self) -> SqlReturn {
            unsafe { SQLExecute(self.handle) }
        }

        fn diagnostic(&self) -> Diagnostic {
            let mut state = [0 as c_char; 6];
            let mut native_error = 0i32;
            let mut message = [0 as c_char; 1024];
            let mut out_len = 0i16;

            unsafe {
                SQLGetDiagRec(
                    SQL_HANDLE_STMT,
                    self.handle,
                    1,
                    state.as_mut_ptr(),
                    &mut native_error,
                    message.as_mut_ptr(),
                    message.len() as c_short,
                    &mut out_len,
                );
            }

            let state = unsafe { CStr::from_ptr(state.as_ptr()) }.to_string_lossy();
            let message = unsafe { CStr::from_ptr(message.as_ptr()) }.to_string_lossy();

            Diagnostic {
                state: state.into_owned(),
                native_error,
                message: message.into_owned(),
            }
        }
    }

}
