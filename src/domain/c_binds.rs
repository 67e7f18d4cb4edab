use libc::{c_long, c_short, c_ulong, c_ushort};
#[cfg(feature = "ifcli")]
use libc::{c_char, c_int};
#[cfg(feature = "ifcli")]
use std::os::raw::c_void;

pub type SqlSmallInt = c_short;
pub type SqlUSmallInt = c_ushort;
pub type SqlLen = c_long;
pub type SqlULen = c_ulong;
pub type SqlReturn = c_short;

#[cfg(feature = "ifcli")]
#[link(name = "ifcli")]
extern "C" {
    pub fn SQLBindParameter(
        StatementHandle: *mut c_void,
        ParameterNumber: c_ushort,
        InputOutputType: c_short,
        ValueType: c_short,
        ParameterType: c_short,
        ColumnSize: c_ulong,
        DecimalDigits: c_short,
        ParameterValuePtr: *const c_void,
        BufferLength: c_long,
        StrLen_or_IndPtr: *const c_long,
    ) -> c_short;
    pub fn SQLExecute(StatementHandle: *mut c_void) -> c_short;
    pub fn SQLGetDiagRec(
        HandleType: c_short,
        Handle: *mut c_void,
        RecNumber: c_short,
        SQLState: *mut c_char,
        NativeErrorPtr: *mut c_int,
        MessageText: *mut c_char,
        BufferLength: c_short,
        TextLengthPtr: *mut c_short,
    ) -> c_short;
}

pub const SQL_PARAM_INPUT: SqlSmallInt = 1;

// SQL return codes
pub const SQL_SUCCESS: SqlReturn = 0;
pub const SQL_SUCCESS_WITH_INFO: SqlReturn = 1;
pub const SQL_ERROR: SqlReturn = -1;

// SQL data type constants
pub const SQL_UNKNOWN_TYPE: SqlSmallInt = 0;
pub const SQL_CHAR: SqlSmallInt = 1;
pub const SQL_INTEGER: SqlSmallInt = 4;
pub const SQL_SMALLINT: SqlSmallInt = 5;
pub const SQL_DOUBLE: SqlSmallInt = 8;
pub const SQL_LONGVARCHAR: SqlSmallInt = -1;
pub const SQL_BIGINT: SqlSmallInt = -5;
pub const SQL_TYPE_TIMESTAMP: SqlSmallInt = 93;

// C data type constants
pub const SQL_C_CHAR: SqlSmallInt = 1;
pub const SQL_C_DOUBLE: SqlSmallInt = 8;
pub const SQL_C_SSHORT: SqlSmallInt = -15;
pub const SQL_C_SLONG: SqlSmallInt = -16;
pub const SQL_C_USHORT: SqlSmallInt = -17;
pub const SQL_C_ULONG: SqlSmallInt = -18;
pub const SQL_C_SBIGINT: SqlSmallInt = -25;
pub const SQL_C_STINYINT: SqlSmallInt = -26;
pub const SQL_C_UBIGINT: SqlSmallInt = -27;
pub const SQL_C_UTINYINT: SqlSmallInt = -28;
pub const SQL_C_TYPE_TIMESTAMP: SqlSmallInt = 93;

// SQL special values
pub const SQL_NULL_DATA: SqlLen = -1;
pub const SQL_NTS: SqlLen = -3;

// SQL handle types
pub const SQL_HANDLE_STMT: SqlSmallInt = 3;

/// Characters in `yyyy-mm-dd hh:mm:ss`, the column size reported for timestamps.
pub const TIMESTAMP_COLUMN_SIZE: SqlULen = 19;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampStruct {
    pub year: SqlSmallInt,
    pub month: SqlUSmallInt,
    pub day: SqlUSmallInt,
    pub hour: SqlUSmallInt,
    pub minute: SqlUSmallInt,
    pub second: SqlUSmallInt,
    pub fraction: u32,
}

pub fn is_success(status: SqlReturn) -> bool {
    status == SQL_SUCCESS || status == SQL_SUCCESS_WITH_INFO
}
