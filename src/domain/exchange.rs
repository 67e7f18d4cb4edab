use chrono::NaiveDateTime;
use std::fmt;
use std::os::raw::c_void;
use std::ptr;

/// Kind tag of a value exchanged with the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Double,
    Char,
    StdString,
    StdTm,
    Blob,
    XmlType,
    LongString,
    Statement,
    RowId,
}

impl fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangeType::Int8 => "int8",
            ExchangeType::UInt8 => "uint8",
            ExchangeType::Int16 => "int16",
            ExchangeType::UInt16 => "uint16",
            ExchangeType::Int32 => "int32",
            ExchangeType::UInt32 => "uint32",
            ExchangeType::Int64 => "int64",
            ExchangeType::UInt64 => "uint64",
            ExchangeType::Double => "double",
            ExchangeType::Char => "char",
            ExchangeType::StdString => "string",
            ExchangeType::StdTm => "timestamp",
            ExchangeType::Blob => "blob",
            ExchangeType::XmlType => "xml",
            ExchangeType::LongString => "long string",
            ExchangeType::Statement => "statement",
            ExchangeType::RowId => "rowid",
        };
        f.write_str(name)
    }
}

/// A value borrowed from caller storage, tagged with its kind.
///
/// The binder never copies fixed-width values: the pointer handed to the CLI is the
/// address of the borrowed storage, which is why the borrow has to outlive the
/// binding that holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExchangeValue<'a> {
    Int8(&'a i8),
    UInt8(&'a u8),
    Int16(&'a i16),
    UInt16(&'a u16),
    Int32(&'a i32),
    UInt32(&'a u32),
    Int64(&'a i64),
    UInt64(&'a u64),
    Double(&'a f64),
    /// A single CLI character (one byte).
    Char(&'a u8),
    Str(&'a str),
    Timestamp(&'a NaiveDateTime),
    Blob(&'a [u8]),
    Xml(&'a str),
    LongString(&'a str),
    Statement,
    RowId,
}

impl<'a> ExchangeValue<'a> {
    pub fn kind(&self) -> ExchangeType {
        match self {
            ExchangeValue::Int8(_) => ExchangeType::Int8,
            ExchangeValue::UInt8(_) => ExchangeType::UInt8,
            ExchangeValue::Int16(_) => ExchangeType::Int16,
            ExchangeValue::UInt16(_) => ExchangeType::UInt16,
            ExchangeValue::Int32(_) => ExchangeType::Int32,
            ExchangeValue::UInt32(_) => ExchangeType::UInt32,
            ExchangeValue::Int64(_) => ExchangeType::Int64,
            ExchangeValue::UInt64(_) => ExchangeType::UInt64,
            ExchangeValue::Double(_) => ExchangeType::Double,
            ExchangeValue::Char(_) => ExchangeType::Char,
            ExchangeValue::Str(_) => ExchangeType::StdString,
            ExchangeValue::Timestamp(_) => ExchangeType::StdTm,
            ExchangeValue::Blob(_) => ExchangeType::Blob,
            ExchangeValue::Xml(_) => ExchangeType::XmlType,
            ExchangeValue::LongString(_) => ExchangeType::LongString,
            ExchangeValue::Statement => ExchangeType::Statement,
            ExchangeValue::RowId => ExchangeType::RowId,
        }
    }

    /// Address of the caller's storage. Null for the opaque handle kinds.
    pub fn data_ptr(&self) -> *const c_void {
        match *self {
            ExchangeValue::Int8(v) => v as *const i8 as *const c_void,
            ExchangeValue::UInt8(v) => v as *const u8 as *const c_void,
            ExchangeValue::Int16(v) => v as *const i16 as *const c_void,
            ExchangeValue::UInt16(v) => v as *const u16 as *const c_void,
            ExchangeValue::Int32(v) => v as *const i32 as *const c_void,
            ExchangeValue::UInt32(v) => v as *const u32 as *const c_void,
            ExchangeValue::Int64(v) => v as *const i64 as *const c_void,
            ExchangeValue::UInt64(v) => v as *const u64 as *const c_void,
            ExchangeValue::Double(v) => v as *const f64 as *const c_void,
            ExchangeValue::Char(v) => v as *const u8 as *const c_void,
            ExchangeValue::Str(v) | ExchangeValue::Xml(v) | ExchangeValue::LongString(v) => {
                v.as_ptr() as *const c_void
            }
            ExchangeValue::Timestamp(v) => v as *const NaiveDateTime as *const c_void,
            ExchangeValue::Blob(v) => v.as_ptr() as *const c_void,
            ExchangeValue::Statement | ExchangeValue::RowId => ptr::null(),
        }
    }
}

/// Null indicator accompanying a bound value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indicator {
    #[default]
    Ok,
    Null,
}

pub trait ToExchange {
    fn to_exchange(&self) -> ExchangeValue<'_>;
}

macro_rules! impl_to_exchange {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToExchange for $ty {
                fn to_exchange(&self) -> ExchangeValue<'_> {
                    ExchangeValue::$variant(self)
                }
            }

            impl<'a> From<&'a $ty> for ExchangeValue<'a> {
                fn from(value: &'a $ty) -> Self {
                    ExchangeValue::$variant(value)
                }
            }
        )*
    };
}

impl_to_exchange!(
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f64 => Double,
    str => Str,
    NaiveDateTime => Timestamp,
);

impl ToExchange for String {
    fn to_exchange(&self) -> ExchangeValue<'_> {
        ExchangeValue::Str(self.as_str())
    }
}

impl<'a> From<&'a String> for ExchangeValue<'a> {
    fn from(value: &'a String) -> Self {
        ExchangeValue::Str(value.as_str())
    }
}

impl<T: ToExchange + ?Sized> ToExchange for &T {
    fn to_exchange(&self) -> ExchangeValue<'_> {
        (**self).to_exchange()
    }
}
