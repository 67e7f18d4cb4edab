//! Conversion from exchange values to the arguments `SQLBindParameter` expects.

use super::c_binds::*;
use super::exchange::ExchangeValue;
use crate::config::BinderConfig;
use chrono::{Datelike, Timelike};
use std::mem;
use std::os::raw::c_void;

/// Type codes and sizes computed for one bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeDescriptor {
    pub sql_type: SqlSmallInt,
    pub c_type: SqlSmallInt,
    /// Column size handed to the driver.
    pub size: SqlULen,
    pub buffer_length: SqlLen,
}

impl NativeDescriptor {
    /// Descriptor for kinds this binder does not materialize.
    pub const EMPTY: NativeDescriptor = NativeDescriptor {
        sql_type: SQL_UNKNOWN_TYPE,
        c_type: 0,
        size: 0,
        buffer_length: 0,
    };

    fn fixed<T>(sql_type: SqlSmallInt, c_type: SqlSmallInt) -> Self {
        let width = mem::size_of::<T>();
        NativeDescriptor {
            sql_type,
            c_type,
            size: width as SqlULen,
            buffer_length: width as SqlLen,
        }
    }

    fn text(sql_type: SqlSmallInt, len: usize) -> Self {
        NativeDescriptor {
            sql_type,
            c_type: SQL_C_CHAR,
            size: len as SqlULen,
            buffer_length: len as SqlLen,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Storage the binder owns while a value is bound.
///
/// Both variants live on the heap, so the address given to the driver stays put
/// when the owning binding moves.
#[derive(Debug)]
pub enum ScratchBuffer {
    /// NUL terminated character data.
    Text(Box<[u8]>),
    Timestamp(Box<TimestampStruct>),
}

impl ScratchBuffer {
    fn char(value: u8) -> Self {
        ScratchBuffer::Text(Box::new([value, 0]))
    }

    /// Copies `value` into a `len + 1` buffer the way `strncpy` would: copying stops at
    /// the first NUL and the remainder is zero filled.
    fn string(value: &str) -> Self {
        let bytes = value.as_bytes();
        let mut buf = vec![0u8; bytes.len() + 1].into_boxed_slice();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        buf[..end].copy_from_slice(&bytes[..end]);
        ScratchBuffer::Text(buf)
    }

    fn timestamp(value: &chrono::NaiveDateTime) -> Self {
        ScratchBuffer::Timestamp(Box::new(TimestampStruct {
            year: timestamp_year(value.year()),
            month: value.month() as SqlUSmallInt,
            day: value.day() as SqlUSmallInt,
            hour: value.hour() as SqlUSmallInt,
            minute: value.minute() as SqlUSmallInt,
            second: value.second() as SqlUSmallInt,
            fraction: 0,
        }))
    }

    pub fn as_ptr(&self) -> *const c_void {
        match self {
            ScratchBuffer::Text(buf) => buf.as_ptr() as *const c_void,
            ScratchBuffer::Timestamp(ts) => &**ts as *const TimestampStruct as *const c_void,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScratchBuffer::Text(buf) => buf.len(),
            ScratchBuffer::Timestamp(_) => mem::size_of::<TimestampStruct>(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            ScratchBuffer::Text(buf) => Some(buf),
            ScratchBuffer::Timestamp(_) => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&TimestampStruct> {
        match self {
            ScratchBuffer::Timestamp(ts) => Some(ts),
            ScratchBuffer::Text(_) => None,
        }
    }
}

/// Years the CLI structure cannot hold are clamped to its range.
fn timestamp_year(year: i32) -> SqlSmallInt {
    SqlSmallInt::try_from(year).unwrap_or_else(|_| {
        let clamped = if year < 0 {
            SqlSmallInt::MIN
        } else {
            SqlSmallInt::MAX
        };
        log::warn!("Timestamp year {} clamped to {}", year, clamped);
        clamped
    })
}

/// Everything one bind needs, minus the position.
#[derive(Debug)]
pub struct PreparedValue {
    pub descriptor: NativeDescriptor,
    pub scratch: Option<ScratchBuffer>,
    /// Length/indicator value the driver reads when the value is not null.
    pub indicator: SqlLen,
    data: *const c_void,
}

impl PreparedValue {
    /// Pointer to hand to the driver: the scratch buffer if one was allocated,
    /// the caller's storage otherwise.
    pub fn data_ptr(&self) -> *const c_void {
        match &self.scratch {
            Some(scratch) => scratch.as_ptr(),
            None => self.data,
        }
    }
}

pub fn prepare_for_bind(value: &ExchangeValue<'_>, config: &BinderConfig) -> PreparedValue {
    let (descriptor, scratch) = match *value {
        ExchangeValue::Int8(_) => (
            NativeDescriptor::fixed::<i8>(SQL_SMALLINT, SQL_C_STINYINT),
            None,
        ),
        ExchangeValue::UInt8(_) => (
            NativeDescriptor::fixed::<u8>(SQL_SMALLINT, SQL_C_UTINYINT),
            None,
        ),
        ExchangeValue::Int16(_) => (
            NativeDescriptor::fixed::<i16>(SQL_SMALLINT, SQL_C_SSHORT),
            None,
        ),
        ExchangeValue::UInt16(_) => (
            NativeDescriptor::fixed::<u16>(SQL_SMALLINT, SQL_C_USHORT),
            None,
        ),
        ExchangeValue::Int32(_) => (
            NativeDescriptor::fixed::<i32>(SQL_INTEGER, SQL_C_SLONG),
            None,
        ),
        ExchangeValue::UInt32(_) => (
            NativeDescriptor::fixed::<u32>(SQL_INTEGER, SQL_C_ULONG),
            None,
        ),
        ExchangeValue::Int64(_) => (
            NativeDescriptor::fixed::<i64>(SQL_BIGINT, SQL_C_SBIGINT),
            None,
        ),
        ExchangeValue::UInt64(_) => (
            NativeDescriptor::fixed::<u64>(SQL_BIGINT, SQL_C_UBIGINT),
            None,
        ),
        ExchangeValue::Double(_) => (
            NativeDescriptor::fixed::<f64>(SQL_DOUBLE, SQL_C_DOUBLE),
            None,
        ),
        ExchangeValue::Char(c) => (
            NativeDescriptor::text(SQL_CHAR, 2),
            Some(ScratchBuffer::char(*c)),
        ),
        ExchangeValue::Str(s) => {
            let fitted = config.fit_string(s);
            if fitted.len() < s.len() {
                log::warn!(
                    "Truncating string parameter from {} to {} bytes",
                    s.len(),
                    fitted.len()
                );
            }
            (
                NativeDescriptor::text(SQL_LONGVARCHAR, fitted.len() + 1),
                Some(ScratchBuffer::string(fitted)),
            )
        }
        ExchangeValue::Timestamp(ts) => (
            NativeDescriptor {
                sql_type: SQL_TYPE_TIMESTAMP,
                c_type: SQL_C_TYPE_TIMESTAMP,
                size: TIMESTAMP_COLUMN_SIZE,
                buffer_length: mem::size_of::<TimestampStruct>() as SqlLen,
            },
            Some(ScratchBuffer::timestamp(ts)),
        ),
        ExchangeValue::Blob(_)
        | ExchangeValue::Xml(_)
        | ExchangeValue::LongString(_)
        | ExchangeValue::Statement
        | ExchangeValue::RowId => {
            log::warn!("Cannot describe a {} use element", value.kind());
            (NativeDescriptor::EMPTY, None)
        }
    };

    let indicator = match value {
        ExchangeValue::Char(_) | ExchangeValue::Str(_) => SQL_NTS,
        _ => descriptor.buffer_length,
    };

    PreparedValue {
        descriptor,
        scratch,
        indicator,
        data: value.data_ptr(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prepare(value: ExchangeValue<'_>) -> PreparedValue {
        prepare_for_bind(&value, &BinderConfig::default())
    }

    #[test]
    fn numeric_sizes_match_widths() {
        let cases: [(ExchangeValue<'_>, SqlSmallInt, SqlSmallInt, usize); 9] = [
            (ExchangeValue::Int8(&-1), SQL_SMALLINT, SQL_C_STINYINT, 1),
            (ExchangeValue::UInt8(&1), SQL_SMALLINT, SQL_C_UTINYINT, 1),
            (ExchangeValue::Int16(&-2), SQL_SMALLINT, SQL_C_SSHORT, 2),
            (ExchangeValue::UInt16(&2), SQL_SMALLINT, SQL_C_USHORT, 2),
            (ExchangeValue::Int32(&-3), SQL_INTEGER, SQL_C_SLONG, 4),
            (ExchangeValue::UInt32(&3), SQL_INTEGER, SQL_C_ULONG, 4),
            (ExchangeValue::Int64(&-4), SQL_BIGINT, SQL_C_SBIGINT, 8),
            (ExchangeValue::UInt64(&4), SQL_BIGINT, SQL_C_UBIGINT, 8),
            (ExchangeValue::Double(&0.5), SQL_DOUBLE, SQL_C_DOUBLE, 8),
        ];
        for (value, sql_type, c_type, width) in cases {
            let prepared = prepare(value);
            assert_eq!(prepared.descriptor.sql_type, sql_type, "{}", value.kind());
            assert_eq!(prepared.descriptor.c_type, c_type, "{}", value.kind());
            assert_eq!(prepared.descriptor.size, width as SqlULen);
            assert_eq!(prepared.descriptor.buffer_length, width as SqlLen);
            assert!(prepared.scratch.is_none());
            assert_eq!(prepared.data_ptr(), value.data_ptr());
        }
    }

    #[test]
    fn char_gets_two_byte_buffer() {
        let prepared = prepare(ExchangeValue::Char(&b'Z'));
        assert_eq!(prepared.descriptor.sql_type, SQL_CHAR);
        assert_eq!(prepared.descriptor.c_type, SQL_C_CHAR);
        assert_eq!(prepared.descriptor.size, 2);
        assert_eq!(prepared.indicator, SQL_NTS);
        let scratch = prepared.scratch.as_ref().unwrap();
        assert_eq!(scratch.as_text().unwrap(), b"Z\0");
        assert_eq!(prepared.data_ptr(), scratch.as_ptr());
    }

    #[test]
    fn string_is_copied_with_terminator() {
        let prepared = prepare(ExchangeValue::Str("hello"));
        assert_eq!(prepared.descriptor.sql_type, SQL_LONGVARCHAR);
        assert_eq!(prepared.descriptor.c_type, SQL_C_CHAR);
        assert_eq!(prepared.descriptor.size, 6);
        assert_eq!(prepared.indicator, SQL_NTS);
        assert_eq!(prepared.scratch.unwrap().as_text().unwrap(), b"hello\0");
    }

    #[test]
    fn empty_string_is_just_the_terminator() {
        let prepared = prepare(ExchangeValue::Str(""));
        assert_eq!(prepared.descriptor.size, 1);
        assert_eq!(prepared.scratch.unwrap().as_text().unwrap(), b"\0");
    }

    #[test]
    fn interior_nul_stops_the_copy() {
        let prepared = prepare(ExchangeValue::Str("ab\0cd"));
        assert_eq!(prepared.descriptor.size, 6);
        assert_eq!(prepared.scratch.unwrap().as_text().unwrap(), b"ab\0\0\0\0");
    }

    #[test]
    fn string_limit_truncates() {
        let config = BinderConfig::default().with_string_limit(3);
        let prepared = prepare_for_bind(&ExchangeValue::Str("hello"), &config);
        assert_eq!(prepared.descriptor.size, 4);
        assert_eq!(prepared.scratch.unwrap().as_text().unwrap(), b"hel\0");
    }

    #[test]
    fn timestamp_fields_are_copied() {
        let when = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 58, 123_456_789)
            .unwrap();
        let prepared = prepare(ExchangeValue::Timestamp(&when));
        assert_eq!(prepared.descriptor.sql_type, SQL_TYPE_TIMESTAMP);
        assert_eq!(prepared.descriptor.c_type, SQL_C_TYPE_TIMESTAMP);
        assert_eq!(prepared.descriptor.size, 19);
        assert_eq!(
            prepared.descriptor.buffer_length,
            mem::size_of::<TimestampStruct>() as SqlLen
        );
        let scratch = prepared.scratch.as_ref().unwrap();
        assert_eq!(
            *scratch.as_timestamp().unwrap(),
            TimestampStruct {
                year: 2024,
                month: 1,
                day: 31,
                hour: 23,
                minute: 59,
                second: 58,
                fraction: 0,
            }
        );
        assert_eq!(prepared.data_ptr(), scratch.as_ptr());
    }

    #[test]
    fn timestamp_year_out_of_range_is_clamped() {
        let far = NaiveDate::from_ymd_opt(40000, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let prepared = prepare(ExchangeValue::Timestamp(&far));
        let ts = *prepared.scratch.unwrap().as_timestamp().unwrap();
        assert_eq!(ts.year, SqlSmallInt::MAX);
        assert_eq!((ts.month, ts.day), (1, 2));
        assert_eq!((ts.hour, ts.minute, ts.second), (3, 4, 5));

        let early = NaiveDate::from_ymd_opt(-40000, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let prepared = prepare(ExchangeValue::Timestamp(&early));
        assert_eq!(
            prepared.scratch.unwrap().as_timestamp().unwrap().year,
            SqlSmallInt::MIN
        );
    }

    #[test]
    fn unsupported_kinds_are_left_empty() {
        let blob = [1u8, 2, 3];
        for value in [
            ExchangeValue::Blob(&blob),
            ExchangeValue::Xml("<a/>"),
            ExchangeValue::LongString("long"),
            ExchangeValue::Statement,
            ExchangeValue::RowId,
        ] {
            let prepared = prepare(value);
            assert!(prepared.descriptor.is_empty(), "{}", value.kind());
            assert!(prepared.scratch.is_none());
            assert_eq!(prepared.data_ptr(), value.data_ptr());
        }
    }

    #[test]
    fn timestamp_struct_layout() {
        assert_eq!(mem::size_of::<TimestampStruct>(), 16);
    }
}
