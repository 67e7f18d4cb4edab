#![allow(dead_code)]

use informix_binder::{
    domain::c_binds::{SqlLen, SqlReturn, SqlUSmallInt, SQL_ERROR, SQL_SUCCESS_WITH_INFO},
    BindRequest, CliHandle, Diagnostic,
};
use log::LevelFilter;
use std::cell::{Cell, RefCell};
use std::env;
use std::slice;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// A bind call as the driver saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request: BindRequest,
    /// Bytes behind the value pointer at bind time.
    pub bytes: Vec<u8>,
    pub indicator: SqlLen,
}

/// Stand-in for a CLI statement handle that records what it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingHandle {
    pub binds: RefCell<Vec<Recorded>>,
    /// Bytes behind each bound pointer, read again when the statement executes.
    pub executed: RefCell<Vec<Vec<Vec<u8>>>>,
    pending: RefCell<Vec<BindRequest>>,
    pub executions: Cell<usize>,
    pub fail_bind_at: Option<SqlUSmallInt>,
    /// Status returned by binds that do not fail outright.
    pub bind_status: SqlReturn,
    pub execute_status: SqlReturn,
}

impl RecordingHandle {
    pub fn failing_bind_at(position: SqlUSmallInt) -> Self {
        RecordingHandle {
            fail_bind_at: Some(position),
            ..Default::default()
        }
    }

    pub fn warning_on_bind() -> Self {
        RecordingHandle {
            bind_status: SQL_SUCCESS_WITH_INFO,
            ..Default::default()
        }
    }

    pub fn failing_execute() -> Self {
        RecordingHandle {
            execute_status: SQL_ERROR,
            ..Default::default()
        }
    }

    pub fn bind_count(&self) -> usize {
        self.binds.borrow().len()
    }

    pub fn last_bind(&self) -> Recorded {
        self.binds
            .borrow()
            .last()
            .cloned()
            .expect("no bind was recorded")
    }
}

fn read_bytes(request: &BindRequest) -> Vec<u8> {
    if request.value_ptr.is_null() || request.buffer_length <= 0 {
        return Vec::new();
    }
    unsafe {
        slice::from_raw_parts(
            request.value_ptr as *const u8,
            request.buffer_length as usize,
        )
    }
    .to_vec()
}

impl CliHandle for RecordingHandle {
    fn bind_parameter(&self, request: &BindRequest) -> SqlReturn {
        if self.fail_bind_at == Some(request.position) {
            return SQL_ERROR;
        }
        let indicator = unsafe { *request.indicator_ptr };
        self.binds.borrow_mut().push(Recorded {
            request: *request,
            bytes: read_bytes(request),
            indicator,
        });
        self.pending.borrow_mut().push(*request);
        self.bind_status
    }

    fn execute(&self) -> SqlReturn {
        self.executions.set(self.executions.get() + 1);
        let values = self.pending.borrow_mut().drain(..).map(|r| read_bytes(&r)).collect();
        self.executed.borrow_mut().push(values);
        self.execute_status
    }

    fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            state: "HY000".into(),
            native_error: -11103,
            message: "recorded failure".into(),
        }
    }
}
