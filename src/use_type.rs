use crate::{
    domain::{
        c_binds::{SqlLen, SqlUSmallInt, SQL_NULL_DATA, SQL_PARAM_INPUT, SQL_SUCCESS},
        descriptor::{prepare_for_bind, NativeDescriptor, ScratchBuffer},
        exchange::{ExchangeType, ExchangeValue, Indicator},
    },
    errors::{InformixError, Result},
    handle::{BindRequest, CliHandle},
    statement::{BindingMethod, Statement},
};

static NULL_INDICATOR: SqlLen = SQL_NULL_DATA;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseState {
    /// Position resolved, nothing handed to the driver yet.
    Bound,
    /// Bound to the driver; a scratch buffer may be live.
    Described,
    /// Scratch buffer released after an execution.
    Cleaned,
}

/// An input parameter of a statement.
///
/// Created by [`UseBinding::bind_by_pos`] or [`UseBinding::bind_by_name`]; the value
/// stays borrowed for as long as the binding exists.
#[derive(Debug)]
pub struct UseBinding<'a> {
    value: ExchangeValue<'a>,
    position: SqlUSmallInt,
    name: Option<String>,
    indicator: Indicator,
    state: UseState,
    descriptor: Option<NativeDescriptor>,
    scratch: Option<ScratchBuffer>,
    // Boxed so the address given to the driver survives moves of the binding.
    ind: Box<SqlLen>,
}

impl<'a> UseBinding<'a> {
    /// Binds `value` at `*position` and advances the counter for the next element.
    ///
    /// The counter stops at `u16::MAX`, the last position the CLI can address.
    pub fn bind_by_pos<H>(
        statement: &mut Statement<H>,
        position: &mut SqlUSmallInt,
        value: impl Into<ExchangeValue<'a>>,
    ) -> Result<Self> {
        statement.check_binding_method(BindingMethod::ByPosition)?;
        statement.set_binding_method(BindingMethod::ByPosition);

        let binding = Self::new(value.into(), *position, None);
        *position = match position.checked_add(1) {
            Some(next) => next,
            None => {
                log::warn!("Use element position counter reached {}", SqlUSmallInt::MAX);
                SqlUSmallInt::MAX
            }
        };
        log::debug!(
            "Bound {} use element at position {}",
            binding.kind(),
            binding.position
        );
        Ok(binding)
    }

    /// Binds `value` to the first placeholder of the statement called `name`.
    pub fn bind_by_name<H>(
        statement: &mut Statement<H>,
        name: &str,
        value: impl Into<ExchangeValue<'a>>,
    ) -> Result<Self> {
        statement.check_binding_method(BindingMethod::ByName)?;
        let position = statement
            .position_of(name)
            .ok_or_else(|| InformixError::UnknownName(name.to_string()))?;
        statement.set_binding_method(BindingMethod::ByName);

        let binding = Self::new(value.into(), position, Some(name.to_string()));
        log::debug!(
            "Bound {} use element '{}' at position {}",
            binding.kind(),
            name,
            position
        );
        Ok(binding)
    }

    fn new(value: ExchangeValue<'a>, position: SqlUSmallInt, name: Option<String>) -> Self {
        UseBinding {
            value,
            position,
            name,
            indicator: Indicator::Ok,
            state: UseState::Bound,
            descriptor: None,
            scratch: None,
            ind: Box::new(0),
        }
    }

    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
    }

    /// Swaps the bound value, keeping the resolved position for the next execution.
    pub fn rebind_value(&mut self, value: impl Into<ExchangeValue<'a>>) {
        self.post_use();
        self.value = value.into();
    }

    pub fn position(&self) -> SqlUSmallInt {
        self.position
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> ExchangeValue<'a> {
        self.value
    }

    pub fn kind(&self) -> ExchangeType {
        self.value.kind()
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn state(&self) -> UseState {
        self.state
    }

    /// Descriptor of the most recent `pre_use`.
    pub fn descriptor(&self) -> Option<&NativeDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn scratch(&self) -> Option<&ScratchBuffer> {
        self.scratch.as_ref()
    }

    /// Describes the value and registers it with the driver.
    ///
    /// `Some(Indicator::Null)` binds SQL NULL; the data pointer is still passed but
    /// the driver ignores it.
    pub fn pre_use<H: CliHandle>(
        &mut self,
        statement: &Statement<H>,
        indicator: Option<Indicator>,
    ) -> Result<()> {
        // a re-execution must not keep the previous buffer around
        self.clean_up();

        let prepared = prepare_for_bind(&self.value, statement.config());
        let data = prepared.data_ptr();
        // moving the box keeps its heap address, `data` stays valid
        self.scratch = prepared.scratch;
        *self.ind = prepared.indicator;
        self.descriptor = Some(prepared.descriptor);
        self.state = UseState::Described;

        let indicator_ptr: *const SqlLen = match indicator {
            Some(Indicator::Null) => &NULL_INDICATOR,
            _ => &*self.ind,
        };
        let request = BindRequest {
            position: self.position,
            io_type: SQL_PARAM_INPUT,
            c_type: prepared.descriptor.c_type,
            sql_type: prepared.descriptor.sql_type,
            column_size: prepared.descriptor.size,
            decimal_digits: 0,
            value_ptr: data,
            buffer_length: prepared.descriptor.buffer_length,
            indicator_ptr,
        };

        // anything but a clean success, warnings included, fails the bind
        let status = statement.handle().bind_parameter(&request);
        if status != SQL_SUCCESS {
            let error = InformixError::native(
                format!(
                    "Error while binding value: {}",
                    statement.handle().diagnostic()
                ),
                status,
            );
            log::error!("{} (position {})", error, self.position);
            return Err(error);
        }
        log::debug!(
            "Described {} use element at position {}",
            self.kind(),
            self.position
        );
        Ok(())
    }

    /// Ends an execution cycle.
    pub fn post_use(&mut self) {
        self.clean_up();
        if self.state == UseState::Described {
            self.state = UseState::Cleaned;
        }
    }

    pub fn clean_up(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            log::debug!(
                "Releasing {} byte buffer of use element at position {}",
                scratch.len(),
                self.position
            );
        }
    }
}
