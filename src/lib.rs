//! Input parameter binding for the Informix CLI.
//!
//! A [`UseBinding`] borrows a value, resolves where it goes in a [`Statement`] and, on
//! every execution, turns it into the pointer, type codes and sizes that
//! `SQLBindParameter` takes. Scratch buffers it allocates for characters, strings
//! and timestamps live until the execution cycle ends.

pub mod config;
pub mod domain;
pub mod errors;
pub mod handle;
pub mod statement;
pub mod use_type;

pub use config::BinderConfig;
pub use domain::descriptor::{NativeDescriptor, ScratchBuffer};
pub use domain::exchange::{ExchangeType, ExchangeValue, Indicator, ToExchange};
pub use errors::{InformixError, Result};
#[cfg(feature = "ifcli")]
pub use handle::CliStatement;
pub use handle::{BindRequest, CliHandle, Diagnostic};
pub use statement::{BindingMethod, Statement, UseCycle};
pub use use_type::{UseBinding, UseState};
