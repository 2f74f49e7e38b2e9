//! Driver abstraction the lazy facade delegates through.
//!
//! The facade never subclasses or re-implements a driver; it owns a
//! [`DriverConnection`] built by a [`Driver`] and forwards every call. The
//! associated `Statement` and `Rows` types let each driver hand back its own
//! native handles verbatim.
//!
//! [`HanaDriver`] is the production implementation over `hdbconnect`.

pub mod hana;

use std::fmt;

use crate::connection::ConnectionInfo;
use crate::error::{Result, extract_server_error_code};

pub use hana::{HanaConnection, HanaDriver};

/// A database driver that can open connections from captured parameters.
pub trait Driver {
    /// Short identifier for the driver, e.g. `"hana"`.
    const NAME: &'static str;

    /// The live connection type this driver produces.
    type Conn: DriverConnection;

    /// Establish a connection. Called at most once per facade instance.
    fn connect(&self, info: &ConnectionInfo) -> Result<Self::Conn>;
}

/// Operation surface of a live driver connection.
///
/// Every method maps one-to-one to a facade operation; implementations
/// delegate to the wrapped driver and report its errors unchanged.
pub trait DriverConnection {
    /// Native prepared-statement handle.
    type Statement;
    /// Native query result handle.
    type Rows;

    /// Enter a transaction (suspends auto-commit until commit/rollback).
    fn begin_transaction(&mut self) -> Result<()>;

    /// Commit the current transaction.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the current transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Whether an explicit transaction is open.
    fn in_transaction(&self) -> bool;

    /// Execute a DML statement, returning the affected-row count.
    fn execute(&mut self, sql: &str) -> Result<u64>;

    /// Run a query and return the driver's result handle.
    fn query(&mut self, sql: &str) -> Result<Self::Rows>;

    /// Prepare a statement and return the driver's statement handle.
    fn prepare(&mut self, sql: &str) -> Result<Self::Statement>;

    /// Identity value of the most recent insert in this session, if any.
    fn last_insert_id(&mut self) -> Result<Option<i64>>;

    /// Code and message of the most recent failed operation, if any.
    fn last_error(&self) -> Option<&DriverErrorDetails>;
}

/// Statement handle produced by the facade for driver `D`.
pub type Statement<D> = <<D as Driver>::Conn as DriverConnection>::Statement;

/// Result handle produced by the facade for driver `D`.
pub type Rows<D> = <<D as Driver>::Conn as DriverConnection>::Rows;

/// Code and message recorded from a failed driver operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverErrorDetails {
    code: Option<i32>,
    message: String,
}

impl DriverErrorDetails {
    /// Record an error with an already-known code.
    #[must_use]
    pub fn new(code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Record a raw driver message, extracting the server code when present.
    #[must_use]
    pub fn from_driver_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let code = extract_server_error_code(&message);
        Self { code, message }
    }

    /// The server error code, when one was extractable.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// The driver's message, verbatim.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DriverErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Names of the statically-known drivers.
///
/// Answerable without any connection, or indeed any facade instance.
#[must_use]
pub const fn available_drivers() -> &'static [&'static str] {
    &[HanaDriver::NAME]
}
