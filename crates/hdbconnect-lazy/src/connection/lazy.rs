//! The deferred-connection facade.

use std::fmt;

use crate::connection::info::ConnectionInfo;
use crate::connection::state::ConnectionInner;
use crate::driver::{Driver, DriverConnection, DriverErrorDetails, HanaDriver, Rows, Statement};
use crate::error::{LazyHdbError, Result};

/// A database connection that is established on first use.
///
/// Construction only captures parameters and never fails; the underlying
/// driver connection is opened by the first operation that needs one, exactly
/// once, and reused for the life of the facade. Errors a conventional eager
/// connection would raise at construction surface here at the point of first
/// use instead, unchanged. If that single attempt fails, the failure is
/// latched: later operations return a connection error replaying the original
/// message without contacting the server again.
///
/// Every operation takes `&mut self`, so the check-then-connect step is
/// data-race-free by exclusive borrowing; wrap the facade in your own `Mutex`
/// to share it across threads.
///
/// # Example
///
/// ```rust,ignore
/// use hdbconnect_lazy::{ConnectionInfo, LazyConnection};
///
/// let mut db = LazyConnection::new(
///     ConnectionInfo::new("hdbsql://hana.example.com:30015")
///         .with_username("ANALYTICS")
///         .with_password("secret"),
/// );
/// // No connection yet. The first query opens it.
/// let rows = db.query("SELECT 1 FROM DUMMY")?;
/// # Ok::<(), hdbconnect_lazy::LazyHdbError>(())
/// ```
pub struct LazyConnection<D: Driver = HanaDriver> {
    driver: D,
    info: ConnectionInfo,
    state: ConnectionInner<D::Conn>,
}

impl LazyConnection<HanaDriver> {
    /// Capture parameters for a deferred HANA connection.
    #[must_use]
    pub fn new(info: ConnectionInfo) -> Self {
        Self::with_driver(HanaDriver, info)
    }

    /// Capture a bare URL for a deferred HANA connection.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(ConnectionInfo::new(url))
    }
}

impl<D: Driver> LazyConnection<D> {
    /// Capture parameters for a deferred connection through a specific driver.
    #[must_use]
    pub fn with_driver(driver: D, info: ConnectionInfo) -> Self {
        Self {
            driver,
            info,
            state: ConnectionInner::Pending,
        }
    }

    /// Begin a transaction.
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.connection()?.begin_transaction()
    }

    /// Commit the current transaction.
    pub fn commit(&mut self) -> Result<()> {
        self.connection()?.commit()
    }

    /// Roll back the current transaction.
    pub fn rollback(&mut self) -> Result<()> {
        self.connection()?.rollback()
    }

    /// Whether an explicit transaction is open.
    pub fn in_transaction(&mut self) -> Result<bool> {
        Ok(self.connection()?.in_transaction())
    }

    /// Execute a DML statement and return the affected-row count.
    pub fn execute(&mut self, sql: &str) -> Result<u64> {
        self.connection()?.execute(sql)
    }

    /// Run a query and return the driver's native result handle.
    pub fn query(&mut self, sql: &str) -> Result<Rows<D>> {
        self.connection()?.query(sql)
    }

    /// Prepare a statement and return the driver's native statement handle.
    pub fn prepare(&mut self, sql: &str) -> Result<Statement<D>> {
        self.connection()?.prepare(sql)
    }

    /// Identity value of the most recent insert in this session, if any.
    pub fn last_insert_id(&mut self) -> Result<Option<i64>> {
        self.connection()?.last_insert_id()
    }

    /// Server error code of the most recent failed operation, if any.
    pub fn last_error_code(&mut self) -> Result<Option<i32>> {
        Ok(self
            .connection()?
            .last_error()
            .and_then(DriverErrorDetails::code))
    }

    /// Code and message of the most recent failed operation, if any.
    pub fn last_error(&mut self) -> Result<Option<DriverErrorDetails>> {
        Ok(self.connection()?.last_error().cloned())
    }

    /// The captured connection parameters. Never connects.
    #[must_use]
    pub const fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    /// The captured connection URL. Never connects.
    #[must_use]
    pub fn url(&self) -> &str {
        self.info.url()
    }

    /// Whether the underlying connection has been established. Never connects.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Hand out the live connection, opening it on the first call.
    fn connection(&mut self) -> Result<&mut D::Conn> {
        match self.state {
            ConnectionInner::Connected(_) => {}
            ConnectionInner::Failed(ref message) => {
                return Err(LazyHdbError::connection(format!(
                    "connection previously failed: {message}"
                )));
            }
            ConnectionInner::Pending => match self.driver.connect(&self.info) {
                Ok(conn) => {
                    tracing::debug!(driver = D::NAME, "deferred connection established");
                    self.state = ConnectionInner::Connected(conn);
                }
                Err(err) => {
                    tracing::warn!(driver = D::NAME, error = %err, "deferred connection failed");
                    self.state = ConnectionInner::Failed(err.message().to_owned());
                    return Err(err);
                }
            },
        }

        match &mut self.state {
            ConnectionInner::Connected(conn) => Ok(conn),
            // Both non-connected states returned above.
            ConnectionInner::Pending | ConnectionInner::Failed(_) => {
                Err(LazyHdbError::connection("connection slot is empty"))
            }
        }
    }
}

impl<D: Driver> fmt::Debug for LazyConnection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyConnection")
            .field("driver", &D::NAME)
            .field("info", &self.info)
            .field("state", &self.state)
            .finish()
    }
}
