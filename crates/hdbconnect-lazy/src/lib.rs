//! Deferred-connection wrapper around the `hdbconnect` SAP HANA driver.
//!
//! [`LazyConnection`] captures connection parameters up front and opens the
//! underlying driver connection only when the first operation needs one,
//! exactly once. Everything else — statement preparation, transactions, error
//! reporting — is forwarded to `hdbconnect` unchanged, and its native
//! `PreparedStatement` / `ResultSet` handles are returned verbatim.
//!
//! # Features
//!
//! - Construction never fails or touches the network
//! - At-most-once connection establishment, enforced by exclusive borrowing
//! - A failed first attempt is latched; no silent reconnect
//! - Driver seam via the [`Driver`] / [`DriverConnection`] traits
//!
//! # Example
//!
//! ```rust,ignore
//! use hdbconnect_lazy::{ConnectionInfo, LazyConnection};
//!
//! let mut db = LazyConnection::new(
//!     ConnectionInfo::new("hdbsql://hana.example.com:30015")
//!         .with_username("ANALYTICS")
//!         .with_password("secret"),
//! );
//! // Still unconnected here.
//! let affected = db.execute("DELETE FROM events WHERE expired = true")?;
//! db.commit()?;
//! # Ok::<(), hdbconnect_lazy::LazyHdbError>(())
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod connection;
pub mod driver;
pub mod error;

// Re-export main types for convenience
pub use connection::{ConnectionInfo, ConnectionInner, LazyConnection};
pub use driver::{
    Driver, DriverConnection, DriverErrorDetails, HanaConnection, HanaDriver, Rows, Statement,
    available_drivers,
};
pub use error::{LazyHdbError, Result};
