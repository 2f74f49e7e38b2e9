//! Internal connection state for the lazy facade.

use std::fmt;

/// Ownership slot for the deferred driver connection.
///
/// Starts `Pending`, moves to `Connected` on the first operation that needs a
/// live connection, or to `Failed` if that single attempt errors. Both
/// `Connected` and `Failed` are terminal for the life of the facade; there is
/// no path back to `Pending` and no reconnect.
pub enum ConnectionInner<C> {
    /// No connection attempt has been made yet.
    Pending,
    /// Live driver connection, created exactly once.
    Connected(C),
    /// The single permitted attempt failed; the message is replayed to callers.
    Failed(String),
}

impl<C> ConnectionInner<C> {
    /// Whether a live connection is held.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Whether no connection attempt has happened yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the attempt failed and is now latched.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

// Manual impl so the slot stays debuggable without requiring `C: Debug`.
impl<C> fmt::Debug for ConnectionInner<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Connected(_) => f.write_str("Connected"),
            Self::Failed(message) => f.debug_tuple("Failed").field(message).finish(),
        }
    }
}
