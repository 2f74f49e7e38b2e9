//! The lazy connection facade and its supporting types.
//!
//! - [`ConnectionInfo`]: parameters captured at construction, immutable after
//! - [`ConnectionInner`]: the empty-until-populated ownership slot
//! - [`LazyConnection`]: the facade itself

pub mod info;
pub mod lazy;
pub mod state;

pub use info::ConnectionInfo;
pub use lazy::LazyConnection;
pub use state::ConnectionInner;
