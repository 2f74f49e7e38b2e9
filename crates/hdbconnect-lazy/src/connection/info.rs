//! Connection parameters, captured up front and held until first use.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameters for a deferred database connection.
///
/// Capturing these never touches the network; validation happens inside the
/// driver when the first operation forces a connection. Credentials set via
/// [`with_username`](Self::with_username) / [`with_password`](Self::with_password)
/// override any embedded in the URL. Prefer the explicit setters over
/// embedding credentials in the URL; `Debug` output only redacts the explicit
/// password field.
///
/// # Example
///
/// ```rust,ignore
/// use hdbconnect_lazy::ConnectionInfo;
///
/// let info = ConnectionInfo::new("hdbsql://hana.example.com:30015")
///     .with_username("ANALYTICS")
///     .with_password("secret")
///     .with_option("client_locale", "en_US");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    options: BTreeMap<String, String>,
}

impl ConnectionInfo {
    /// Capture a connection URL (`hdbsql://host:port`, `hdbsqls://…`).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            options: BTreeMap::new(),
        }
    }

    /// Set the database user.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the database password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Add a single driver option, forwarded to the driver unvalidated.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add several driver options at once.
    #[must_use]
    pub fn with_options<K, V>(mut self, options: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The connection URL, as captured.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The explicit database user, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The explicit database password, if any.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The captured driver options.
    #[must_use]
    pub const fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }
}

impl fmt::Debug for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionInfo")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("options", &self.options)
            .finish()
    }
}
