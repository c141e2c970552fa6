use std::fmt::{Debug, Formatter};

use crate::{AppResult, NonEmptyString};

/// Username and password pair used to open a basic-auth session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: NonEmptyString,
    password: NonEmptyString,
}

impl Credentials {
    /// Creates validated credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            username: NonEmptyString::new(username)?,
            password: NonEmptyString::new(password)?,
        })
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How a client session authenticates against the server.
#[derive(Clone, PartialEq, Eq)]
pub enum GalaxyAuth {
    /// HTTP basic authentication.
    Basic(Credentials),
    /// Static API token sent as `Authorization: Token <value>`.
    Token(NonEmptyString),
}

impl GalaxyAuth {
    /// Returns a short label for logs; never includes secrets.
    #[must_use]
    pub fn principal_label(&self) -> &str {
        match self {
            Self::Basic(credentials) => credentials.username(),
            Self::Token(_) => "<token>",
        }
    }
}

impl Debug for GalaxyAuth {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic(credentials) => formatter.debug_tuple("Basic").field(credentials).finish(),
            Self::Token(_) => formatter.debug_tuple("Token").field(&"<redacted>").finish(),
        }
    }
}
