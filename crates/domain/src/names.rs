use uuid::Uuid;

const USER_PREFIX: &str = "user_";

/// Random, collision-resistant names for the resources one scenario creates.
///
/// Every derived name shares the username's random suffix so a failed run can
/// be traced across users, repositories, organizations and teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    username: String,
}

impl ResourceNames {
    /// Creates names around a fresh random username.
    #[must_use]
    pub fn random() -> Self {
        Self {
            username: format!("{USER_PREFIX}{}", random_suffix()),
        }
    }

    /// Creates names around an existing `user_` prefixed username.
    #[must_use]
    pub fn from_username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the email registered for the user.
    #[must_use]
    pub fn email(&self) -> String {
        format!("{}@localhost", self.username)
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repository(&self) -> String {
        self.derive("repo_")
    }

    /// Returns the organization name.
    #[must_use]
    pub fn organization(&self) -> String {
        self.derive("org_")
    }

    /// Returns the team name.
    #[must_use]
    pub fn team(&self) -> String {
        self.derive("team_")
    }

    /// Returns a fresh random namespace name.
    #[must_use]
    pub fn random_namespace() -> String {
        format!("namespace_{}", random_suffix())
    }

    /// Returns a fresh random collection name.
    #[must_use]
    pub fn random_collection() -> String {
        format!("collection_{}", random_suffix())
    }

    fn derive(&self, prefix: &str) -> String {
        self.username.replace(USER_PREFIX, prefix)
    }
}

fn random_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(12);
    suffix
}

#[cfg(test)]
mod tests {
    use super::ResourceNames;

    #[test]
    fn derived_names_share_the_random_suffix() {
        let names = ResourceNames::random();
        let suffix = names.username().trim_start_matches("user_").to_owned();

        assert_eq!(suffix.len(), 12);
        assert_eq!(names.repository(), format!("repo_{suffix}"));
        assert_eq!(names.organization(), format!("org_{suffix}"));
        assert_eq!(names.team(), format!("team_{suffix}"));
        assert_eq!(names.email(), format!("user_{suffix}@localhost"));
    }

    #[test]
    fn random_names_are_lowercase_identifiers() {
        for name in [
            ResourceNames::random_namespace(),
            ResourceNames::random_collection(),
        ] {
            assert!(
                name.chars()
                    .all(|character| character.is_ascii_lowercase()
                        || character.is_ascii_digit()
                        || character == '_')
            );
        }
        assert_ne!(
            ResourceNames::random().username(),
            ResourceNames::random().username()
        );
    }
}
