//! User accounts, as listed and created by admins.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::booking::string_or_number;
use crate::constants::ADMIN_LEVEL;
use crate::error::{MrbsError, MrbsResult};

/// An account as returned by `GET /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub level: u32,
    /// Login name
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub time_created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub last_login: Option<DateTime<FixedOffset>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.level >= ADMIN_LEVEL
    }

    /// Last login, `None` for accounts that never logged in. The backend
    /// sends the zero time (year 1) for those.
    pub fn logged_in_at(&self) -> Option<DateTime<FixedOffset>> {
        self.last_login.filter(|t| t.year() > 1)
    }
}

/// An account to create, written as `#Display Name# email` in bulk input.
///
/// The login name is the part of the email before the `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
}

impl NewUser {
    pub fn parse(entry: &str) -> MrbsResult<Self> {
        let invalid = |reason: &str| MrbsError::InvalidUser(format!("'{entry}': {reason}"));

        let rest = entry
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| invalid("expected #Display Name# email"))?;
        let (display_name, email) = rest
            .split_once('#')
            .ok_or_else(|| invalid("display name is missing its closing #"))?;

        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(invalid("display name is empty"));
        }

        if !email.starts_with(char::is_whitespace) {
            return Err(invalid("expected a space before the email"));
        }
        let email = email.trim();
        if email.is_empty() || email.contains(char::is_whitespace) {
            return Err(invalid("expected a single email address"));
        }
        match email.split_once('@') {
            Some((local, _)) if !local.is_empty() => {}
            _ => return Err(invalid("email needs a name before the @")),
        }

        Ok(NewUser {
            display_name: display_name.to_string(),
            email: email.to_string(),
        })
    }

    /// Login name the backend derives from the email.
    pub fn username(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

impl fmt::Display for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}# {}", self.display_name, self.email)
    }
}

/// Parse one entry per line, skipping blank lines.
pub fn parse_user_entries(text: &str) -> MrbsResult<Vec<NewUser>> {
    let users = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(NewUser::parse)
        .collect::<MrbsResult<Vec<_>>>()?;

    if users.is_empty() {
        return Err(MrbsError::InvalidUser("no users given".into()));
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let user = NewUser::parse("#Alice Tan# alice.tan@example.com").unwrap();
        assert_eq!(user.display_name, "Alice Tan");
        assert_eq!(user.email, "alice.tan@example.com");
        assert_eq!(user.username(), "alice.tan");
        assert_eq!(user.to_string(), "#Alice Tan# alice.tan@example.com");
    }

    #[test]
    fn test_malformed_entries_are_rejected() {
        for entry in [
            "Alice Tan alice@example.com",
            "#Alice Tan alice@example.com",
            "## alice@example.com",
            "#Alice#alice@example.com",
            "#Alice# alice",
            "#Alice# @example.com",
            "#Alice# alice@example.com bob@example.com",
        ] {
            assert!(
                matches!(NewUser::parse(entry), Err(MrbsError::InvalidUser(_))),
                "{entry} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_entries_skips_blank_lines() {
        let users =
            parse_user_entries("#Alice# alice@example.com\r\n\n  #Bob Lim#  bob@example.com  \n").unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username()).collect();
        assert_eq!(names, vec!["alice", "bob"]);

        assert!(parse_user_entries("\n \n").is_err());
    }

    #[test]
    fn test_decode_user_list_entry() {
        let json = r#"{
            "user_id": 3,
            "level": 2,
            "name": "alice",
            "display_name": "Alice Tan",
            "email": "alice@example.com",
            "time_created": "2025-01-06T09:30:00+08:00",
            "last_login": "0001-01-01T00:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, "3");
        assert!(user.is_admin());
        assert!(user.time_created.is_some());
        assert_eq!(user.logged_in_at(), None);
    }
}
