//! Bodies sent to and received from the booking endpoints.

use serde::{Deserialize, Serialize};

use crate::constants::{
    API_DATETIME_FORMAT, MAX_DESCRIPTION_LEN, MAX_DURATION_SLOTS, MAX_TITLE_LEN, MIN_PASSWORD_LEN,
};
use crate::duration::PendingBooking;
use crate::error::{MrbsError, MrbsResult};
use crate::room::Room;
use crate::user::{NewUser, User};

/// Body of `POST /bookings/new` and `PUT /bookings/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub room_id: String,
    /// "YYYY-MM-DD HH:MM" in the grid's timezone
    pub start_time: String,
    /// Number of 30-minute slots
    pub duration: u32,
    pub title: String,
    pub description: String,
}

impl BookingRequest {
    /// Validate a pending booking into a request body.
    pub fn new(
        room: &Room,
        pending: &PendingBooking,
        title: &str,
        description: Option<&str>,
    ) -> MrbsResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MrbsError::InvalidBooking("Title cannot be empty".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(MrbsError::InvalidBooking(format!(
                "Title must be at most {MAX_TITLE_LEN} characters"
            )));
        }

        let description = description.unwrap_or_default().trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(MrbsError::InvalidBooking(format!(
                "Description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        let duration = pending.duration();
        if !(1..=MAX_DURATION_SLOTS).contains(&duration) {
            return Err(MrbsError::InvalidBooking(format!(
                "Duration must be between 1 and {MAX_DURATION_SLOTS} slots"
            )));
        }

        Ok(BookingRequest {
            room_id: room.room_id.to_string(),
            start_time: pending.start_slot().format(API_DATETIME_FORMAT).to_string(),
            duration,
            title: title.to_string(),
            description: description.to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBookingResponse {
    pub message: String,
    #[serde(default)]
    pub booking_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
}

/// Body of `GET /users/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Body of `POST /users/new`: one `#Display Name# email` entry per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertUsersRequest {
    pub users: String,
}

impl InsertUsersRequest {
    pub fn new(users: &[NewUser]) -> Self {
        let users = users
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        InsertUsersRequest { users }
    }
}

/// Body of `POST /auth/change-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    /// Check the new password before anything is sent.
    pub fn new(current: &str, new: &str, confirm: &str) -> MrbsResult<Self> {
        if current.is_empty() {
            return Err(MrbsError::InvalidPassword("current password is required".into()));
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(MrbsError::InvalidPassword(format!(
                "must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if new != confirm {
            return Err(MrbsError::InvalidPassword("passwords do not match".into()));
        }
        if new == current {
            return Err(MrbsError::InvalidPassword(
                "new password must be different from the current one".into(),
            ));
        }

        Ok(ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{SlotGrid, opening_time};
    use crate::room::default_rooms;
    use chrono::{Duration, NaiveDate};

    fn pending() -> PendingBooking {
        let opening = opening_time(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let grid = SlotGrid::new(opening);
        PendingBooking::new(&grid, opening + Duration::hours(2)).unwrap()
    }

    #[test]
    fn test_request_body_matches_backend_format() {
        let rooms = default_rooms();
        let request =
            BookingRequest::new(&rooms[3], &pending(), "  Project Sync ", Some("Alice, Bob")).unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "room_id": "4",
                "start_time": "2024-01-01 10:00",
                "duration": 2,
                "title": "Project Sync",
                "description": "Alice, Bob",
            })
        );
    }

    #[test]
    fn test_title_limits() {
        let rooms = default_rooms();
        assert!(BookingRequest::new(&rooms[0], &pending(), "   ", None).is_err());
        assert!(BookingRequest::new(&rooms[0], &pending(), &"x".repeat(26), None).is_err());
        assert!(BookingRequest::new(&rooms[0], &pending(), &"x".repeat(25), None).is_ok());
    }

    #[test]
    fn test_description_limit() {
        let rooms = default_rooms();
        let long = "y".repeat(301);
        let err = BookingRequest::new(&rooms[0], &pending(), "Sync", Some(&long)).unwrap_err();
        assert!(matches!(err, MrbsError::InvalidBooking(_)));
    }

    #[test]
    fn test_insert_users_body_is_one_entry_per_line() {
        let users = vec![
            NewUser::parse("#Alice Tan# alice@example.com").unwrap(),
            NewUser::parse("#Bob# bob@example.com").unwrap(),
        ];

        let json = serde_json::to_value(InsertUsersRequest::new(&users)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "users": "#Alice Tan# alice@example.com\n#Bob# bob@example.com"
            })
        );
    }

    #[test]
    fn test_change_password_rules() {
        let ok = ChangePasswordRequest::new("old-secret", "new-secret", "new-secret").unwrap();
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({
                "current_password": "old-secret",
                "new_password": "new-secret",
            })
        );

        for (current, new, confirm) in [
            ("", "new-secret", "new-secret"),
            ("old-secret", "short", "short"),
            ("old-secret", "new-secret", "new-secrets"),
            ("same-secret", "same-secret", "same-secret"),
        ] {
            assert!(matches!(
                ChangePasswordRequest::new(current, new, confirm),
                Err(MrbsError::InvalidPassword(_))
            ));
        }
    }

    #[test]
    fn test_error_response_accepts_message_key() {
        let body: ErrorResponse = serde_json::from_str(r#"{"message":"session key missing"}"#).unwrap();
        assert_eq!(body.error, "session key missing");
    }
}
