//! REST client for the booking backend.
//!
//! The backend owns persistence, authentication and clash detection. This
//! module only moves plain data back and forth: fetched bookings are
//! normalised to grid wall-clock time before anything else sees them.

use std::future::Future;
use std::time::Duration;

use chrono_tz::Tz;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use crate::booking::{Booking, BookingRecord};
use crate::business_day::BusinessDay;
use crate::config::MrbsConfig;
use crate::error::{MrbsError, MrbsResult};
use crate::request::{
    BookingRequest, ChangePasswordRequest, ErrorResponse, InsertUsersRequest, LoginForm,
    LoginResponse, MessageResponse, NewBookingResponse, UsersResponse,
};
use crate::session::Session;
use crate::user::{NewUser, User};

/// Operations the client needs from the booking backend.
#[allow(async_fn_in_trait)]
pub trait BookingApi {
    async fn get_bookings(&self, day: BusinessDay) -> MrbsResult<Vec<Booking>>;

    async fn create_booking(&self, request: &BookingRequest) -> MrbsResult<NewBookingResponse>;

    async fn edit_booking(
        &self,
        booking_id: &str,
        request: &BookingRequest,
    ) -> MrbsResult<MessageResponse>;

    async fn delete_booking(&self, booking_id: &str) -> MrbsResult<MessageResponse>;

    /// Bookings for `day`, or an empty list if they could not be fetched.
    async fn bookings_or_empty(&self, day: BusinessDay) -> Vec<Booking> {
        match self.get_bookings(day).await {
            Ok(bookings) => bookings,
            Err(e) => {
                tracing::warn!("could not fetch bookings for {}: {}", day, e);
                Vec::new()
            }
        }
    }
}

pub struct HttpBookingApi {
    client: Client,
    base_url: String,
    tz: Tz,
    request_timeout: Duration,
    session: Option<Session>,
}

impl HttpBookingApi {
    pub fn new(base_url: &str, tz: Tz, request_timeout: Duration) -> Self {
        HttpBookingApi {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tz,
            request_timeout,
            session: None,
        }
    }

    /// Client for the configured server. An unreadable session file is
    /// treated as logged out so that browsing and `logout` keep working.
    pub fn from_config(config: &MrbsConfig) -> MrbsResult<Self> {
        let api = Self::new(config.api_base(), config.tz()?, config.request_timeout());
        let session_path = config.session_path();
        let session = Session::load(&session_path).unwrap_or_else(|e| {
            tracing::warn!(path = %session_path.display(), "ignoring unreadable session: {}", e);
            None
        });
        Ok(api.with_session(session))
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authenticated(&self, builder: RequestBuilder) -> MrbsResult<RequestBuilder> {
        let session = self.session.as_ref().ok_or(MrbsError::NotLoggedIn)?;
        Ok(builder.header(reqwest::header::COOKIE, session.cookie()))
    }

    async fn with_timeout<T>(&self, fut: impl Future<Output = MrbsResult<T>>) -> MrbsResult<T> {
        timeout(self.request_timeout, fut)
            .await
            .map_err(|_| MrbsError::Timeout(self.request_timeout.as_secs()))?
    }

    async fn send<R: DeserializeOwned>(&self, builder: RequestBuilder) -> MrbsResult<R> {
        self.with_timeout(async {
            let response = builder.send().await?;
            decode(response).await
        })
        .await
    }

    /// Exchange credentials for a session key.
    pub async fn login(&self, username: &str, password: &str) -> MrbsResult<Session> {
        let request = self
            .client
            .post(self.endpoint("auth/login"))
            .form(&LoginForm { username, password });

        let response: LoginResponse = self.send(request).await?;
        if !response.success || response.session.is_empty() {
            return Err(MrbsError::Api {
                status: 401,
                message: response.error,
            });
        }

        tracing::info!(username = %response.username, "logged in");
        Ok(Session {
            session: response.session,
            username: response.username,
            display_name: response.display_name,
        })
    }

    pub async fn logout(&self) -> MrbsResult<MessageResponse> {
        let request = self.authenticated(self.client.post(self.endpoint("auth/logout")))?;
        self.send(request).await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> MrbsResult<MessageResponse> {
        let builder = self
            .authenticated(self.client.post(self.endpoint("auth/change-password")))?
            .json(request);
        self.send(builder).await
    }

    // User management below needs an admin session; the backend answers
    // 401 for anyone else.

    pub async fn list_users(&self) -> MrbsResult<Vec<User>> {
        let request = self.authenticated(self.client.get(self.endpoint("users/")))?;
        let response: UsersResponse = self.send(request).await?;
        tracing::debug!("fetched {} users", response.users.len());
        Ok(response.users)
    }

    /// Create accounts in bulk. Existing accounts are left untouched.
    pub async fn insert_users(&self, users: &[NewUser]) -> MrbsResult<MessageResponse> {
        let builder = self
            .authenticated(self.client.post(self.endpoint("users/new")))?
            .json(&InsertUsersRequest::new(users));
        self.send(builder).await
    }

    pub async fn delete_user(&self, username: &str) -> MrbsResult<MessageResponse> {
        let path = user_path(username)?;
        let builder = self.authenticated(self.client.delete(self.endpoint(&path)))?;
        self.send(builder).await
    }

    /// Raise `username` to admin.
    pub async fn promote_user(&self, username: &str) -> MrbsResult<MessageResponse> {
        let path = user_path(username)?;
        let builder = self.authenticated(self.client.post(self.endpoint(&path)))?;
        self.send(builder).await
    }
}

/// `users/{username}`, refusing names that would change the route.
fn user_path(username: &str) -> MrbsResult<String> {
    let username = username.trim();
    if username.is_empty() || username.contains(['/', '?', '#']) || username == "new" {
        return Err(MrbsError::InvalidUser(format!(
            "'{username}' is not a valid username"
        )));
    }
    Ok(format!("users/{username}"))
}

impl BookingApi for HttpBookingApi {
    async fn get_bookings(&self, day: BusinessDay) -> MrbsResult<Vec<Booking>> {
        let request = self
            .client
            .get(self.endpoint("bookings/"))
            .query(&[("date", day.to_api_string())]);

        let records: Vec<BookingRecord> = self.send(request).await?;
        tracing::debug!("fetched {} bookings for {}", records.len(), day);

        let bookings = records
            .into_iter()
            .filter_map(|record| {
                let id = record.booking_id.clone();
                record
                    .into_booking(self.tz)
                    .inspect_err(|e| tracing::warn!(booking_id = %id, "dropping booking: {}", e))
                    .ok()
            })
            .collect();
        Ok(bookings)
    }

    async fn create_booking(&self, request: &BookingRequest) -> MrbsResult<NewBookingResponse> {
        let builder = self
            .authenticated(self.client.post(self.endpoint("bookings/new")))?
            .json(request);
        self.send(builder).await
    }

    async fn edit_booking(
        &self,
        booking_id: &str,
        request: &BookingRequest,
    ) -> MrbsResult<MessageResponse> {
        let builder = self
            .authenticated(self.client.put(self.endpoint(&format!("bookings/{booking_id}"))))?
            .json(request);
        self.send(builder).await
    }

    async fn delete_booking(&self, booking_id: &str) -> MrbsResult<MessageResponse> {
        let builder = self
            .authenticated(self.client.delete(self.endpoint("bookings/")))?
            .query(&[("id", booking_id)]);
        self.send(builder).await
    }
}

/// Decode a success body, or turn the backend's `{"error": ...}` into [`MrbsError::Api`].
async fn decode<R: DeserializeOwned>(response: Response) -> MrbsResult<R> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
        return Err(MrbsError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| MrbsError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FailingApi;

    impl BookingApi for FailingApi {
        async fn get_bookings(&self, _day: BusinessDay) -> MrbsResult<Vec<Booking>> {
            Err(MrbsError::Timeout(5))
        }

        async fn create_booking(&self, _request: &BookingRequest) -> MrbsResult<NewBookingResponse> {
            Err(MrbsError::NotLoggedIn)
        }

        async fn edit_booking(
            &self,
            _booking_id: &str,
            _request: &BookingRequest,
        ) -> MrbsResult<MessageResponse> {
            Err(MrbsError::NotLoggedIn)
        }

        async fn delete_booking(&self, _booking_id: &str) -> MrbsResult<MessageResponse> {
            Err(MrbsError::NotLoggedIn)
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_list() {
        let day = BusinessDay::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(FailingApi.bookings_or_empty(day).await.is_empty());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = HttpBookingApi::new(
            "http://localhost:8080/api/",
            chrono_tz::Asia::Singapore,
            Duration::from_secs(5),
        );
        assert_eq!(api.endpoint("bookings/"), "http://localhost:8080/api/bookings/");
        assert_eq!(api.endpoint("/auth/login"), "http://localhost:8080/api/auth/login");
    }

    #[test]
    fn test_corrupt_session_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let session_file = dir.path().join("session.json");
        std::fs::write(&session_file, "garbage").unwrap();
        let config = MrbsConfig {
            session_file,
            ..MrbsConfig::default()
        };

        let api = HttpBookingApi::from_config(&config).unwrap();
        assert!(api.session().is_none());
    }

    #[test]
    fn test_user_path_rejects_route_changing_names() {
        assert_eq!(user_path(" alice ").unwrap(), "users/alice");
        for name in ["", "a/b", "a?x=1", "new"] {
            assert!(matches!(user_path(name), Err(MrbsError::InvalidUser(_))));
        }
    }

    #[tokio::test]
    async fn test_user_management_needs_a_session() {
        let api = HttpBookingApi::new(
            "http://localhost:8080/api",
            chrono_tz::Asia::Singapore,
            Duration::from_secs(5),
        );
        assert!(matches!(api.list_users().await, Err(MrbsError::NotLoggedIn)));
        assert!(matches!(api.promote_user("bob").await, Err(MrbsError::NotLoggedIn)));
        let request = ChangePasswordRequest::new("old-secret", "new-secret", "new-secret").unwrap();
        assert!(matches!(
            api.change_password(&request).await,
            Err(MrbsError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_authenticated_calls_need_a_session() {
        let api = HttpBookingApi::new(
            "http://localhost:8080/api",
            chrono_tz::Asia::Singapore,
            Duration::from_secs(5),
        );
        let err = api.delete_booking("7").await.unwrap_err();
        assert!(matches!(err, MrbsError::NotLoggedIn));
    }
}
