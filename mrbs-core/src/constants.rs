/// Hour of day (local wall clock) at which the booking grid opens.
pub const OPENING_HOUR: u32 = 8;

/// Width of one bookable slot.
pub const SLOT_WIDTH_MINUTES: i64 = 30;

/// Slots per business day: 08:00 until 02:00 the next day.
pub const SLOT_COUNT: usize = 36;

/// Longest booking, in slots (3 hours).
pub const MAX_DURATION_SLOTS: u32 = 6;

/// Duration options offered by the booking form, in slots.
pub const DURATION_OPTIONS: [u32; 6] = [1, 2, 3, 4, 5, 6];

/// Duration preselected by the booking form (1 hour).
pub const DEFAULT_DURATION_SLOTS: u32 = 2;

/// Backend user level required for user management.
pub const ADMIN_LEVEL: u32 = 2;

pub const MIN_PASSWORD_LEN: usize = 8;

pub const MAX_TITLE_LEN: usize = 25;
pub const MAX_DESCRIPTION_LEN: usize = 300;

/// Wire format for start times sent to the backend.
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";
