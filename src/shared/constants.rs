/// Name recorded when a guest submits without entering one
pub const ANONYMOUS_NAME: &str = "익명";

/// Phone placeholder shown for records that were stored without one
pub const PHONE_NOT_PROVIDED: &str = "미입력";

/// Attendance cell literal for "attending"
pub const ATTENDING: &str = "참석";

/// Attendance cell literal for "not attending"
pub const NOT_ATTENDING: &str = "불참석";

/// Cell range read by the attendance reader. Row 1 is the header row, so
/// data starts at row 2; the sheet is scanned up to 1000 rows (columns A..G).
pub const ATTENDANCE_RANGE: &str = "A2:G1000";

/// Worksheet that receives photo-upload metadata rows when it exists.
/// Falls back to the first worksheet otherwise.
pub const PHOTO_SHEET_TITLE: &str = "사진업로드";

/// Bounded page size for the single photo-listing fetch
pub const PHOTO_LIST_MAX_KEYS: usize = 1000;

// =============================================================================
// CLIENT-SIDE PREFERENCE KEYS
// =============================================================================
// The invitation pages persist a handful of values in browser storage. The
// keys are fixed here so every theme bundle reads and writes the same ones.

/// localStorage: "this browser already submitted an RSVP" flag
#[allow(dead_code)]
pub const PREF_HAS_CHECKED_ATTENDANCE: &str = "hasCheckedAttendance";

/// localStorage: JSON snapshot of the last submitted attendance form
#[allow(dead_code)]
pub const PREF_ATTENDANCE_INFO: &str = "attendanceInfo";

/// localStorage: last submitted guest name
#[allow(dead_code)]
pub const PREF_ATTENDEE_NAME: &str = "attendeeName";

/// localStorage: last submitted guest phone
#[allow(dead_code)]
pub const PREF_ATTENDEE_PHONE: &str = "attendeePhone";

/// sessionStorage: per-tab session-start value folded into the device
/// fingerprint so repeated generations within one tab stay stable
pub const PREF_SESSION_START: &str = "sessionStart";
