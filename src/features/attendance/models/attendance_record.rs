use crate::shared::constants::ATTENDING;

/// One attendance row from the sheet (columns A..G, in order).
///
/// Rows are append-only: no in-place update, no delete. The store enforces
/// no uniqueness; duplicate prevention happens at submission time and a
/// guest can always bypass the warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// Submission time, "YYYY-MM-DD HH:mm:ss" in KST
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub will_attend: bool,
    pub attend_count: u32,
    pub user_agent: String,
    /// Client fingerprint; empty when generation was skipped or failed
    pub device_id: String,
}

impl AttendanceRecord {
    /// Positional mapping of one raw row. Short rows are tolerated: missing
    /// cells default to empty string / zero / false.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or("");

        Self {
            timestamp: cell(0).to_string(),
            name: cell(1).to_string(),
            phone: cell(2).to_string(),
            will_attend: cell(3) == ATTENDING,
            attend_count: cell(4).trim().parse().unwrap_or(0),
            user_agent: cell(5).to_string(),
            device_id: cell(6).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_from_row_full() {
        let record = AttendanceRecord::from_row(&row(&[
            "2025-10-11 13:00:00",
            "김민수",
            "010-1234-5678",
            "참석",
            "2",
            "Mozilla/5.0",
            "k3x9f2",
        ]));
        assert_eq!(record.timestamp, "2025-10-11 13:00:00");
        assert_eq!(record.name, "김민수");
        assert_eq!(record.phone, "010-1234-5678");
        assert!(record.will_attend);
        assert_eq!(record.attend_count, 2);
        assert_eq!(record.user_agent, "Mozilla/5.0");
        assert_eq!(record.device_id, "k3x9f2");
    }

    #[test]
    fn test_from_row_not_attending() {
        let record = AttendanceRecord::from_row(&row(&[
            "2025-10-11 13:00:00",
            "익명",
            "",
            "불참석",
            "0",
        ]));
        assert!(!record.will_attend);
        assert_eq!(record.attend_count, 0);
        assert_eq!(record.device_id, "");
    }

    #[test]
    fn test_from_row_short_row_defaults() {
        let record = AttendanceRecord::from_row(&row(&["2025-10-11 13:00:00"]));
        assert_eq!(record.name, "");
        assert_eq!(record.phone, "");
        assert!(!record.will_attend);
        assert_eq!(record.attend_count, 0);
        assert_eq!(record.user_agent, "");
        assert_eq!(record.device_id, "");
    }

    #[test]
    fn test_from_row_empty_row() {
        let record = AttendanceRecord::from_row(&[]);
        assert_eq!(record, AttendanceRecord::from_row(&row(&["", "", "", "", "", "", ""])));
    }

    #[test]
    fn test_from_row_non_numeric_count_defaults_to_zero() {
        let record =
            AttendanceRecord::from_row(&row(&["t", "name", "phone", "참석", "많이"]));
        assert_eq!(record.attend_count, 0);
    }
}
