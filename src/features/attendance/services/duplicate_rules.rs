//! Advisory duplicate matching for RSVP submissions.
//!
//! The rules are ordered and the first match wins. Anonymous submissions
//! (no name, no phone) skip matching entirely — the short-circuit takes
//! precedence over the device rule, so an anonymous candidate is never
//! reported as a duplicate even when its device id matches a stored row.

use crate::features::attendance::models::AttendanceRecord;
use crate::shared::validation::{is_blank, normalize_name, normalize_phone};

/// A proposed submission, as entered in the RSVP modal.
#[derive(Debug, Clone, Default)]
pub struct DuplicateCandidate {
    pub name: String,
    pub phone: String,
    pub device_id: String,
}

impl DuplicateCandidate {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            device_id: device_id.into(),
        }
    }

    /// Both name and phone blank after trimming. Anonymous submissions are
    /// always allowed through to keep friction minimal.
    pub fn is_anonymous(&self) -> bool {
        is_blank(&self.name) && is_blank(&self.phone)
    }
}

/// Linear scan over the stored records; returns the first record the
/// candidate matches, or None.
pub fn find_duplicate<'a>(
    candidate: &DuplicateCandidate,
    records: &'a [AttendanceRecord],
) -> Option<&'a AttendanceRecord> {
    if candidate.is_anonymous() {
        return None;
    }
    records.iter().find(|record| is_match(candidate, record))
}

fn is_match(candidate: &DuplicateCandidate, record: &AttendanceRecord) -> bool {
    // 1. Device match: the strongest signal when both sides carry one
    if !candidate.device_id.is_empty()
        && !record.device_id.is_empty()
        && candidate.device_id == record.device_id
    {
        return true;
    }

    let has_name = !is_blank(&candidate.name);
    let has_phone = !is_blank(&candidate.phone);

    // 2. Name + phone: both sides must carry both fields
    if has_name && has_phone && !record.name.is_empty() && !record.phone.is_empty() {
        return normalize_name(&candidate.name) == normalize_name(&record.name)
            && normalize_phone(&candidate.phone) == normalize_phone(&record.phone);
    }

    // 3. Name only (phone is not considered)
    if has_name && !has_phone && !record.name.is_empty() {
        return normalize_name(&candidate.name) == normalize_name(&record.name);
    }

    // 4. Phone only
    if !has_name && has_phone && !record.phone.is_empty() {
        return normalize_phone(&candidate.phone) == normalize_phone(&record.phone);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, phone: &str, device_id: &str) -> AttendanceRecord {
        AttendanceRecord {
            timestamp: "2025-10-11 13:00:00".to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            will_attend: true,
            attend_count: 1,
            user_agent: "Mozilla/5.0".to_string(),
            device_id: device_id.to_string(),
        }
    }

    #[test]
    fn test_anonymous_candidate_skips_even_device_match() {
        // The short-circuit takes precedence over the device rule
        let candidate = DuplicateCandidate::new("", "", "abc123");
        let records = vec![record("", "", "abc123")];
        assert!(find_duplicate(&candidate, &records).is_none());
    }

    #[test]
    fn test_whitespace_only_fields_count_as_anonymous() {
        let candidate = DuplicateCandidate::new("  ", "\t", "abc123");
        let records = vec![record("", "", "abc123")];
        assert!(find_duplicate(&candidate, &records).is_none());
    }

    #[test]
    fn test_device_match_wins_over_differing_names() {
        let candidate = DuplicateCandidate::new("이수진", "", "abc123");
        let records = vec![record("김민수", "010-1234-5678", "abc123")];
        assert!(find_duplicate(&candidate, &records).is_some());
    }

    #[test]
    fn test_device_rule_requires_both_sides_non_empty() {
        let candidate = DuplicateCandidate::new("이수진", "", "");
        let records = vec![record("김민수", "", "")];
        assert!(find_duplicate(&candidate, &records).is_none());
    }

    #[test]
    fn test_name_phone_match_ignores_case_and_separators() {
        let candidate = DuplicateCandidate::new("Kim Min", "010-1111-2222", "");
        let records = vec![record("kim min", "01011112222", "xyz")];
        let found = find_duplicate(&candidate, &records).unwrap();
        assert_eq!(found.name, "kim min");
    }

    #[test]
    fn test_name_phone_requires_record_to_carry_both() {
        let candidate = DuplicateCandidate::new("Kim Min", "010-1111-2222", "");
        // Record has a matching name but no phone: rule 2 cannot apply, and
        // rules 3/4 are shaped for single-field candidates
        let records = vec![record("kim min", "", "")];
        assert!(find_duplicate(&candidate, &records).is_none());
    }

    #[test]
    fn test_name_only_match() {
        let candidate = DuplicateCandidate::new(" Kim ", "", "");
        let records = vec![record("kim", "010-9999-8888", "")];
        assert!(find_duplicate(&candidate, &records).is_some());
    }

    #[test]
    fn test_phone_only_match() {
        let candidate = DuplicateCandidate::new("", "010 1234 5678", "");
        let records = vec![record("홍길동", "010-1234-5678", "")];
        assert!(find_duplicate(&candidate, &records).is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let candidate = DuplicateCandidate::new("박지훈", "010-0000-0000", "dev-a");
        let records = vec![
            record("김민수", "010-1234-5678", "dev-b"),
            record("이수진", "010-8765-4321", "dev-c"),
        ];
        assert!(find_duplicate(&candidate, &records).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let candidate = DuplicateCandidate::new("김민수", "", "");
        let records = vec![
            record("김민수", "010-1111-1111", "dev-a"),
            record("김민수", "010-2222-2222", "dev-b"),
        ];
        let found = find_duplicate(&candidate, &records).unwrap();
        assert_eq!(found.phone, "010-1111-1111");
    }

    #[test]
    fn test_empty_record_list() {
        let candidate = DuplicateCandidate::new("김민수", "010-1234-5678", "abc");
        assert!(find_duplicate(&candidate, &[]).is_none());
    }
}
