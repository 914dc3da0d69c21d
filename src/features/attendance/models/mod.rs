mod attendance_record;

pub use attendance_record::AttendanceRecord;
