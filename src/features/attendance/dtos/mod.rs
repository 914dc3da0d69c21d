mod attendance_dto;

pub use attendance_dto::{
    AttendanceEntryDto, AttendanceListResponseDto, AttendanceSummaryDto, CheckDuplicateDto,
    CheckDuplicateResponseDto, DeviceIdResponseDto, DeviceSignalsDto, ExistingSubmissionDto,
    SubmitAttendanceDto, SubmitAttendanceResponseDto,
};
