use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::entities::{
    AttendanceDaySummary, AttendanceEntry, AttendanceRecordDetail,
};
use crate::models::courses::entities::Course;
use crate::models::students::entities::Student;

// 点名页：课程名单 + 历史日期汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSheetResponse {
    pub course: Course,
    pub students: Vec<Student>,
    pub dates: Vec<AttendanceDaySummary>,
}

// 保存点名表的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SaveAttendanceResponse {
    pub date: NaiveDate,
    pub marked: u64,
}

// 编辑页：某日期的全部记录
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecordsResponse {
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecordDetail>,
}

// 批量修正的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct EditAttendanceResponse {
    pub updated: u64,
}

// 学生视角：某课程的考勤历史（按日期倒序）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceResponse {
    pub course: Course,
    pub records: Vec<AttendanceEntry>,
}
