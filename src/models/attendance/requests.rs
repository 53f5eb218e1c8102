use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::attendance::entities::AttendanceStatus;

// 单个学生的点名提交项
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

// 保存点名表（来自HTTP请求）
//
// date 缺省为服务器本地当天；entries 中未出现的学生不会被写入
// 任何记录，也不会清除该生当天已有的记录。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SaveAttendanceSheetRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub entries: Vec<AttendanceMark>,
}

// 按日期查询考勤记录（查询参数）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecordsQuery {
    pub date: NaiveDate,
}

// 单条记录的状态修正
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEdit {
    pub record_id: i64,
    pub status: AttendanceStatus,
}

// 批量修正已有记录（来自HTTP请求），按记录 ID 直接覆写
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct EditAttendanceRequest {
    pub updates: Vec<AttendanceEdit>,
}
