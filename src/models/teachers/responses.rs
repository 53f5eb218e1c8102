use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::{Course, CourseSelection};
use crate::models::teachers::entities::Teacher;

// 教师仪表盘：本人信息 + 任教课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherDashboardResponse {
    pub teacher: Teacher,
    pub courses: Vec<Course>,
}

// 教师资料编辑页：全部课程并标记当前是否任教
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherProfileResponse {
    pub teacher: Teacher,
    pub courses: Vec<CourseSelection>,
}
