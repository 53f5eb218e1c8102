use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::Course;

// 课程目录
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
}
