use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::{Course, CourseSelection};
use crate::models::students::entities::Student;

// 学生仪表盘：本人信息 + 已选课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDashboardResponse {
    pub student: Student,
    pub courses: Vec<Course>,
}

// 课程名单：某门课下已选课的全部学生
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct RosterResponse {
    pub course: Course,
    pub students: Vec<Student>,
}

// 教师视角的学生详情：教师任教课程并标记该学生的选课状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDetailResponse {
    pub student: Student,
    pub courses: Vec<CourseSelection>,
}

// 学生资料编辑页：全部课程并标记当前是否已选
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentProfileResponse {
    pub student: Student,
    pub courses: Vec<CourseSelection>,
}
