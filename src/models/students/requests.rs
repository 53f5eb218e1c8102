use serde::Deserialize;
use ts_rs::TS;

// 教师代学生建档（来自HTTP请求）
//
// course_ids 会被限制在该教师自己的任教课程范围内。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

// 教师编辑学生（来自HTTP请求）
//
// 该流程不允许修改学生密码；course_ids 同样只在
// 该教师的任教课程范围内调和，范围外的选课保持原状。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

// 学生本人资料更新（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

// 新建学生账号（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct NewStudentAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

// 学生资料变更（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct StudentProfileChanges {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}
