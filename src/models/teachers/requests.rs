use serde::Deserialize;
use ts_rs::TS;

// 教师资料更新请求（来自HTTP请求）
//
// name/email 始终提交；密码为空时保持原值不变。
// course_ids 是期望的任教课程全集，由服务层做差集调和。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

// 新建教师账号（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct NewTeacherAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

// 教师资料变更（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct TeacherProfileChanges {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}
