use serde::Deserialize;
use ts_rs::TS;

// 登录请求（教师与学生共用，角色由路由决定）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 邮箱
    pub email: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 教师注册请求：至少选择一门课程
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TeacherRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// 任教课程，注册时必须至少选择一门
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

// 学生注册请求：课程可为空，之后可在个人资料中修改
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct StudentRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}
