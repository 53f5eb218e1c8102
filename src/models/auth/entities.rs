use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 账号角色：教师或学生，分别对应独立的数据表
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum AccountRole {
    Teacher, // 教师
    Student, // 学生
}

impl AccountRole {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AccountRole::TEACHER => Ok(AccountRole::Teacher),
            AccountRole::STUDENT => Ok(AccountRole::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的账号角色: '{s}'. 支持的角色: teacher, student"
            ))),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Teacher => write!(f, "{}", AccountRole::TEACHER),
            AccountRole::Student => write!(f, "{}", AccountRole::STUDENT),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(AccountRole::Teacher),
            "student" => Ok(AccountRole::Student),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

// 已认证账号：JWT 中间件解析后注入请求扩展
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AuthAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
}

impl AuthAccount {
    pub fn from_teacher(teacher: &crate::models::teachers::entities::Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name.clone(),
            email: teacher.email.clone(),
            role: AccountRole::Teacher,
        }
    }

    pub fn from_student(student: &crate::models::students::entities::Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            role: AccountRole::Student,
        }
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}
