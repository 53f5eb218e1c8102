//! 教师账号存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{AttendanceError, Result};
use crate::models::teachers::{
    entities::Teacher,
    requests::{NewTeacherAccount, TeacherProfileChanges},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建教师账号
    pub async fn create_teacher_impl(&self, account: NewTeacherAccount) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(account.name),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AttendanceError::conflict("邮箱已被注册".to_string())
            }
            _ => AttendanceError::database_operation(format!("创建教师失败: {e}")),
        })?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过邮箱获取教师
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 更新教师资料
    pub async fn update_teacher_profile_impl(
        &self,
        id: i64,
        changes: TeacherProfileChanges,
    ) -> Result<Option<Teacher>> {
        // 先检查教师是否存在
        let existing = self.get_teacher_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            name: Set(changes.name),
            email: Set(changes.email),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }

        model.update(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AttendanceError::conflict("邮箱已被注册".to_string())
            }
            _ => AttendanceError::database_operation(format!("更新教师失败: {e}")),
        })?;

        self.get_teacher_by_id_impl(id).await
    }

    /// 统计教师数量
    pub async fn count_teachers_impl(&self) -> Result<u64> {
        let count = Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("统计教师数量失败: {e}")))?;

        Ok(count)
    }
}
