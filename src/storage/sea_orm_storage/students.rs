//! 学生账号存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{AttendanceError, Result};
use crate::models::students::{
    entities::Student,
    requests::{NewStudentAccount, StudentProfileChanges},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建学生账号
    pub async fn create_student_impl(&self, account: NewStudentAccount) -> Result<Student> {
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
            _ => AttendanceError::database_operation(format!("创建学生失败: {e}")),
        })?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过邮箱获取学生
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 更新学生资料
    pub async fn update_student_profile_impl(
        &self,
        id: i64,
        changes: StudentProfileChanges,
    ) -> Result<Option<Student>> {
        // 先检查学生是否存在
        let existing = self.get_student_by_id_impl(id).await?;
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
            _ => AttendanceError::database_operation(format!("更新学生失败: {e}")),
        })?;

        self.get_student_by_id_impl(id).await
    }

    /// 统计学生数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count)
    }
}
