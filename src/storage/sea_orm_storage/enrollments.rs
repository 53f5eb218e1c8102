//! 任教/选课关联存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Column as CourseColumn;
use crate::entity::prelude::{
    Courses, StudentCourseActiveModel, StudentCourses, Students, TeacherCourseActiveModel,
    TeacherCourses,
};
use crate::entity::student_courses::Column as StudentCourseColumn;
use crate::entity::students::Column as StudentColumn;
use crate::entity::teacher_courses::Column as TeacherCourseColumn;
use crate::errors::{AttendanceError, Result};
use crate::models::{courses::entities::Course, students::entities::Student};
use crate::utils::reconcile::EnrollmentDelta;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 列出教师任教的课程
    pub async fn list_teacher_courses_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let links = TeacherCourses::find()
            .filter(TeacherCourseColumn::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                AttendanceError::database_operation(format!("查询教师任教课程失败: {e}"))
            })?;

        let course_ids: Vec<i64> = links.iter().map(|link| link.course_id).collect();

        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .order_by_asc(CourseColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出学生选修的课程
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let links = StudentCourses::find()
            .filter(StudentCourseColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                AttendanceError::database_operation(format!("查询学生选修课程失败: {e}"))
            })?;

        let course_ids: Vec<i64> = links.iter().map(|link| link.course_id).collect();

        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .order_by_asc(CourseColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出课程的学生名单（按姓名排序）
    pub async fn list_course_students_impl(&self, course_id: i64) -> Result<Vec<Student>> {
        let links = StudentCourses::find()
            .filter(StudentCourseColumn::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询课程名单失败: {e}")))?;

        let student_ids: Vec<i64> = links.iter().map(|link| link.student_id).collect();

        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        let students = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .order_by_asc(StudentColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 教师是否任教该课程
    pub async fn is_teacher_assigned_impl(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        let count = TeacherCourses::find()
            .filter(
                Condition::all()
                    .add(TeacherCourseColumn::TeacherId.eq(teacher_id))
                    .add(TeacherCourseColumn::CourseId.eq(course_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| {
                AttendanceError::database_operation(format!("查询任教关系失败: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 学生是否选修该课程
    pub async fn is_student_enrolled_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let count = StudentCourses::find()
            .filter(
                Condition::all()
                    .add(StudentCourseColumn::StudentId.eq(student_id))
                    .add(StudentCourseColumn::CourseId.eq(course_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| {
                AttendanceError::database_operation(format!("查询选课关系失败: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 应用教师任教课程的增删差集
    ///
    /// 插入时吸收唯一约束冲突：关联已存在视为已达成目标，不报错。
    pub async fn apply_teacher_course_delta_impl(
        &self,
        teacher_id: i64,
        delta: &EnrollmentDelta,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        for course_id in &delta.to_add {
            let model = TeacherCourseActiveModel {
                teacher_id: Set(teacher_id),
                course_id: Set(*course_id),
                created_at: Set(now),
                ..Default::default()
            };

            if let Err(e) = model.insert(&self.db).await {
                match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        debug!(
                            "任教关系已存在，跳过: teacher {} -> course {}",
                            teacher_id, course_id
                        );
                    }
                    _ => {
                        return Err(AttendanceError::database_operation(format!(
                            "添加任教关系失败: {e}"
                        )));
                    }
                }
            }
        }

        if !delta.to_remove.is_empty() {
            TeacherCourses::delete_many()
                .filter(
                    Condition::all()
                        .add(TeacherCourseColumn::TeacherId.eq(teacher_id))
                        .add(TeacherCourseColumn::CourseId.is_in(delta.to_remove.clone())),
                )
                .exec(&self.db)
                .await
                .map_err(|e| {
                    AttendanceError::database_operation(format!("移除任教关系失败: {e}"))
                })?;
        }

        Ok(())
    }

    /// 应用学生选修课程的增删差集
    ///
    /// 插入时吸收唯一约束冲突：关联已存在视为已达成目标，不报错。
    pub async fn apply_student_course_delta_impl(
        &self,
        student_id: i64,
        delta: &EnrollmentDelta,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        for course_id in &delta.to_add {
            let model = StudentCourseActiveModel {
                student_id: Set(student_id),
                course_id: Set(*course_id),
                created_at: Set(now),
                ..Default::default()
            };

            if let Err(e) = model.insert(&self.db).await {
                match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        debug!(
                            "选课关系已存在，跳过: student {} -> course {}",
                            student_id, course_id
                        );
                    }
                    _ => {
                        return Err(AttendanceError::database_operation(format!(
                            "添加选课关系失败: {e}"
                        )));
                    }
                }
            }
        }

        if !delta.to_remove.is_empty() {
            StudentCourses::delete_many()
                .filter(
                    Condition::all()
                        .add(StudentCourseColumn::StudentId.eq(student_id))
                        .add(StudentCourseColumn::CourseId.is_in(delta.to_remove.clone())),
                )
                .exec(&self.db)
                .await
                .map_err(|e| {
                    AttendanceError::database_operation(format!("移除选课关系失败: {e}"))
                })?;
        }

        Ok(())
    }
}
