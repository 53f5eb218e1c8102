//! 考勤记录存储操作
//!
//! (student_id, course_id, date) 的单行保证在这里维护：保存点名表时
//! 先查已有记录，命中则覆写状态，否则插入新行。

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::entity::student_courses::{
    Column as StudentCourseColumn, Entity as StudentCourses,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{AttendanceError, Result};
use crate::models::attendance::{
    entities::{AttendanceDaySummary, AttendanceEntry, AttendanceRecordDetail, AttendanceStatus},
    requests::{AttendanceEdit, AttendanceMark},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 保存点名表
    ///
    /// 未选修该课程的学生条目会被跳过；同一学生在 entries 中出现多次时，
    /// 后出现的状态覆盖先出现的。返回实际写入的行数。
    pub async fn upsert_attendance_marks_impl(
        &self,
        course_id: i64,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<u64> {
        // 课程的选课学生集合，范围外的条目直接忽略
        let links = StudentCourses::find()
            .filter(StudentCourseColumn::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询课程名单失败: {e}")))?;

        let enrolled: HashSet<i64> = links.iter().map(|link| link.student_id).collect();

        let now = chrono::Utc::now().timestamp();
        let mut written = 0u64;

        for mark in marks {
            if !enrolled.contains(&mark.student_id) {
                debug!(
                    "学生 {} 未选修课程 {}，跳过该条点名",
                    mark.student_id, course_id
                );
                continue;
            }

            let existing = Attendance::find()
                .filter(
                    Condition::all()
                        .add(Column::StudentId.eq(mark.student_id))
                        .add(Column::CourseId.eq(course_id))
                        .add(Column::Date.eq(date)),
                )
                .one(&self.db)
                .await
                .map_err(|e| {
                    AttendanceError::database_operation(format!("查询考勤记录失败: {e}"))
                })?;

            match existing {
                Some(record) => {
                    let model = ActiveModel {
                        id: Set(record.id),
                        status: Set(mark.status.to_string()),
                        updated_at: Set(now),
                        ..Default::default()
                    };

                    model.update(&self.db).await.map_err(|e| {
                        AttendanceError::database_operation(format!("更新考勤记录失败: {e}"))
                    })?;
                }
                None => {
                    let model = ActiveModel {
                        student_id: Set(mark.student_id),
                        course_id: Set(course_id),
                        date: Set(date),
                        status: Set(mark.status.to_string()),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };

                    model.insert(&self.db).await.map_err(|e| {
                        AttendanceError::database_operation(format!("创建考勤记录失败: {e}"))
                    })?;
                }
            }

            written += 1;
        }

        Ok(written)
    }

    /// 列出课程有记录的日期及当日记录数（日期倒序）
    pub async fn list_attendance_dates_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<AttendanceDaySummary>> {
        let rows = Attendance::find()
            .select_only()
            .column(Column::Date)
            .column_as(Column::Id.count(), "total")
            .filter(Column::CourseId.eq(course_id))
            .group_by(Column::Date)
            .order_by_desc(Column::Date)
            .into_tuple::<(NaiveDate, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询考勤日期失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(date, total)| AttendanceDaySummary { date, total })
            .collect())
    }

    /// 列出课程某日的考勤记录（含学生姓名，按姓名排序）
    pub async fn list_attendance_records_by_date_impl(
        &self,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecordDetail>> {
        let records = Attendance::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::Date.eq(date)),
            )
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询考勤记录失败: {e}")))?;

        // 批量查询学生姓名
        let student_ids: Vec<i64> = records
            .iter()
            .map(|r| r.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let students = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询学生信息失败: {e}")))?;

        let name_map: HashMap<i64, String> =
            students.into_iter().map(|s| (s.id, s.name)).collect();

        let mut details: Vec<AttendanceRecordDetail> = records
            .into_iter()
            .map(|r| AttendanceRecordDetail {
                id: r.id,
                student_id: r.student_id,
                student_name: name_map
                    .get(&r.student_id)
                    .cloned()
                    .unwrap_or_else(|| "未知学生".to_string()),
                status: r
                    .status
                    .parse::<AttendanceStatus>()
                    .unwrap_or(AttendanceStatus::Present),
            })
            .collect();

        details.sort_by(|a, b| a.student_name.cmp(&b.student_name));

        Ok(details)
    }

    /// 按记录 ID 批量修正状态
    ///
    /// 每条更新都限定在该课程范围内，范围外的记录 ID 不产生任何效果。
    /// 返回实际修改的行数。
    pub async fn update_attendance_statuses_impl(
        &self,
        course_id: i64,
        updates: &[AttendanceEdit],
    ) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();
        let mut updated = 0u64;

        for edit in updates {
            let result = Attendance::update_many()
                .col_expr(
                    Column::Status,
                    sea_orm::sea_query::Expr::value(edit.status.to_string()),
                )
                .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
                .filter(
                    Condition::all()
                        .add(Column::Id.eq(edit.record_id))
                        .add(Column::CourseId.eq(course_id)),
                )
                .exec(&self.db)
                .await
                .map_err(|e| {
                    AttendanceError::database_operation(format!("修正考勤记录失败: {e}"))
                })?;

            updated += result.rows_affected;
        }

        Ok(updated)
    }

    /// 学生在某课程的考勤历史（日期倒序）
    pub async fn list_student_attendance_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<AttendanceEntry>> {
        let records = Attendance::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询考勤历史失败: {e}")))?;

        Ok(records
            .into_iter()
            .map(|r| AttendanceEntry {
                date: r.date,
                status: r
                    .status
                    .parse::<AttendanceStatus>()
                    .unwrap_or(AttendanceStatus::Present),
            })
            .collect())
    }
}
