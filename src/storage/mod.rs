use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    attendance::{
        entities::{AttendanceDaySummary, AttendanceEntry, AttendanceRecordDetail},
        requests::{AttendanceEdit, AttendanceMark},
    },
    courses::entities::Course,
    students::{
        entities::Student,
        requests::{NewStudentAccount, StudentProfileChanges},
    },
    teachers::{
        entities::Teacher,
        requests::{NewTeacherAccount, TeacherProfileChanges},
    },
};

use crate::errors::Result;
use crate::utils::reconcile::EnrollmentDelta;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教师账号方法
    // 创建教师账号（密码已哈希）
    async fn create_teacher(&self, account: NewTeacherAccount) -> Result<Teacher>;
    // 通过ID获取教师信息
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 通过邮箱获取教师信息
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    // 更新教师资料
    async fn update_teacher_profile(
        &self,
        id: i64,
        changes: TeacherProfileChanges,
    ) -> Result<Option<Teacher>>;
    // 统计教师数量
    async fn count_teachers(&self) -> Result<u64>;

    /// 学生账号方法
    // 创建学生账号（密码已哈希）
    async fn create_student(&self, account: NewStudentAccount) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过邮箱获取学生信息
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    // 更新学生资料
    async fn update_student_profile(
        &self,
        id: i64,
        changes: StudentProfileChanges,
    ) -> Result<Option<Student>>;
    // 统计学生数量
    async fn count_students(&self) -> Result<u64>;

    /// 课程方法
    // 创建课程
    async fn create_course(&self, name: &str) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 列出全部课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 统计课程数量
    async fn count_courses(&self) -> Result<u64>;

    /// 任教/选课关系方法
    // 列出教师任教的课程
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 列出学生选修的课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 列出课程的学生名单
    async fn list_course_students(&self, course_id: i64) -> Result<Vec<Student>>;
    // 教师是否任教该课程
    async fn is_teacher_assigned(&self, teacher_id: i64, course_id: i64) -> Result<bool>;
    // 学生是否选修该课程
    async fn is_student_enrolled(&self, student_id: i64, course_id: i64) -> Result<bool>;
    // 应用教师任教课程的增删差集
    async fn apply_teacher_course_delta(
        &self,
        teacher_id: i64,
        delta: &EnrollmentDelta,
    ) -> Result<()>;
    // 应用学生选修课程的增删差集
    async fn apply_student_course_delta(
        &self,
        student_id: i64,
        delta: &EnrollmentDelta,
    ) -> Result<()>;

    /// 考勤方法
    // 保存点名表，每个 (学生, 课程, 日期) 只保留一行
    async fn upsert_attendance_marks(
        &self,
        course_id: i64,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<u64>;
    // 列出课程有记录的日期及当日记录数
    async fn list_attendance_dates(&self, course_id: i64) -> Result<Vec<AttendanceDaySummary>>;
    // 列出课程某日的考勤记录（含学生姓名）
    async fn list_attendance_records_by_date(
        &self,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecordDetail>>;
    // 按记录ID批量修正状态，仅限该课程范围内的记录
    async fn update_attendance_statuses(
        &self,
        course_id: i64,
        updates: &[AttendanceEdit],
    ) -> Result<u64>;
    // 学生在某课程的考勤历史
    async fn list_student_attendance(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<AttendanceEntry>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
