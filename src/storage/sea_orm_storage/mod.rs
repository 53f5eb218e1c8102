//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod courses;
mod enrollments;
mod students;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{AttendanceError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 从已有连接创建存储实例（用于测试）
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AttendanceError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AttendanceError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AttendanceError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AttendanceError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use crate::utils::reconcile::EnrollmentDelta;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 教师模块
    async fn create_teacher(&self, account: NewTeacherAccount) -> Result<Teacher> {
        self.create_teacher_impl(account).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    async fn update_teacher_profile(
        &self,
        id: i64,
        changes: TeacherProfileChanges,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_profile_impl(id, changes).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    // 学生模块
    async fn create_student(&self, account: NewStudentAccount) -> Result<Student> {
        self.create_student_impl(account).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn update_student_profile(
        &self,
        id: i64,
        changes: StudentProfileChanges,
    ) -> Result<Option<Student>> {
        self.update_student_profile_impl(id, changes).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 课程模块
    async fn create_course(&self, name: &str) -> Result<Course> {
        self.create_course_impl(name).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    // 任教/选课关系模块
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.list_teacher_courses_impl(teacher_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn list_course_students(&self, course_id: i64) -> Result<Vec<Student>> {
        self.list_course_students_impl(course_id).await
    }

    async fn is_teacher_assigned(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        self.is_teacher_assigned_impl(teacher_id, course_id).await
    }

    async fn is_student_enrolled(&self, student_id: i64, course_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(student_id, course_id).await
    }

    async fn apply_teacher_course_delta(
        &self,
        teacher_id: i64,
        delta: &EnrollmentDelta,
    ) -> Result<()> {
        self.apply_teacher_course_delta_impl(teacher_id, delta).await
    }

    async fn apply_student_course_delta(
        &self,
        student_id: i64,
        delta: &EnrollmentDelta,
    ) -> Result<()> {
        self.apply_student_course_delta_impl(student_id, delta).await
    }

    // 考勤模块
    async fn upsert_attendance_marks(
        &self,
        course_id: i64,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<u64> {
        self.upsert_attendance_marks_impl(course_id, date, marks)
            .await
    }

    async fn list_attendance_dates(&self, course_id: i64) -> Result<Vec<AttendanceDaySummary>> {
        self.list_attendance_dates_impl(course_id).await
    }

    async fn list_attendance_records_by_date(
        &self,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecordDetail>> {
        self.list_attendance_records_by_date_impl(course_id, date)
            .await
    }

    async fn update_attendance_statuses(
        &self,
        course_id: i64,
        updates: &[AttendanceEdit],
    ) -> Result<u64> {
        self.update_attendance_statuses_impl(course_id, updates)
            .await
    }

    async fn list_student_attendance(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<AttendanceEntry>> {
        self.list_student_attendance_impl(student_id, course_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;

    // 每个测试用独立的内存库，单连接保证库在测试期间不被回收
    async fn setup_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await.expect("内存数据库连接失败");
        Migrator::up(&db, None).await.expect("数据库迁移失败");

        SeaOrmStorage::from_connection(db)
    }

    async fn seed_teacher(storage: &SeaOrmStorage, name: &str, email: &str) -> Teacher {
        storage
            .create_teacher(NewTeacherAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: "$argon2id$test-hash".to_string(),
            })
            .await
            .expect("创建教师失败")
    }

    async fn seed_student(storage: &SeaOrmStorage, name: &str, email: &str) -> Student {
        storage
            .create_student(NewStudentAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: "$argon2id$test-hash".to_string(),
            })
            .await
            .expect("创建学生失败")
    }

    async fn seed_course(storage: &SeaOrmStorage, name: &str) -> Course {
        storage.create_course(name).await.expect("创建课程失败")
    }

    async fn enroll(storage: &SeaOrmStorage, student_id: i64, course_ids: &[i64]) {
        storage
            .apply_student_course_delta(
                student_id,
                &EnrollmentDelta {
                    to_add: course_ids.to_vec(),
                    to_remove: Vec::new(),
                },
            )
            .await
            .expect("选课失败");
    }

    fn mark(student_id: i64, status: AttendanceStatus) -> AttendanceMark {
        AttendanceMark { student_id, status }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).expect("无效日期")
    }

    #[tokio::test]
    async fn test_create_teacher_and_duplicate_email() {
        let storage = setup_storage().await;

        let teacher = seed_teacher(&storage, "Wang Wei", "wang@example.com").await;
        assert_eq!(storage.count_teachers().await.unwrap(), 1);

        let by_id = storage.get_teacher_by_id(teacher.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "wang@example.com");

        let by_email = storage
            .get_teacher_by_email("wang@example.com")
            .await
            .unwrap();
        assert_eq!(by_email.unwrap().name, "Wang Wei");

        // 邮箱唯一约束映射为 Conflict，数量不变
        let duplicate = storage
            .create_teacher(NewTeacherAccount {
                name: "Another".to_string(),
                email: "wang@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await;
        assert!(matches!(duplicate, Err(AttendanceError::Conflict(_))));
        assert_eq!(storage.count_teachers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_student_duplicate_email() {
        let storage = setup_storage().await;

        seed_student(&storage, "Li Lei", "lilei@example.com").await;

        let duplicate = storage
            .create_student(NewStudentAccount {
                name: "Han Meimei".to_string(),
                email: "lilei@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await;
        assert!(matches!(duplicate, Err(AttendanceError::Conflict(_))));
        assert_eq!(storage.count_students().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_teacher_profile() {
        let storage = setup_storage().await;

        let teacher = seed_teacher(&storage, "Old Name", "old@example.com").await;
        let original_hash = teacher.password_hash.clone();

        // 不带密码的更新保留原哈希
        let updated = storage
            .update_teacher_profile(
                teacher.id,
                TeacherProfileChanges {
                    name: "New Name".to_string(),
                    email: "new@example.com".to_string(),
                    password_hash: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.password_hash, original_hash);

        // 带密码的更新覆盖哈希
        let updated = storage
            .update_teacher_profile(
                teacher.id,
                TeacherProfileChanges {
                    name: "New Name".to_string(),
                    email: "new@example.com".to_string(),
                    password_hash: Some("$argon2id$new-hash".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.password_hash, "$argon2id$new-hash");

        // 不存在的 ID 返回 None
        let missing = storage
            .update_teacher_profile(
                9999,
                TeacherProfileChanges {
                    name: "Ghost".to_string(),
                    email: "ghost@example.com".to_string(),
                    password_hash: None,
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_student_profile_email_conflict() {
        let storage = setup_storage().await;

        seed_student(&storage, "First", "first@example.com").await;
        let second = seed_student(&storage, "Second", "second@example.com").await;

        let result = storage
            .update_student_profile(
                second.id,
                StudentProfileChanges {
                    name: "Second".to_string(),
                    email: "first@example.com".to_string(),
                    password_hash: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AttendanceError::Conflict(_))));

        // 冲突更新不应落库
        let unchanged = storage.get_student_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(unchanged.email, "second@example.com");
    }

    #[tokio::test]
    async fn test_course_catalog() {
        let storage = setup_storage().await;

        let python = seed_course(&storage, "Python 101").await;
        let java = seed_course(&storage, "Java").await;

        assert_eq!(storage.count_courses().await.unwrap(), 2);

        let catalog = storage.list_courses().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, python.id);
        assert_eq!(catalog[1].id, java.id);

        let found = storage.get_course_by_id(java.id).await.unwrap();
        assert_eq!(found.unwrap().name, "Java");
        assert!(storage.get_course_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_student_course_delta_add_and_remove() {
        let storage = setup_storage().await;

        let student = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let c1 = seed_course(&storage, "Python 101").await;
        let c2 = seed_course(&storage, "Java").await;
        let c3 = seed_course(&storage, "AI Basics").await;

        enroll(&storage, student.id, &[c1.id, c2.id]).await;
        assert!(storage.is_student_enrolled(student.id, c1.id).await.unwrap());
        assert!(storage.is_student_enrolled(student.id, c2.id).await.unwrap());
        assert!(!storage.is_student_enrolled(student.id, c3.id).await.unwrap());

        let courses = storage.list_student_courses(student.id).await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, c1.id);

        // 重复插入被吸收，关系数量不变
        enroll(&storage, student.id, &[c1.id]).await;
        assert_eq!(storage.list_student_courses(student.id).await.unwrap().len(), 2);

        storage
            .apply_student_course_delta(
                student.id,
                &EnrollmentDelta {
                    to_add: vec![c3.id],
                    to_remove: vec![c1.id],
                },
            )
            .await
            .unwrap();
        assert!(!storage.is_student_enrolled(student.id, c1.id).await.unwrap());
        assert!(storage.is_student_enrolled(student.id, c3.id).await.unwrap());
        assert_eq!(storage.list_student_courses(student.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_teacher_course_delta_absorbs_duplicates() {
        let storage = setup_storage().await;

        let teacher = seed_teacher(&storage, "Wang Wei", "wang@example.com").await;
        let course = seed_course(&storage, "Data Structures").await;

        let delta = EnrollmentDelta {
            to_add: vec![course.id],
            to_remove: Vec::new(),
        };
        storage
            .apply_teacher_course_delta(teacher.id, &delta)
            .await
            .unwrap();
        storage
            .apply_teacher_course_delta(teacher.id, &delta)
            .await
            .unwrap();

        assert!(storage.is_teacher_assigned(teacher.id, course.id).await.unwrap());
        assert_eq!(storage.list_teacher_courses(teacher.id).await.unwrap().len(), 1);

        storage
            .apply_teacher_course_delta(
                teacher.id,
                &EnrollmentDelta {
                    to_add: Vec::new(),
                    to_remove: vec![course.id],
                },
            )
            .await
            .unwrap();
        assert!(!storage.is_teacher_assigned(teacher.id, course.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_keeps_single_row_per_student_day() {
        let storage = setup_storage().await;

        let student = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let course = seed_course(&storage, "Python 101").await;
        enroll(&storage, student.id, &[course.id]).await;

        let written = storage
            .upsert_attendance_marks(course.id, day(2), &[mark(student.id, AttendanceStatus::Present)])
            .await
            .unwrap();
        assert_eq!(written, 1);

        // 同日重复提交覆盖状态而不是追加行
        let written = storage
            .upsert_attendance_marks(course.id, day(2), &[mark(student.id, AttendanceStatus::Absent)])
            .await
            .unwrap();
        assert_eq!(written, 1);

        let records = storage
            .list_attendance_records_by_date(course.id, day(2))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);

        // 另一天是独立的行
        storage
            .upsert_attendance_marks(course.id, day(3), &[mark(student.id, AttendanceStatus::Late)])
            .await
            .unwrap();
        let history = storage
            .list_student_attendance(student.id, course.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_skips_unenrolled_students() {
        let storage = setup_storage().await;

        let enrolled = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let outsider = seed_student(&storage, "Han Meimei", "han@example.com").await;
        let course = seed_course(&storage, "Python 101").await;
        enroll(&storage, enrolled.id, &[course.id]).await;

        let written = storage
            .upsert_attendance_marks(
                course.id,
                day(2),
                &[
                    mark(enrolled.id, AttendanceStatus::Present),
                    mark(outsider.id, AttendanceStatus::Present),
                ],
            )
            .await
            .unwrap();
        assert_eq!(written, 1);

        let records = storage
            .list_attendance_records_by_date(course.id, day(2))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_id, enrolled.id);
    }

    #[tokio::test]
    async fn test_resubmission_touches_only_submitted_entries() {
        let storage = setup_storage().await;

        let a = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let b = seed_student(&storage, "Han Meimei", "han@example.com").await;
        let course = seed_course(&storage, "Python 101").await;
        enroll(&storage, a.id, &[course.id]).await;
        enroll(&storage, b.id, &[course.id]).await;

        storage
            .upsert_attendance_marks(
                course.id,
                day(2),
                &[
                    mark(a.id, AttendanceStatus::Present),
                    mark(b.id, AttendanceStatus::Present),
                ],
            )
            .await
            .unwrap();

        // 只重交 a 的状态，b 的记录保持原状
        let written = storage
            .upsert_attendance_marks(course.id, day(2), &[mark(a.id, AttendanceStatus::Absent)])
            .await
            .unwrap();
        assert_eq!(written, 1);

        let records = storage
            .list_attendance_records_by_date(course.id, day(2))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);

        let status_of = |student_id: i64| {
            records
                .iter()
                .find(|r| r.student_id == student_id)
                .map(|r| r.status)
        };
        assert_eq!(status_of(a.id), Some(AttendanceStatus::Absent));
        assert_eq!(status_of(b.id), Some(AttendanceStatus::Present));
    }

    #[tokio::test]
    async fn test_edit_scoped_to_course() {
        let storage = setup_storage().await;

        let student = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let owned = seed_course(&storage, "Python 101").await;
        let other = seed_course(&storage, "Java").await;
        enroll(&storage, student.id, &[owned.id, other.id]).await;

        storage
            .upsert_attendance_marks(owned.id, day(2), &[mark(student.id, AttendanceStatus::Present)])
            .await
            .unwrap();
        let record_id = storage
            .list_attendance_records_by_date(owned.id, day(2))
            .await
            .unwrap()[0]
            .id;

        // 换一个课程 ID 去改同一条记录，双条件过滤下不产生任何写入
        let updated = storage
            .update_attendance_statuses(
                other.id,
                &[AttendanceEdit {
                    record_id,
                    status: AttendanceStatus::Absent,
                }],
            )
            .await
            .unwrap();
        assert_eq!(updated, 0);

        let records = storage
            .list_attendance_records_by_date(owned.id, day(2))
            .await
            .unwrap();
        assert_eq!(records[0].status, AttendanceStatus::Present);

        // 正确的课程范围内修正生效
        let updated = storage
            .update_attendance_statuses(
                owned.id,
                &[AttendanceEdit {
                    record_id,
                    status: AttendanceStatus::Excused,
                }],
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let records = storage
            .list_attendance_records_by_date(owned.id, day(2))
            .await
            .unwrap();
        assert_eq!(records[0].status, AttendanceStatus::Excused);
    }

    #[tokio::test]
    async fn test_attendance_dates_grouped_desc() {
        let storage = setup_storage().await;

        let a = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let b = seed_student(&storage, "Han Meimei", "han@example.com").await;
        let course = seed_course(&storage, "Python 101").await;
        enroll(&storage, a.id, &[course.id]).await;
        enroll(&storage, b.id, &[course.id]).await;

        storage
            .upsert_attendance_marks(
                course.id,
                day(2),
                &[
                    mark(a.id, AttendanceStatus::Present),
                    mark(b.id, AttendanceStatus::Late),
                ],
            )
            .await
            .unwrap();
        storage
            .upsert_attendance_marks(course.id, day(9), &[mark(a.id, AttendanceStatus::Present)])
            .await
            .unwrap();

        let dates = storage.list_attendance_dates(course.id).await.unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].date, day(9));
        assert_eq!(dates[0].total, 1);
        assert_eq!(dates[1].date, day(2));
        assert_eq!(dates[1].total, 2);
    }

    #[tokio::test]
    async fn test_records_by_date_sorted_by_student_name() {
        let storage = setup_storage().await;

        let bob = seed_student(&storage, "Bob", "bob@example.com").await;
        let alice = seed_student(&storage, "Alice", "alice@example.com").await;
        let course = seed_course(&storage, "Python 101").await;
        enroll(&storage, bob.id, &[course.id]).await;
        enroll(&storage, alice.id, &[course.id]).await;

        storage
            .upsert_attendance_marks(
                course.id,
                day(2),
                &[
                    mark(bob.id, AttendanceStatus::Present),
                    mark(alice.id, AttendanceStatus::Absent),
                ],
            )
            .await
            .unwrap();

        let records = storage
            .list_attendance_records_by_date(course.id, day(2))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].student_name, "Alice");
        assert_eq!(records[1].student_name, "Bob");
    }

    #[tokio::test]
    async fn test_student_history_scoped_and_desc() {
        let storage = setup_storage().await;

        let student = seed_student(&storage, "Li Lei", "lilei@example.com").await;
        let python = seed_course(&storage, "Python 101").await;
        let java = seed_course(&storage, "Java").await;
        enroll(&storage, student.id, &[python.id, java.id]).await;

        storage
            .upsert_attendance_marks(python.id, day(2), &[mark(student.id, AttendanceStatus::Present)])
            .await
            .unwrap();
        storage
            .upsert_attendance_marks(python.id, day(9), &[mark(student.id, AttendanceStatus::Absent)])
            .await
            .unwrap();
        storage
            .upsert_attendance_marks(java.id, day(2), &[mark(student.id, AttendanceStatus::Late)])
            .await
            .unwrap();

        // 只含查询课程的记录，日期倒序
        let history = storage
            .list_student_attendance(student.id, python.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, day(9));
        assert_eq!(history[0].status, AttendanceStatus::Absent);
        assert_eq!(history[1].date, day(2));
        assert_eq!(history[1].status, AttendanceStatus::Present);

        let roster = storage.list_course_students(python.id).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, student.id);
    }
}
