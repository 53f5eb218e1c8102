use crate::cache::{ObjectCache, register::cache_backend};
use crate::config::AppConfig;
use crate::models::students::requests::NewStudentAccount;
use crate::models::teachers::requests::NewTeacherAccount;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::reconcile::EnrollmentDelta;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 创建缓存实例
///
/// 配置的后端不可用时回退到进程内 moka 缓存，两者都失败才算启动失败。
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let configured = config.cache.cache_type.as_str();

    let mut candidates = vec![configured];
    if configured != "moka" {
        candidates.push("moka");
    }

    for name in candidates {
        let Some(constructor) = cache_backend(name) else {
            warn!("Cache backend '{}' not found in registry", name);
            continue;
        };
        match constructor().await {
            Ok(cache) => {
                warn!("Cache backend '{}' initialized", name);
                return Ok(Arc::from(cache));
            }
            Err(e) => {
                warn!("Cache backend '{}' failed to initialize: {}", name, e);
            }
        }
    }

    Err(format!("No usable cache backend (configured: {configured})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 获取种子账号密码：优先环境变量，否则生成随机密码并打印
fn seed_password(env_var: &str, label: &str) -> String {
    std::env::var(env_var).unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  {} PASSWORD NOT SET - USING GENERATED PASSWORD", label);
        warn!("  Generated password: {}", pwd);
        warn!("  Please save this password or set {} env var", env_var);
        warn!("==========================================================");
        pwd
    })
}

/// 初始化课程目录
/// 如果数据库中没有任何课程，则写入默认的课程列表
async fn seed_courses(storage: &Arc<dyn Storage>) -> Vec<i64> {
    match storage.count_courses().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} course(s), skipping course seed", count);
            // 账号种子仍可能需要现有课程的 ID
            return match storage.list_courses().await {
                Ok(courses) => courses.iter().map(|course| course.id).collect(),
                Err(_) => Vec::new(),
            };
        }
        Ok(_) => {
            info!("No courses found in database, seeding default catalog...");
        }
        Err(e) => {
            warn!("Failed to count courses: {}, skipping course seed", e);
            return Vec::new();
        }
    }

    let mut course_ids = Vec::new();
    for name in ["Python 101", "Data Structures", "Java", "AI Basics"] {
        match storage.create_course(name).await {
            Ok(course) => course_ids.push(course.id),
            Err(e) => warn!("Failed to seed course '{}': {}", name, e),
        }
    }
    info!("Seeded {} default course(s)", course_ids.len());
    course_ids
}

/// 初始化示例教师账号
/// 如果数据库中没有任何教师，则创建一个默认账号并分配前两门课程
async fn seed_teacher(storage: &Arc<dyn Storage>, course_ids: &[i64]) {
    match storage.count_teachers().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} teacher(s), skipping teacher seed", count);
            return;
        }
        Ok(_) => {
            info!("No teachers found in database, creating default teacher account...");
        }
        Err(e) => {
            warn!("Failed to count teachers: {}, skipping teacher seed", e);
            return;
        }
    }

    let password = seed_password("ATTENDANCE_SEED_TEACHER_PASSWORD", "SEED TEACHER");
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash teacher password: {}, skipping teacher seed", e);
            return;
        }
    };

    match storage
        .create_teacher(NewTeacherAccount {
            name: "Test Teacher".to_string(),
            email: "teacher@example.com".to_string(),
            password_hash,
        })
        .await
    {
        Ok(teacher) => {
            info!(
                "Default teacher account created successfully (ID: {}, email: {})",
                teacher.id, teacher.email
            );
            let delta = EnrollmentDelta {
                to_add: course_ids.iter().take(2).copied().collect(),
                to_remove: Vec::new(),
            };
            if !delta.is_empty()
                && let Err(e) = storage.apply_teacher_course_delta(teacher.id, &delta).await
            {
                warn!("Failed to assign courses to default teacher: {}", e);
            }
        }
        Err(e) => {
            warn!("Failed to create teacher account: {}", e);
        }
    }
}

/// 初始化示例学生账号
/// 如果数据库中没有任何学生，则创建一个默认账号并选入第一门课程
async fn seed_student(storage: &Arc<dyn Storage>, course_ids: &[i64]) {
    match storage.count_students().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} student(s), skipping student seed", count);
            return;
        }
        Ok(_) => {
            info!("No students found in database, creating default student account...");
        }
        Err(e) => {
            warn!("Failed to count students: {}, skipping student seed", e);
            return;
        }
    }

    let password = seed_password("ATTENDANCE_SEED_STUDENT_PASSWORD", "SEED STUDENT");
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash student password: {}, skipping student seed", e);
            return;
        }
    };

    match storage
        .create_student(NewStudentAccount {
            name: "Student One".to_string(),
            email: "student1@example.com".to_string(),
            password_hash,
        })
        .await
    {
        Ok(student) => {
            info!(
                "Default student account created successfully (ID: {}, email: {})",
                student.id, student.email
            );
            let delta = EnrollmentDelta {
                to_add: course_ids.iter().take(1).copied().collect(),
                to_remove: Vec::new(),
            };
            if !delta.is_empty()
                && let Err(e) = storage.apply_student_course_delta(student.id, &delta).await
            {
                warn!("Failed to enroll default student: {}", e);
            }
        }
        Err(e) => {
            warn!("Failed to create student account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和路由配置等
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::log_cache_backends();
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认数据（空库时写入课程目录与示例账号）
    let course_ids = seed_courses(&storage).await;
    seed_teacher(&storage, &course_ids).await;
    seed_student(&storage, &course_ids).await;

    let cache = create_cache().await.expect("Failed to create cache");

    StartupContext { storage, cache }
}
