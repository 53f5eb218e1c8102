use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::{StudentRegisterRequest, TeacherRegisterRequest};
use crate::models::students::requests::NewStudentAccount;
use crate::models::teachers::requests::NewTeacherAccount;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::reconcile::reconcile_course_selection;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

use super::AuthService;

pub async fn handle_register_teacher(
    service: &AuthService,
    create_request: TeacherRegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 检查邮箱是否已被注册
    if let Err(response) = check_teacher_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 2. 验证姓名
    if let Err(msg) = validate_name(&create_request.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidName, msg))
        );
    }

    // 3. 验证邮箱
    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidEmail, msg))
        );
    }

    // 4. 验证密码策略
    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidPassword, msg)));
    }

    // 5. 任教课程调和：提交的课程限制在课程目录内，教师注册必须至少选中一门
    let catalog = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    };
    let universe: HashSet<i64> = catalog.iter().map(|course| course.id).collect();
    let desired: HashSet<i64> = create_request.course_ids.iter().copied().collect();
    let delta = reconcile_course_selection(&desired, &HashSet::new(), &universe);
    if delta.to_add.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseSelectionRequired,
            "请至少选择一门任教课程",
        )));
    }

    // 6. 哈希密码
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    // 7. 创建教师账号并写入任教关系
    match storage
        .create_teacher(NewTeacherAccount {
            name: create_request.name.trim().to_string(),
            email: create_request.email,
            password_hash,
        })
        .await
    {
        Ok(teacher) => {
            // 任教关系落库失败不回滚账号，可在资料页重新保存
            if let Err(e) = storage.apply_teacher_course_delta(teacher.id, &delta).await {
                tracing::error!("Failed to save course selection for teacher {}: {}", teacher.id, e);
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "注册成功")))
        }
        Err(crate::errors::AttendanceError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::EmailAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("注册失败: {e}"),
            )),
        ),
    }
}

pub async fn handle_register_student(
    service: &AuthService,
    create_request: StudentRegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 检查邮箱是否已被注册
    if let Err(response) = check_student_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 2. 验证姓名
    if let Err(msg) = validate_name(&create_request.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidName, msg))
        );
    }

    // 3. 验证邮箱
    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidEmail, msg))
        );
    }

    // 4. 验证密码策略
    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidPassword, msg)));
    }

    // 5. 选课调和：学生注册时允许不选课，之后可在资料页补选
    let catalog = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    };
    let universe: HashSet<i64> = catalog.iter().map(|course| course.id).collect();
    let desired: HashSet<i64> = create_request.course_ids.iter().copied().collect();
    let delta = reconcile_course_selection(&desired, &HashSet::new(), &universe);

    // 6. 哈希密码
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    // 7. 创建学生账号并写入选课关系
    match storage
        .create_student(NewStudentAccount {
            name: create_request.name.trim().to_string(),
            email: create_request.email,
            password_hash,
        })
        .await
    {
        Ok(student) => {
            if !delta.is_empty()
                && let Err(e) = storage.apply_student_course_delta(student.id, &delta).await
            {
                tracing::error!("Failed to save course selection for student {}: {}", student.id, e);
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "注册成功")))
        }
        Err(crate::errors::AttendanceError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::EmailAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("注册失败: {e}"),
            )),
        ),
    }
}

async fn check_teacher_email_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_teacher_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_student_email_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_student_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
