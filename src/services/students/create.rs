use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::students::requests::{CreateStudentRequest, NewStudentAccount};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::reconcile::reconcile_course_selection;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

pub async fn handle_create_student(
    service: &StudentService,
    create_request: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher_id = match RequireJWT::extract_account_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing account id",
            )));
        }
    };

    // 1. 检查邮箱是否已被注册
    match storage.get_student_by_email(&create_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreateFailed,
                    format!("创建学生失败: {e}"),
                )),
            );
        }
    }

    // 2. 验证姓名、邮箱与密码
    if let Err(msg) = validate_name(&create_request.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidName, msg))
        );
    }
    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidEmail, msg))
        );
    }
    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidPassword, msg)));
    }

    // 3. 选课调和：教师代建档时允许的范围是该教师自己的任教课程，
    //    提交里夹带的范围外课程会被静默忽略
    let allowed: HashSet<i64> = match storage.list_teacher_courses(teacher_id).await {
        Ok(courses) => courses.iter().map(|course| course.id).collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };
    let desired: HashSet<i64> = create_request.course_ids.iter().copied().collect();
    let delta = reconcile_course_selection(&desired, &HashSet::new(), &allowed);

    // 4. 哈希密码
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreateFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    // 5. 创建学生账号并写入选课关系
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
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "学生创建成功")))
        }
        Err(crate::errors::AttendanceError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::EmailAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StudentCreateFailed,
                format!("创建学生失败: {e}"),
            )),
        ),
    }
}
