use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::CourseSelection;
use crate::models::students::requests::{StudentProfileChanges, UpdateStudentProfileRequest};
use crate::models::students::responses::StudentProfileResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::reconcile::reconcile_course_selection;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

pub async fn handle_get_profile(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let account_id = match RequireJWT::extract_account_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing account id",
            )));
        }
    };

    let student = match storage.get_student_by_id(account_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve student information: {e}"),
                )),
            );
        }
    };

    match load_marked_courses(&storage, account_id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentProfileResponse { student, courses },
            "Profile retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}

pub async fn handle_update_profile(
    service: &StudentService,
    update_data: UpdateStudentProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let account_id = match RequireJWT::extract_account_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing account id",
            )));
        }
    };

    // 验证姓名与邮箱格式
    if let Err(msg) = validate_name(&update_data.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidName, msg))
        );
    }
    if let Err(msg) = validate_email(&update_data.email) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InvalidEmail, msg))
        );
    }

    // 检查邮箱是否已被其他学生使用
    if let Ok(Some(existing)) = storage.get_student_by_email(&update_data.email).await
        && existing.id != account_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EmailAlreadyExists,
            "该邮箱已被使用",
        )));
    }

    // 处理密码（留空保持原密码不变）
    let hashed_password = if let Some(ref password) = update_data.password {
        if let Err(msg) = validate_password_simple(password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidPassword, msg)));
        }

        match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("密码哈希失败: {e}"),
                    )),
                );
            }
        }
    } else {
        None
    };

    let changes = StudentProfileChanges {
        name: update_data.name.trim().to_string(),
        email: update_data.email,
        password_hash: hashed_password,
    };

    let student = match storage.update_student_profile(account_id, changes).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(crate::errors::AttendanceError::Conflict(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EmailAlreadyExists,
                "该邮箱已被使用",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProfileUpdateFailed,
                    format!("更新学生资料失败: {e}"),
                )),
            );
        }
    };

    // 调和选课：本人编辑时允许的范围是全部课程
    let catalog = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };
    let universe: HashSet<i64> = catalog.iter().map(|course| course.id).collect();
    let existing: HashSet<i64> = match storage.list_student_courses(account_id).await {
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
    let desired: HashSet<i64> = update_data.course_ids.iter().copied().collect();

    let delta = reconcile_course_selection(&desired, &existing, &universe);
    if !delta.is_empty()
        && let Err(e) = storage.apply_student_course_delta(account_id, &delta).await
    {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ProfileUpdateFailed,
                format!("保存选课失败: {e}"),
            )),
        );
    }

    match load_marked_courses(&storage, account_id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentProfileResponse { student, courses },
            "学生资料更新成功",
        ))),
        Err(response) => Ok(response),
    }
}

// 全部课程 + 选课标记，资料页的公共查询
async fn load_marked_courses(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    student_id: i64,
) -> Result<Vec<CourseSelection>, HttpResponse> {
    let catalog = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };

    let enrolled_ids: HashSet<i64> = match storage.list_student_courses(student_id).await {
        Ok(courses) => courses.iter().map(|course| course.id).collect(),
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };

    Ok(CourseSelection::mark(catalog, &enrolled_ids))
}
