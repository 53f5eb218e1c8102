use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::CourseSelection;
use crate::models::students::requests::{StudentProfileChanges, UpdateStudentRequest};
use crate::models::students::responses::StudentDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::reconcile::reconcile_course_selection;
use crate::utils::validate::{validate_email, validate_name};

// 教师编辑学生：资料本身任意教师都可修改，选课调和限定在
// 该教师的任教课程内，该流程不允许修改学生密码
pub async fn handle_update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
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
        && existing.id != student_id
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EmailAlreadyExists,
            "该邮箱已被使用",
        )));
    }

    let changes = StudentProfileChanges {
        name: update_data.name.trim().to_string(),
        email: update_data.email,
        password_hash: None,
    };

    let student = match storage.update_student_profile(student_id, changes).await {
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
                    ErrorCode::StudentUpdateFailed,
                    format!("更新学生资料失败: {e}"),
                )),
            );
        }
    };

    // 调和选课：该教师任教课程之外的选课保持原状
    let teacher_courses = match storage.list_teacher_courses(teacher_id).await {
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
    let allowed: HashSet<i64> = teacher_courses.iter().map(|course| course.id).collect();
    let existing: HashSet<i64> = match storage.list_student_courses(student_id).await {
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

    let delta = reconcile_course_selection(&desired, &existing, &allowed);
    if !delta.is_empty()
        && let Err(e) = storage.apply_student_course_delta(student_id, &delta).await
    {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StudentUpdateFailed,
                format!("保存选课失败: {e}"),
            )),
        );
    }

    let enrolled_ids: HashSet<i64> = match storage.list_student_courses(student_id).await {
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
    let courses = CourseSelection::mark(teacher_courses, &enrolled_ids);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDetailResponse { student, courses },
        "学生资料更新成功",
    )))
}
