/*!
 * 基于课程关系的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证账号与路径中课程之间是否存在关系：
 * 教师必须任教该课程，学生必须选修该课程，否则返回403。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_jwt::RequireJWT;
 * use crate::middlewares::require_course_access::RequireCourseAccess;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)  // 先验证JWT
 *                 .service(
 *                     web::scope("/courses/{course_id}")
 *                         .wrap(RequireCourseAccess)  // 再验证课程关系
 *                         .route("/attendance", web::get().to(attendance_handler))
 *                 )
 *         )
 * })
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};

use crate::{
    models::{
        ErrorCode,
        auth::entities::{AccountRole, AuthAccount},
    },
    storage::Storage,
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireCourseAccess;

impl<S, B> Transform<S, ServiceRequest> for RequireCourseAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseAccessMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireCourseAccessMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireCourseAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // 1. 校验账号信息
            let account_opt = req.extensions().get::<AuthAccount>().cloned();
            let account = match account_opt {
                Some(account) => account,
                None => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Unauthorized: missing account",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 2. 校验 course_id
            let course_id = match req
                .match_info()
                .get("course_id")
                .and_then(|s| s.parse::<i64>().ok())
            {
                Some(cid) => cid,
                None => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::BAD_REQUEST,
                            ErrorCode::BadRequest,
                            "Missing or invalid course_id",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 3. 按角色查询账号与课程之间的关系
            let (linked, denial_message) = match account.role {
                AccountRole::Teacher => (
                    is_teacher_assigned(&req, account.id, course_id).await,
                    "You are not assigned to this course",
                ),
                AccountRole::Student => (
                    is_student_enrolled(&req, account.id, course_id).await,
                    "You are not enrolled in this course",
                ),
            };

            if linked {
                tracing::debug!(
                    "Account {} has access to course {}",
                    account.id,
                    course_id
                );
                let res = srv.call(req).await?.map_into_left_body();
                Ok(res)
            } else {
                Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::CoursePermissionDenied,
                        denial_message,
                    )
                    .map_into_right_body(),
                ))
            }
        })
    }
}

async fn is_teacher_assigned(req: &ServiceRequest, teacher_id: i64, course_id: i64) -> bool {
    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    storage
        .is_teacher_assigned(teacher_id, course_id)
        .await
        .unwrap_or(false)
}

async fn is_student_enrolled(req: &ServiceRequest, student_id: i64, course_id: i64) -> bool {
    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    storage
        .is_student_enrolled(student_id, course_id)
        .await
        .unwrap_or(false)
}
