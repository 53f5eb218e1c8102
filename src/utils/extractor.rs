//! 路径参数安全提取器
//!
//! 从路径中按名称取出 i64 参数，解析失败或非正数时直接返回
//! 统一的 400 响应，避免在每个 handler 里重复校验。

/// 定义一个安全的 i64 路径参数提取器
///
/// ```rust,ignore
/// define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
///
/// async fn handler(course_id: SafeCourseIdI64) -> impl Responder {
///     let id = course_id.0;
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok());

                std::future::ready(match parsed {
                    Some(id) if id > 0 => Ok($name(id)),
                    _ => {
                        let response = actix_web::HttpResponse::BadRequest().json(
                            $crate::models::ApiResponse::<()>::error_empty(
                                $crate::models::ErrorCode::BadRequest,
                                concat!("Invalid path parameter: ", $param),
                            ),
                        );
                        Err(actix_web::error::InternalError::from_response(
                            concat!("invalid ", $param),
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
