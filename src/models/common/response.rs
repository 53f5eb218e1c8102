use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

/// 统一的 API 响应包装
///
/// 所有接口都返回这个结构：`code` 为业务错误码（0 表示成功），
/// `data` 仅在有内容时序列化，`timestamp` 为服务端出包时间。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, message, Some(data))
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, message, None)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, message, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_data_and_zero_code() {
        let resp = ApiResponse::success(vec![1, 2, 3], "ok");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.message, "ok");
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_error_empty_omits_data_field() {
        let resp = ApiResponse::error_empty(ErrorCode::EmailAlreadyExists, "Email already exists");
        assert_eq!(resp.code, 40900);
        assert!(resp.data.is_none());

        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_success_empty() {
        let resp = ApiResponse::success_empty("done");
        assert_eq!(resp.code, 0);
        assert!(resp.data.is_none());
    }
}
