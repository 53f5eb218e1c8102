//! 服务端内部错误类型
//!
//! 错误分类由宏生成，每类携带一段详情文本。
//! 日志中以 `[E0xx] 分类: 详情` 的形式出现，便于检索。

use std::fmt;

/// 生成 [`AttendanceError`]：枚举本体、code/label 查表和蛇形命名的构造函数
macro_rules! attendance_errors {
    ($($variant:ident => ($code:literal, $label:literal)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AttendanceError {
            $($variant(String),)*
        }

        impl AttendanceError {
            /// 稳定的错误码
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $code,)*
                }
            }

            /// 分类名称
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $label,)*
                }
            }

            /// 详情文本
            pub fn detail(&self) -> &str {
                match self {
                    $(Self::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl AttendanceError {
                $(
                    pub fn [<$variant:snake>](detail: impl Into<String>) -> Self {
                        Self::$variant(detail.into())
                    }
                )*
            }
        }
    };
}

attendance_errors! {
    CacheConnection => ("E001", "Cache Connection Error"),
    DatabaseConfig => ("E002", "Database Configuration Error"),
    DatabaseConnection => ("E003", "Database Connection Error"),
    DatabaseOperation => ("E004", "Database Operation Error"),
    Validation => ("E005", "Validation Error"),
    Conflict => ("E006", "Conflict Error"),
}

impl fmt::Display for AttendanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.label(), self.detail())
    }
}

impl std::error::Error for AttendanceError {}

pub type Result<T> = std::result::Result<T, AttendanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_constructors() {
        let err = AttendanceError::validation("Invalid input");
        assert!(matches!(err, AttendanceError::Validation(_)));
        assert_eq!(err.detail(), "Invalid input");
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AttendanceError::cache_connection("x").code(), "E001");
        assert_eq!(AttendanceError::database_operation("x").code(), "E004");
        assert_eq!(AttendanceError::conflict("x").code(), "E006");
    }

    #[test]
    fn test_display_format() {
        let err = AttendanceError::database_config("bad url");
        assert_eq!(
            err.to_string(),
            "[E002] Database Configuration Error: bad url"
        );
    }
}
