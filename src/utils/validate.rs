use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

const NAME_MAX_CHARS: usize = 64;
const PASSWORD_MIN_LEN: usize = 8;

/// 常见弱口令，忽略大小写比对
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "Password1",
    "Qwerty123",
    "Abcd1234",
];

/// 姓名为展示用自由文本，只限制非空与长度
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err("Name must be at most 64 characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码强度，一次性收集所有不满足的策略
///
/// 至少 8 字符，且同时包含大写字母、小写字母和数字；
/// 常见弱口令直接拒绝
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();
    let mut check = |ok: bool, message: &'static str| {
        if !ok {
            errors.push(message);
        }
    };

    check(
        password.len() >= PASSWORD_MIN_LEN,
        "Password must be at least 8 characters long",
    );
    check(
        password.chars().any(|c| c.is_ascii_uppercase()),
        "Password must contain at least one uppercase letter",
    );
    check(
        password.chars().any(|c| c.is_ascii_lowercase()),
        "Password must contain at least one lowercase letter",
    );
    check(
        password.chars().any(|c| c.is_ascii_digit()),
        "Password must contain at least one digit",
    );
    check(
        !COMMON_PASSWORDS
            .iter()
            .any(|weak| password.eq_ignore_ascii_case(weak)),
        "Password is too common, please choose a stronger password",
    );

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_name("Test Teacher").is_ok());
        assert!(validate_name("李明").is_ok());
    }

    #[test]
    fn test_blank_name() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_overlong_name() {
        let long = "x".repeat(65);
        assert!(validate_name(&long).is_err());
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("teacher@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_strong_passwords_accepted() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password_collects_all_errors() {
        let result = validate_password("ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_missing_character_classes() {
        assert!(
            validate_password("abcd1234")
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            validate_password("ABCD1234")
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
        assert!(
            validate_password("AbcdEfgh")
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password_rejected() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_simple_wrapper_joins_errors() {
        assert!(validate_password_simple("SecurePass123").is_ok());
        let msg = validate_password_simple("short").unwrap_err();
        assert!(msg.contains("; "));
        assert!(msg.contains("at least 8 characters"));
    }
}
