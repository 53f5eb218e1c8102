use crate::config::AppConfig;
use crate::errors::AttendanceError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 按配置的代价参数构造 Argon2id 哈希器
fn configured_hasher() -> Result<Argon2<'static>, AttendanceError> {
    let argon2 = &AppConfig::get().argon2;
    let params = Params::new(
        argon2.memory_cost,
        argon2.time_cost,
        argon2.parallelism,
        None,
    )
    .map_err(|e| AttendanceError::validation(format!("Argon2 参数无效: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 生成 PHC 格式的密码哈希，盐随机
pub fn hash_password(password: &str) -> Result<String, AttendanceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = configured_hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AttendanceError::validation(format!("哈希计算失败: {e}")))?;
    Ok(hash.to_string())
}

/// 校验密码。代价参数取自哈希串本身，配置调整后旧哈希仍可通过
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("s3cret-pa55").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret-pa55", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
