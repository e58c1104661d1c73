use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};

/// 邀请令牌长度
pub const INVITE_TOKEN_LENGTH: usize = 32;

/// 生成 URL 安全的随机令牌（字母与数字）
pub fn generate_token(length: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), length)
}

/// 生成邀请令牌
pub fn generate_invite_token() -> String {
    generate_token(INVITE_TOKEN_LENGTH)
}

/// 生成大写字母与数字组成的短码（去掉易混淆的 0/O/1/I）
pub fn generate_random_code(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token = generate_invite_token();
        assert_eq!(token.len(), INVITE_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_invite_token());
    }

    #[test]
    fn test_generate_random_code() {
        let code = generate_random_code(8);
        assert_eq!(code.len(), 8);
        assert!(!code.contains(['0', 'O', '1', 'I']));
    }
}
