use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9-]{7,14}[0-9]$").expect("Invalid phone regex"));

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").expect("Invalid month regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

/// 姓名、标题等必填文本：去掉首尾空白后 1..=max 个字符
pub fn validate_required_text(value: &str, max_chars: usize) -> Result<(), String> {
    let count = value.trim().chars().count();
    if count == 0 {
        return Err("Value must not be empty".to_string());
    }
    if count > max_chars {
        return Err(format!("Value must be at most {max_chars} characters"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    // 手机号：数字和连字符，例如 010-1234-5678
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 解析 YYYY-MM，返回 (年, 月)
pub fn parse_month(value: &str) -> Result<(i32, u32), &'static str> {
    let caps = MONTH_RE
        .captures(value)
        .ok_or("Month must be in YYYY-MM format")?;
    let year = caps[1].parse().map_err(|_| "Invalid year")?;
    let month = caps[2].parse().map_err(|_| "Invalid month")?;
    Ok((year, month))
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

const MIN_PASSWORD_LEN: usize = 8;

// 常见弱密码（不区分大小写）
const WEAK_PASSWORDS: &[&str] = &[
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "admin1234",
    "abcd1234",
    "academy123",
];

/// 教职工密码策略，返回全部不满足的条目
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let checks: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= MIN_PASSWORD_LEN,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain an uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain a lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain a digit",
        ),
    ];

    let mut violations: Vec<&'static str> = checks
        .into_iter()
        .filter_map(|(ok, message)| (!ok).then_some(message))
        .collect();
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        violations.push("Password is too common");
    }
    violations
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let violations = password_violations(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("중등 수학 A반", 100).is_ok());
        assert!(validate_required_text("   ", 100).is_err());
        assert!(validate_required_text(&"가".repeat(256), 255).is_err());
        assert!(validate_required_text(&"가".repeat(255), 255).is_ok());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("010-1234-5678").is_ok());
        assert!(validate_phone("01012345678").is_ok());
        assert!(validate_phone("+821012345678").is_ok());
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone("010-").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("parent@example.co.kr").is_ok());
        assert!(validate_email("parent@example").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03"), Ok((2025, 3)));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-3").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Hagwon2025").is_ok());
        assert_eq!(
            password_violations("abc"),
            vec![
                "Password must be at least 8 characters long",
                "Password must contain an uppercase letter",
                "Password must contain a digit",
            ]
        );
        assert_eq!(password_violations("ABCDEFGH1").len(), 1);
    }

    #[test]
    fn test_common_password_rejected() {
        let err = validate_password("Academy123").unwrap_err();
        assert!(err.contains("too common"));
    }
}
