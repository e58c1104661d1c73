const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// `extension` 包含点号，如 ".png"；纯文本类型不检查内容，未知类型一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 图片
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        // 文档；HWP 5.0 与旧版 Office 同为 OLE 复合文档
        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" | ".hwp" => data.starts_with(&OLE_SIGNATURE),
        ".docx" | ".xlsx" | ".pptx" | ".hwpx" | ".zip" => data.starts_with(&ZIP_SIGNATURE),

        ".txt" | ".md" | ".csv" => true,

        _ => false,
    }
}

/// 根据扩展名推断 MIME 类型
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".pdf" => "application/pdf",
        ".doc" => "application/msword",
        ".xls" => "application/vnd.ms-excel",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".hwp" => "application/x-hwp",
        ".hwpx" => "application/hwp+zip",
        ".zip" => "application/zip",
        ".txt" | ".md" => "text/plain; charset=utf-8",
        ".csv" => "text/csv; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 提取文件名的扩展名（小写，含点号）
pub fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_hwp_uses_ole_signature() {
        assert!(validate_magic_bytes(&OLE_SIGNATURE, ".hwp"));
        assert!(!validate_magic_bytes(&ZIP_SIGNATURE, ".hwp"));
        assert!(validate_magic_bytes(&ZIP_SIGNATURE, ".hwpx"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".docx"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".txt"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], ".exe"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("report.PDF").as_deref(), Some(".pdf"));
        assert_eq!(extension_of("숙제.final.hwp").as_deref(), Some(".hwp"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of(".bashrc"), None);
        assert_eq!(extension_of("bad.p/df"), None);
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension(".JPG"), "image/jpeg");
        assert_eq!(mime_for_extension(".bin"), "application/octet-stream");
    }
}
