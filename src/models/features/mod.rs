use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 功能目录中的一项
#[derive(Debug, Clone, Copy)]
pub struct FeatureDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// 功能目录
pub const FEATURE_CATALOG: &[FeatureDefinition] = &[
    FeatureDefinition {
        code: "students",
        name: "학생 관리",
        description: "학생 정보 관리",
    },
    FeatureDefinition {
        code: "attendance",
        name: "출석 관리",
        description: "QR코드 출석 체크",
    },
    FeatureDefinition {
        code: "homework",
        name: "숙제 관리",
        description: "숙제 배정 및 채점",
    },
    FeatureDefinition {
        code: "billing",
        name: "결제 관리",
        description: "학원비 관리",
    },
    FeatureDefinition {
        code: "notices",
        name: "공지사항",
        description: "학원 공지사항",
    },
    FeatureDefinition {
        code: "counseling",
        name: "상담 관리",
        description: "학부모 상담 관리",
    },
];

pub fn find_feature(code: &str) -> Option<&'static FeatureDefinition> {
    FEATURE_CATALOG.iter().find(|feature| feature.code == code)
}

// 学院的功能开关
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feature.ts")]
pub struct AcademyFeature {
    pub academy_id: i64,
    pub feature_code: String,
    pub enabled: bool,
    pub enabled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feature.ts")]
pub struct ToggleFeatureRequest {
    pub enabled: bool,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feature.ts")]
pub struct FeatureResponse {
    pub code: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub enabled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub settings: Option<serde_json::Value>,
}

impl FeatureResponse {
    /// 目录项与学院开关合并，未设置开关时默认启用
    pub fn merge(definition: &FeatureDefinition, toggle: Option<&AcademyFeature>) -> Self {
        Self {
            code: definition.code.to_string(),
            name: definition.name.to_string(),
            description: definition.description.to_string(),
            enabled: toggle.map(|t| t.enabled).unwrap_or(true),
            enabled_at: toggle.and_then(|t| t.enabled_at),
            settings: toggle.and_then(|t| t.settings.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_codes_unique() {
        let mut codes: Vec<&str> = FEATURE_CATALOG.iter().map(|f| f.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), FEATURE_CATALOG.len());
        assert!(find_feature("billing").is_some());
        assert!(find_feature("chat").is_none());
    }

    #[test]
    fn test_merge_defaults_to_enabled() {
        let definition = find_feature("attendance").unwrap();
        assert!(FeatureResponse::merge(definition, None).enabled);

        let toggle = AcademyFeature {
            academy_id: 1,
            feature_code: "attendance".to_string(),
            enabled: false,
            enabled_at: None,
            settings: None,
        };
        assert!(!FeatureResponse::merge(definition, Some(&toggle)).enabled);
    }
}
