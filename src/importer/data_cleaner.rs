// ==========================================
// 配电网抢修排程系统 - 数据清洗器实现
// ==========================================
// 依据: Field_Mapping_Notes_v0.2.md - 数据质量规则
// 职责: NULL 标准化 / 类别归一化 / 状态口径判定
// ==========================================

use crate::domain::types::{BuildingKind, SegmentKind};

pub struct DataCleaner;

impl DataCleaner {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 空白文本统一为 None
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 归一化建筑类别（缺失文本归入 Other）
    pub fn building_kind(&self, raw: Option<&str>) -> BuildingKind {
        match raw {
            Some(text) if !text.trim().is_empty() => BuildingKind::from_raw(text),
            _ => BuildingKind::Other,
        }
    }

    /// 归一化敷设类别（调用方保证非空;未识别 → Unknown）
    pub fn segment_kind(&self, raw: &str) -> SegmentKind {
        SegmentKind::from_raw(raw)
    }

    /// 判定线路状态文本是否表示「待更换」
    ///
    /// 折叠后与 a_remplacer 精确比对;其余口径（infra_intacte 等）均视为完好
    pub fn needs_replacement(&self, raw: Option<&str>) -> bool {
        match raw {
            Some(text) => crate::domain::types::fold_label(text) == "aremplacer",
            None => false,
        }
    }
}
