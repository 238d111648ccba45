// ==========================================
// 配电网抢修排程系统 - 领域类型定义
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 0.2 优先级体系
// 依据: Reseau_Data_Dictionary_v0.1.md - 枚举取值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 建筑类别 (Building Kind)
// ==========================================
// 红线: 等级制调度,医院 > 学校 > 其他
// 调度与分期逻辑对这三类做穷举分支
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingKind {
    Hospital, // 医院（最高优先级）
    School,   // 学校
    Other,    // 其他（含住宅 habitation）
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingKind::Hospital => write!(f, "HOSPITAL"),
            BuildingKind::School => write!(f, "SCHOOL"),
            BuildingKind::Other => write!(f, "OTHER"),
        }
    }
}

impl BuildingKind {
    /// 从原始文本解析建筑类别
    ///
    /// 匹配规则: 去除重音/大小写/空白后做子串匹配
    /// - 含 "hopital" → Hospital
    /// - 含 "ecole"   → School
    /// - 其余（含显式 "habitation"）→ Other
    pub fn from_raw(raw: &str) -> Self {
        let folded = fold_label(raw);
        if folded.contains("hopital") {
            BuildingKind::Hospital
        } else if folded.contains("ecole") {
            BuildingKind::School
        } else {
            BuildingKind::Other
        }
    }
}

// ==========================================
// 线路敷设类别 (Segment Kind)
// ==========================================
// 决定每米单价与每米工时（见 config::RateTable）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentKind {
    Aerial,    // 架空
    SemiAerial, // 半架空
    Conduit,   // 管道敷设
    Unknown,   // 未识别（零费率兜底）
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Aerial => write!(f, "AERIAL"),
            SegmentKind::SemiAerial => write!(f, "SEMI_AERIAL"),
            SegmentKind::Conduit => write!(f, "CONDUIT"),
            SegmentKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl SegmentKind {
    /// 从原始文本解析敷设类别
    ///
    /// 匹配规则: 去除重音/大小写/空白后比对,法语与英语拼写均接受
    /// 未识别的非空文本 → Unknown（零费率,仍参与难度计算）
    pub fn from_raw(raw: &str) -> Self {
        let folded = fold_label(raw);
        match folded.as_str() {
            "aerien" | "aerial" => SegmentKind::Aerial,
            "semiaerien" | "semiaerial" => SegmentKind::SemiAerial,
            "conduit" | "fourreau" => SegmentKind::Conduit,
            _ => SegmentKind::Unknown,
        }
    }
}

// ==========================================
// 线路状态 (Segment State)
// ==========================================
// 每条待换线路初始为 NeedsRepair
// 所属建筑被调度器选中时一次性转为 Repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentState {
    NeedsRepair, // 待更换
    Repaired,    // 已修复
}

impl fmt::Display for SegmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentState::NeedsRepair => write!(f, "NEEDS_REPAIR"),
            SegmentState::Repaired => write!(f, "REPAIRED"),
        }
    }
}

// ==========================================
// 建筑整体状态 (Building Condition)
// ==========================================
// 用途: etat_batiments 报表（只要有一条待换线路即为 ARepair）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingCondition {
    ARepair, // 待修复（a_reparer）
    Intact,  // 完好
}

impl BuildingCondition {
    /// 转换为报表输出的字符串（沿用现场数据口径）
    pub fn to_report_str(&self) -> &'static str {
        match self {
            BuildingCondition::ARepair => "a_reparer",
            BuildingCondition::Intact => "intact",
        }
    }
}

impl fmt::Display for BuildingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_report_str())
    }
}

// ==========================================
// 文本折叠辅助
// ==========================================

/// 归一化标签文本: 小写 + 去重音 + 去空白/连字符/下划线
///
/// 现场数据同时存在法语重音拼写与 ASCII 拼写,统一折叠后再比对
pub(crate) fn fold_label(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => Some('a'),
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => Some('e'),
            'î' | 'ï' | 'Î' | 'Ï' => Some('i'),
            'ô' | 'ö' | 'Ô' | 'Ö' => Some('o'),
            'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => Some('u'),
            'ç' | 'Ç' => Some('c'),
            ' ' | '\t' | '-' | '_' => None,
            _ => Some(c.to_ascii_lowercase()),
        })
        .collect()
}
