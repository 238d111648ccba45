// ==========================================
// 配电网抢修排程系统 - 网络领域模型
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 1. 网络模型
// 依据: Reseau_Data_Dictionary_v0.1.md - reseau_en_arbre 表
// 依据: Field_Mapping_Notes_v0.2.md - 字段映射规范
// ==========================================

use crate::config::RateTable;
use crate::domain::types::{BuildingKind, SegmentKind, SegmentState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// Segment - 线路段
// ==========================================
// 一条需要更换（或已修复）的物理线路段
// 红线: 同一 segment_id 全局只计入一个建筑（首见优先去重）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    // ===== 主键 =====
    pub segment_id: String, // 线路段唯一标识（infra_id）

    // ===== 物理属性 =====
    pub length_m: f64,        // 长度（米,正数）
    pub kind: SegmentKind,    // 敷设类别（决定费率）
    pub house_count: u32,     // 下游供电户数

    // ===== 调度状态 =====
    pub state: SegmentState, // 初始 NeedsRepair,被选中后转 Repaired
}

impl Segment {
    /// 计算线路段修复难度
    ///
    /// 公式: (长度 × 每米工时 × 每米单价) / max(户数, 1)
    /// 分母下限 1: 无登记户数的线路段按 1 户计,避免除零
    ///
    /// # 返回
    /// 已修复的线路段难度为 0
    pub fn difficulty(&self, rates: &RateTable) -> f64 {
        if self.state == SegmentState::Repaired {
            return 0.0;
        }
        let rate = rates.rate_for(self.kind);
        let houses = self.house_count.max(1) as f64;
        self.length_m * rate.hours_per_meter * rate.price_per_meter / houses
    }

    /// 标记为已修复（幂等）
    pub fn mark_repaired(&mut self) {
        self.state = SegmentState::Repaired;
    }
}

// ==========================================
// Building - 建筑
// ==========================================
// 若干线路段的聚合,按类别参与分级调度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    // ===== 主键 =====
    pub building_id: String, // 建筑唯一标识（id_batiment）

    // ===== 调度属性 =====
    pub kind: BuildingKind,     // 医院 / 学校 / 其他
    pub segments: Vec<Segment>, // 关联线路段（构造期已全局去重）
}

impl Building {
    /// 计算动态难度: 跳过已被全局认领的线路段
    ///
    /// 共享线路段被相邻建筑先行修复后,本建筑的难度随之下降,
    /// 因此每轮选择前都必须以最新的全局已修复集合重算
    ///
    /// # 参数
    /// - `repaired_ids`: 全局已修复线路段 id 集合
    /// - `rates`: 费率表
    pub fn dynamic_difficulty(&self, repaired_ids: &HashSet<String>, rates: &RateTable) -> f64 {
        self.segments
            .iter()
            .filter(|s| !repaired_ids.contains(&s.segment_id))
            .map(|s| s.difficulty(rates))
            .sum()
    }

    /// 修复本建筑全部线路段,并登记到全局已修复集合
    ///
    /// 调度器唯一的状态变更点;对单条线路段幂等
    pub fn repair(&mut self, repaired_ids: &mut HashSet<String>) {
        for segment in &mut self.segments {
            segment.mark_repaired();
            repaired_ids.insert(segment.segment_id.clone());
        }
    }

    /// 线路段数量
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// 线路段中的最大户数（同一建筑的行存在重复户数口径,取最大值）
    pub fn max_house_count(&self) -> u32 {
        self.segments.iter().map(|s| s.house_count).max().unwrap_or(0)
    }
}

// ==========================================
// RawSegmentRecord - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSegmentRecord {
    // 源字段（已类型转换）
    pub segment_id: Option<String>,        // infra_id
    pub building_id: Option<String>,       // id_batiment
    pub building_kind_text: Option<String>, // type_batiment（原始文本）
    pub length_m: Option<f64>,             // longueur
    pub kind_text: Option<String>,         // type_technique（原始文本）
    pub house_count: Option<u32>,          // nb_maisons
    pub state_text: Option<String>,        // infra_type（a_remplacer / infra_intacte）

    // 元信息
    pub row_number: usize, // 原始文件行号（用于诊断）
}

// ==========================================
// ImportReport - 导入批次报告
// ==========================================
// 用途: 记录一次导入的行数口径与数据质量诊断
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,             // 批次 ID（UUID）
    pub file_name: Option<String>,    // 源文件名
    pub total_rows: usize,            // 总行数
    pub materialized_rows: usize,     // 实例化为 Segment 的行数
    pub skipped_intact_rows: usize,   // 完好线路行数（不参与调度,仅计入建筑状态）
    pub skipped_blank_kind_rows: usize, // 敷设类别为空而跳过的行数
    pub duplicate_segment_rows: usize,  // 因全局去重丢弃的行数
    pub unknown_kind_rows: usize,     // 敷设类别未识别（零费率参与）的行数
    pub warnings: Vec<String>,        // 数据质量警告
    pub started_at: DateTime<Utc>,    // 导入开始时间
    pub finished_at: DateTime<Utc>,   // 导入结束时间
}
