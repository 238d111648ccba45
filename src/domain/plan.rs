// ==========================================
// 配电网抢修排程系统 - 施工计划领域模型
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 5. 计划输出
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PlanEntry - 计划行
// ==========================================
// 最终报表的一行: 建筑 + 分期 + 选中时刻的工程量指标
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    // ===== 主键 =====
    pub building_id: String, // 建筑标识

    // ===== 分期 =====
    pub phase: u8, // 施工分期 0-4（0 = 医院专属）

    // ===== 工程量指标（选中时刻,4 人班组口径）=====
    pub segment_count: usize,  // 线路段数量
    pub workforce: u32,        // 总用工人数（每段一个班组,并行作业）
    pub duration_hours: f64,   // 墙钟工期（小时,2 位小数）
    pub cost_eur: f64,         // 重建总成本（欧元,2 位小数）
    pub max_house_count: u32,  // 线路段最大户数

    // ===== 医院专项 =====
    pub hospital_ok: Option<bool>, // 发电机续航安全校验（非医院为 None）
}

// ==========================================
// PhaseSummary - 分期汇总
// ==========================================
// 按分期聚合的决策视图（建筑数 / 线路段数 / 户数 / 工期 / 成本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub phase: u8,                // 施工分期
    pub building_count: usize,    // 建筑数量
    pub segment_count: usize,     // 线路段数量
    pub house_count: u64,         // 户数合计（每建筑取段内最大值后求和）
    pub mean_duration_hours: f64, // 平均单建筑工期（小时）
    pub total_cost_eur: f64,      // 成本合计（欧元）
}

impl PhaseSummary {
    /// 从计划行聚合分期汇总
    ///
    /// # 返回
    /// 按分期升序排列的汇总列表（无建筑的分期不输出）
    pub fn aggregate(entries: &[PlanEntry]) -> Vec<PhaseSummary> {
        let mut by_phase: BTreeMap<u8, Vec<&PlanEntry>> = BTreeMap::new();
        for entry in entries {
            by_phase.entry(entry.phase).or_default().push(entry);
        }

        by_phase
            .into_iter()
            .map(|(phase, group)| {
                let building_count = group.len();
                let total_duration: f64 = group.iter().map(|e| e.duration_hours).sum();
                PhaseSummary {
                    phase,
                    building_count,
                    segment_count: group.iter().map(|e| e.segment_count).sum(),
                    house_count: group.iter().map(|e| e.max_house_count as u64).sum(),
                    mean_duration_hours: total_duration / building_count as f64,
                    total_cost_eur: group.iter().map(|e| e.cost_eur).sum(),
                }
            })
            .collect()
    }
}

// ==========================================
// RepairPlan - 抢修计划
// ==========================================
// 编排器的最终产物,交给报表层序列化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairPlan {
    pub order: Vec<String>,          // 调度器产生的修复顺序（建筑 id）
    pub entries: Vec<PlanEntry>,     // 计划行（与 order 同序）
    pub summaries: Vec<PhaseSummary>, // 分期汇总
}
