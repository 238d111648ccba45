// ==========================================
// 配电网抢修排程系统 - 工程量计算引擎
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 2. 成本/工期模型
// ==========================================
// 职责: 建筑级成本、墙钟工期、用工人数、医院安全校验
// 输入: 建筑 + 班组人数 + 费率表
// 输出: WorkMetrics
// ==========================================

use crate::config::{PlanningProfile, RateTable, MAX_CREW_PER_SEGMENT};
use crate::domain::network::Building;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkMetrics - 工程量指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkMetrics {
    pub cost_eur: f64,       // 重建总成本（欧元,不区分修复状态）
    pub duration_hours: f64, // 墙钟工期（小时,各段并行取最慢）
    pub workforce: u32,      // 总用工人数（每段一个班组,同时在场）
}

impl WorkMetrics {
    pub const ZERO: WorkMetrics = WorkMetrics {
        cost_eur: 0.0,
        duration_hours: 0.0,
        workforce: 0,
    };
}

// ==========================================
// MetricsEngine - 工程量计算引擎
// ==========================================
pub struct MetricsEngine {
    // 无状态引擎,不需要注入依赖
}

impl MetricsEngine {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 MetricsEngine 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算建筑工程量指标
    ///
    /// 口径（依据 Repair_Engine_Specs 2.2）:
    /// - 有效班组 = clamp(请求人数, 1, 4)
    /// - 成本 = Σ 段长 × 每米单价（全部线路段,与修复状态无关）
    /// - 单段工期 = 段长 × 每米工时 / 有效班组
    /// - 墙钟工期 = max(单段工期)（各段班组并行作业）
    /// - 用工人数 = 有效班组 × 段数（未识别类别的段同样占一个班组）
    ///
    /// # 参数
    /// - `building`: 目标建筑
    /// - `crew_size`: 请求的单段班组人数
    /// - `rates`: 费率表
    ///
    /// # 返回
    /// 无线路段的建筑返回全零指标
    pub fn compute(&self, building: &Building, crew_size: u32, rates: &RateTable) -> WorkMetrics {
        if building.segments.is_empty() {
            return WorkMetrics::ZERO;
        }

        let effective_crew = crew_size.clamp(1, MAX_CREW_PER_SEGMENT);

        let mut cost_eur = 0.0;
        let mut duration_hours: f64 = 0.0;
        for segment in &building.segments {
            let rate = rates.rate_for(segment.kind);
            cost_eur += segment.length_m * rate.price_per_meter;
            let segment_duration =
                segment.length_m * rate.hours_per_meter / effective_crew as f64;
            duration_hours = duration_hours.max(segment_duration);
        }

        WorkMetrics {
            cost_eur,
            duration_hours,
            workforce: effective_crew * building.segments.len() as u32,
        }
    }

    /// 医院发电机续航安全校验
    ///
    /// 安全判定: 修复工期 ≤ 续航 × (1 - 安全余量)
    /// 仅作为上报标志,不构成调度约束
    ///
    /// # 参数
    /// - `duration_hours`: 医院修复墙钟工期
    /// - `profile`: 排程参数集
    pub fn is_hospital_safe(&self, duration_hours: f64, profile: &PlanningProfile) -> bool {
        duration_hours <= profile.hospital_safe_duration_hours()
    }
}
