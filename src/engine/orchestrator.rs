// ==========================================
// 配电网抢修排程系统 - 引擎编排器
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 1.1 计算主流程
// 用途: 协调调度、分期、计划行构造的执行顺序
// ==========================================

use crate::config::PlanningProfile;
use crate::domain::network::Building;
use crate::domain::plan::{PhaseSummary, PlanEntry, RepairPlan};
use crate::domain::types::BuildingKind;
use crate::engine::metrics::MetricsEngine;
use crate::engine::phase::PhaseAssigner;
use crate::engine::scheduler::RepairScheduler;
use std::collections::HashMap;
use tracing::{debug, info};

// ==========================================
// PlanOrchestrator - 引擎编排器
// ==========================================
pub struct PlanOrchestrator {
    scheduler: RepairScheduler,
    assigner: PhaseAssigner,
    metrics_engine: MetricsEngine,
}

impl PlanOrchestrator {
    /// 创建新的编排器实例
    pub fn new() -> Self {
        Self {
            scheduler: RepairScheduler::new(),
            assigner: PhaseAssigner::new(),
            metrics_engine: MetricsEngine::new(),
        }
    }

    /// 执行完整抢修计划流程
    ///
    /// # 参数
    /// - `buildings`: 全部建筑（导入层产物,线路段已全局去重）
    /// - `profile`: 排程参数集
    ///
    /// # 返回
    /// RepairPlan 抢修计划
    pub fn execute(&self, buildings: Vec<Building>, profile: &PlanningProfile) -> RepairPlan {
        let segment_total: usize = buildings.iter().map(|b| b.segment_count()).sum();
        info!(
            building_count = buildings.len(),
            segment_count = segment_total,
            "开始生成抢修计划"
        );

        // ==========================================
        // 步骤1: 分层贪心调度
        // ==========================================
        debug!("步骤1: 执行分层贪心调度");
        let schedule = self.scheduler.schedule(buildings, profile);

        // ==========================================
        // 步骤2: 施工分期
        // ==========================================
        debug!("步骤2: 执行施工分期");
        let kinds: HashMap<String, BuildingKind> = schedule
            .buildings
            .iter()
            .map(|b| (b.building_id.clone(), b.kind))
            .collect();
        let assignments = self.assigner.assign(
            &schedule.order,
            &kinds,
            &schedule.difficulty_at_pick,
            profile.phase_thresholds,
        );

        // ==========================================
        // 步骤3: 计划行构造
        // ==========================================
        debug!("步骤3: 构造计划行");
        let by_id: HashMap<&str, &Building> = schedule
            .buildings
            .iter()
            .map(|b| (b.building_id.as_str(), b))
            .collect();

        let mut entries: Vec<PlanEntry> = Vec::with_capacity(assignments.len());
        for (building_id, phase) in assignments {
            let Some(building) = by_id.get(building_id.as_str()) else {
                continue;
            };
            let metrics = schedule
                .metrics
                .get(&building_id)
                .copied()
                .unwrap_or(crate::engine::metrics::WorkMetrics::ZERO);

            // 医院专项: 发电机续航安全校验（仅标志,不影响排期）
            let hospital_ok = if building.kind == BuildingKind::Hospital {
                Some(
                    self.metrics_engine
                        .is_hospital_safe(metrics.duration_hours, profile),
                )
            } else {
                None
            };

            entries.push(PlanEntry {
                building_id,
                phase,
                segment_count: building.segment_count(),
                workforce: metrics.workforce,
                duration_hours: round2(metrics.duration_hours),
                cost_eur: round2(metrics.cost_eur),
                max_house_count: building.max_house_count(),
                hospital_ok,
            });
        }

        // ==========================================
        // 步骤4: 分期汇总
        // ==========================================
        let summaries = PhaseSummary::aggregate(&entries);

        info!(
            entry_count = entries.len(),
            phase_count = summaries.len(),
            "抢修计划生成完成"
        );

        RepairPlan {
            order: schedule.order,
            entries,
            summaries,
        }
    }
}

/// 四舍五入到 2 位小数（报表口径）
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
