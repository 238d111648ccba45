// ==========================================
// 配电网抢修排程系统 - 贪心抢修调度引擎
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 3. Greedy Scheduler
// ==========================================
// 职责: 三级分层（医院→学校→其他）内的贪心选择
// 输入: 建筑列表 + 排程参数
// 输出: 修复顺序 + 选中时刻难度 + 工程量指标
// 红线: 全局已修复集合是唯一共享可变状态,显式传递
// ==========================================

use crate::config::PlanningProfile;
use crate::domain::network::Building;
use crate::domain::types::BuildingKind;
use crate::engine::metrics::{MetricsEngine, WorkMetrics};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

// ==========================================
// ScheduleResult - 调度结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    // 修复顺序（建筑 id,分层内贪心）
    pub order: Vec<String>,

    // 建筑 id → 选中时刻的动态难度（分期权重）
    pub difficulty_at_pick: HashMap<String, f64>,

    // 建筑 id → 选中时刻的工程量指标（默认班组口径）
    pub metrics: HashMap<String, WorkMetrics>,

    // 本轮调度认领的全部线路段 id
    pub repaired_ids: HashSet<String>,

    // 调度后的建筑（线路段均已标记修复）
    pub buildings: Vec<Building>,
}

// ==========================================
// RepairScheduler - 贪心抢修调度引擎
// ==========================================
pub struct RepairScheduler {
    metrics_engine: MetricsEngine,
}

impl RepairScheduler {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 RepairScheduler 实例
    pub fn new() -> Self {
        Self {
            metrics_engine: MetricsEngine::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行分层贪心调度
    ///
    /// 流程（依据 Repair_Engine_Specs 3.2）:
    /// 1) 按医院 → 学校 → 其他三级顺序处理,级内不前瞻
    /// 2) 级内循环: 以全局已修复集合重算每个候选建筑的动态难度,
    ///    选难度最小者;难度相等时取建筑 id 升序最小者
    /// 3) 选中即记录难度与指标,将其全部线路段登记为已修复
    ///    （共享线路段自此对其余建筑免计难度）
    /// 4) 三级耗尽后,无线路段的建筑按 id 升序补录,难度记 0
    ///
    /// # 参数
    /// - `buildings`: 全部建筑（含无线路段建筑）
    /// - `profile`: 排程参数集
    ///
    /// # 返回
    /// ScheduleResult 调度结果
    pub fn schedule(&self, buildings: Vec<Building>, profile: &PlanningProfile) -> ScheduleResult {
        let total = buildings.len();

        // BTreeMap 保证补录与平难度选择的 id 升序确定性
        let mut remaining: BTreeMap<String, Building> = buildings
            .into_iter()
            .map(|b| (b.building_id.clone(), b))
            .collect();

        let mut order: Vec<String> = Vec::with_capacity(total);
        let mut difficulty_at_pick: HashMap<String, f64> = HashMap::new();
        let mut metrics: HashMap<String, WorkMetrics> = HashMap::new();
        let mut repaired_ids: HashSet<String> = HashSet::new();
        let mut scheduled: Vec<Building> = Vec::with_capacity(total);

        info!(building_count = total, "开始分层贪心调度");

        for tier in [BuildingKind::Hospital, BuildingKind::School, BuildingKind::Other] {
            // 级内候选池: 至少一条线路段,id 升序
            let mut pool: Vec<String> = remaining
                .values()
                .filter(|b| b.kind == tier && !b.segments.is_empty())
                .map(|b| b.building_id.clone())
                .collect();

            debug!(tier = %tier, pool_size = pool.len(), "进入优先级分层");

            while !pool.is_empty() {
                // 重算动态难度,取最小者;严格小于保持池内首个,即 id 升序平级规则
                let mut best_index = 0;
                let mut best_difficulty = f64::INFINITY;
                for (index, building_id) in pool.iter().enumerate() {
                    if let Some(building) = remaining.get(building_id) {
                        let difficulty =
                            building.dynamic_difficulty(&repaired_ids, &profile.rates);
                        if difficulty < best_difficulty {
                            best_difficulty = difficulty;
                            best_index = index;
                        }
                    }
                }

                let building_id = pool.remove(best_index);
                let Some(mut building) = remaining.remove(&building_id) else {
                    continue;
                };

                // 选中时刻口径: 难度作为分期权重,指标按默认班组计
                difficulty_at_pick.insert(building_id.clone(), best_difficulty);
                metrics.insert(
                    building_id.clone(),
                    self.metrics_engine
                        .compute(&building, profile.default_crew_size, &profile.rates),
                );
                order.push(building_id.clone());

                // 唯一的状态变更点: 认领全部线路段
                building.repair(&mut repaired_ids);
                scheduled.push(building);

                debug!(
                    building_id = %building_id,
                    difficulty = best_difficulty,
                    repaired_total = repaired_ids.len(),
                    "建筑选中"
                );
            }
        }

        // 补录无线路段建筑（BTreeMap 迭代即 id 升序）
        for (building_id, building) in remaining {
            difficulty_at_pick.insert(building_id.clone(), 0.0);
            metrics.insert(building_id.clone(), WorkMetrics::ZERO);
            order.push(building_id);
            scheduled.push(building);
        }

        info!(
            ordered_count = order.len(),
            repaired_segments = repaired_ids.len(),
            "分层贪心调度完成"
        );

        ScheduleResult {
            order,
            difficulty_at_pick,
            metrics,
            repaired_ids,
            buildings: scheduled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{SegmentKind, SegmentState};
    use crate::domain::Segment;

    fn segment(id: &str, length_m: f64, kind: SegmentKind, houses: u32) -> Segment {
        Segment {
            segment_id: id.to_string(),
            length_m,
            kind,
            house_count: houses,
            state: SegmentState::NeedsRepair,
        }
    }

    fn building(id: &str, kind: BuildingKind, segments: Vec<Segment>) -> Building {
        Building {
            building_id: id.to_string(),
            kind,
            segments,
        }
    }

    #[test]
    fn test_tier_precedence() {
        // 医院难度最大,仍必须先于学校与其他
        let scheduler = RepairScheduler::new();
        let profile = PlanningProfile::default();

        let buildings = vec![
            building(
                "OTHER1",
                BuildingKind::Other,
                vec![segment("S1", 1.0, SegmentKind::Aerial, 1)],
            ),
            building(
                "HOSP1",
                BuildingKind::Hospital,
                vec![segment("S2", 500.0, SegmentKind::Conduit, 1)],
            ),
            building(
                "SCHOOL1",
                BuildingKind::School,
                vec![segment("S3", 100.0, SegmentKind::Aerial, 1)],
            ),
        ];

        let result = scheduler.schedule(buildings, &profile);
        assert_eq!(result.order, vec!["HOSP1", "SCHOOL1", "OTHER1"]);
    }

    #[test]
    fn test_shared_segment_lowers_sibling_difficulty() {
        // Ba 认领共享段 S1 后,Bb 的剩余难度降至 Bc 之下,顺序被重算改写
        let scheduler = RepairScheduler::new();
        let profile = PlanningProfile::default();

        // S1: 100×2×500/10 = 10000
        // S2: 40×5×900/9 = 20000
        // S3: 50×5×900/9 = 25000
        let buildings = vec![
            building(
                "BA",
                BuildingKind::Other,
                vec![segment("S1", 100.0, SegmentKind::Aerial, 10)],
            ),
            building(
                "BB",
                BuildingKind::Other,
                vec![
                    segment("S1", 100.0, SegmentKind::Aerial, 10),
                    segment("S2", 40.0, SegmentKind::Conduit, 9),
                ],
            ),
            building(
                "BC",
                BuildingKind::Other,
                vec![segment("S3", 50.0, SegmentKind::Conduit, 9)],
            ),
        ];

        let result = scheduler.schedule(buildings, &profile);

        // 静态难度排序本应为 BA(10000) < BC(25000) < BB(30000)
        // 动态重算下 BB 在 BA 之后只剩 20000,先于 BC 被选中
        assert_eq!(result.order, vec!["BA", "BB", "BC"]);
        assert_eq!(result.difficulty_at_pick["BA"], 10_000.0);
        assert_eq!(result.difficulty_at_pick["BB"], 20_000.0);
        assert_eq!(result.difficulty_at_pick["BC"], 25_000.0);
    }

    #[test]
    fn test_tie_break_ascending_id() {
        let scheduler = RepairScheduler::new();
        let profile = PlanningProfile::default();

        // 两建筑难度完全相等
        let make = |id: &str, seg: &str| {
            building(
                id,
                BuildingKind::Other,
                vec![segment(seg, 100.0, SegmentKind::Aerial, 10)],
            )
        };
        let buildings = vec![make("B_ZETA", "S1"), make("B_ALPHA", "S2")];

        let result = scheduler.schedule(buildings, &profile);
        assert_eq!(result.order, vec!["B_ALPHA", "B_ZETA"]);
    }

    #[test]
    fn test_determinism_across_runs() {
        let profile = PlanningProfile::default();
        let make_input = || {
            vec![
                building(
                    "H1",
                    BuildingKind::Hospital,
                    vec![segment("S1", 10.0, SegmentKind::Aerial, 2)],
                ),
                building(
                    "B2",
                    BuildingKind::Other,
                    vec![segment("S2", 100.0, SegmentKind::Aerial, 10)],
                ),
                building(
                    "B1",
                    BuildingKind::Other,
                    vec![segment("S3", 100.0, SegmentKind::Aerial, 10)],
                ),
            ]
        };

        let scheduler = RepairScheduler::new();
        let first = scheduler.schedule(make_input(), &profile);
        let second = scheduler.schedule(make_input(), &profile);
        assert_eq!(first.order, second.order);
        assert_eq!(first.order, vec!["H1", "B1", "B2"]);
    }

    #[test]
    fn test_zero_segment_buildings_appended_last() {
        let scheduler = RepairScheduler::new();
        let profile = PlanningProfile::default();

        let buildings = vec![
            building("EMPTY_B", BuildingKind::Other, vec![]),
            building(
                "B1",
                BuildingKind::Other,
                vec![segment("S1", 10.0, SegmentKind::Aerial, 1)],
            ),
            building("EMPTY_A", BuildingKind::School, vec![]),
        ];

        let result = scheduler.schedule(buildings, &profile);
        assert_eq!(result.order, vec!["B1", "EMPTY_A", "EMPTY_B"]);
        assert_eq!(result.difficulty_at_pick["EMPTY_A"], 0.0);
        assert_eq!(result.metrics["EMPTY_A"], WorkMetrics::ZERO);
    }

    #[test]
    fn test_selection_metrics_recorded_with_default_crew() {
        let scheduler = RepairScheduler::new();
        let profile = PlanningProfile::default();

        let buildings = vec![building(
            "X",
            BuildingKind::Other,
            vec![
                segment("A", 100.0, SegmentKind::Aerial, 10),
                segment("B", 50.0, SegmentKind::Conduit, 5),
            ],
        )];

        let result = scheduler.schedule(buildings, &profile);
        let metrics = &result.metrics["X"];
        assert_eq!(metrics.cost_eur, 95_000.0);
        assert_eq!(metrics.duration_hours, 62.5);
        assert_eq!(metrics.workforce, 8);
        assert_eq!(result.difficulty_at_pick["X"], 55_000.0);
    }
}
