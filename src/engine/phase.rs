// ==========================================
// 配电网抢修排程系统 - 施工分期引擎
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 4. Phase Assigner
// ==========================================
// 职责: 把调度顺序切分为 0-4 五个施工分期
// 输入: 修复顺序 + 建筑类别 + 选中时刻难度
// 输出: (建筑 id, 分期) 列表（医院在前,其余按调度顺序）
// ==========================================

use crate::domain::types::BuildingKind;
use std::collections::{HashMap, HashSet};
use tracing::debug;

// ==========================================
// PhaseAssigner - 施工分期引擎
// ==========================================
pub struct PhaseAssigner {
    // 无状态引擎,不需要注入依赖
}

impl PhaseAssigner {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 PhaseAssigner 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分期规则（依据 Repair_Engine_Specs 4.2）:
    /// - 医院无条件进入分期 0,与调度位置无关
    /// - 非医院按调度顺序,以「选中时刻难度」累计值对阈值分桶:
    ///   累计 < 40% 总量 → 1;< 60% → 2;< 80% → 3;其余 → 4
    ///   比较使用加入当前建筑之前的累计值
    /// - 每建筑恰好一个分期,重复出现只保留首次分配
    ///
    /// 注意: 分桶权重是难度分值,不是工程量成本（口径已与业务确认）
    ///
    /// # 参数
    /// - `order`: 调度器产生的修复顺序
    /// - `kinds`: 建筑 id → 类别
    /// - `difficulty_at_pick`: 建筑 id → 选中时刻难度
    /// - `thresholds`: 三个升序阈值比例
    ///
    /// # 返回
    /// (建筑 id, 分期) 列表
    pub fn assign(
        &self,
        order: &[String],
        kinds: &HashMap<String, BuildingKind>,
        difficulty_at_pick: &HashMap<String, f64>,
        thresholds: [f64; 3],
    ) -> Vec<(String, u8)> {
        let kind_of = |building_id: &String| {
            kinds
                .get(building_id)
                .copied()
                .unwrap_or(BuildingKind::Other)
        };

        let hospitals: Vec<&String> = order
            .iter()
            .filter(|id| kind_of(id) == BuildingKind::Hospital)
            .collect();
        let non_hospitals: Vec<&String> = order
            .iter()
            .filter(|id| kind_of(id) != BuildingKind::Hospital)
            .collect();

        let mut assignments: Vec<(String, u8)> = Vec::with_capacity(order.len());
        let mut seen: HashSet<&String> = HashSet::new();

        // 分期 0: 医院专属
        for building_id in hospitals {
            if seen.insert(building_id) {
                assignments.push((building_id.clone(), 0));
            }
        }

        // 非医院按累计难度分桶
        let total: f64 = non_hospitals
            .iter()
            .map(|id| difficulty_at_pick.get(*id).copied().unwrap_or(0.0))
            .sum();
        let t1 = thresholds[0] * total;
        let t2 = thresholds[1] * total;
        let t3 = thresholds[2] * total;

        debug!(total_difficulty = total, t1, t2, t3, "分期阈值");

        let mut cumulative = 0.0;
        for building_id in non_hospitals {
            let difficulty = difficulty_at_pick.get(building_id).copied().unwrap_or(0.0);
            // 用加入当前建筑之前的累计值分桶
            let phase = if cumulative < t1 {
                1
            } else if cumulative < t2 {
                2
            } else if cumulative < t3 {
                3
            } else {
                4
            };
            if seen.insert(building_id) {
                assignments.push((building_id.clone(), phase));
            }
            cumulative += difficulty;
        }

        assignments
    }
}
