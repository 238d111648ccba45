// ==========================================
// 配电网抢修排程系统 - 配置层
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 7. 配置项全集
// ==========================================
// 职责: 排程参数管理,编译期默认 + JSON 覆写
// ==========================================

pub mod planning_profile;

// 重导出核心配置类型
pub use planning_profile::{PlanningProfile, RateTable, SegmentRate, MAX_CREW_PER_SEGMENT};
