// ==========================================
// 配电网抢修排程系统 - 领域模型层
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 1. 网络模型 / 5. 计划输出
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod network;
pub mod plan;
pub mod types;

// 重导出核心类型
pub use network::{Building, ImportReport, RawSegmentRecord, Segment};
pub use plan::{PhaseSummary, PlanEntry, RepairPlan};
pub use types::{BuildingCondition, BuildingKind, SegmentKind, SegmentState};
