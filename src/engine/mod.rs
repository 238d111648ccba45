// ==========================================
// 配电网抢修排程系统 - 引擎层
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 1.2 模块拆分
// ==========================================
// 职责: 实现业务规则引擎,不做文件访问
// 红线: 全局已修复集合显式传递,禁止隐藏全局变量
// ==========================================

pub mod metrics;
pub mod orchestrator;
pub mod phase;
pub mod scheduler;

// 重导出核心引擎
pub use metrics::{MetricsEngine, WorkMetrics};
pub use orchestrator::PlanOrchestrator;
pub use phase::PhaseAssigner;
pub use scheduler::{RepairScheduler, ScheduleResult};
