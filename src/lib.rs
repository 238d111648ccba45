// ==========================================
// 配电网抢修排程系统 - 核心库
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 系统总览
// 技术栈: Rust + CSV/Excel 导入
// 系统定位: 决策支持系统 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 报表层 - 结果输出
pub mod report;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BuildingCondition, BuildingKind, SegmentKind, SegmentState};

// 领域实体
pub use domain::{
    Building, ImportReport, PhaseSummary, PlanEntry, RawSegmentRecord, RepairPlan, Segment,
};

// 引擎
pub use engine::{
    MetricsEngine, PhaseAssigner, PlanOrchestrator, RepairScheduler, ScheduleResult, WorkMetrics,
};

// 导入
pub use importer::{BuiltNetwork, ImportError, ImportResult, NetworkImporter};

// 配置
pub use config::{PlanningProfile, RateTable, SegmentRate};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "配电网抢修排程系统";

// ==========================================
// 预编译检查
// ==========================================
