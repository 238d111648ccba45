// ==========================================
// 配电网抢修排程系统 - 排程参数配置
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 7. 配置项全集
// ==========================================
// 职责: 费率表、班组规模、分期阈值、医院安全参数
// 存储: 编译期默认值 + 可选 JSON 覆写文件
// ==========================================

use crate::domain::types::SegmentKind;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// 单段班组人数上限（超过部分不提升施工速度）
pub const MAX_CREW_PER_SEGMENT: u32 = 4;

// ==========================================
// SegmentRate - 敷设类别费率
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRate {
    pub price_per_meter: f64, // 每米单价（欧元）
    pub hours_per_meter: f64, // 每米工时（小时）
}

impl SegmentRate {
    pub const ZERO: SegmentRate = SegmentRate {
        price_per_meter: 0.0,
        hours_per_meter: 0.0,
    };
}

// ==========================================
// RateTable - 费率表
// ==========================================
// 未识别类别固定为零费率,不开放配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub aerial: SegmentRate,      // 架空
    pub semi_aerial: SegmentRate, // 半架空
    pub conduit: SegmentRate,     // 管道敷设
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            aerial: SegmentRate {
                price_per_meter: 500.0,
                hours_per_meter: 2.0,
            },
            semi_aerial: SegmentRate {
                price_per_meter: 750.0,
                hours_per_meter: 4.0,
            },
            conduit: SegmentRate {
                price_per_meter: 900.0,
                hours_per_meter: 5.0,
            },
        }
    }
}

impl RateTable {
    /// 按敷设类别查费率
    pub fn rate_for(&self, kind: SegmentKind) -> SegmentRate {
        match kind {
            SegmentKind::Aerial => self.aerial,
            SegmentKind::SemiAerial => self.semi_aerial,
            SegmentKind::Conduit => self.conduit,
            SegmentKind::Unknown => SegmentRate::ZERO,
        }
    }
}

// ==========================================
// PlanningProfile - 排程参数集
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningProfile {
    // ===== 费率 =====
    pub rates: RateTable, // 敷设类别费率表

    // ===== 班组 =====
    pub default_crew_size: u32, // 默认单段班组人数（指标记录口径）

    // ===== 分期 =====
    // 非医院建筑按累计难度切分的三个阈值比例（升序,开区间 (0,1)）
    pub phase_thresholds: [f64; 3],

    // ===== 医院安全校验 =====
    pub hospital_autonomy_hours: f64, // 发电机续航（小时）
    pub hospital_safety_margin: f64,  // 强制安全余量比例
}

impl Default for PlanningProfile {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            default_crew_size: MAX_CREW_PER_SEGMENT,
            phase_thresholds: [0.40, 0.60, 0.80],
            hospital_autonomy_hours: 20.0,
            hospital_safety_margin: 0.20,
        }
    }
}

impl PlanningProfile {
    /// 医院修复工期安全上限（小时）
    ///
    /// 续航 20h × (1 - 20% 余量) = 16h
    pub fn hospital_safe_duration_hours(&self) -> f64 {
        self.hospital_autonomy_hours * (1.0 - self.hospital_safety_margin)
    }

    /// 从 JSON 覆写文件加载参数集
    ///
    /// 文件缺省字段回落到默认值（serde default）
    ///
    /// # 参数
    /// - `path`: JSON 文件路径
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        let profile: PlanningProfile = serde_json::from_str(&content)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// 校验参数合法性
    pub fn validate(&self) -> Result<()> {
        if self.default_crew_size == 0 {
            bail!("default_crew_size 必须 >= 1");
        }
        let [t1, t2, t3] = self.phase_thresholds;
        if !(0.0 < t1 && t1 < t2 && t2 < t3 && t3 < 1.0) {
            bail!(
                "phase_thresholds 必须严格升序且位于 (0,1): [{}, {}, {}]",
                t1,
                t2,
                t3
            );
        }
        if self.hospital_autonomy_hours <= 0.0 {
            bail!("hospital_autonomy_hours 必须 > 0");
        }
        if !(0.0..1.0).contains(&self.hospital_safety_margin) {
            bail!("hospital_safety_margin 必须位于 [0,1)");
        }
        for (label, rate) in [
            ("aerial", self.rates.aerial),
            ("semi_aerial", self.rates.semi_aerial),
            ("conduit", self.rates.conduit),
        ] {
            if rate.price_per_meter < 0.0 || rate.hours_per_meter < 0.0 {
                bail!("费率不能为负: {}", label);
            }
        }
        Ok(())
    }
}
