// ==========================================
// 配电网抢修排程系统 - 报表输出实现
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 5. 计划输出
// 产物: phases_plan.csv / etat_batiments.csv / phases_summary.json
// ==========================================

use crate::domain::plan::{PhaseSummary, RepairPlan};
use crate::domain::types::BuildingCondition;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::info;

// ==========================================
// ReportWriter - 报表输出器
// ==========================================
pub struct ReportWriter {
    // 无状态,不需要注入依赖
}

impl ReportWriter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 输出抢修计划 CSV
    ///
    /// 列顺序沿用现场报表口径:
    /// id_batiments, phase, nb_infra, nb_ouvriers, duree_heures,
    /// cout_euros, nb_maisons, hopital_ok_marge_20pct
    /// 非医院建筑的安全标志列留空
    pub fn write_plan_csv(&self, plan: &RepairPlan, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("计划报表创建失败: {}", path.display()))?;

        writer.write_record([
            "id_batiments",
            "phase",
            "nb_infra",
            "nb_ouvriers",
            "duree_heures",
            "cout_euros",
            "nb_maisons",
            "hopital_ok_marge_20pct",
        ])?;

        for entry in &plan.entries {
            let hospital_ok = match entry.hospital_ok {
                Some(true) => "true".to_string(),
                Some(false) => "false".to_string(),
                None => String::new(),
            };
            writer.write_record([
                entry.building_id.clone(),
                entry.phase.to_string(),
                entry.segment_count.to_string(),
                entry.workforce.to_string(),
                format!("{:.2}", entry.duration_hours),
                format!("{:.2}", entry.cost_eur),
                entry.max_house_count.to_string(),
                hospital_ok,
            ])?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = plan.entries.len(), "计划报表已输出");
        Ok(())
    }

    /// 输出建筑整体状态 CSV（a_reparer / intact）
    pub fn write_conditions_csv(
        &self,
        conditions: &[(String, BuildingCondition)],
        path: &Path,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("状态报表创建失败: {}", path.display()))?;

        writer.write_record(["id_batiment", "state_batiment"])?;
        for (building_id, condition) in conditions {
            writer.write_record([building_id.as_str(), condition.to_report_str()])?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = conditions.len(), "状态报表已输出");
        Ok(())
    }

    /// 输出分期汇总 JSON（决策视图数据源）
    pub fn write_phase_summary_json(
        &self,
        summaries: &[PhaseSummary],
        path: &Path,
    ) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("汇总报表创建失败: {}", path.display()))?;
        serde_json::to_writer_pretty(file, summaries)
            .with_context(|| format!("汇总报表序列化失败: {}", path.display()))?;

        info!(path = %path.display(), phases = summaries.len(), "分期汇总已输出");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::PlanEntry;

    fn sample_plan() -> RepairPlan {
        let entries = vec![
            PlanEntry {
                building_id: "HOSP1".to_string(),
                phase: 0,
                segment_count: 1,
                workforce: 4,
                duration_hours: 15.0,
                cost_eur: 15_000.0,
                max_house_count: 1,
                hospital_ok: Some(true),
            },
            PlanEntry {
                building_id: "B1".to_string(),
                phase: 1,
                segment_count: 2,
                workforce: 8,
                duration_hours: 62.5,
                cost_eur: 95_000.0,
                max_house_count: 10,
                hospital_ok: None,
            },
        ];
        let summaries = PhaseSummary::aggregate(&entries);
        RepairPlan {
            order: vec!["HOSP1".to_string(), "B1".to_string()],
            entries,
            summaries,
        }
    }

    #[test]
    fn test_write_plan_csv() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("phases_plan.csv");

        ReportWriter::new()
            .write_plan_csv(&sample_plan(), &path)
            .expect("输出失败");

        let content = std::fs::read_to_string(&path).expect("读取失败");
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("id_batiments,phase,nb_infra,nb_ouvriers,duree_heures,cout_euros,nb_maisons,hopital_ok_marge_20pct")
        );
        assert_eq!(lines.next(), Some("HOSP1,0,1,4,15.00,15000.00,1,true"));
        // 非医院安全标志列留空
        assert_eq!(lines.next(), Some("B1,1,2,8,62.50,95000.00,10,"));
    }

    #[test]
    fn test_write_conditions_csv() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("etat_batiments.csv");

        let conditions = vec![
            ("B1".to_string(), BuildingCondition::ARepair),
            ("B2".to_string(), BuildingCondition::Intact),
        ];
        ReportWriter::new()
            .write_conditions_csv(&conditions, &path)
            .expect("输出失败");

        let content = std::fs::read_to_string(&path).expect("读取失败");
        assert!(content.starts_with("id_batiment,state_batiment"));
        assert!(content.contains("B1,a_reparer"));
        assert!(content.contains("B2,intact"));
    }

    #[test]
    fn test_write_phase_summary_json() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("phases_summary.json");

        ReportWriter::new()
            .write_phase_summary_json(&sample_plan().summaries, &path)
            .expect("输出失败");

        let content = std::fs::read_to_string(&path).expect("读取失败");
        let parsed: Vec<PhaseSummary> = serde_json::from_str(&content).expect("解析失败");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].phase, 0);
    }
}
