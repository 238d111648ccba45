// ==========================================
// 配电网抢修排程系统 - 网络构建器实现
// ==========================================
// 依据: Reseau_Data_Dictionary_v0.1.md - reseau_en_arbre 表
// 职责: 原始记录 → 建筑/线路段实体
// 红线: 线路段 id 全局去重,首见优先;完好线路不实例化
// ==========================================

use crate::domain::network::{Building, ImportReport, RawSegmentRecord, Segment};
use crate::domain::types::{BuildingCondition, SegmentKind, SegmentState};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

// ==========================================
// BuiltNetwork - 构建产物
// ==========================================
#[derive(Debug, Clone)]
pub struct BuiltNetwork {
    // 全部建筑（含零线路段建筑）,按首次出现顺序
    pub buildings: Vec<Building>,

    // 建筑整体状态（etat_batiments 报表口径）,与 buildings 同序
    pub conditions: Vec<(String, BuildingCondition)>,

    // 导入批次报告
    pub report: ImportReport,
}

// ==========================================
// NetworkBuilder - 网络构建器
// ==========================================
pub struct NetworkBuilder {
    cleaner: DataCleaner,
}

impl NetworkBuilder {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner::new(),
        }
    }

    /// 从原始记录构建网络实体
    ///
    /// 行处理口径:
    /// - id_batiment 为空 → 整行跳过并警告
    /// - 建筑按首次出现登记,类别取首次出现行的文本
    /// - 任一 a_remplacer 行使建筑状态转为待修复
    /// - 非 a_remplacer 行不实例化线路段（仅计入建筑状态）
    /// - type_technique 为空 → 线路段跳过并警告
    /// - 重复 segment_id → 首见优先,静默丢弃（共享线路段单计）
    /// - 未识别敷设类别 → 零费率实例化并警告
    ///
    /// # 参数
    /// - `records`: 字段映射后的原始记录
    /// - `file_name`: 源文件名（报告用）
    /// - `started_at`: 导入开始时间
    pub fn build(
        &self,
        records: Vec<RawSegmentRecord>,
        file_name: Option<String>,
        started_at: DateTime<Utc>,
    ) -> ImportResult<BuiltNetwork> {
        let mut buildings: Vec<Building> = Vec::new();
        let mut building_index: HashMap<String, usize> = HashMap::new();
        let mut conditions: HashMap<String, BuildingCondition> = HashMap::new();
        let mut seen_segment_ids: HashSet<String> = HashSet::new();

        let total_rows = records.len();
        let mut materialized_rows = 0usize;
        let mut skipped_intact_rows = 0usize;
        let mut skipped_blank_kind_rows = 0usize;
        let mut duplicate_segment_rows = 0usize;
        let mut unknown_kind_rows = 0usize;
        let mut warnings: Vec<String> = Vec::new();

        for record in records {
            let row = record.row_number;

            // 归属建筑缺失,整行无法定位
            let Some(building_id) = self.cleaner.normalize_null(record.building_id) else {
                warnings.push(format!("行 {}: id_batiment 为空,整行跳过", row));
                continue;
            };

            // 首次出现登记建筑（类别取该行文本）
            let index = match building_index.get(&building_id) {
                Some(index) => *index,
                None => {
                    let kind = self
                        .cleaner
                        .building_kind(record.building_kind_text.as_deref());
                    buildings.push(Building {
                        building_id: building_id.clone(),
                        kind,
                        segments: Vec::new(),
                    });
                    conditions.insert(building_id.clone(), BuildingCondition::Intact);
                    building_index.insert(building_id.clone(), buildings.len() - 1);
                    buildings.len() - 1
                }
            };

            // 线路状态口径: 仅 a_remplacer 行实例化
            if !self.cleaner.needs_replacement(record.state_text.as_deref()) {
                skipped_intact_rows += 1;
                continue;
            }
            conditions.insert(building_id.clone(), BuildingCondition::ARepair);

            // 敷设类别为空的行无法定价,跳过
            let Some(kind_text) = self.cleaner.normalize_null(record.kind_text) else {
                skipped_blank_kind_rows += 1;
                warnings.push(format!("行 {}: type_technique 为空,线路段跳过", row));
                continue;
            };

            let Some(segment_id) = self.cleaner.normalize_null(record.segment_id) else {
                warnings.push(format!("行 {}: infra_id 为空,线路段跳过", row));
                continue;
            };

            // 全局去重: 相邻建筑共享的线路段只计入首见建筑
            if !seen_segment_ids.insert(segment_id.clone()) {
                duplicate_segment_rows += 1;
                continue;
            }

            let kind = self.cleaner.segment_kind(&kind_text);
            if kind == SegmentKind::Unknown {
                unknown_kind_rows += 1;
                warnings.push(format!(
                    "行 {}: 未识别敷设类别 '{}',按零费率计入",
                    row, kind_text
                ));
            }

            let length_m = record.length_m.ok_or_else(|| ImportError::TypeConversionError {
                row,
                field: "longueur".to_string(),
                message: "缺失".to_string(),
            })?;
            let house_count = record.house_count.ok_or_else(|| {
                ImportError::TypeConversionError {
                    row,
                    field: "nb_maisons".to_string(),
                    message: "缺失".to_string(),
                }
            })?;

            buildings[index].segments.push(Segment {
                segment_id,
                length_m,
                kind,
                house_count,
                state: SegmentState::NeedsRepair,
            });
            materialized_rows += 1;
        }

        // 建筑状态与建筑同序输出
        let conditions: Vec<(String, BuildingCondition)> = buildings
            .iter()
            .map(|b| {
                let condition = conditions
                    .get(&b.building_id)
                    .copied()
                    .unwrap_or(BuildingCondition::Intact);
                (b.building_id.clone(), condition)
            })
            .collect();

        let report = ImportReport {
            batch_id: Uuid::new_v4().to_string(),
            file_name,
            total_rows,
            materialized_rows,
            skipped_intact_rows,
            skipped_blank_kind_rows,
            duplicate_segment_rows,
            unknown_kind_rows,
            warnings,
            started_at,
            finished_at: Utc::now(),
        };

        Ok(BuiltNetwork {
            buildings,
            conditions,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        row: usize,
        segment_id: &str,
        building_id: &str,
        kind_text: &str,
        state: &str,
    ) -> RawSegmentRecord {
        RawSegmentRecord {
            segment_id: Some(segment_id.to_string()),
            building_id: Some(building_id.to_string()),
            building_kind_text: Some("habitation".to_string()),
            length_m: Some(100.0),
            kind_text: if kind_text.is_empty() {
                None
            } else {
                Some(kind_text.to_string())
            },
            house_count: Some(10),
            state_text: Some(state.to_string()),
            row_number: row,
        }
    }

    #[test]
    fn test_build_materializes_only_replacement_rows() {
        let builder = NetworkBuilder::new();
        let records = vec![
            record(2, "I1", "B1", "aerien", "a_remplacer"),
            record(3, "I2", "B1", "aerien", "infra_intacte"),
            record(4, "I3", "B2", "conduit", "a_remplacer"),
        ];

        let network = builder.build(records, None, Utc::now()).expect("构建失败");

        assert_eq!(network.buildings.len(), 2);
        assert_eq!(network.buildings[0].segment_count(), 1);
        assert_eq!(network.buildings[1].segment_count(), 1);
        assert_eq!(network.report.materialized_rows, 2);
        assert_eq!(network.report.skipped_intact_rows, 1);
    }

    #[test]
    fn test_duplicate_segment_first_seen_wins() {
        let builder = NetworkBuilder::new();
        // I1 同时出现在 B1 与 B2 下（物理共享）,只计入 B1
        let records = vec![
            record(2, "I1", "B1", "aerien", "a_remplacer"),
            record(3, "I1", "B2", "aerien", "a_remplacer"),
            record(4, "I2", "B2", "aerien", "a_remplacer"),
        ];

        let network = builder.build(records, None, Utc::now()).expect("构建失败");

        let total_segments: usize = network.buildings.iter().map(|b| b.segment_count()).sum();
        assert_eq!(total_segments, 2);
        assert_eq!(network.buildings[0].segment_count(), 1);
        assert_eq!(network.report.duplicate_segment_rows, 1);
    }

    #[test]
    fn test_blank_kind_skipped_with_warning() {
        let builder = NetworkBuilder::new();
        let records = vec![
            record(2, "I1", "B1", "", "a_remplacer"),
            record(3, "I2", "B1", "aerien", "a_remplacer"),
        ];

        let network = builder.build(records, None, Utc::now()).expect("构建失败");

        assert_eq!(network.buildings[0].segment_count(), 1);
        assert_eq!(network.report.skipped_blank_kind_rows, 1);
        assert!(!network.report.warnings.is_empty());
    }

    #[test]
    fn test_unknown_kind_materialized_with_warning() {
        let builder = NetworkBuilder::new();
        let records = vec![record(2, "I1", "B1", "cable sous-marin", "a_remplacer")];

        let network = builder.build(records, None, Utc::now()).expect("构建失败");

        // 未识别类别仍实例化（零费率）,不静默丢弃
        assert_eq!(network.buildings[0].segment_count(), 1);
        assert_eq!(network.buildings[0].segments[0].kind, SegmentKind::Unknown);
        assert_eq!(network.report.unknown_kind_rows, 1);
    }

    #[test]
    fn test_conditions_track_intact_only_buildings() {
        let builder = NetworkBuilder::new();
        let records = vec![
            record(2, "I1", "B1", "aerien", "a_remplacer"),
            record(3, "I2", "B2", "aerien", "infra_intacte"),
        ];

        let network = builder.build(records, None, Utc::now()).expect("构建失败");

        assert_eq!(
            network.conditions,
            vec![
                ("B1".to_string(), BuildingCondition::ARepair),
                ("B2".to_string(), BuildingCondition::Intact),
            ]
        );
        // 完好建筑仍登记（零线路段）
        assert_eq!(network.buildings[1].segment_count(), 0);
    }

    #[test]
    fn test_missing_building_id_skips_row() {
        let builder = NetworkBuilder::new();
        let mut bad = record(2, "I1", "B1", "aerien", "a_remplacer");
        bad.building_id = None;

        let network = builder.build(vec![bad], None, Utc::now()).expect("构建失败");
        assert!(network.buildings.is_empty());
        assert_eq!(network.report.warnings.len(), 1);
    }
}
