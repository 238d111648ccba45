// ==========================================
// 配电网抢修排程系统 - 字段映射器实现
// ==========================================
// 依据: Field_Mapping_Notes_v0.2.md - 标准字段映射表
// 职责: 源字段 → 标准字段映射 + 类型转换
// ==========================================

use crate::domain::network::RawSegmentRecord;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

// 必需逻辑列（任一别名出现即视为存在）
const REQUIRED_COLUMNS: [&str; 7] = [
    "infra_id",
    "longueur",
    "type_technique",
    "nb_maisons",
    "id_batiment",
    "type_batiment",
    "infra_type",
];

pub struct FieldMapper;

impl FieldMapper {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 校验表头是否覆盖全部必需逻辑列
    ///
    /// # 返回
    /// 缺列时报 MissingColumns,同时列出现有列便于排查
    pub fn validate_columns(&self, headers: &[String]) -> ImportResult<()> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|key| {
                !Self::aliases(key)
                    .iter()
                    .any(|alias| headers.iter().any(|h| h == alias))
            })
            .map(|key| key.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns {
                missing,
                present: headers.to_vec(),
            })
        }
    }

    /// 把一行原始记录映射为 RawSegmentRecord
    ///
    /// # 参数
    /// - `row`: 以表头为键的行记录
    /// - `row_number`: 原始文件行号（含表头偏移,用于诊断）
    pub fn map_to_raw_segment(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawSegmentRecord> {
        Ok(RawSegmentRecord {
            // 主键
            segment_id: self.get_string(row, "infra_id"),

            // 归属建筑
            building_id: self.get_string(row, "id_batiment"),
            building_kind_text: self.get_string(row, "type_batiment"),

            // 物理属性
            length_m: self.parse_f64(row, "longueur", row_number)?,
            kind_text: self.get_string(row, "type_technique"),
            house_count: self.parse_u32(row, "nb_maisons", row_number)?,

            // 线路状态（a_remplacer / infra_intacte）
            state_text: self.get_string(row, "infra_type"),

            // 元信息
            row_number,
        })
    }

    /// 逻辑列 → 接受的表头别名
    ///
    /// 现场文件同时存在法语列名与英语列名两套约定
    fn aliases(key: &str) -> Vec<&str> {
        match key {
            "infra_id" => vec!["infra_id", "id_infra"],
            "longueur" => vec!["longueur", "length"],
            "type_technique" => vec!["type_technique", "technical_type", "type_cable"],
            "nb_maisons" => vec!["nb_maisons", "nb_houses"],
            "id_batiment" => vec!["id_batiment", "building_id"],
            "type_batiment" => vec!["type_batiment", "categorie", "category"],
            "infra_type" => vec!["infra_type", "etat_infra"],
            _ => vec![key],
        }
    }

    /// 提取字符串字段（返回 Option）,依次尝试所有别名
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in Self::aliases(key) {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析浮点数
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                value
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为浮点数: {}", value),
                    })
            }
        }
    }

    /// 解析非负整数
    fn parse_u32(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<u32>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                value
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为非负整数: {}", value),
                    })
            }
        }
    }
}
