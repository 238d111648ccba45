// ==========================================
// 配电网抢修排程系统 - 导入层
// ==========================================
// 依据: Field_Mapping_Notes_v0.2.md - 导入主流程
// ==========================================
// 职责: 外部数据导入,生成内部网络实体
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod network_builder;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{
    resolve_network_file, CsvParser, ExcelParser, FileParser, ParsedTable, UniversalFileParser,
};
pub use network_builder::{BuiltNetwork, NetworkBuilder};

use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

// ==========================================
// NetworkImporter - 导入管道编排
// ==========================================
// 流程: 文件解析 → 表头校验 → 字段映射 → 网络构建
pub struct NetworkImporter {
    parser: UniversalFileParser,
    mapper: FieldMapper,
    builder: NetworkBuilder,
}

impl NetworkImporter {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper::new(),
            builder: NetworkBuilder::new(),
        }
    }

    /// 从单个数据文件导入网络
    ///
    /// # 参数
    /// - `path`: CSV 或 XLSX 文件路径
    pub fn import_file(&self, path: &Path) -> ImportResult<BuiltNetwork> {
        let started_at = Utc::now();
        info!(file = %path.display(), "开始导入网络数据");

        let table = self.parser.parse(path)?;
        self.mapper.validate_columns(&table.headers)?;

        // 行号从 2 起算（1 为表头）,与源文件对齐便于排查
        let mut records = Vec::with_capacity(table.rows.len());
        for (index, row) in table.rows.iter().enumerate() {
            records.push(self.mapper.map_to_raw_segment(row, index + 2)?);
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string());
        let network = self.builder.build(records, file_name, started_at)?;

        for warning in &network.report.warnings {
            warn!("{}", warning);
        }
        info!(
            batch_id = %network.report.batch_id,
            total_rows = network.report.total_rows,
            materialized = network.report.materialized_rows,
            intact = network.report.skipped_intact_rows,
            duplicates = network.report.duplicate_segment_rows,
            buildings = network.buildings.len(),
            "网络数据导入完成"
        );

        Ok(network)
    }

    /// 从数据目录导入网络（CSV 优先,回落 XLSX）
    ///
    /// # 参数
    /// - `dir`: 数据目录
    pub fn import_dir(&self, dir: &Path) -> ImportResult<BuiltNetwork> {
        let path = resolve_network_file(dir)?;
        self.import_file(&path)
    }
}
