// ==========================================
// 配电网抢修排程系统 - 命令行入口
// ==========================================
// 依据: Repair_Engine_Specs_v0.2.md - 1.1 计算主流程
// 系统定位: 决策支持系统
// 用法: grid-repair-aps <数据文件或目录> [--out 输出目录] [--crew 班组人数] [--config 参数文件]
// ==========================================

use anyhow::{bail, Context, Result};
use grid_repair_aps::config::PlanningProfile;
use grid_repair_aps::engine::PlanOrchestrator;
use grid_repair_aps::importer::NetworkImporter;
use grid_repair_aps::logging;
use grid_repair_aps::report::ReportWriter;
use std::path::PathBuf;
use tracing::info;

// ==========================================
// CliArgs - 命令行参数
// ==========================================
struct CliArgs {
    input: PathBuf,         // 数据文件（.csv/.xlsx）或数据目录
    out_dir: PathBuf,       // 报表输出目录
    crew: Option<u32>,      // 单段班组人数覆写
    config: Option<PathBuf>, // JSON 参数文件
}

fn parse_args() -> Result<CliArgs> {
    let mut input: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from(".");
    let mut crew: Option<u32> = None;
    let mut config: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                let value = args.next().context("--out 缺少参数")?;
                out_dir = PathBuf::from(value);
            }
            "--crew" => {
                let value = args.next().context("--crew 缺少参数")?;
                crew = Some(value.parse().with_context(|| format!("--crew 参数无效: {}", value))?);
            }
            "--config" => {
                let value = args.next().context("--config 缺少参数")?;
                config = Some(PathBuf::from(value));
            }
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => bail!("无法识别的参数: {}", other),
        }
    }

    let Some(input) = input else {
        bail!(
            "用法: grid-repair-aps <数据文件或目录> [--out 输出目录] [--crew 班组人数] [--config 参数文件]"
        );
    };

    Ok(CliArgs {
        input,
        out_dir,
        crew,
        config,
    })
}

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    info!("==================================================");
    info!("{} - 决策支持系统", grid_repair_aps::APP_NAME);
    info!("系统版本: {}", grid_repair_aps::VERSION);
    info!("==================================================");

    let args = parse_args()?;

    // 加载排程参数（默认值 + 可选 JSON 覆写 + 命令行班组覆写）
    let mut profile = match &args.config {
        Some(path) => PlanningProfile::from_json_file(path)?,
        None => PlanningProfile::default(),
    };
    if let Some(crew) = args.crew {
        profile.default_crew_size = crew;
        profile.validate()?;
    }

    // 步骤1: 导入网络数据
    let importer = NetworkImporter::new();
    let network = if args.input.is_dir() {
        importer.import_dir(&args.input)?
    } else {
        importer.import_file(&args.input)?
    };

    // 步骤2: 生成抢修计划
    let orchestrator = PlanOrchestrator::new();
    let plan = orchestrator.execute(network.buildings, &profile);

    // 步骤3: 输出报表
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("输出目录创建失败: {}", args.out_dir.display()))?;
    let writer = ReportWriter::new();
    writer.write_plan_csv(&plan, &args.out_dir.join("phases_plan.csv"))?;
    writer.write_conditions_csv(&network.conditions, &args.out_dir.join("etat_batiments.csv"))?;
    writer.write_phase_summary_json(&plan.summaries, &args.out_dir.join("phases_summary.json"))?;

    for summary in &plan.summaries {
        info!(
            phase = summary.phase,
            buildings = summary.building_count,
            segments = summary.segment_count,
            cost_eur = summary.total_cost_eur,
            "分期汇总"
        );
    }
    info!("抢修计划生成完毕,共 {} 栋建筑", plan.entries.len());

    Ok(())
}
