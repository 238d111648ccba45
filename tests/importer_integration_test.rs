// ==========================================
// 配电网抢修排程系统 - 导入层集成测试
// ==========================================
// 依据: Field_Mapping_Notes_v0.2.md - 字段映射规范
// ==========================================


use grid_repair_aps::domain::types::{BuildingCondition, BuildingKind, SegmentKind};
use grid_repair_aps::importer::{ImportError, NetworkImporter};

// ==========================================
// 正常导入
// ==========================================

#[test]
fn test_import_builds_buildings_and_segments() {
    let file = test_helpers::write_network_csv(&[
        "S1,30,aérien,1,HOSP1,Hôpital Central,a_remplacer",
        "S2,100,conduit,10,B1,habitation,a_remplacer",
        "S3,50,semi-aérien,5,B1,habitation,a_remplacer",
    ]);

    let network = NetworkImporter::new()
        .import_file(file.path())
        .expect("导入失败");

    assert_eq!(network.buildings.len(), 2);

    let hospital = &network.buildings[0];
    assert_eq!(hospital.building_id, "HOSP1");
    assert_eq!(hospital.kind, BuildingKind::Hospital);
    assert_eq!(hospital.segment_count(), 1);
    assert_eq!(hospital.segments[0].kind, SegmentKind::Aerial);

    let b1 = &network.buildings[1];
    assert_eq!(b1.segment_count(), 2);
    assert_eq!(b1.segments[1].kind, SegmentKind::SemiAerial);
    assert_eq!(b1.max_house_count(), 10);

    assert_eq!(network.report.total_rows, 3);
    assert_eq!(network.report.materialized_rows, 3);
}

#[test]
fn test_import_accepts_english_column_aliases() {
    // length / nb_houses 等英语列名经别名映射后等效
    let file = test_helpers::write_csv(
        "infra_id,length,technical_type,nb_houses,id_batiment,categorie,infra_type",
        &["S1,100,aerial,10,B1,habitation,a_remplacer"],
    );

    let network = NetworkImporter::new()
        .import_file(file.path())
        .expect("导入失败");

    assert_eq!(network.buildings.len(), 1);
    assert_eq!(network.buildings[0].segments[0].length_m, 100.0);
    assert_eq!(network.buildings[0].segments[0].house_count, 10);
}

// ==========================================
// 去重与过滤口径
// ==========================================

#[test]
fn test_shared_segment_counted_once() {
    // S1 在 B1/B2 下各出现一次（物理共享）,仅计入首见建筑
    let file = test_helpers::write_network_csv(&[
        "S1,100,aérien,10,B1,habitation,a_remplacer",
        "S1,100,aérien,10,B2,habitation,a_remplacer",
        "S2,20,aérien,2,B2,habitation,a_remplacer",
    ]);

    let network = NetworkImporter::new()
        .import_file(file.path())
        .expect("导入失败");

    // 去重不变量: 计划内段数合计 = 输入中不同 segment_id 数
    let total_segments: usize = network.buildings.iter().map(|b| b.segment_count()).sum();
    assert_eq!(total_segments, 2);
    assert_eq!(network.report.duplicate_segment_rows, 1);

    // B2 仍登记且保留其独有线路段
    let b2 = network
        .buildings
        .iter()
        .find(|b| b.building_id == "B2")
        .expect("B2 应已登记");
    assert_eq!(b2.segment_count(), 1);
    assert_eq!(b2.segments[0].segment_id, "S2");
}

#[test]
fn test_intact_rows_feed_condition_report_only() {
    let file = test_helpers::write_network_csv(&[
        "S1,100,aérien,10,B1,habitation,a_remplacer",
        "S2,50,aérien,3,B2,habitation,infra_intacte",
    ]);

    let network = NetworkImporter::new()
        .import_file(file.path())
        .expect("导入失败");

    // 完好线路不实例化,但建筑进入状态报表
    assert_eq!(network.report.skipped_intact_rows, 1);
    assert_eq!(
        network.conditions,
        vec![
            ("B1".to_string(), BuildingCondition::ARepair),
            ("B2".to_string(), BuildingCondition::Intact),
        ]
    );
    let b2 = network
        .buildings
        .iter()
        .find(|b| b.building_id == "B2")
        .expect("B2 应已登记");
    assert_eq!(b2.segment_count(), 0);
}

#[test]
fn test_blank_kind_row_skipped_with_diagnostic() {
    let file = test_helpers::write_network_csv(&[
        "S1,100,,10,B1,habitation,a_remplacer",
        "S2,50,aérien,3,B1,habitation,a_remplacer",
    ]);

    let network = NetworkImporter::new()
        .import_file(file.path())
        .expect("导入失败");

    assert_eq!(network.report.skipped_blank_kind_rows, 1);
    assert!(network
        .report
        .warnings
        .iter()
        .any(|w| w.contains("type_technique")));
    // 非致命: 其余行正常实例化
    assert_eq!(network.buildings[0].segment_count(), 1);
}

#[test]
fn test_unrecognized_kind_participates_at_zero_rate() {
    let file = test_helpers::write_network_csv(&[
        "S1,100,cable sous-marin,10,B1,habitation,a_remplacer",
    ]);

    let network = NetworkImporter::new()
        .import_file(file.path())
        .expect("导入失败");

    // 数据质量警告,不静默丢弃
    assert_eq!(network.report.unknown_kind_rows, 1);
    assert_eq!(network.buildings[0].segment_count(), 1);
    assert_eq!(network.buildings[0].segments[0].kind, SegmentKind::Unknown);
}

// ==========================================
// 表结构错误
// ==========================================

#[test]
fn test_missing_columns_fatal_with_field_list() {
    let file = test_helpers::write_csv("infra_id,longueur", &["S1,100"]);

    let result = NetworkImporter::new().import_file(file.path());
    match result {
        Err(ImportError::MissingColumns { missing, present }) => {
            assert!(missing.contains(&"nb_maisons".to_string()));
            assert!(missing.contains(&"id_batiment".to_string()));
            assert!(missing.contains(&"type_technique".to_string()));
            assert_eq!(present, vec!["infra_id", "longueur"]);
        }
        other => panic!("期望 MissingColumns,实际: {:?}", other),
    }
}

// ==========================================
// 目录定位
// ==========================================

#[test]
fn test_import_dir_prefers_csv_over_xlsx() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");

    // CSV 与（内容无效的）XLSX 并存时必须选择 CSV
    let csv_content = format!(
        "{}\nS1,100,aérien,10,B1,habitation,a_remplacer\n",
        test_helpers::NETWORK_HEADER
    );
    std::fs::write(dir.path().join("reseau_en_arbre.csv"), csv_content).expect("写入失败");
    std::fs::write(dir.path().join("reseau_en_arbre.xlsx"), b"not an excel file")
        .expect("写入失败");

    let network = NetworkImporter::new()
        .import_dir(dir.path())
        .expect("导入失败");
    assert_eq!(network.buildings.len(), 1);
    assert_eq!(
        network.report.file_name.as_deref(),
        Some("reseau_en_arbre.csv")
    );
}

#[test]
fn test_import_dir_without_data_file_fails() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let result = NetworkImporter::new().import_dir(dir.path());
    assert!(matches!(
        result,
        Err(ImportError::NetworkFileMissing { .. })
    ));
}
