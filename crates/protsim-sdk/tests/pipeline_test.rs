use std::fs;
use std::path::Path;

use protsim::config::{InputPaths, PipelineConfig, QueryConfig, StageConfig};
use protsim::PipelineError;
use protsim_sdk::{EmbeddedClient, GraphAdapter, Pipeline, SdkError};
use tempfile::TempDir;

const LOCUS: &str = "stdname,sysname
ABC1,YGL119W
CDC28,YBR160W
UNCHARACTERIZED,YAL001C
ACT1,YFL039C
";

const ANNOTATIONS: &str = "proteinname,description,go_BioProc,go_MolFunc,go_CellComp
Abc1p,protein kinase,GO:0006744:ubiquinone biosynthesis,GO:0004672:protein kinase activity,GO:0005739:mitochondrion
Cdc28p,protein kinase,GO:0007049:cell cycle,GO:0004672:protein kinase activity,GO:0005634:nucleus
YAL001C,protein kinase,GO:0007049:cell cycle,GO:0004672:protein kinase activity,GO:0005634:nucleus
Act1p,actin,GO:0030036:actin cytoskeleton organization,GO:0005200:structural constituent of cytoskeleton,GO:0015629:actin cytoskeleton
";

fn write_inputs(dir: &Path, locus: &str, annotations: &str) -> InputPaths {
    let inputs = InputPaths {
        locus: dir.join("gene_data_locus.csv"),
        annotations: dir.join("gene_data_GO.csv"),
        truncated: dir.join("out").join("truncated.csv"),
    };
    fs::write(&inputs.locus, locus).unwrap();
    fs::write(&inputs.annotations, annotations).unwrap();
    inputs
}

fn full_run_config(inputs: InputPaths) -> PipelineConfig {
    PipelineConfig {
        inputs,
        stages: StageConfig {
            regenerate_truncated: true,
            load_naive: true,
            load_scores: true,
        },
        query: Some(QueryConfig {
            name: "CDC28".to_string(),
            k: 10,
        }),
        ..PipelineConfig::default()
    }
}

#[tokio::test]
async fn test_full_run_builds_graph() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), LOCUS, ANNOTATIONS);
    let truncated_path = inputs.truncated.clone();
    let pipeline = Pipeline::new(full_run_config(inputs));
    let adapter = GraphAdapter::new(EmbeddedClient::new());

    let report = pipeline.run(&adapter).await.unwrap();

    assert_eq!(report.truncated_rows, Some(4));
    let truncated = fs::read_to_string(&truncated_path).unwrap();
    let mut lines = truncated.lines();
    assert_eq!(
        lines.next(),
        Some("proteinname,sysname,description,go_BioProc,go_MolFunc,go_CellComp")
    );
    assert_eq!(
        lines.next(),
        Some("ABC1,YGL119W,protein kinase,GO:0006744,GO:0004672,GO:0005739")
    );

    assert_eq!(report.naive.as_ref().map(|s| s.rows), Some(4));

    // ABC1~CDC28, ABC1~YAL001C and CDC28~YAL001C clear 70; ACT1 matches nothing
    let scores = report.scores.as_ref().unwrap();
    assert_eq!(scores.proteins, 4);
    assert_eq!(scores.pairs_compared, 6);
    assert_eq!(scores.qualifying, 3);
    assert_eq!(scores.written, 3);
    assert_eq!(scores.failed, 0);

    let similar = report.similar.as_ref().unwrap();
    let names: Vec<&str> = similar.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["YAL001C", "ABC1"]);
    assert_eq!(similar[0].score, 100.0);
    assert_eq!(similar[1].sysname.as_deref(), Some("YGL119W"));

    // 4 proteins + 3 BioProc + 2 MolFunc + 3 CellComp; 12 category links + 3 similarities
    let status = adapter.status().await.unwrap();
    assert_eq!(status.storage.nodes, 12);
    assert_eq!(status.storage.edges, 15);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), LOCUS, ANNOTATIONS);
    let pipeline = Pipeline::new(full_run_config(inputs));
    let adapter = GraphAdapter::new(EmbeddedClient::new());

    pipeline.run(&adapter).await.unwrap();
    let first = adapter.status().await.unwrap().storage;
    pipeline.run(&adapter).await.unwrap();
    let second = adapter.status().await.unwrap().storage;

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
}

#[tokio::test]
async fn test_stricter_threshold_keeps_fewer_pairs() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), LOCUS, ANNOTATIONS);
    let mut config = full_run_config(inputs);
    config.threshold = 80.0;
    config.query = None;

    let adapter = GraphAdapter::new(EmbeddedClient::new());
    let report = Pipeline::new(config).run(&adapter).await.unwrap();

    assert_eq!(report.scores.unwrap().written, 1);
    assert!(report.similar.is_none());
}

#[tokio::test]
async fn test_disabled_stages_are_skipped() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), LOCUS, ANNOTATIONS);
    let config = PipelineConfig {
        inputs,
        stages: StageConfig {
            regenerate_truncated: true,
            load_naive: false,
            load_scores: false,
        },
        ..PipelineConfig::default()
    };

    let adapter = GraphAdapter::new(EmbeddedClient::new());
    let report = Pipeline::new(config).run(&adapter).await.unwrap();

    assert_eq!(report.truncated_rows, Some(4));
    assert!(report.naive.is_none());
    assert!(report.scores.is_none());
    assert_eq!(adapter.status().await.unwrap().storage.nodes, 0);
}

#[tokio::test]
async fn test_missing_truncated_file_aborts_naive_load() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), LOCUS, ANNOTATIONS);
    let config = PipelineConfig {
        inputs,
        ..PipelineConfig::default()
    };

    let adapter = GraphAdapter::new(EmbeddedClient::new());
    let err = Pipeline::new(config).run(&adapter).await.unwrap_err();
    assert!(matches!(err, SdkError::Pipeline(PipelineError::Io(_))));
}

#[test]
fn test_uncharacterized_reference_fails_lookup() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(
        dir.path(),
        "stdname,sysname\nUNCHARACTERIZED,YAL001C\n",
        "proteinname,description,go_BioProc,go_MolFunc,go_CellComp\n\
         Abc1p,kinase,X:biological process,Y:molecular function,Z:cellular component\n",
    );
    let pipeline = Pipeline::new(PipelineConfig {
        inputs,
        ..PipelineConfig::default()
    });

    let err = pipeline.prepare_tables().unwrap_err();
    match err {
        SdkError::Pipeline(PipelineError::Lookup { row, name }) => {
            assert_eq!(row, 2);
            assert_eq!(name, "ABC1");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_sysname_is_integrity_error() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(
        dir.path(),
        "stdname,sysname\nABC1,YGL119W\nCDC28,\n",
        ANNOTATIONS,
    );
    let pipeline = Pipeline::new(PipelineConfig {
        inputs,
        ..PipelineConfig::default()
    });

    let err = pipeline.regenerate_truncated().unwrap_err();
    assert!(matches!(
        err,
        SdkError::Pipeline(PipelineError::DataIntegrity { row: 3, column: "sysname" })
    ));
}
