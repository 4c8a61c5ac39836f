use protsim::annotation::{
    read_truncated_from, AnnotationTable, CombinedTable, LocusRecord, NameNormalizer,
};
use protsim::similarity::SimilarityScorer;
use protsim::PipelineError;
use tempfile::TempDir;

const LOCUS: &str = "stdname,sysname
ABC1,ygl119w
CDC28,YBR160W
UNCHARACTERIZED,YAL001C
,YAL002W
";

const ANNOTATIONS: &str = "proteinname,description,go_BioProc,go_MolFunc,go_CellComp
Abc1p,protein kinase,GO:0006744:ubiquinone biosynthesis,GO:0004672:protein kinase activity,GO:0005739:mitochondrion
CDC28p,protein kinase,GO:0007049:cell cycle,GO:0004672:protein kinase activity,GO:0005634:nucleus
yal001c,protein kinase,GO:0007049:cell cycle,GO:0004672:protein kinase activity,GO:0005634:nucleus
";

#[test]
fn test_reference_table_keys() {
    let names = NameNormalizer::from_reader(LOCUS.as_bytes()).unwrap();

    // one entry per row
    assert_eq!(names.len(), 4);
    assert_eq!(names.get("ABC1"), Some("YGL119W"));
    assert_eq!(names.get("YAL001C"), Some("YAL001C"));
    assert_eq!(names.get("YAL002W"), Some("YAL002W"));
    assert!(!names.contains("UNCHARACTERIZED"));
}

#[test]
fn test_join_normalizes_names() {
    let names = NameNormalizer::from_reader(LOCUS.as_bytes()).unwrap();
    let table = AnnotationTable::build(ANNOTATIONS.as_bytes(), &names).unwrap();

    let joined: Vec<(&str, &str)> = table
        .iter()
        .map(|r| (r.protein_name.as_str(), r.sysname.as_str()))
        .collect();
    assert_eq!(
        joined,
        vec![("ABC1", "YGL119W"), ("CDC28", "YBR160W"), ("YAL001C", "YAL001C")]
    );
}

#[test]
fn test_uncharacterized_only_reference_fails_lookup() {
    let names =
        NameNormalizer::from_records(vec![LocusRecord::new("UNCHARACTERIZED", "YAL001C")]).unwrap();
    let csv = "proteinname,description,go_BioProc,go_MolFunc,go_CellComp\n\
               Abc1p,kinase,X:biological process,Y:molecular function,Z:cellular component\n";

    match AnnotationTable::build(csv.as_bytes(), &names) {
        Err(PipelineError::Lookup { row, name }) => {
            assert_eq!(row, 2);
            assert_eq!(name, "ABC1");
        }
        other => panic!("expected lookup error, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_truncated_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("archive").join("truncated.csv");

    let names = NameNormalizer::from_reader(LOCUS.as_bytes()).unwrap();
    let table = AnnotationTable::build(ANNOTATIONS.as_bytes(), &names).unwrap();
    assert_eq!(table.write_truncated(&path).unwrap(), 3);

    let text = std::fs::read_to_string(&path).unwrap();
    let rows = read_truncated_from(text.as_bytes()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].bio_process, "GO:0006744");
    assert_eq!(rows[0].mol_function, "GO:0004672");
    assert_eq!(rows[2].cell_component, "GO:0005634");
    assert_eq!(rows[1].description, "protein kinase");
}

#[test]
fn test_combined_texts_feed_scorer_by_index() {
    let names = NameNormalizer::from_reader(LOCUS.as_bytes()).unwrap();
    let table = AnnotationTable::build(ANNOTATIONS.as_bytes(), &names).unwrap();
    let combined = CombinedTable::from_table(&table);

    assert_eq!(
        combined.get(1).map(|e| e.text.as_str()),
        Some("protein kinaseGO:0007049:cell cycleGO:0004672:protein kinase activityGO:0005634:nucleus")
    );

    let scorer = SimilarityScorer::new(combined.texts());
    let pairs = scorer.qualifying_pairs(99.0);
    assert_eq!(pairs.len(), 1);
    assert_eq!(combined.get(pairs[0].left).unwrap().protein_name, "CDC28");
    assert_eq!(combined.get(pairs[0].right).unwrap().protein_name, "YAL001C");
    assert_eq!(pairs[0].score, 100.0);
}
