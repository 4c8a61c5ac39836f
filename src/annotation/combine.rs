//! Per-protein comparison text

use super::table::{AnnotationRecord, AnnotationTable};

/// Concatenate description and the three raw category values.
///
/// No separator is inserted, so words at field boundaries run together
/// (`"kinase" + "GO:..."` -> `"kinaseGO:..."`). Similarity scores are
/// computed on exactly this string, so the fusion is kept as is.
pub fn combine(record: &AnnotationRecord) -> String {
    let mut text = String::with_capacity(
        record.description.len()
            + record.bio_process.len()
            + record.mol_function.len()
            + record.cell_component.len(),
    );
    text.push_str(&record.description);
    text.push_str(&record.bio_process);
    text.push_str(&record.mol_function);
    text.push_str(&record.cell_component);
    text
}

/// Comparison text for one protein
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedText {
    pub protein_name: String,
    pub sysname: String,
    pub text: String,
}

/// Dense, index-stable list of comparison texts.
///
/// Position `i` here is the protein index used by the similarity scorer.
#[derive(Debug, Clone, Default)]
pub struct CombinedTable {
    entries: Vec<CombinedText>,
}

impl CombinedTable {
    pub fn from_table(table: &AnnotationTable) -> Self {
        table
            .iter()
            .map(|record| CombinedText {
                protein_name: record.protein_name.clone(),
                sysname: record.sysname.clone(),
                text: combine(record),
            })
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&CombinedText> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CombinedText] {
        &self.entries
    }

    /// Texts in index order, as fed to the scorer
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CombinedText> for CombinedTable {
    fn from_iter<I: IntoIterator<Item = CombinedText>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AnnotationRecord {
        AnnotationRecord {
            protein_name: "ABC1".into(),
            sysname: "YGL119W".into(),
            description: "kinase".into(),
            bio_process: "X:biological process".into(),
            mol_function: "GO:0005524:ATP binding".into(),
            cell_component: "GO:0005739:mitochondrion".into(),
        }
    }

    #[test]
    fn test_fields_concatenate_in_fixed_order_without_separator() {
        assert_eq!(
            combine(&record()),
            "kinaseX:biological processGO:0005524:ATP bindingGO:0005739:mitochondrion"
        );
    }

    #[test]
    fn test_empty_fields_contribute_nothing() {
        let mut r = record();
        r.description.clear();
        r.mol_function.clear();
        assert_eq!(combine(&r), "X:biological processGO:0005739:mitochondrion");
    }

    #[test]
    fn test_table_keeps_row_order() {
        let entries: CombinedTable = vec![
            CombinedText { protein_name: "B".into(), sysname: "YB".into(), text: "two".into() },
            CombinedText { protein_name: "A".into(), sysname: "YA".into(), text: "one".into() },
        ]
        .into_iter()
        .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get(0).unwrap().protein_name, "B");
        assert_eq!(entries.texts().collect::<Vec<_>>(), vec!["two", "one"]);
    }
}
