// Report data model: one flat record per successful lookup and the
// tab-separated report assembled from them.

use std::fmt;

/// Fields extracted from one successful annotation lookup.
///
/// Every value is kept as text; numeric fields from the service
/// (`start`, `end`, `strand`) are stored in their JSON rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub variant: String,
    pub assembly_name: String,
    pub seq_region_name: String,
    pub start: String,
    pub end: String,
    pub most_severe_consequence: String,
    pub strand: String,
    pub gene_symbol: String,
}

impl AnnotationRecord {
    /// Fields in report column order.
    pub fn fields(&self) -> [&str; 8] {
        [
            self.variant.as_str(),
            self.assembly_name.as_str(),
            self.seq_region_name.as_str(),
            self.start.as_str(),
            self.end.as_str(),
            self.most_severe_consequence.as_str(),
            self.strand.as_str(),
            self.gene_symbol.as_str(),
        ]
    }

    /// Tab-separated report row.
    pub fn to_row(&self) -> String {
        self.fields().join("\t")
    }
}

impl fmt::Display for AnnotationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_row())
    }
}

/// Header row plus one record per annotated variant, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationReport {
    records: Vec<AnnotationRecord>,
}

impl AnnotationReport {
    /// Column names of the header row.
    pub const HEADER: [&'static str; 8] = [
        "variant",
        "assembly_name",
        "seq_region_name",
        "start",
        "end",
        "most_severe_consequence",
        "strand",
        "genes",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AnnotationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows including the header.
    pub fn rows(&self) -> Vec<String> {
        std::iter::once(Self::HEADER.join("\t"))
            .chain(self.records.iter().map(AnnotationRecord::to_row))
            .collect()
    }
}

impl fmt::Display for AnnotationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}
