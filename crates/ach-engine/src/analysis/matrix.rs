use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};

use super::bands::ScoreBand;
use super::domain::{EvidenceId, EvidenceRef, Hypothesis, HypothesisId, Score};

/// Marker rendered for an evidence/hypothesis pair nobody has scored.
pub const UNSCORED_MARKER: &str = "";

/// Evidence x hypothesis grid of consistency markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyMatrix {
    pub hypotheses: Vec<MatrixColumn>,
    pub rows: Vec<MatrixRow>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixColumn {
    pub hypothesis_id: HypothesisId,
    pub hypothesis_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub evidence_id: EvidenceId,
    pub evidence_title: String,
    /// One cell per column, in column order.
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub score: Option<f64>,
    pub band: Option<ScoreBand>,
    pub marker: String,
}

impl MatrixCell {
    fn from_score(score: Option<f64>) -> Self {
        let band = score.map(ScoreBand::classify);
        Self {
            score,
            band,
            marker: band
                .map(|band| band.marker())
                .unwrap_or(UNSCORED_MARKER)
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub marker: String,
    pub label: String,
}

impl ConsistencyMatrix {
    pub fn build(hypotheses: &[Hypothesis], evidence: &[EvidenceRef], scores: &[Score]) -> Self {
        let mut lookup: HashMap<(&EvidenceId, &HypothesisId), f64> = HashMap::new();
        for score in scores {
            lookup
                .entry((&score.evidence_id, &score.hypothesis_id))
                .or_insert(score.score);
        }

        let columns = hypotheses
            .iter()
            .map(|hypothesis| MatrixColumn {
                hypothesis_id: hypothesis.id.clone(),
                hypothesis_text: hypothesis.text.clone(),
            })
            .collect();

        let rows = evidence
            .iter()
            .map(|item| MatrixRow {
                evidence_id: item.evidence_id.clone(),
                evidence_title: item.evidence_title.clone(),
                cells: hypotheses
                    .iter()
                    .map(|hypothesis| {
                        let score = lookup.get(&(&item.evidence_id, &hypothesis.id)).copied();
                        MatrixCell::from_score(score)
                    })
                    .collect(),
            })
            .collect();

        Self {
            hypotheses: columns,
            rows,
            legend: legend(),
        }
    }

    /// Write the grid as CSV: a header row, then one row per evidence item.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), MatrixExportError> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.hypotheses.len() + 1);
        header.push("Evidence");
        header.extend(
            self.hypotheses
                .iter()
                .map(|column| column.hypothesis_text.as_str()),
        );
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.cells.len() + 1);
            record.push(row.evidence_title.as_str());
            record.extend(row.cells.iter().map(|cell| cell.marker.as_str()));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn legend() -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = ScoreBand::ordered()
        .into_iter()
        .map(|band| LegendEntry {
            marker: band.marker().to_string(),
            label: band.label().to_string(),
        })
        .collect();
    entries.push(LegendEntry {
        marker: UNSCORED_MARKER.to_string(),
        label: "not scored".to_string(),
    });
    entries
}

#[derive(Debug, thiserror::Error)]
pub enum MatrixExportError {
    #[error("failed to write matrix csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush matrix csv: {0}")]
    Io(#[from] io::Error),
}
