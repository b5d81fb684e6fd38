use crate::error::{GeneSynError, GsResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// One row of the `dna_seq,score` training table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub dna_seq: String,
    pub score: f64,
}

pub struct TrainingCorpus {
    pub rows: Vec<TrainingRow>,
    pub skipped: usize,
}

impl TrainingCorpus {
    pub fn sequences(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.dna_seq.as_str())
    }
}

pub fn load_training_csv<P: AsRef<Path>>(path: P) -> GsResult<TrainingCorpus> {
    let path = path.as_ref();
    let file = File::open(path)?;
    info!("📚 Loading training corpus: {}", path.display());
    read_training_csv(file)
}

/// Rows that do not parse, or carry a non-finite score, are skipped.
pub fn read_training_csv<R: Read>(reader: R) -> GsResult<TrainingCorpus> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if !headers.iter().any(|h| h == "dna_seq") || !headers.iter().any(|h| h == "score") {
        return Err(GeneSynError::InvalidInput(
            "training CSV needs 'dna_seq' and 'score' columns".to_string(),
        ));
    }

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.deserialize::<TrainingRow>().enumerate() {
        match result {
            Ok(row) if row.score.is_finite() && !row.dna_seq.is_empty() => rows.push(row),
            Ok(_) => skipped += 1,
            Err(e) => {
                debug!("   [Row {}] CSV Parse Error: {}", row_idx + 1, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("⚠️  Skipped {} invalid rows in training corpus.", skipped);
    }
    debug!("   -> Loaded {} training rows.", rows.len());

    Ok(TrainingCorpus { rows, skipped })
}

pub fn write_training_csv<W: Write>(writer: W, rows: &[TrainingRow]) -> GsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
