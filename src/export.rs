//! Single-record FASTA export of the recommended candidate.

use crate::error::GsResult;
use crate::optimizer::RankedResultSet;
use crate::sequence::CodingSequence;
use std::fs;
use std::path::Path;
use tracing::info;

pub const FASTA_HEADER: &str = "GeneSyn_Best_Ecoli";
pub const FASTA_FILE_NAME: &str = "genesyn_best_gene.fasta";
pub const FASTA_MIME_TYPE: &str = "text/plain";

/// `>header` line, then the sequence on one line.
pub fn fasta_record(header: &str, seq: &CodingSequence) -> String {
    format!(">{}\n{}\n", header, seq)
}

pub fn best_fasta(results: &RankedResultSet) -> String {
    fasta_record(FASTA_HEADER, &results.best().record.sequence)
}

pub fn write_best_fasta<P: AsRef<Path>>(results: &RankedResultSet, path: P) -> GsResult<()> {
    let path = path.as_ref();
    fs::write(path, best_fasta(results))?;
    info!("💾 Best gene written to {} ({})", path.display(), FASTA_MIME_TYPE);
    Ok(())
}
