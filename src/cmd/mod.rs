pub mod dataset;
pub mod model_init;
pub mod optimize;
pub mod vocab;

use genesyn::error::{GeneSynError, GsResult};
use genesyn::sequence::ProteinSequence;
use std::fs;
use std::path::Path;

/// `--protein` wins over `--protein-file`; one of them is required.
pub fn read_protein(inline: Option<&str>, file: Option<&Path>) -> GsResult<ProteinSequence> {
    match (inline, file) {
        (Some(raw), _) => ProteinSequence::parse(raw),
        (None, Some(path)) => ProteinSequence::parse(&fs::read_to_string(path)?),
        (None, None) => Err(GeneSynError::InvalidInput(
            "provide --protein or --protein-file".to_string(),
        )),
    }
}
