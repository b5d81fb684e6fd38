use crate::codon::{parse_codon, CodonTable, FALLBACK_CODON};
use crate::config::GeneratorParams;
use crate::error::{GeneSynError, GsResult};
use crate::sequence::{CodingSequence, ProteinSequence};
use tracing::trace;

/// Back-translates a protein by drawing one synonymous codon per residue.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    table: &'static CodonTable,
    strict: bool,
    fallback: String,
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self {
            table: CodonTable::ecoli(),
            strict: false,
            fallback: FALLBACK_CODON.to_string(),
        }
    }
}

impl SequenceGenerator {
    /// Fails with `InvalidInput` when the fallback is not a codon.
    pub fn new(table: &'static CodonTable, params: &GeneratorParams) -> GsResult<Self> {
        Ok(Self {
            table,
            strict: params.strict,
            fallback: parse_codon(&params.fallback_codon)?.into(),
        })
    }

    pub fn table(&self) -> &'static CodonTable {
        self.table
    }

    /// Each position is an independent uniform draw, so two calls with
    /// differently seeded sources will generally disagree.
    pub fn generate(
        &self,
        protein: &ProteinSequence,
        rng: &mut fastrand::Rng,
    ) -> GsResult<CodingSequence> {
        let mut dna = String::with_capacity(protein.len() * 3);

        for (position, aa) in protein.residues().enumerate() {
            match self.table.codons(aa) {
                Some(codons) => dna.push_str(codons[rng.usize(..codons.len())]),
                None if self.strict => {
                    return Err(GeneSynError::InvalidSymbol {
                        symbol: aa,
                        position,
                    })
                }
                None => {
                    trace!("Residue '{}' at {} -> fallback {}", aa, position, self.fallback);
                    dna.push_str(&self.fallback);
                }
            }
        }

        Ok(CodingSequence::from_codons_unchecked(dna))
    }
}
