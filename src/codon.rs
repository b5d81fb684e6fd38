//! Synonymous codon table for *E. coli* expression.

use crate::error::{GeneSynError, GsResult};
use crate::sequence::CodingSequence;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Codon substituted for residues the table does not know.
pub const FALLBACK_CODON: &str = "ATG";

/// Upper-cased codon, or `InvalidInput` unless it is three of A, C, G, T
/// (any case).
pub fn parse_codon(raw: &str) -> GsResult<CodingSequence> {
    let codon = CodingSequence::new(raw)
        .map_err(|e| GeneSynError::InvalidInput(format!("codon '{}': {}", raw, e)))?;
    if codon.len() != 3 {
        return Err(GeneSynError::InvalidInput(format!(
            "codon '{}' must be exactly three nucleotides",
            raw
        )));
    }
    Ok(codon)
}

const ECOLI_CODONS: [(char, &[&str]); 20] = [
    ('A', &["GCT", "GCC", "GCA", "GCG"]),
    ('C', &["TGT", "TGC"]),
    ('D', &["GAT", "GAC"]),
    ('E', &["GAA", "GAG"]),
    ('F', &["TTT", "TTC"]),
    ('G', &["GGT", "GGC", "GGA", "GGG"]),
    ('H', &["CAT", "CAC"]),
    ('I', &["ATT", "ATC", "ATA"]),
    ('K', &["AAA", "AAG"]),
    ('L', &["TTA", "TTG", "CTT", "CTC", "CTA", "CTG"]),
    ('M', &["ATG"]),
    ('N', &["AAT", "AAC"]),
    ('P', &["CCT", "CCC", "CCA", "CCG"]),
    ('Q', &["CAA", "CAG"]),
    ('R', &["CGT", "CGC", "CGA", "CGG", "AGA", "AGG"]),
    ('S', &["TCT", "TCC", "TCA", "TCG", "AGT", "AGC"]),
    ('T', &["ACT", "ACC", "ACA", "ACG"]),
    ('V', &["GTT", "GTC", "GTA", "GTG"]),
    ('W', &["TGG"]),
    ('Y', &["TAT", "TAC"]),
];

/// Amino acid -> ordered synonymous codons. Read-only after construction.
#[derive(Debug, Clone)]
pub struct CodonTable {
    forward: HashMap<char, Vec<&'static str>>,
    reverse: HashMap<&'static str, char>,
}

impl CodonTable {
    /// The process-wide E. coli table.
    pub fn ecoli() -> &'static CodonTable {
        static TABLE: OnceLock<CodonTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut forward = HashMap::with_capacity(ECOLI_CODONS.len());
            let mut reverse = HashMap::with_capacity(64);
            for (aa, codons) in ECOLI_CODONS {
                forward.insert(aa, codons.to_vec());
                for &codon in codons {
                    reverse.insert(codon, aa);
                }
            }
            CodonTable { forward, reverse }
        })
    }

    pub fn codons(&self, amino_acid: char) -> Option<&[&'static str]> {
        self.forward.get(&amino_acid).map(|v| v.as_slice())
    }

    /// Reverse lookup used to confirm a codon is synonymous for a residue.
    pub fn amino_acid(&self, codon: &str) -> Option<char> {
        self.reverse.get(codon).copied()
    }

    pub fn contains(&self, amino_acid: char) -> bool {
        self.forward.contains_key(&amino_acid)
    }

    pub fn amino_acids(&self) -> impl Iterator<Item = char> + '_ {
        ECOLI_CODONS
            .iter()
            .map(|(aa, _)| *aa)
            .filter(|aa| self.forward.contains_key(aa))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_residue_has_codons_that_map_back() {
        let table = CodonTable::ecoli();
        assert_eq!(table.len(), 20);
        for aa in table.amino_acids() {
            let codons = table.codons(aa).unwrap();
            assert!(!codons.is_empty());
            for codon in codons {
                assert_eq!(codon.len(), 3);
                assert_eq!(table.amino_acid(codon), Some(aa));
            }
        }
    }

    #[test]
    fn methionine_and_tryptophan_are_single_codon() {
        let table = CodonTable::ecoli();
        assert_eq!(table.codons('M'), Some(&["ATG"][..]));
        assert_eq!(table.codons('W'), Some(&["TGG"][..]));
        assert!(table.codons('X').is_none());
        assert!(table.amino_acid("TAA").is_none());
    }

    #[test]
    fn parse_codon_ignores_case_and_checks_length() {
        assert_eq!(parse_codon("atg").unwrap().as_str(), "ATG");
        assert!(matches!(parse_codon("NNN"), Err(GeneSynError::InvalidInput(_))));
        assert!(matches!(parse_codon("AT"), Err(GeneSynError::InvalidInput(_))));
        assert!(matches!(parse_codon(""), Err(GeneSynError::InvalidInput(_))));
    }
}
