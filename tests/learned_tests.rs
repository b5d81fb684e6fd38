mod common;

use genesyn::error::GeneSynError;
use genesyn::scorer::network::{BiLstmNetwork, ModelArtifact};
use genesyn::scorer::vocab::{PadSide, Vocabulary};
use genesyn::scorer::{LearnedScorer, Predictor};
use genesyn::sequence::CodingSequence;
use tempfile::tempdir;

#[test]
fn test_missing_artifact_is_model_unavailable() {
    let dir = tempdir().unwrap();
    let result = LearnedScorer::load(dir.path().join("nope.json"), None);
    assert!(matches!(result, Err(GeneSynError::ModelUnavailable(_))));
}

#[test]
fn test_garbage_artifact_is_model_unavailable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "{\"format_version\": 1}").unwrap();
    assert!(matches!(
        LearnedScorer::load(&path, None),
        Err(GeneSynError::ModelUnavailable(_))
    ));
}

#[test]
fn test_saved_artifact_predicts_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    let artifact = common::tiny_artifact(21);
    artifact.save(&path).unwrap();

    let in_memory = LearnedScorer::new(BiLstmNetwork::new(artifact).unwrap());
    let from_disk = LearnedScorer::load(&path, None).unwrap();

    let dna = CodingSequence::new("ATGGCTAAAGTTTGG").unwrap();
    assert_eq!(
        in_memory.predict(&dna).unwrap(),
        from_disk.predict(&dna).unwrap()
    );
}

#[test]
fn test_reference_vocabulary_must_match() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    common::tiny_artifact(1).save(&path).unwrap();

    // Same characters, different frequency order.
    let drifted = Vocabulary::fit(["AAAAAAAT", "CG"]);
    assert!(matches!(
        LearnedScorer::load(&path, Some(&drifted)),
        Err(GeneSynError::VocabularyMismatch { .. })
    ));

    let same = Vocabulary::fit(["GGGGCCCAAT"]);
    assert_eq!(same, Vocabulary::nucleotides());
    assert!(LearnedScorer::load(&path, Some(&same)).is_ok());
}

#[test]
fn test_edited_checksum_is_detected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut artifact = common::tiny_artifact(1);
    artifact.vocabulary_checksum = "0".repeat(64);
    artifact.save(&path).unwrap();

    assert!(matches!(
        ModelArtifact::load(&path).and_then(BiLstmNetwork::new),
        Err(GeneSynError::VocabularyMismatch { .. })
    ));
}

#[test]
fn test_pre_truncation_keeps_sequence_tail() {
    let net = BiLstmNetwork::new(common::tiny_artifact(4)).unwrap();
    // 30 slots: a 33-nt sequence loses its first 3 symbols.
    let long = format!("CCC{}", "A".repeat(30));
    let encoded = net.encode(&long);
    assert_eq!(encoded.len(), 30);
    let a = net.vocabulary().index_of('A');
    assert!(encoded.iter().all(|&i| i == a));

    let tail_only = CodingSequence::new("A".repeat(30)).unwrap();
    let scorer = LearnedScorer::new(net);
    assert_eq!(
        scorer.predict(&CodingSequence::new(long).unwrap()).unwrap(),
        scorer.predict(&tail_only).unwrap()
    );
}

#[test]
fn test_post_padding_places_sentinel_at_end() {
    let mut artifact = common::tiny_artifact(4);
    artifact.padding = PadSide::Post;
    artifact.truncating = PadSide::Post;
    let net = BiLstmNetwork::new(artifact).unwrap();

    let encoded = net.encode("GCA");
    assert_eq!(&encoded[..3], &[1, 2, 3]);
    assert!(encoded[3..].iter().all(|&i| i == 0));
}

#[test]
fn test_empty_sequence_is_rejected() {
    let scorer = common::tiny_scorer(2);
    assert!(matches!(
        scorer.predict(&CodingSequence::new("").unwrap()),
        Err(GeneSynError::EmptySequence)
    ));
}
