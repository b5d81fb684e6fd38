use criterion::{criterion_group, criterion_main, Criterion};
use genesyn::generator::SequenceGenerator;
use genesyn::optimizer::{OptimizationOptions, Optimizer};
use genesyn::scorer::network::{BiLstmNetwork, ModelArtifact, NetworkDims};
use genesyn::scorer::vocab::Vocabulary;
use genesyn::scorer::{LearnedScorer, Predictor, RuleScorer};
use genesyn::sequence::ProteinSequence;
use std::hint::black_box;
use std::sync::Arc;

// 100 residues -> 300 nt, one full model window.
const PROTEIN: &str = "MKVLYNLSRGATWQEHDCFPIMKVLYNLSRGATWQEHDCFPIMKVLYNLSRGATWQEHDCFPI\
MKVLYNLSRGATWQEHDCFPIMKVLYNLSRGATWQEH";

fn setup_scorer() -> LearnedScorer {
    let artifact = ModelArtifact::initialize(Vocabulary::nucleotides(), &NetworkDims::default(), 1);
    LearnedScorer::new(BiLstmNetwork::new(artifact).expect("Failed to build network"))
}

fn criterion_benchmark(c: &mut Criterion) {
    let protein = ProteinSequence::parse(PROTEIN).expect("Failed to parse protein");
    let scorer = Arc::new(setup_scorer());

    let generator = SequenceGenerator::default();
    let mut rng = fastrand::Rng::with_seed(7);
    let dna = generator.generate(&protein, &mut rng).expect("Failed to generate");

    c.bench_function("learned predict (300 nt)", |b| {
        b.iter(|| scorer.predict(black_box(&dna)))
    });

    let rules = RuleScorer::default();
    c.bench_function("rule score (300 nt)", |b| {
        b.iter(|| rules.score(black_box(&dna), &mut rng))
    });

    for parallel in [false, true] {
        let optimizer = Optimizer::new(
            SequenceGenerator::default(),
            RuleScorer::default(),
            scorer.clone(),
            OptimizationOptions::builder().seed(3).parallel(parallel).build(),
        );
        let name = if parallel { "optimize x32 (parallel)" } else { "optimize x32" };
        c.bench_function(name, |b| b.iter(|| optimizer.optimize(black_box(&protein), 32)));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
