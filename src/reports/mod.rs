use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use genesyn::error::GsResult;
use genesyn::export;
use genesyn::optimizer::RankedResultSet;
use genesyn::scorer::vocab::Vocabulary;
use serde::Serialize;
use std::io::Write;

/// Flat row shared by the CSV and JSON renderings, rounded like the table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    rank: usize,
    dna_sequence: &'a str,
    cai: f64,
    gc_percent: f64,
    penalties: u32,
    rule_score: f64,
    ai_score: f64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

fn export_rows(results: &RankedResultSet) -> Vec<ExportRow<'_>> {
    results
        .candidates()
        .iter()
        .map(|c| ExportRow {
            rank: c.rank,
            dna_sequence: c.record.sequence.as_str(),
            cai: round_to(c.record.cai, 3),
            gc_percent: round_to(c.record.gc_percent, 2),
            penalties: c.record.penalty,
            rule_score: round_to(c.record.rule_score, 3),
            ai_score: round_to(c.record.learned_score, 3),
        })
        .collect()
}

pub fn print_ranked_table(results: &RankedResultSet) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("DNA Sequence"),
        Cell::new("CAI"),
        Cell::new("GC %"),
        Cell::new("Penalties").fg(Color::Red),
        Cell::new("Rule Score"),
        Cell::new("AI Score").fg(Color::Cyan),
    ]);

    for i in [0, 2, 3, 4, 5, 6] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for c in results.candidates() {
        let d = &c.record;
        let rank_cell = if c.rank == 1 {
            Cell::new(c.rank).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(c.rank).add_attribute(Attribute::Bold)
        };

        table.add_row(vec![
            rank_cell,
            Cell::new(d.sequence.as_str()),
            Cell::new(format!("{:.3}", d.cai)),
            Cell::new(format!("{:.2}", d.gc_percent)),
            Cell::new(d.penalty).fg(Color::Red),
            Cell::new(format!("{:.3}", d.rule_score)),
            Cell::new(format!("{:.3}", d.learned_score)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);

    if !results.skipped().is_empty() {
        let mut skipped = Table::new();
        skipped.load_preset(ASCII_FULL);
        skipped.add_row(vec![
            Cell::new("Skipped #").add_attribute(Attribute::Bold),
            Cell::new("Reason"),
        ]);
        for s in results.skipped() {
            skipped.add_row(vec![Cell::new(s.index), Cell::new(&s.reason).fg(Color::Yellow)]);
        }
        println!("\n{}", skipped);
    }
}

pub fn print_best(results: &RankedResultSet) {
    println!("\n🏆 Best Gene (AI-Recommended)");
    print!("{}", export::best_fasta(results));
}

pub fn render_json(results: &RankedResultSet) -> GsResult<String> {
    #[derive(Serialize)]
    struct Document<'a> {
        candidates: Vec<ExportRow<'a>>,
        skipped: &'a [genesyn::optimizer::SkippedCandidate],
        fasta: String,
    }

    let doc = Document {
        candidates: export_rows(results),
        skipped: results.skipped(),
        fasta: export::best_fasta(results),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn write_csv<W: Write>(results: &RankedResultSet, writer: W) -> GsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Rank",
        "DNA Sequence",
        "CAI",
        "GC %",
        "Penalties",
        "Rule-Based Score",
        "AI Score",
    ])?;
    for row in export_rows(results) {
        wtr.write_record(&[
            row.rank.to_string(),
            row.dna_sequence.to_string(),
            format!("{:.3}", row.cai),
            format!("{:.2}", row.gc_percent),
            row.penalties.to_string(),
            format!("{:.3}", row.rule_score),
            format!("{:.3}", row.ai_score),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_vocabulary(vocab: &Vocabulary) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Index").add_attribute(Attribute::Bold),
        Cell::new("Char"),
    ]);
    for (i, c) in vocab.tokens().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(c).set_alignment(CellAlignment::Center),
        ]);
    }
    println!("\n{}", table);
    println!("checksum: {}", vocab.checksum());
}
