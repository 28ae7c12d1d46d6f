use bigramstat::pipeline::RunSummary;
use bigramstat::ranker::RankedList;
use bigramstat::table::TableStats;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_ranking(ranked: &RankedList<'_>, limit: usize) {
    let total = ranked.total_frequency();
    let shown = ranked.top(limit);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("Freq").fg(Color::Cyan),
        Cell::new("Share"),
    ]);

    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, entry) in shown.iter().enumerate() {
        let share = if total > 0 {
            entry.frequency() as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(entry.bigram()),
            Cell::new(entry.frequency()).fg(Color::Cyan),
            Cell::new(format!("{:.2}%", share)),
        ]);
    }

    println!(
        "\nTop {} of {} bigrams ({} pairs)",
        shown.len(),
        ranked.len(),
        total
    );
    println!("{}", table);
}

pub fn print_table_stats(stats: &TableStats) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Buckets").add_attribute(Attribute::Bold),
        Cell::new("Entries"),
        Cell::new("Pairs"),
        Cell::new("Load"),
        Cell::new("Longest"),
        Cell::new("Empty"),
        Cell::new("Resizes"),
    ]);

    for i in 0..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let chain_color = if stats.longest_chain > 8 {
        Color::Red
    } else {
        Color::Green
    };

    table.add_row(vec![
        Cell::new(stats.bucket_count).add_attribute(Attribute::Bold),
        Cell::new(stats.entry_count),
        Cell::new(stats.total_observations),
        Cell::new(format!("{:.2}", stats.load_factor)),
        Cell::new(stats.longest_chain).fg(chain_color),
        Cell::new(stats.empty_buckets),
        Cell::new(stats.resizes),
    ]);
    println!("\n{}", table);
}

pub fn print_run_summary(summary: &RunSummary) {
    println!(
        "\n{} -> {}: {} words, {} distinct bigrams",
        summary.input.display(),
        summary.output.display(),
        summary.tokens,
        summary.distinct
    );
    print_table_stats(&summary.stats);
}
