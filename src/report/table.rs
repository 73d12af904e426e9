//! Tabular rendering of a binning result

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};

use crate::pipeline::binning::BinningResult;

fn numeric(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Render the bin table of `result` with one row per bin.
pub fn render_table(result: &BinningResult) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["bin", "freq", "miss", "bads", "rate", "woe", "iv", "ks", "rule"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    for bin in &result.tbl {
        let woe_color = if bin.woe > 0.0 {
            Color::Red
        } else if bin.woe < 0.0 {
            Color::Green
        } else {
            Color::White
        };

        table.add_row(vec![
            numeric(bin.bin.to_string()),
            numeric(bin.freq.to_string()),
            numeric(bin.miss.to_string()),
            numeric(bin.bads.to_string()),
            numeric(format!("{:.4}", bin.rate)),
            numeric(format!("{:.4}", bin.woe)).fg(woe_color),
            numeric(format!("{:.4}", bin.iv)),
            numeric(format!("{:.2}", bin.ks)),
            Cell::new(&bin.rule),
        ]);
    }

    table.to_string()
}

/// Print a titled bin table, indented like the rest of the output
pub fn print_bin_table(feature: &str, result: &BinningResult) {
    println!();
    println!("    {}", console::style(feature).cyan().bold());
    for line in render_table(result).lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::binning::{bin_with_candidates, CutSet};

    #[test]
    fn test_render_table_lists_every_bin() {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for v in 1..=3 {
            for i in 0..4 {
                x.push(Some(f64::from(v)));
                y.push(u8::from(i < v));
            }
        }
        let result = bin_with_candidates(&x, &y, &[CutSet::new(vec![1.0, 2.0])]).unwrap();
        let rendered = render_table(&result);

        assert!(rendered.contains("rule"));
        assert!(rendered.contains("$X$ <= 1.0"));
        assert!(rendered.contains("$X$ > 1.0 and $X$ <= 2.0"));
        assert!(rendered.contains("$X$ > 2.0"));
        assert!(rendered.contains("0.2500"));
    }
}
