use dialoguer::console::style;

use crate::models::{Adjustment, BillSummary, CalculatedItem, Item, Theme};
use crate::split::{format_percentage, format_plain, format_rupiah};

const RESULT_HEADERS: [&str; 4] = ["Item", "Original", "%", "Pay"];

/// Render the editable item list.
pub fn render_items(items: &[Item], total_paid: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("Items ({} item{})\n", items.len(), plural(items.len())));

    if items.is_empty() {
        out.push_str("  (no rows)\n");
    }

    let name_width = items
        .iter()
        .map(|i| name_or_dash(&i.name).chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<width$}  {:>14}\n",
            i + 1,
            name_or_dash(&item.name),
            format_rupiah(item.effective_price()),
            width = name_width
        ));
    }

    let total = if total_paid > 0.0 {
        format_rupiah(total_paid)
    } else {
        "-".to_string()
    };
    out.push_str(&format!("Total paid (final): {}\n", total));
    out
}

/// Render the result table, summary footer and adjustment badge.
pub fn render_result(rows: &[CalculatedItem], summary: &BillSummary) -> String {
    let mut out = render_breakdown(rows, summary);
    if let Some(adjustment) = &summary.adjustment {
        out.push_str(&render_badge(adjustment));
        out.push('\n');
    }
    out
}

/// Result table and summary footer, without the badge.
fn render_breakdown(rows: &[CalculatedItem], summary: &BillSummary) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                format_plain(row.original_price),
                format_percentage(row.percentage, 0),
                format_rupiah(row.final_price),
            ]
        })
        .collect();

    let mut widths = RESULT_HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&RESULT_HEADERS.map(String::from), &widths));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(widths.iter().sum::<usize>() + 3 * 3)
    ));
    for row in &cells {
        out.push_str(&format_row(row, &widths));
    }

    out.push('\n');
    out.push_str(&format!("Original total: {}\n", format_rupiah(summary.subtotal)));
    out.push_str(&format!("Total paid:     {}\n", format_rupiah(summary.amount_paid())));
    out
}

/// One-line surcharge/discount badge, e.g. `Surcharge of Rp 3.000 (10.0%)`.
pub fn render_badge(adjustment: &Adjustment) -> String {
    format!(
        "{} of {} ({})",
        adjustment.label(),
        format_rupiah(adjustment.amount()),
        format_percentage(adjustment.percentage(), 1)
    )
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    format!(
        "{:<w0$} | {:>w1$} | {:^w2$} | {:>w3$}\n",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3]
    )
}

fn name_or_dash(name: &str) -> &str {
    if name.trim().is_empty() { "-" } else { name }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Print the item list.
pub fn display_items(items: &[Item], total_paid: f64, theme: Theme) {
    println!();
    println!("{}", heading("Split Bill", theme));
    print!("{}", render_items(items, total_paid));
    println!();
}

/// Print a computed split.
pub fn display_result(rows: &[CalculatedItem], summary: &BillSummary, theme: Theme) {
    println!();
    println!("{}", heading("=== Breakdown ===", theme));
    println!();

    print!("{}", render_breakdown(rows, summary));
    if let Some(adjustment) = &summary.adjustment {
        let badge = if adjustment.is_discount() {
            style(render_badge(adjustment)).green()
        } else {
            style(render_badge(adjustment)).yellow()
        };
        println!("{}", if theme.is_dark() { badge.bold() } else { badge });
    }
    println!();
}

fn heading(text: &str, theme: Theme) -> String {
    if theme.is_dark() {
        style(text).bold().bright().to_string()
    } else {
        style(text).bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;
    use crate::split::{compute, summarize};

    fn coffee_and_tea() -> Vec<Item> {
        vec![
            Item::new(ItemId(1), "Coffee", 20000.0),
            Item::new(ItemId(2), "Tea", 10000.0),
        ]
    }

    #[test]
    fn test_render_result_without_total() {
        let items = coffee_and_tea();
        let rows = compute(&items, 0.0).into_rows().unwrap();
        let text = render_result(&rows, &summarize(&items, 0.0));

        assert!(text.contains("Coffee"));
        assert!(text.contains("67%"));
        assert!(text.contains("33%"));
        assert!(text.contains("Rp 20.000"));
        assert!(text.contains("Total paid:     Rp 30.000"));
        assert!(!text.contains("Surcharge"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn test_render_result_with_surcharge() {
        let items = coffee_and_tea();
        let rows = compute(&items, 33000.0).into_rows().unwrap();
        let text = render_result(&rows, &summarize(&items, 33000.0));

        assert!(text.contains("Rp 22.000"));
        assert!(text.contains("Rp 11.000"));
        assert!(text.contains("Surcharge of Rp 3.000 (10.0%)"));
    }

    #[test]
    fn test_render_items_counts_rows() {
        let text = render_items(&[Item::blank(ItemId(1))], 0.0);
        assert!(text.starts_with("Items (1 item)\n"));
        assert!(text.contains("Total paid (final): -"));
    }
}
