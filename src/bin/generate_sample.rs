use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

const MONTHS: [&str; 6] = ["Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// (name, typical amount, usual payment mode)
const EXPENSES: [(&str, f64, &str); 8] = [
    ("Rent", 1200.0, "Bank Transfer"),
    ("Groceries", 180.0, "Debit Card"),
    ("Electricity", 95.0, "UPI"),
    ("Internet", 45.0, "UPI"),
    ("Fuel", 70.0, "Credit Card"),
    ("Dining Out", 60.0, "Credit Card"),
    ("Gym", 35.0, "Cash"),
    ("Groceries", 40.0, "Cash"),
];

/// Deterministic amounts so the sample is reproducible (splitmix64).
struct SimpleRng(u64);

impl SimpleRng {
    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn write_month(
    sheet: &mut Worksheet,
    month: &str,
    month_idx: usize,
    rng: &mut SimpleRng,
    bold: &Format,
) -> Result<()> {
    sheet.set_name(month)?;
    let banner = format!("HAI TIDE – {month} 2024 Expense Report");
    sheet.write_string_with_format(0, 0, banner, bold)?;
    for (col, title) in ["S.No", "Name", "Payment Mode", "Amount"].iter().enumerate() {
        sheet.write_string_with_format(1, col as u16, *title, bold)?;
    }

    let mut total = 0.0;
    let mut row = 2u32;
    for (i, (name, base, mode)) in EXPENSES.iter().enumerate() {
        // Amounts vary ±30% around the typical value, rounded to cents.
        let amount = (base * (0.7 + 0.6 * rng.next_f64()) * 100.0).round() / 100.0;

        sheet.write_number(row, 0, (i + 1) as f64)?;
        sheet.write_string(row, 1, *name)?;
        sheet.write_string(row, 2, *mode)?;
        // One unreadable amount in September exercises the coercion path.
        if month_idx == 2 && *name == "Dining Out" {
            sheet.write_string(row, 3, "pending")?;
        } else {
            sheet.write_number(row, 3, amount)?;
            total += amount;
        }
        row += 1;
    }

    sheet.write_string_with_format(row, 1, "Total Amount", bold)?;
    sheet.write_string(row, 2, "All")?;
    sheet.write_number_with_format(row, 3, (total * 100.0_f64).round() / 100.0, bold)?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Expense_Report_Jul_Dec_2024.xlsx"));

    let mut rng = SimpleRng(2024);
    let bold = Format::new().set_bold();
    let mut workbook = Workbook::new();

    for (idx, month) in MONTHS.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        write_month(sheet, month, idx, &mut rng, &bold)
            .with_context(|| format!("writing sheet {month}"))?;
    }

    workbook
        .save(&output)
        .with_context(|| format!("saving {}", output.display()))?;

    println!(
        "Wrote {} months × {} expenses to {}",
        MONTHS.len(),
        EXPENSES.len(),
        output.display()
    );
    Ok(())
}
