use piecework_core::{CoefficientRow, DayKey, LineEntry, MonthOverview, Position, Settings, WorkData};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Sum")]
    sum: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Work")]
    work: String,
    #[tabled(rename = "Day total")]
    total: String,
}

#[derive(Tabled)]
struct CoefRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Coefficient")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

pub fn show_positions(positions: &[Position]) {
    if positions.is_empty() {
        println!("No positions found.");
        return;
    }
    let rows = positions.iter().map(|p| PositionRow {
        id: p.id,
        name: p.name.clone(),
        price: money(p.unit_price),
    });
    println!("{}", styled(Table::new(rows)));
}

pub fn show_day(day: DayKey, entries: &[LineEntry]) {
    if entries.is_empty() {
        println!("{}: no entries.", day);
        return;
    }
    let rows = entries.iter().map(|e| EntryRow {
        position: format!("{} (#{})", e.position_name, e.position_id),
        price: money(e.unit_price),
        quantity: money(e.quantity),
        sum: money(e.line_total),
    });
    let total: f64 = entries.iter().map(|e| e.line_total).sum();
    println!("\n\x1b[1;36m{} ({})\x1b[0m Total: {}", day, day.date().format("%a"), money(total));
    println!("{}", styled(Table::new(rows)));
}

pub fn show_month(overview: &MonthOverview, data: &WorkData) {
    let stats = &overview.stats;
    println!(
        "\n\x1b[1;36m{}\x1b[0m (coefficient {:.2}, {} persons)",
        overview.month, overview.coefficient, data.settings.person_count
    );

    let record = data.months.get(&overview.month);
    let rows: Vec<DayRow> = overview
        .days
        .iter()
        .filter(|cell| cell.filled)
        .map(|cell| {
            let work = record
                .and_then(|r| r.days.get(&cell.day))
                .map(|d| {
                    d.entries
                        .iter()
                        .map(|e| format!("{} x{}", e.position_name, money(e.quantity)))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            DayRow {
                date: format!("{} ({})", cell.day, cell.day.date().format("%a")),
                work,
                total: money(cell.daily_total),
            }
        })
        .collect();

    if rows.is_empty() {
        println!("No work logged this month.");
    } else {
        println!("{}", styled(Table::new(rows)));
    }

    println!("Total:      {}", money(stats.total));
    println!("Premium:    {}", money(stats.premium));
    println!("Per person: {}", money(stats.per_person));
}

pub fn show_coefficients(rows: &[CoefficientRow]) {
    let rows = rows.iter().map(|r| CoefRow {
        month: r.month.to_string(),
        value: format!("{:.2}", r.value),
        source: if r.overridden { "month" } else { "default" }.to_string(),
    });
    println!("{}", styled(Table::new(rows)));
}

pub fn show_settings(settings: &Settings) {
    println!("persons:     {}", settings.person_count);
    println!("coefficient: {:.2}", settings.default_coefficient);
    println!("theme:       {}", settings.theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_format() {
        assert_eq!(money(4500.0), "4500");
        assert_eq!(money(12.5), "12.50");
    }
}
