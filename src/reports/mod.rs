use crate::cmd::calibrate::CalibrationRow;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use skijump::core_types::{Hill, Roster};
use skijump::gate::GateSelection;
use skijump::weekend::WeekendStep;
use std::collections::HashMap;

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_step(step: &WeekendStep, top: usize) {
    println!(
        "\n{} ({}, start gate {}, {} jumpers)",
        step.label,
        step.kind,
        step.start_gate,
        step.rows.len()
    );
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Bib"),
        Cell::new("Name"),
        Cell::new("Nat"),
        Cell::new("Distances"),
        Cell::new("Total").fg(Color::Cyan),
    ]);

    for row in step.rows.iter().take(top) {
        let distances: Vec<String> = row.distances.iter().map(|d| format!("{:.1}", d)).collect();
        let rank_cell = Cell::new(row.rank);
        table.add_row(vec![
            if row.rank == 1 {
                rank_cell.fg(Color::Green)
            } else {
                rank_cell
            },
            Cell::new(row.bib),
            Cell::new(&row.name),
            Cell::new(&row.country),
            Cell::new(distances.join(" / ")),
            Cell::new(format!("{:.1}", row.total)).add_attribute(Attribute::Bold),
        ]);
    }
    right_align(&mut table, 0, 1);
    right_align(&mut table, 5, 5);
    println!("{}", table);
}

pub fn print_form_changes(before: &Roster, after: &Roster) {
    let previous: HashMap<&str, f64> = before
        .jumpers
        .iter()
        .map(|j| (j.id.as_str(), j.skills.form))
        .collect();

    let mut changes: Vec<(&str, &str, f64, f64)> = after
        .jumpers
        .iter()
        .filter_map(|j| {
            previous
                .get(j.id.as_str())
                .map(|&f| (j.id.as_str(), j.name.as_str(), f, j.skills.form))
        })
        .collect();
    changes.sort_by(|a, b| (b.3 - b.2).abs().total_cmp(&(a.3 - a.2).abs()));

    println!("\nForm after the weekend (largest moves first)");
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Id"),
        Cell::new("Name"),
        Cell::new("Before"),
        Cell::new("After"),
        Cell::new("Delta").fg(Color::Cyan),
    ]);
    for (id, name, from, to) in changes.into_iter().take(10) {
        let delta = to - from;
        let color = if delta >= 0.0 { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(name),
            Cell::new(format!("{:.2}", from)),
            Cell::new(format!("{:.2}", to)),
            Cell::new(format!("{:+.2}", delta)).fg(color),
        ]);
    }
    right_align(&mut table, 2, 4);
    println!("{}", table);
}

pub fn print_gate_trace(selection: &GateSelection, field: usize) {
    println!(
        "\nStarting gate: {} (search settled on {}, {} tries, {} of {} overshoots allowed)",
        selection.gate,
        selection.converged_gate,
        selection.tries,
        selection.allowed_overshoots,
        field
    );
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Try"),
        Cell::new("Gate"),
        Cell::new("Overshoots"),
    ]);
    for (i, (gate, overshoots)) in selection.trace.iter().enumerate() {
        let cell = Cell::new(overshoots);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(gate),
            if *overshoots > selection.allowed_overshoots {
                cell.fg(Color::Red)
            } else {
                cell
            },
        ]);
    }
    right_align(&mut table, 0, 2);
    println!("{}", table);
}

pub fn print_calibration(rows: &[CalibrationRow], hill: &Hill) {
    println!(
        "\nCalibration on K{} / HS{} ({} m per gate)",
        hill.k_point, hill.real_hs, hill.meters_by_gate
    );
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Gate").add_attribute(Attribute::Bold),
        Cell::new("Jumps"),
        Cell::new("Mean"),
        Cell::new("Max"),
        Cell::new("> HS").fg(Color::Red),
        Cell::new("Falls").fg(Color::Red),
    ]);
    for r in rows {
        table.add_row(vec![
            Cell::new(r.gate),
            Cell::new(r.jumps),
            Cell::new(format!("{:.1}", r.mean_distance)),
            Cell::new(format!("{:.1}", r.max_distance)),
            Cell::new(format!("{:.1}%", r.overshoot_share * 100.0)),
            Cell::new(format!("{:.1}%", r.fall_share * 100.0)),
        ]);
    }
    right_align(&mut table, 0, 5);
    println!("{}", table);
}
