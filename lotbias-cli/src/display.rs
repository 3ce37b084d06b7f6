use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use lotbias_data::models::{Draw, LotteryProfile};
use lotbias_engine::Preset;
use lotbias_engine::combiner::ScoreTable;
use lotbias_engine::lines::GeneratedLine;
use lotbias_engine::ranking::NumberPick;

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_profiles(profiles: &[LotteryProfile]) {
    let mut table = new_table(vec!["Id", "Nom", "Numéros", "Tirés", "Bonus", "Bonus tirés"]);

    for p in profiles {
        let (bonus_range, bonus_count) = match p.bonus_pool() {
            Some(spec) => (format!("{}-{}", spec.min, spec.max), spec.pick_count.to_string()),
            None => ("—".to_string(), "—".to_string()),
        };
        table.add_row(vec![
            p.id.to_string(),
            p.name.to_string(),
            format!("{}-{}", p.min, p.max),
            p.numbers_per_draw.to_string(),
            bonus_range,
            bonus_count,
        ]);
    }
    println!("{table}");
}

pub fn display_draws(draws: &[&Draw], with_bonus: bool) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let header = if with_bonus {
        vec!["Date", "Numéros", "Bonus"]
    } else {
        vec!["Date", "Numéros"]
    };
    let mut table = new_table(header);

    for draw in draws {
        let mut numbers = draw.numbers.clone();
        numbers.sort_unstable();
        let mut row = vec![draw.date.format("%Y-%m-%d").to_string(), join_numbers(&numbers)];
        if with_bonus {
            let mut bonus = draw.bonus.clone();
            bonus.sort_unstable();
            row.push(if bonus.is_empty() { "—".to_string() } else { join_numbers(&bonus) });
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_picks(picks: &[NumberPick], lottery: &str, preset: Preset) {
    println!("\n🎯 Numéros les plus biaisés ({lottery}, preset {preset})\n");
    if picks.is_empty() {
        println!("Aucun numéro au-dessus de la confiance minimale.");
        return;
    }

    let mut table = new_table(vec!["Numéro", "Score", "Confiance", "Lecture"]);
    for pick in picks {
        let color = if pick.score > 0.2 {
            Color::Green
        } else if pick.score < -0.2 {
            Color::Red
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", pick.number)),
            Cell::new(format!("{:+.4}", pick.score)).fg(color),
            Cell::new(format!("{:.2} %", pick.confidence)),
            Cell::new(pick.explanation.to_string()),
        ]);
    }
    println!("{table}");
}

/// Score combiné en fonction du numéro.
pub fn display_score_chart(table: &ScoreTable) {
    let points: Vec<(f32, f32)> = table
        .iter()
        .filter(|(_, s)| s.score.is_finite())
        .map(|(&n, s)| (n as f32, s.score as f32))
        .collect();
    if points.is_empty() {
        println!("  (Pas de données à afficher)");
        return;
    }

    let x_min = points[0].0;
    let x_max = points[points.len() - 1].0;
    let y_max = points.iter().fold(0.0f32, |acc, p| acc.max(p.1.abs())) + 0.1;

    println!("\n== Scores par numéro ==\n");
    let shape = textplots::Shape::Points(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, x_min, x_max, -y_max, y_max);
    println!("{}", chart.lineplot(&shape));
}

pub fn display_lines(lines: &[GeneratedLine], lottery: &str) {
    println!("\n🎲 Grilles générées ({lottery})\n");
    let with_bonus = lines.iter().any(|l| !l.bonus.is_empty());

    let header = if with_bonus {
        vec!["#", "Numéros", "Bonus"]
    } else {
        vec!["#", "Numéros"]
    };
    let mut table = new_table(header);

    for (i, line) in lines.iter().enumerate() {
        let mut row = vec![format!("{}", i + 1), join_numbers(&line.numbers)];
        if with_bonus {
            row.push(join_numbers(&line.bonus));
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_lines_json(lines: &[GeneratedLine]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(lines)?);
    Ok(())
}
