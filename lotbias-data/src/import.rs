use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::history::History;
use crate::models::{profile, validate_draw, Draw};

const REQUIRED_COLUMNS: [&str; 3] = ["draw_date", "numbers", "lottery"];

struct Columns {
    date: usize,
    numbers: usize,
    lottery: usize,
    bonus: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(*c).is_none())
            .collect();
        if !missing.is_empty() {
            bail!("Colonnes obligatoires manquantes : {}", missing.join(", "));
        }

        Ok(Self {
            date: find("draw_date").unwrap_or_default(),
            numbers: find("numbers").unwrap_or_default(),
            lottery: find("lottery").unwrap_or_default(),
            bonus: find("bonus"),
        })
    }
}

pub fn load_csv(path: &Path) -> Result<History> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    let history = read_draws(file).with_context(|| format!("Fichier {:?}", path))?;
    log::info!("{} tirages chargés depuis {:?}", history.len(), path);
    Ok(history)
}

pub fn read_draws<R: Read>(input: R) -> Result<History> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().context("En-tête CSV illisible")?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut draws = Vec::new();
    for (idx, record_result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record_result.with_context(|| format!("Erreur lecture ligne {}", row))?;
        let draw = parse_record(&record, &columns).with_context(|| format!("Ligne {}", row))?;
        draws.push(draw);
    }

    Ok(History::new(draws))
}

fn parse_record(record: &csv::StringRecord, columns: &Columns) -> Result<Draw> {
    let get = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let lottery = get(columns.lottery)?.to_string();
    let Some(profile) = profile(&lottery) else {
        bail!("Loterie inconnue '{}'", lottery);
    };

    let date = parse_date(get(columns.date)?)?;
    let numbers = parse_number_list(get(columns.numbers)?)?;
    let bonus = match columns.bonus {
        Some(idx) => parse_number_list(record.get(idx).unwrap_or_default())?,
        None => Vec::new(),
    };

    validate_draw(profile, &numbers, &bonus)?;

    Ok(Draw {
        date,
        lottery,
        numbers,
        bonus,
    })
}

pub fn parse_number_list(raw: &str) -> Result<Vec<u8>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Impossible de parser le numéro '{}'", s))
        })
        .collect()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))
}
