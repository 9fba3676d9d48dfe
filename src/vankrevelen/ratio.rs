// @file ratio.rs
// @brief atomic-ratio records and table loaders

use crate::vankrevelen::error::PlotError;
use anyhow::{Result, anyhow};
use clap::ValueEnum;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Key of the oxygen-to-carbon ratio.
pub const OC_KEY: &str = "OC";

/// Key of the hydrogen-to-carbon ratio.
pub const HC_KEY: &str = "HC";

/// Atomic ratios of a single molecular formula, keyed by ratio name.
///
/// The vocabulary is open (N/C, P/C, ... are kept when present) but every
/// record handed to `render` or the density estimator must carry both the
/// `"OC"` and `"HC"` keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RatioRecord {
    values: BTreeMap<String, f64>,
}

impl RatioRecord {
    pub fn new(oc: f64, hc: f64) -> RatioRecord {
        let mut r = RatioRecord::default();
        r.insert(OC_KEY, oc);
        r.insert(HC_KEY, hc);
        r
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    fn require(&self, name: &str) -> Result<f64, PlotError> {
        self.get(name)
            .ok_or_else(|| PlotError::InvalidInput(format!("ratio record is missing the {name:?} key")))
    }

    pub fn oc(&self) -> Result<f64, PlotError> {
        self.require(OC_KEY)
    }

    pub fn hc(&self) -> Result<f64, PlotError> {
        self.require(HC_KEY)
    }
}

/// Unzip a ratio list into parallel (O/C, H/C) sequences, preserving order.
pub fn extract_ratios(ratios: &[RatioRecord]) -> Result<(Vec<f64>, Vec<f64>), PlotError> {
    let mut x = Vec::with_capacity(ratios.len());
    let mut y = Vec::with_capacity(ratios.len());
    for r in ratios {
        x.push(r.oc()?);
        y.push(r.hc()?);
    }
    Ok((x, y))
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum TableFormat {
    Csv,
    Tsv,
    Infer,
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase()
}

fn locate_columns(header: &[&str]) -> Result<(usize, usize)> {
    // accepts "OC", "O/C", "o_c", "O:C", ...
    let oc = Regex::new(r"(?i)^o[\s/_:-]?c$").unwrap();
    let hc = Regex::new(r"(?i)^h[\s/_:-]?c$").unwrap();

    let find = |re: &Regex| header.iter().position(|name| re.is_match(name.trim()));
    match (find(&oc), find(&hc)) {
        (Some(o), Some(h)) => Ok((o, h)),
        _ => Err(anyhow!("could not locate the O/C and H/C columns in {header:?}")),
    }
}

fn load_delimited(filename: &str, delimiter: char) -> Result<Vec<RatioRecord>> {
    let file = std::fs::File::open(filename)?;
    let file = std::io::BufReader::new(file);

    let mut header: Option<(Vec<String>, usize, usize)> = None;
    let mut v = Vec::new();
    for line in file.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols = line.split(delimiter).map(str::trim).collect::<Vec<_>>();

        let Some((names, oc_col, hc_col)) = &header else {
            let (oc_col, hc_col) = locate_columns(&cols)?;
            let names = cols.iter().map(|name| normalize_name(name)).collect::<Vec<_>>();
            header = Some((names, oc_col, hc_col));
            continue;
        };
        if cols.len() <= *oc_col.max(hc_col) {
            return Err(anyhow!("row is shorter than the header: {line:?}"));
        }

        let mut r = RatioRecord::default();
        for (name, col) in names.iter().zip(cols.iter()) {
            match col.parse::<f64>() {
                Ok(value) => r.insert(name, value),
                // non-numeric cells (formula strings etc.) are skipped
                Err(_) => continue,
            }
        }
        if r.get(OC_KEY).is_none() || r.get(HC_KEY).is_none() {
            return Err(anyhow!("failed to parse the O/C or H/C cell: {line:?}"));
        }
        v.push(r);
    }

    if header.is_none() {
        return Err(anyhow!("no header row found in {filename:?}"));
    }
    Ok(v)
}

/// Load a ratio table from a delimited text file with a header row.
pub fn load_ratio_table(file: &str, format: TableFormat) -> Result<Vec<RatioRecord>> {
    match format {
        TableFormat::Csv => load_delimited(file, ','),
        TableFormat::Tsv => load_delimited(file, '\t'),
        TableFormat::Infer => {
            if let Ok(r) = load_delimited(file, '\t') {
                return Ok(r);
            }
            load_delimited(file, ',')
        }
    }
}
