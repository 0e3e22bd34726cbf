//! CSV-based rate table loading and export
//!
//! A rate directory holds one CSV per table. Swapping the directory swaps the
//! tax year without touching formula code.

use super::{
    AbsdRow, AbsdTable, LenderOffer, LenderTable, Milestone, ProgressSchedule, PropertyTaxSchedules,
    RateTables, ResaleLevyRow, ResaleLevyTable, SsdBand, SsdSchedule, TaxBracket, TieredSchedule,
};
use crate::error::{CalcError, CalcResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default path to the rate tables directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

pub const BSD_FILE: &str = "bsd_brackets.csv";
pub const ABSD_FILE: &str = "absd_rates.csv";
pub const OWNER_OCCUPIED_FILE: &str = "property_tax_owner_occupied.csv";
pub const RENTED_FILE: &str = "property_tax_rented.csv";
pub const LOAN_OFFERS_FILE: &str = "loan_offers.csv";
pub const PROGRESS_FILE: &str = "progress_schedule.csv";
pub const RESALE_LEVY_FILE: &str = "resale_levy.csv";
pub const SSD_FILE: &str = "ssd_rates.csv";
pub const PARAMETERS_FILE: &str = "parameters.csv";

/// `term,value` row of parameters.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRow {
    pub term: String,
    pub value: f64,
}

fn read_rows<T: DeserializeOwned>(path: &Path, file: &str) -> CalcResult<Vec<T>> {
    let mut reader = csv::Reader::from_path(path.join(file))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    log::debug!("read {} rows from {}", rows.len(), file);
    Ok(rows)
}

fn write_rows<T: Serialize>(path: &Path, file: &str, rows: &[T]) -> CalcResult<()> {
    let mut writer = csv::Writer::from_path(path.join(file))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a tiered schedule (`upper,rate`; blank upper = open top band)
pub fn load_brackets(path: &Path, file: &str) -> CalcResult<TieredSchedule> {
    let brackets: Vec<TaxBracket> = read_rows(path, file)?;
    TieredSchedule::new(file, brackets)
}

pub fn load_absd(path: &Path) -> CalcResult<AbsdTable> {
    let rows: Vec<AbsdRow> = read_rows(path, ABSD_FILE)?;
    if rows.is_empty() {
        return Err(CalcError::invalid_table(ABSD_FILE, "no rows"));
    }
    Ok(AbsdTable::from_rows(rows))
}

pub fn load_loan_offers(path: &Path) -> CalcResult<Vec<LenderOffer>> {
    read_rows(path, LOAN_OFFERS_FILE)
}

pub fn load_progress_schedule(path: &Path) -> CalcResult<ProgressSchedule> {
    let milestones: Vec<Milestone> = read_rows(path, PROGRESS_FILE)?;
    ProgressSchedule::new(milestones)
}

pub fn load_resale_levy(path: &Path) -> CalcResult<ResaleLevyTable> {
    let rows: Vec<ResaleLevyRow> = read_rows(path, RESALE_LEVY_FILE)?;
    Ok(ResaleLevyTable::from_rows(rows))
}

pub fn load_ssd(path: &Path) -> CalcResult<SsdSchedule> {
    let bands: Vec<SsdBand> = read_rows(path, SSD_FILE)?;
    Ok(SsdSchedule::from_bands(bands))
}

pub fn load_parameters(path: &Path) -> CalcResult<Vec<ParameterRow>> {
    read_rows(path, PARAMETERS_FILE)
}

/// Load every table from `path`; the directory name becomes the table version
pub fn load_rate_tables(path: &Path) -> CalcResult<RateTables> {
    let version = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_string());

    let mut tables = RateTables {
        version,
        bsd: load_brackets(path, BSD_FILE)?,
        absd: load_absd(path)?,
        property_tax: PropertyTaxSchedules {
            owner_occupied: load_brackets(path, OWNER_OCCUPIED_FILE)?,
            rented: load_brackets(path, RENTED_FILE)?,
        },
        lenders: LenderTable {
            offers: load_loan_offers(path)?,
            ..LenderTable::default()
        },
        progress: load_progress_schedule(path)?,
        ..RateTables::default()
    };
    tables.seller.ssd = load_ssd(path)?;
    tables.seller.resale_levy = load_resale_levy(path)?;

    for row in load_parameters(path)? {
        if !tables.apply_parameter(&row.term, row.value) {
            log::warn!("ignoring unknown parameter '{}' in {}", row.term, PARAMETERS_FILE);
        }
    }

    log::info!("loaded rate tables '{}' from {}", tables.version, path.display());
    Ok(tables)
}

/// Write every table to `path` in the layout `load_rate_tables` reads
pub fn write_rate_tables(tables: &RateTables, path: &Path) -> CalcResult<()> {
    fs::create_dir_all(path)?;

    write_rows(path, BSD_FILE, tables.bsd.brackets())?;
    write_rows(path, ABSD_FILE, tables.absd.rows())?;
    write_rows(path, OWNER_OCCUPIED_FILE, tables.property_tax.owner_occupied.brackets())?;
    write_rows(path, RENTED_FILE, tables.property_tax.rented.brackets())?;
    write_rows(path, LOAN_OFFERS_FILE, &tables.lenders.offers)?;
    write_rows(path, PROGRESS_FILE, tables.progress.milestones())?;
    write_rows(path, RESALE_LEVY_FILE, tables.seller.resale_levy.rows())?;
    write_rows(path, SSD_FILE, tables.seller.ssd.bands())?;

    let parameters: Vec<ParameterRow> = tables
        .parameter_terms()
        .into_iter()
        .map(|(term, value)| ParameterRow {
            term: term.to_string(),
            value,
        })
        .collect();
    write_rows(path, PARAMETERS_FILE, &parameters)?;

    log::info!("wrote rate tables '{}' to {}", tables.version, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buyer::Citizenship;
    use std::path::PathBuf;

    fn shipped_rates() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_RATES_PATH)
    }

    #[test]
    fn test_load_shipped_tables_match_builtin() {
        let loaded = load_rate_tables(&shipped_rates()).expect("load shipped rate tables");
        let builtin = RateTables::singapore_2024();

        assert_eq!(loaded.version, "rates");
        assert_eq!(loaded.bsd, builtin.bsd);
        assert_eq!(loaded.absd, builtin.absd);
        assert_eq!(loaded.property_tax, builtin.property_tax);
        assert_eq!(loaded.lenders, builtin.lenders);
        assert_eq!(loaded.progress, builtin.progress);
        assert_eq!(loaded.seller, builtin.seller);
        assert_eq!(loaded.limits, builtin.limits);
        assert_eq!(loaded.lease, builtin.lease);
    }

    #[test]
    fn test_round_trip_through_directory() {
        let dir = std::env::temp_dir().join(format!("sg_rates_{}", std::process::id()));
        let mut tables = RateTables::singapore_2024();
        tables.limits.ltv_hdb = 0.75;
        tables.lenders.sora_3m = 2.9;

        write_rate_tables(&tables, &dir).expect("write");
        let loaded = load_rate_tables(&dir).expect("load");
        fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.limits.ltv_hdb, 0.75);
        assert_eq!(loaded.lenders.sora_3m, 2.9);
        assert_eq!(loaded.absd.rate(Citizenship::Pr, 1), 30.0);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = load_rate_tables(Path::new("/nonexistent/rates")).unwrap_err();
        assert!(matches!(err, CalcError::Csv(_) | CalcError::Io(_)));
    }
}
