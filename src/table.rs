//! Reading and writing the persisted comparison table (`bruto,clt,pj`).

use crate::tax::ComparisonRow;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_TABLE_PATH: &str = "salary_comparison.csv";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("comparison table not found: {}", .0.display())]
    Missing(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub fn write_csv<'a, I, W>(rows: I, writer: W) -> Result<usize, TableError>
where
    I: IntoIterator<Item = &'a ComparisonRow>,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut count = 0;
    for row in rows {
        wtr.serialize(row)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ComparisonRow>, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<ComparisonRow>, _>>()?;
    log::info!("Read {} csv records", rows.len());
    Ok(rows)
}

/// Load the table from disk. An absent file is reported as [`TableError::Missing`].
pub fn load(path: &Path) -> Result<Vec<ComparisonRow>, TableError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TableError::Missing(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    read_csv(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::{sweep, RateConfig, SweepRange};
    use rust_decimal_macros::dec;

    #[test]
    fn header_and_rows() {
        let rows = sweep(
            &SweepRange::new(dec!(1000), dec!(1200), dec!(100)).unwrap(),
            &RateConfig::REFERENCE,
        );
        let mut buf = Vec::new();
        let count = write_csv(&rows, &mut buf).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("bruto,clt,pj"));
        assert!(lines.next().unwrap().starts_with("1000,"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn reads_float_columns() {
        let input = "bruto,clt,pj\n1000,865.0,579.2\n1100,951.5,662.12\n";
        let rows = read_csv(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].gross, dec!(1000));
        assert_eq!(rows[1].pj_net, dec!(662.12));
    }

    #[test]
    fn malformed_row_is_csv_error() {
        let input = "bruto,clt,pj\n1000,abc,579.2\n";
        let err = read_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::Csv(_)));
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let path = std::env::temp_dir().join("cltpj-does-not-exist.csv");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, TableError::Missing(p) if p == path));
    }
}
