//! CSV loading for the VAD lexicon.
//!
//! Expected header: `term,valence,arousal,dominance` (extra columns are
//! ignored). Rows that cannot be decoded are dropped here; rows with bad
//! values are dropped later by [`LexiconIndex::build`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LexiconError;
use crate::lexicon::index::{LexiconIndex, RawRecord};

const REQUIRED_COLUMNS: [&str; 4] = ["term", "valence", "arousal", "dominance"];

/// Read every decodable row from a lexicon CSV file.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, LexiconError> {
    let file = File::open(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records_from(file, path)
}

/// Read lexicon rows from any reader. `origin` is only used in errors.
pub fn read_records_from<R: Read>(reader: R, origin: &Path) -> Result<Vec<RawRecord>, LexiconError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| LexiconError::Csv {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.eq_ignore_ascii_case(col)))
        .collect();
    if !missing.is_empty() {
        return Err(LexiconError::Csv {
            path: origin.to_path_buf(),
            message: format!("missing column(s): {}", missing.join(", ")),
        });
    }
    let normalized: csv::StringRecord = headers.iter().map(|h| h.to_lowercase()).collect();
    rdr.set_headers(normalized);

    let mut records = Vec::new();
    let mut undecodable = 0usize;
    for row in rdr.deserialize::<RawRecord>() {
        match row {
            Ok(record) => records.push(record),
            Err(_) => undecodable += 1,
        }
    }
    if undecodable > 0 {
        tracing::debug!(
            path = %origin.display(),
            undecodable,
            "Dropped undecodable lexicon rows"
        );
    }
    Ok(records)
}

/// Load and index a lexicon CSV file.
pub fn load_index(path: &Path) -> Result<LexiconIndex, LexiconError> {
    let records = read_records(path)?;
    let rows = records.len();
    let index = LexiconIndex::build(records);
    tracing::info!(
        path = %path.display(),
        rows,
        entries = index.len(),
        indexed = index.indexed_len(),
        skipped = index.skipped(),
        "Loaded VAD lexicon"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn origin() -> &'static Path {
        Path::new("inline.csv")
    }

    #[test]
    fn test_read_records_from_csv() {
        let data = "term,valence,arousal,dominance\n\
                    happy,0.9,0.4,0.3\n\
                    \"well, actually\",0.1,0.2,0.3\n";
        let records = read_records_from(data.as_bytes(), origin()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].term, "happy");
        assert_eq!(records[1].term, "well, actually");
        assert_eq!(records[1].dominance, "0.3");
    }

    #[test]
    fn test_header_order_and_case_do_not_matter() {
        let data = "Dominance, Term ,VALENCE,arousal,notes\n0.0,calm,0.5,-0.5,ignored\n";
        let records = read_records_from(data.as_bytes(), origin()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].term, "calm");
        assert_eq!(records[0].valence, "0.5");
        assert_eq!(records[0].arousal, "-0.5");
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = "term,valence,arousal\nhappy,0.9,0.4\n";
        let err = read_records_from(data.as_bytes(), origin()).unwrap_err();
        match err {
            LexiconError::Csv { message, .. } => assert!(message.contains("dominance")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_short_rows_become_skipped_entries() {
        let data = "term,valence,arousal,dominance\nhappy,0.9\nsad,-0.8,-0.4,-0.3\n";
        let records = read_records_from(data.as_bytes(), origin()).unwrap();
        let index = LexiconIndex::build(records);
        assert_eq!(index.len(), 1);
        assert!(index.get("sad").is_some());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_index(Path::new("/nonexistent/moodquiz/vad.csv")).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }

    #[test]
    fn test_load_index_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "term,valence,arousal,dominance").unwrap();
        writeln!(file, "not good,-0.6,0.2,-0.2").unwrap();
        writeln!(file, "good,0.7,0.3,0.4").unwrap();
        writeln!(file, "broken,x,y,z").unwrap();
        file.flush().unwrap();

        let index = load_index(file.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.skipped(), 1);
    }
}
