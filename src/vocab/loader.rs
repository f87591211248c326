//! Tab-separated dataset loading.
//!
//! Rows are read positionally as `rank<TAB>source<TAB>target`. A first row
//! whose rank column is not a number is taken as a header and skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::constants::VOCAB_COLUMNS;

use super::{VocabEntry, VocabError, VocabTable};

pub fn load(path: impl AsRef<Path>) -> Result<VocabTable, VocabError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VocabError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let table = parse(file)?;
    tracing::info!(path = %path.display(), entries = table.len(), "Vocabulary loaded");
    Ok(table)
}

pub fn parse<R: Read>(reader: R) -> Result<VocabTable, VocabError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record_line(&record);

        if record.len() != VOCAB_COLUMNS {
            return Err(VocabError::ColumnCount {
                line,
                found: record.len(),
            });
        }

        let raw_rank = record[0].trim();
        let rank = match raw_rank.parse::<u32>() {
            Ok(0) => {
                return Err(VocabError::InvalidRank {
                    line,
                    value: raw_rank.to_string(),
                })
            }
            Ok(rank) => rank,
            Err(_) if index == 0 => {
                tracing::warn!(
                    line,
                    row = ?record,
                    "First row has no numeric rank; skipping it as a header"
                );
                continue;
            }
            Err(_) => {
                return Err(VocabError::InvalidRank {
                    line,
                    value: raw_rank.to_string(),
                })
            }
        };

        entries.push(VocabEntry {
            rank,
            source_word: record[1].to_string(),
            target_word: record[2].to_string(),
        });
    }

    if entries.is_empty() {
        return Err(VocabError::EmptyTable);
    }
    Ok(VocabTable::from_entries(entries))
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_verbatim_in_order() {
        let data = "1\têtre\tser\n2\tavoir\tter\n3\tfaire\tfazer\n";
        let table = parse(data.as_bytes()).unwrap();
        assert_eq!(
            table.entries(),
            &[
                VocabEntry::new(1, "être", "ser"),
                VocabEntry::new(2, "avoir", "ter"),
                VocabEntry::new(3, "faire", "fazer"),
            ]
        );
    }

    #[test]
    fn skips_header_row() {
        let data = "Rank\tFrancês\tPortuguês\n10\taller\tir\n";
        let table = parse(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].source_word, "aller");
    }

    #[test]
    fn corrupt_first_rank_is_skipped_like_a_header() {
        let data = "1O\têtre\tser\n2\tavoir\tter\n";
        let table = parse(data.as_bytes()).unwrap();
        assert_eq!(table.entries(), &[VocabEntry::new(2, "avoir", "ter")]);
    }

    #[test]
    fn non_numeric_rank_after_first_row_is_rejected() {
        let data = "1\têtre\tser\nabc\tavoir\tter\n";
        let err = parse(data.as_bytes()).unwrap_err();
        assert!(matches!(err, VocabError::InvalidRank { line: 2, ref value } if value == "abc"));
        assert!(err.is_load_error());
    }

    #[test]
    fn zero_rank_is_rejected() {
        let err = parse("0\têtre\tser\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VocabError::InvalidRank { .. }));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let data = "1\têtre\tser\n2\tavoir\n";
        let err = parse(data.as_bytes()).unwrap_err();
        assert!(matches!(err, VocabError::ColumnCount { line: 2, found: 2 }));

        let err = parse("1\têtre\tser\textra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VocabError::ColumnCount { found: 4, .. }));
    }

    #[test]
    fn header_only_file_is_empty_table() {
        let err = parse("Rank\tFrancês\tPortuguês\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VocabError::EmptyTable));
        assert!(matches!(parse("".as_bytes()), Err(VocabError::EmptyTable)));
    }

    #[test]
    fn crlf_and_padded_rank_are_accepted() {
        let table = parse(" 7 \tvenir\tvir\r\n8\tvoir\tver\r\n".as_bytes()).unwrap();
        let ranks: Vec<u32> = table.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![7, 8]);
        assert_eq!(table.entries()[1].target_word, "ver");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load("/definitely/not/here.tsv").unwrap_err();
        assert!(matches!(err, VocabError::Io { .. }));
        assert!(err.is_load_error());
    }
}
