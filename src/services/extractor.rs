use crate::models::debenture::{DebentureRecord, RawRow, WatchList};
use crate::util;
use chrono::NaiveDate;
use log::{debug, warn};

/// Raw table columns kept in the store, in store order. Must follow the
/// layout of the published table.
pub const PROJECTED_COLUMNS: [usize; 10] = [0, 1, 2, 3, 4, 5, 6, 10, 12, 14];

// Projected positions holding decimal-comma numbers: rates, unit price, duration
const NUMERIC_POSITIONS: [usize; 5] = [4, 5, 6, 7, 8];

const MIN_ROW_WIDTH: usize = PROJECTED_COLUMNS[PROJECTED_COLUMNS.len() - 1] + 1;

/// Records captured from one table plus the watch-list codes never found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<DebentureRecord>,
    pub residual: WatchList,
}

/// Picks the watch-listed rows out of `rows`. The first row of each code wins;
/// later duplicates are ignored.
pub fn extract(rows: &[RawRow], mut watch_list: WatchList, publish_date: &NaiveDate) -> Extraction {
    let date = util::format_br_date(publish_date);
    let mut records = Vec::new();

    for row in rows {
        let code = match row.first() {
            Some(code) => code.trim(),
            None => continue,
        };
        if !watch_list.contains(code) {
            continue;
        }
        if row.len() < MIN_ROW_WIDTH {
            warn!(
                "Row for {} has {} cells, expected at least {}; skipped",
                code,
                row.len(),
                MIN_ROW_WIDTH
            );
            continue;
        }

        watch_list.take(code);
        debug!("Matched {}", code);
        records.push(project(row, &date));
    }

    Extraction {
        records,
        residual: watch_list,
    }
}

fn project(row: &RawRow, date: &str) -> DebentureRecord {
    let mut fields: Vec<String> = PROJECTED_COLUMNS
        .iter()
        .map(|&i| row[i].trim().to_string())
        .collect();
    for pos in NUMERIC_POSITIONS {
        fields[pos] = util::normalize_decimal(&fields[pos]);
    }

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    DebentureRecord {
        code: next(),
        name: next(),
        maturity: next(),
        index: next(),
        buy_rate: next(),
        sell_rate: next(),
        indicative_rate: next(),
        unit_price: next(),
        duration: next(),
        reference: next(),
        date: date.to_string(),
    }
}
