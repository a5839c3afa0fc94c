use crate::errors::Result;
use crate::models::debenture::DebentureRecord;
use crate::store::IncrementalStore;
use std::collections::HashMap;

/// Read-only view of the store, indexed by debenture code.
pub struct History {
    records: Vec<DebentureRecord>,
    code_index: HashMap<String, Vec<usize>>,
}

impl History {
    pub fn load(store: &IncrementalStore) -> Result<Self> {
        Ok(Self::from_records(store.read_records()?))
    }

    pub fn from_records(records: Vec<DebentureRecord>) -> Self {
        let mut history = Self {
            records,
            code_index: HashMap::new(),
        };
        history.rebuild_index();
        history
    }

    fn rebuild_index(&mut self) {
        self.code_index.clear();
        for (i, record) in self.records.iter().enumerate() {
            self.code_index
                .entry(record.code.clone())
                .or_insert_with(Vec::new)
                .push(i);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.code_index.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Records of one code in the order they were captured
    pub fn series(&self, code: &str) -> Vec<&DebentureRecord> {
        self.code_index
            .get(code)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Most recent record of one code
    pub fn latest(&self, code: &str) -> Option<&DebentureRecord> {
        self.code_index
            .get(code)
            .and_then(|indices| indices.last())
            .map(|&i| &self.records[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, date: &str) -> DebentureRecord {
        DebentureRecord {
            code: code.to_string(),
            name: String::new(),
            maturity: String::new(),
            index: String::new(),
            buy_rate: String::new(),
            sell_rate: String::new(),
            indicative_rate: String::new(),
            unit_price: "1000.00".to_string(),
            duration: String::new(),
            reference: String::new(),
            date: date.to_string(),
        }
    }

    #[test]
    fn indexes_series_by_code() {
        let history = History::from_records(vec![
            record("B", "09/01/2025"),
            record("A", "09/01/2025"),
            record("B", "10/01/2025"),
        ]);

        assert_eq!(history.len(), 3);
        assert_eq!(history.codes(), vec!["A", "B"]);
        assert_eq!(history.series("B").len(), 2);
        assert_eq!(history.latest("B").unwrap().date, "10/01/2025");
        assert!(history.series("C").is_empty());
        assert!(history.latest("C").is_none());
    }
}
