use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cell texts of one row of the published table, in column order.
pub type RawRow = Vec<String>;

/// Column names of the CSV history. Downstream readers rely on these exact
/// names and positions.
pub const STORE_HEADER: [&str; 11] = [
    "Código",
    "Nome",
    "Vencimento",
    "Índice/Correção",
    "Taxa de Compra(%)",
    "Taxa de Venda(%)",
    "Taxa indicativa(%)",
    "Preço Unitário(R$)",
    "Duration(anos)",
    "Referência NTN-N",
    "Data",
];

/// One captured debenture quote, as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebentureRecord {
    #[serde(rename = "Código")]
    pub code: String,
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Vencimento")]
    pub maturity: String,
    #[serde(rename = "Índice/Correção")]
    pub index: String,
    #[serde(rename = "Taxa de Compra(%)")]
    pub buy_rate: String,
    #[serde(rename = "Taxa de Venda(%)")]
    pub sell_rate: String,
    #[serde(rename = "Taxa indicativa(%)")]
    pub indicative_rate: String,
    #[serde(rename = "Preço Unitário(R$)")]
    pub unit_price: String,
    #[serde(rename = "Duration(anos)")]
    pub duration: String,
    #[serde(rename = "Referência NTN-N")]
    pub reference: String,
    #[serde(rename = "Data")]
    pub date: String,
}

/// Codes the caller wants captured. Codes are taken out as they are found, so
/// whatever is left at the end was not published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    codes: BTreeSet<String>,
}

impl WatchList {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Removes `code`, returning whether it was still wanted.
    pub fn take(&mut self, code: &str) -> bool {
        self.codes.remove(code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Remaining codes in sorted order.
    pub fn codes(&self) -> Vec<String> {
        self.codes.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_list_dedups_and_trims() {
        let list = WatchList::new(["PETR27", " PETR27", "", "AGRU12"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.codes(), vec!["AGRU12".to_string(), "PETR27".to_string()]);
    }

    #[test]
    fn take_only_succeeds_once() {
        let mut list = WatchList::new(["TAEE17"]);
        assert!(list.take("TAEE17"));
        assert!(!list.take("TAEE17"));
        assert!(list.is_empty());
    }
}
