//! CSV export of stored transactions.

use std::io;

use serde::Serialize;

use crate::{ResultEngine, Transaction};

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: String,
    #[serde(rename = "type")]
    kind: &'static str,
    category: &'a str,
    amount: f64,
    comment: Option<&'a str>,
}

/// Writes one CSV row per transaction (with header) to `writer`.
pub fn write_csv<W: io::Write>(transactions: &[Transaction], writer: W) -> ResultEngine<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for tx in transactions {
        writer.serialize(ExportRow {
            id: tx.id,
            date: tx.date.to_rfc3339(),
            kind: tx.kind.as_str(),
            category: &tx.category,
            amount: tx.amount,
            comment: tx.comment.as_deref(),
        })?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Same as [`write_csv`], collected in memory.
pub fn to_csv(transactions: &[Transaction]) -> ResultEngine<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(transactions, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::TransactionKind;

    #[test]
    fn writes_header_and_rows() {
        let date = DateTime::parse_from_rfc3339("2026-10-17T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let txs = vec![
            Transaction {
                id: 2,
                user_id: 1,
                kind: TransactionKind::Income,
                category: "Зарплата".to_string(),
                amount: 1000.0,
                date,
                comment: None,
            },
            Transaction {
                id: 1,
                user_id: 1,
                kind: TransactionKind::Expense,
                category: "Еда".to_string(),
                amount: 500.5,
                date,
                comment: Some("обед, кофе".to_string()),
            },
        ];

        let csv = String::from_utf8(to_csv(&txs).unwrap()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "id,date,type,category,amount,comment");
        assert_eq!(lines[1], "2,2026-10-17T09:30:00+00:00,income,Зарплата,1000.0,");
        assert_eq!(
            lines[2],
            "1,2026-10-17T09:30:00+00:00,expense,Еда,500.5,\"обед, кофе\""
        );
    }

    #[test]
    fn empty_export_is_empty() {
        assert!(to_csv(&[]).unwrap().is_empty());
    }
}
