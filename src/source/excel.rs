//! Excel読み込み
//!
//! 先頭シートの1行目を見出しとして読み込む。xlsx/xls/ods いずれも可。

use crate::error::{FaqSearchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use faq_search_common::RawRow;
use std::path::Path;

pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FaqSearchError::Config(format!("シートがありません: {}", path.display())))??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header.iter().map(|c| cell_to_string(c).trim().to_string()).collect();

    let records = rows
        .map(|cells| {
            header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(i, name)| {
                    let value = cells.get(i).map(cell_to_string).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect::<RawRow>()
        })
        .filter(|row| row.values().any(|v| !v.is_empty()))
        .collect();

    Ok(records)
}

/// セルを文字列に変換（空セル・エラーセルは空文字、整数値の小数点は付けない）
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
