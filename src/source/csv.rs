//! CSV読み込み
//!
//! 1行目を見出しとして、各行を 見出し → 値 の対応に変換する。
//! ダブルクォートで囲んだフィールド（カンマ・"" エスケープを含む）に対応。
//! フィールド内の改行には対応しない。

use crate::error::{FaqSearchError, Result};
use faq_search_common::RawRow;
use std::path::Path;

const BOM: char = '\u{FEFF}';

pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|_| FaqSearchError::Csv(format!("UTF-8ではありません: {}", path.display())))?;
    Ok(parse_csv_str(&content))
}

/// CSV文字列を行データに変換
pub fn parse_csv_str(content: &str) -> Vec<RawRow> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header: Vec<String> = parse_csv_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    lines
        .map(|line| {
            let fields = parse_csv_line(line);
            header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(i, name)| (name.clone(), fields.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// CSV行をパース（ダブルクォート対応）
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());

    fields
}
