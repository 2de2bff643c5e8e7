//! 未ヒット記録モジュール
//!
//! 該当なしの検索を CSV に追記する。記録はログ用途で、
//! 失敗しても検索自体は続行される（呼び出し側で warn を出す）。

use crate::error::Result;
use faq_search_common::NoHitReporter;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER: &str = "日時,分類,検索ワード";

/// 記録1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoHitEntry {
    pub timestamp: String,
    pub category: String,
    pub query: String,
}

/// CSVファイルへの未ヒット記録
#[derive(Debug, Clone)]
pub struct CsvNoHitLog {
    path: PathBuf,
}

impl CsvNoHitLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1件追記（ファイルがなければ見出し付きで作成）
    pub fn append(&self, category: &str, query: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let is_new = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if is_new {
            writeln!(file, "{}", HEADER)?;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{},{},{}", timestamp, escape(category), escape(query))?;
        Ok(())
    }

    /// 記録を読み込む（ファイルがなければ空）
    pub fn entries(&self) -> Result<Vec<NoHitEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let rows = crate::source::csv::read_rows(&self.path)?;
        Ok(rows
            .into_iter()
            .map(|row| NoHitEntry {
                timestamp: row.get("日時").cloned().unwrap_or_default(),
                category: row.get("分類").cloned().unwrap_or_default(),
                query: row.get("検索ワード").cloned().unwrap_or_default(),
            })
            .collect())
    }

    /// 記録ファイルを削除
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl NoHitReporter for CsvNoHitLog {
    fn report(&self, category: &str, query: &str) -> faq_search_common::Result<()> {
        tracing::info!(%category, %query, "該当なしの検索を記録");
        Ok(self.append(category, query)?)
    }
}

/// カンマ・引用符・改行を含む値を引用符で囲む
fn escape(value: &str) -> String {
    let value = value.replace(['\r', '\n'], " ");
    if value.contains([',', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}
