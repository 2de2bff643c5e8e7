//! データソースモジュール
//!
//! 分類のデータファイル（Excel／CSV）を行データとして読み込む。
//! データ版はファイル内容のSHA-256で、内容が変わったときだけカタログを作り直す。

pub mod csv;
pub mod excel;

use crate::error::{FaqSearchError, Result};
use faq_search_common::{Category, DataSource, RawRow, SourceTable};
use sha2::{Digest, Sha256};
use std::path::Path;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// ファイル形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Excel,
    Csv,
}

impl FileFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileFormat::Excel)
        } else if ext == "csv" {
            Some(FileFormat::Csv)
        } else {
            None
        }
    }
}

/// ファイル内容のハッシュ（データ版）
pub fn compute_data_version(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FaqSearchError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// ファイルを形式に応じて読み込む
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(FaqSearchError::FileNotFound(path.display().to_string()));
    }

    match FileFormat::detect(path) {
        Some(FileFormat::Excel) => excel::read_rows(path),
        Some(FileFormat::Csv) => csv::read_rows(path),
        None => Err(FaqSearchError::Config(format!(
            "対応していないファイル形式です: {}（xlsx/xls/ods/csv）",
            path.display()
        ))),
    }
}

/// ローカルファイルを読むデータソース
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl DataSource for FileSource {
    fn version(&self, category: &Category) -> faq_search_common::Result<String> {
        Ok(compute_data_version(Path::new(&category.location))?)
    }

    fn load(&self, category: &Category) -> faq_search_common::Result<SourceTable> {
        let path = Path::new(&category.location);
        let version = compute_data_version(path)?;
        let rows = read_rows(path)?;
        tracing::debug!(category = %category.id, path = %path.display(), rows = rows.len(), "データファイルを読み込み");
        Ok(SourceTable { version, rows })
    }
}
