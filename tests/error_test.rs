//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use faq_search_common::Error;
use faq_search_rust::config::Config;
use faq_search_rust::error::FaqSearchError;
use faq_search_rust::source;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないデータファイル
#[test]
fn test_read_nonexistent_file() {
    let result = source::read_rows(Path::new("/nonexistent/path/faq.xlsx"));
    assert!(matches!(result, Err(FaqSearchError::FileNotFound(_))));

    let result = source::compute_data_version(Path::new("/nonexistent/path/faq.xlsx"));
    assert!(matches!(result, Err(FaqSearchError::FileNotFound(_))));
}

/// 壊れたExcelファイル
#[test]
fn test_read_broken_excel() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("faq.xlsx");
    std::fs::write(&path, "not a workbook").unwrap();

    assert!(source::read_rows(&path).is_err());
}

/// 見出しだけのCSVは0件
#[test]
fn test_read_header_only_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("faq.csv");
    std::fs::write(&path, "質問,回答\n").unwrap();

    let rows = source::read_rows(&path).expect("読み込み失敗");
    assert!(rows.is_empty());
}

/// 壊れた設定ファイル
#[test]
fn test_load_broken_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(FaqSearchError::JsonParse(_))));
}

/// 分類が空の設定
#[test]
fn test_load_config_without_categories() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "categories": [] }"#).unwrap();

    assert!(matches!(Config::load_from(&path), Err(FaqSearchError::Config(_))));
}

/// FaqSearchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FaqSearchError::Config("テスト設定エラー".to_string()),
        FaqSearchError::UnknownCategory("manuals".to_string()),
        FaqSearchError::FileNotFound("faq.xlsx".to_string()),
        FaqSearchError::Csv("UTF-8ではありません".to_string()),
        FaqSearchError::WrongPassword,
        FaqSearchError::Core(Error::Validation("検索キーワードを入力してください。".to_string())),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }

    let err = FaqSearchError::UnknownCategory("manuals".to_string());
    assert!(err.to_string().contains("manuals"));
}

/// コア側エラーへの変換
#[test]
fn test_into_core_error() {
    let core: Error = FaqSearchError::FileNotFound("faq.xlsx".to_string()).into();
    assert!(matches!(core, Error::DataSource(ref m) if m.contains("faq.xlsx")));

    let core: Error = FaqSearchError::Core(Error::Auth).into();
    assert!(matches!(core, Error::Auth));
}
