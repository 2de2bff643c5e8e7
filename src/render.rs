//! 画面出力
//!
//! レコード・検索結果・50音表を端末に出力する。

use crate::attachment::{AttachmentKind, AttachmentResolver};
use crate::error::FaqSearchError;
use faq_search_common::syllabary::{RowLayout, OTHER_ROW};
use faq_search_common::{Record, RecordCatalog, SearchResultSet};

/// 絞り込み値が空のときの表示
pub const EMPTY_VALUE_LABEL: &str = "（未設定）";

pub fn value_label(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_VALUE_LABEL
    } else {
        value
    }
}

/// 一覧の1行
pub fn summary_line(position: usize, record: &Record) -> String {
    format!("{:>3}. {}", position + 1, record.title())
}

/// レコードの全項目と添付ファイル
pub fn print_detail(record: &Record, resolver: &AttachmentResolver) {
    for (label, value) in record.detail_fields() {
        if label == "添付ファイル" {
            continue;
        }
        println!("**{}:** {}", label, value);
    }

    let attachments = record.attachments();
    if !attachments.is_empty() {
        println!("**添付ファイル:**");
        for name in attachments {
            println!("  - {}", attachment_line(name, resolver));
        }
    }
}

/// 添付ファイル1件の表示（種類・場所・サイズ）
pub fn attachment_line(name: &str, resolver: &AttachmentResolver) -> String {
    match resolver.open(name) {
        Ok(a) => format!("[{}] {} ({}, {} bytes)", a.kind, name, a.path.display(), a.bytes.len()),
        Err(FaqSearchError::FileNotFound(_)) => {
            format!("[{}] {} ⚠ 見つかりません", AttachmentKind::classify(name), name)
        }
        Err(e) => format!("[{}] {} ⚠ {}", AttachmentKind::classify(name), name, e),
    }
}

/// 検索結果を出力
pub fn print_results(catalog: &RecordCatalog, results: &SearchResultSet, resolver: &AttachmentResolver) {
    println!("### 【{}検索結果 - {}検索】", catalog.category().label, results.mode());

    if results.is_empty() {
        println!("該当する項目はありません。");
        return;
    }

    for &i in results.indices() {
        if let Some(record) = catalog.get(i) {
            print_detail(record, resolver);
            println!("---");
        }
    }
    println!("✔ {}件", results.len());
}

/// 50音表を出力
pub fn print_syllabary(layout: &RowLayout) {
    if layout.rows.is_empty() && layout.other.is_empty() {
        println!("読みのある項目がありません。");
        return;
    }

    for row in &layout.rows {
        let keys: Vec<String> = row.keys.iter().map(|(c, n)| format!("{}({})", c, n)).collect();
        println!("{}: {}", row.name, keys.join(" "));
    }
    if !layout.other.is_empty() {
        let keys: Vec<String> = layout.other.iter().map(|(c, n)| format!("{}({})", c, n)).collect();
        println!("{}: {}", OTHER_ROW, keys.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_search_common::FaqEntry;

    #[test]
    fn test_summary_line() {
        let record = Record::Faq(FaqEntry::new("休暇の申請方法", "", "", Vec::new()));
        assert_eq!(summary_line(0, &record), "  1. 休暇の申請方法");
        assert_eq!(summary_line(11, &record), " 12. 休暇の申請方法");
    }

    #[test]
    fn test_attachment_line() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("記入例.png"), [0u8; 16]).unwrap();
        let resolver = AttachmentResolver::new(dir.path());

        let found = attachment_line("記入例.png", &resolver);
        assert!(found.starts_with("[画像] 記入例.png ("), "{}", found);
        assert!(found.ends_with(", 16 bytes)"), "{}", found);

        assert_eq!(attachment_line("様式1.pdf", &resolver), "[資料] 様式1.pdf ⚠ 見つかりません");
    }

    #[test]
    fn test_value_label() {
        assert_eq!(value_label(""), EMPTY_VALUE_LABEL);
        assert_eq!(value_label("漏電"), "漏電");
    }
}
