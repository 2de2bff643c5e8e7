//! 検索・50音索引の性質テスト
//!
//! 固定のカタログと複数の検索語で、モード間の包含関係や索引の件数を確認

use faq_search_common::normalizer::{fold_key, grouping_key};
use faq_search_common::{classify, search, FaqEntry, MatchMode, Record};

fn catalog() -> Vec<Record> {
    [
        ("休暇の申請方法", "休暇 申請"),
        ("出張費の精算", "出張 精算"),
        ("ガス設備の点検", "ガス 点検"),
        ("カメラの貸出", "カメラ 貸出"),
        ("PDFの印刷", "PDF 印刷"),
        ("", "関連ワードのみ"),
        ("休暇の申請方法", "休暇 申請"),
    ]
    .into_iter()
    .map(|(q, r)| Record::Faq(FaqEntry::new(q, "", r, Vec::new())))
    .collect()
}

const QUERIES: &[&str] = &["休暇", "休暇 出張", "点検 ガス", "pdf 印刷 申請", "カメラ 存在しない", "の"];

#[test]
fn test_and_results_are_subset_of_or() {
    let records = catalog();
    for query in QUERIES {
        let and = search(query, &records, MatchMode::And);
        let or = search(query, &records, MatchMode::Or);
        assert!(
            and.indices().iter().all(|i| or.indices().contains(i)),
            "AND ⊄ OR: {}",
            query
        );
    }
}

#[test]
fn test_empty_query_matches_nothing_in_both_modes() {
    let records = catalog();
    assert!(search("", &records, MatchMode::And).is_empty());
    assert!(search("   ", &records, MatchMode::Or).is_empty());
}

#[test]
fn test_syllabary_never_exceeds_catalog() {
    let records = catalog();
    let index = classify(&records);
    assert!(index.total() <= records.len());
    // 同じ内容のレコードは1件にまとまる
    assert_eq!(index.get('き').map(|g| g.len()), Some(1));
    assert!(classify(&[]).is_empty());
}

#[test]
fn test_grouping_key_idempotent() {
    for record in catalog() {
        let Record::Faq(faq) = record else { continue };
        let key = grouping_key(&faq.question);
        assert_eq!(fold_key(&key), key, "{}", faq.question);
        assert_eq!(faq.reading(), key);
    }
}
