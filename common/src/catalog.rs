//! レコードカタログモジュール
//!
//! 1分類（FAQファイル1つ、指摘一覧1つ等）のレコードを読み取り専用で保持する。
//! カタログは (分類ID, データ版) ごとに1度だけ構築し、`CatalogCache` で
//! セッション間に共有する。データ版が変わったときだけ作り直す。

use crate::error::{Error, Result};
use crate::record::{Dimension, Record, RecordKind};
use crate::session::AuthGate;
use crate::syllabary::{self, SyllabaryIndex};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// 分類（選択肢として表示されるデータの単位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// 一意なID
    pub id: String,
    /// 表示名（未ヒット記録にもこの名前を使う）
    pub label: String,
    pub kind: RecordKind,
    /// データの場所（ファイルパス等。解釈はデータソース側）
    pub location: String,
    /// 絞り込みの軸（先頭から順に選ぶ）
    pub drill: Vec<Dimension>,
}

/// データソースが返す表
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    /// データ版（内容が変われば変わる値）
    pub version: String,
    pub rows: Vec<crate::record::RawRow>,
}

/// 分類IDから行データを返す外部データソース
pub trait DataSource {
    /// 現在のデータ版。キャッシュの有効性判定に使う
    fn version(&self, category: &Category) -> Result<String>;

    /// 全行を読み込む。失敗時は部分的な結果を返さない
    fn load(&self, category: &Category) -> Result<SourceTable>;
}

/// 1分類分の読み取り専用カタログ
#[derive(Debug)]
pub struct RecordCatalog {
    category: Category,
    version: String,
    records: Vec<Record>,
    syllabary: OnceLock<SyllabaryIndex>,
}

impl RecordCatalog {
    /// 表からカタログを構築（全項目が空の行は除く）
    pub fn build(category: Category, table: SourceTable) -> Self {
        let records: Vec<Record> = table
            .rows
            .iter()
            .filter_map(|row| Record::from_row(category.kind, row))
            .collect();

        tracing::debug!(
            category = %category.id,
            version = %table.version,
            rows = table.rows.len(),
            records = records.len(),
            "カタログを構築"
        );

        Self {
            category,
            version: table.version,
            records,
            syllabary: OnceLock::new(),
        }
    }

    /// レコード列から直接構築（テスト・組み込みデータ用）
    pub fn from_records(category: Category, version: &str, records: Vec<Record>) -> Self {
        Self {
            category,
            version: version.to_string(),
            records,
            syllabary: OnceLock::new(),
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 50音索引（初回呼び出し時に構築）
    pub fn syllabary(&self) -> &SyllabaryIndex {
        self.syllabary
            .get_or_init(|| syllabary::classify(&self.records))
    }

    /// 50音索引を構築済みか
    pub fn has_syllabary(&self) -> bool {
        self.syllabary.get().is_some()
    }

    /// 絞り込み条件に一致するレコード位置（カタログ順）
    pub fn narrow(&self, filters: &[(Dimension, String)]) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| filters.iter().all(|(d, v)| r.dimension(*d) == v))
            .map(|(i, _)| i)
            .collect()
    }

    /// 指定位置のレコードが持つ軸の値（初出順・重複なし）
    pub fn distinct_values(&self, dimension: Dimension, within: &[usize]) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for &i in within {
            let Some(record) = self.records.get(i) else {
                continue;
            };
            let value = record.dimension(dimension);
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        values
    }
}

/// (分類ID, データ版) をキーにしたカタログのキャッシュ
///
/// 分類ごとに最新版1つだけを保持する。
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: RwLock<HashMap<String, Arc<RecordCatalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュ済みならそれを返し、データ版が違えば読み直す
    ///
    /// 読み込みに失敗した場合、古い版のカタログで代用せずエラーを返す。
    pub fn get_or_load(
        &self,
        category: &Category,
        source: &dyn DataSource,
    ) -> Result<Arc<RecordCatalog>> {
        let version = source.version(category)?;

        if let Some(cached) = self.entries.read().get(&category.id) {
            if cached.version() == version {
                tracing::debug!(category = %category.id, %version, "カタログキャッシュにヒット");
                return Ok(Arc::clone(cached));
            }
        }

        tracing::info!(category = %category.id, %version, "カタログを読み込み");
        let table = source.load(category).map_err(|e| match e {
            Error::DataSource(_) => e,
            other => Error::DataSource(format!("{}: {}", category.label, other)),
        })?;

        let catalog = Arc::new(RecordCatalog::build(category.clone(), table));
        self.entries
            .write()
            .insert(category.id.clone(), Arc::clone(&catalog));
        Ok(catalog)
    }

    /// 認証ゲートを通ってから `get_or_load` する
    ///
    /// 未認証ならデータソースに触れずに `Error::Auth` を返す。
    pub fn get_or_load_for(
        &self,
        gate: &dyn AuthGate,
        category: &Category,
        source: &dyn DataSource,
    ) -> Result<Arc<RecordCatalog>> {
        if !gate.is_authenticated() {
            tracing::warn!(category = %category.id, "未認証のため読み込みを拒否");
            return Err(Error::Auth);
        }
        self.get_or_load(category, source)
    }

    /// 現在キャッシュしている版
    pub fn cached_version(&self, category_id: &str) -> Option<String> {
        self.entries
            .read()
            .get(category_id)
            .map(|c| c.version().to_string())
    }

    /// 分類のキャッシュを破棄
    pub fn invalidate(&self, category_id: &str) -> bool {
        self.entries.write().remove(category_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRow;
    use std::cell::{Cell, RefCell};

    fn category() -> Category {
        Category {
            id: "findings".to_string(),
            label: "点検指摘事項".to_string(),
            kind: RecordKind::Finding,
            location: "findings.xlsx".to_string(),
            drill: RecordKind::Finding.default_drill(),
        }
    }

    fn row(equipment: &str, category: &str, issue: &str) -> RawRow {
        [("設備名", equipment), ("分類", category), ("指摘事項", issue)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// 呼び出し回数を数えるテスト用データソース
    struct CountingSource {
        version: RefCell<String>,
        versions: Cell<usize>,
        loads: Cell<usize>,
        fail: Cell<bool>,
    }

    impl CountingSource {
        fn new(version: &str) -> Self {
            Self {
                version: RefCell::new(version.to_string()),
                versions: Cell::new(0),
                loads: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl DataSource for CountingSource {
        fn version(&self, _category: &Category) -> Result<String> {
            self.versions.set(self.versions.get() + 1);
            Ok(self.version.borrow().clone())
        }

        fn load(&self, _category: &Category) -> Result<SourceTable> {
            if self.fail.get() {
                return Err(Error::DataSource("読み込み失敗".to_string()));
            }
            self.loads.set(self.loads.get() + 1);
            Ok(SourceTable {
                version: self.version.borrow().clone(),
                rows: vec![
                    row("受変電設備", "漏電", "絶縁抵抗低下"),
                    row("空調設備", "異音", "ファン異音"),
                    row("受変電設備", "劣化", "ケーブル被覆劣化"),
                    row("", "", ""),
                ],
            })
        }
    }

    #[test]
    fn test_build_skips_empty_rows() {
        let source = CountingSource::new("v1");
        let catalog = RecordCatalog::build(category(), source.load(&category()).unwrap());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.version(), "v1");
    }

    #[test]
    fn test_narrow_and_distinct_values() {
        let source = CountingSource::new("v1");
        let catalog = RecordCatalog::build(category(), source.load(&category()).unwrap());

        let all: Vec<usize> = (0..catalog.len()).collect();
        assert_eq!(
            catalog.distinct_values(Dimension::EquipmentName, &all),
            vec!["受変電設備", "空調設備"]
        );

        let narrowed = catalog.narrow(&[(Dimension::EquipmentName, "受変電設備".to_string())]);
        assert_eq!(narrowed, vec![0, 2]);
        assert_eq!(
            catalog.distinct_values(Dimension::Category, &narrowed),
            vec!["漏電", "劣化"]
        );
    }

    #[test]
    fn test_syllabary_built_lazily() {
        let source = CountingSource::new("v1");
        let catalog = RecordCatalog::build(category(), source.load(&category()).unwrap());
        assert!(!catalog.has_syllabary());
        let total = catalog.syllabary().total();
        assert!(catalog.has_syllabary());
        assert!(total <= catalog.len());
    }

    struct Gate(bool);

    impl AuthGate for Gate {
        fn is_authenticated(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_locked_gate_never_touches_source() {
        let cache = CatalogCache::new();
        let source = CountingSource::new("v1");

        let result = cache.get_or_load_for(&Gate(false), &category(), &source);
        assert!(matches!(result, Err(Error::Auth)));
        assert_eq!(source.versions.get(), 0);
        assert_eq!(source.loads.get(), 0);
        assert!(cache.is_empty());

        let catalog = cache.get_or_load_for(&Gate(true), &category(), &source).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(source.loads.get(), 1);
    }

    #[test]
    fn test_cache_hit_and_version_change() {
        let cache = CatalogCache::new();
        let source = CountingSource::new("v1");

        let first = cache.get_or_load(&category(), &source).unwrap();
        let second = cache.get_or_load(&category(), &source).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loads.get(), 1);

        *source.version.borrow_mut() = "v2".to_string();
        let third = cache.get_or_load(&category(), &source).unwrap();
        assert_eq!(third.version(), "v2");
        assert_eq!(source.loads.get(), 2);
        assert_eq!(cache.len(), 1);
        // 先に渡したカタログは古い版のまま使い続けられる
        assert_eq!(first.version(), "v1");
    }

    #[test]
    fn test_cache_load_failure_not_substituted() {
        let cache = CatalogCache::new();
        let source = CountingSource::new("v1");
        cache.get_or_load(&category(), &source).unwrap();

        *source.version.borrow_mut() = "v2".to_string();
        source.fail.set(true);
        let result = cache.get_or_load(&category(), &source);
        assert!(matches!(result, Err(Error::DataSource(_))));
    }

    #[test]
    fn test_invalidate() {
        let cache = CatalogCache::new();
        let source = CountingSource::new("v1");
        cache.get_or_load(&category(), &source).unwrap();
        assert_eq!(cache.cached_version("findings"), Some("v1".to_string()));
        assert!(cache.invalidate("findings"));
        assert!(cache.is_empty());
        assert!(!cache.invalidate("findings"));
    }
}
