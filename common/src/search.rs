//! キーワード検索モジュール
//!
//! 検索語を空白で分割し、各レコードの検索対象文字列に対して
//! AND／OR の部分一致で絞り込む。スコアリングは行わず、結果の順序は
//! カタログの並び順のまま。

use crate::record::Record;
use serde::{Deserialize, Serialize};

/// 検索モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchMode {
    /// すべての語を含む
    #[default]
    And,
    /// いずれかの語を含む
    Or,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(MatchMode::And),
            "or" => Ok(MatchMode::Or),
            _ => Err(format!("Unknown mode: {}. Use and or or", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::And => write!(f, "AND"),
            MatchMode::Or => write!(f, "OR"),
        }
    }
}

/// 呼び出し側で決める検索ポリシー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    /// これより短い語は捨てる（1なら捨てない）
    pub min_token_len: usize,
    /// 既定の検索モード
    pub default_mode: MatchMode,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            min_token_len: 1,
            default_mode: MatchMode::And,
        }
    }
}

impl SearchPolicy {
    /// 検索語を分割し、短すぎる語を除く
    pub fn tokens(&self, query: &str) -> Vec<String> {
        tokenize(query)
            .into_iter()
            .filter(|t| t.chars().count() >= self.min_token_len)
            .collect()
    }
}

/// 検索語を小文字化して空白（全角スペース含む）で分割する
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|s| s.to_string())
        .collect()
}

/// 1回の検索結果（カタログ上の位置の列）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResultSet {
    tokens: Vec<String>,
    mode: MatchMode,
    hits: Vec<usize>,
}

impl SearchResultSet {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// 該当レコードのカタログ上の位置
    pub fn indices(&self) -> &[usize] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// 検索対象文字列が検索語に一致するか
pub fn matches(haystack: &str, tokens: &[String], mode: MatchMode) -> bool {
    if tokens.is_empty() {
        return false;
    }
    match mode {
        MatchMode::And => tokens.iter().all(|t| haystack.contains(t.as_str())),
        MatchMode::Or => tokens.iter().any(|t| haystack.contains(t.as_str())),
    }
}

/// 分割済みの検索語でレコードを絞り込む
///
/// 語が空の場合は何にも一致しない（全件扱いにはしない）。
pub fn search_tokens(tokens: Vec<String>, records: &[Record], mode: MatchMode) -> SearchResultSet {
    let hits: Vec<usize> = if tokens.is_empty() {
        Vec::new()
    } else {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| matches(&r.haystack(), &tokens, mode))
            .map(|(i, _)| i)
            .collect()
    };

    tracing::debug!(
        tokens = ?tokens,
        %mode,
        hits = hits.len(),
        total = records.len(),
        "検索完了"
    );

    SearchResultSet { tokens, mode, hits }
}

/// 検索語文字列でレコードを絞り込む
pub fn search(query: &str, records: &[Record], mode: MatchMode) -> SearchResultSet {
    search_tokens(tokenize(query), records, mode)
}
