//! 画面遷移モジュール
//!
//! セッションの「今どの画面にいるか」を保持し、操作に応じて次の画面を決める。
//!
//! ## 画面
//! - ホーム（検索結果を含む）
//! - 一覧（全件）
//! - 50音の行一覧 → 先頭文字ごとのレコード一覧
//! - 分類一覧 → 絞り込み（軸の数だけ段階がある）
//! - 詳細
//!
//! 戻り先はスタックで持ち、絞り込みの各段がそれぞれの戻り先を持つ。
//! 操作が不正な場合は状態を一切変えずにエラーを返す。

use crate::catalog::RecordCatalog;
use crate::error::{Error, Result};
use crate::normalizer;
use crate::record::Dimension;
use crate::search::{self, MatchMode, SearchPolicy, SearchResultSet};
use crate::syllabary::{self, RowLayout};

/// 画面の種類（画面固有の値を持たない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    List,
    SyllabaryRows,
    SyllabaryGroup,
    CategoryList,
    /// 絞り込みの段階（1始まり）
    CategoryDrill(usize),
    Detail,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Home => write!(f, "ホーム"),
            View::List => write!(f, "一覧"),
            View::SyllabaryRows => write!(f, "50音"),
            View::SyllabaryGroup => write!(f, "50音別一覧"),
            View::CategoryList => write!(f, "分類一覧"),
            View::CategoryDrill(level) => write!(f, "絞り込み{}段目", level),
            View::Detail => write!(f, "詳細"),
        }
    }
}

/// 画面とその画面が必要とする選択値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    List,
    SyllabaryRows,
    SyllabaryGroup { syllable: char },
    CategoryList,
    /// 絞り込み軸の先頭から順に選んだ値
    Drill { values: Vec<String> },
    /// `position` は直前の一覧上の位置、`record` はカタログ上の位置
    Detail { position: usize, record: usize },
}

impl Page {
    pub fn view(&self) -> View {
        match self {
            Page::Home => View::Home,
            Page::List => View::List,
            Page::SyllabaryRows => View::SyllabaryRows,
            Page::SyllabaryGroup { .. } => View::SyllabaryGroup,
            Page::CategoryList => View::CategoryList,
            Page::Drill { values } => View::CategoryDrill(values.len()),
            Page::Detail { .. } => View::Detail,
        }
    }
}

/// ユーザー操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// キーワード検索
    Submit { query: String, mode: MatchMode },
    /// 全件一覧
    ShowAll,
    /// 50音の行一覧
    ShowSyllabary,
    /// 先頭文字を選ぶ
    PickSyllable(char),
    /// 分類一覧
    BrowseCategories,
    /// 分類・絞り込みの値を選ぶ
    PickValue(String),
    /// 一覧中のレコードを選ぶ（0始まり）
    PickRecord(usize),
    Back,
    Home,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Submit { .. } => write!(f, "検索"),
            Action::ShowAll => write!(f, "全件一覧"),
            Action::ShowSyllabary => write!(f, "50音から探す"),
            Action::PickSyllable(c) => write!(f, "50音選択（{}）", c),
            Action::BrowseCategories => write!(f, "分類から探す"),
            Action::PickValue(v) => write!(f, "分類選択（{}）", v),
            Action::PickRecord(i) => write!(f, "レコード選択（{}）", i + 1),
            Action::Back => write!(f, "戻る"),
            Action::Home => write!(f, "ホームに戻る"),
        }
    }
}

/// 遷移の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 画面が切り替わった（またはそのまま）
    Moved,
    /// 検索して該当があった
    Searched { hits: usize },
    /// 検索して該当なし（未ヒット記録の対象）
    NoHits { query: String },
}

/// 現在の画面で表示する内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// 選択可能なレコード（カタログ上の位置）
    Records(Vec<usize>),
    /// 絞り込み軸の値
    Values { dimension: Dimension, values: Vec<String> },
    /// 50音の行と先頭文字
    Syllables(RowLayout),
    /// 詳細表示中のレコード
    Record(usize),
    Empty,
}

/// セッションの画面状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    page: Page,
    /// 戻り先（末尾が直前の画面）
    history: Vec<Page>,
    /// ホームに表示する検索結果
    results: Option<SearchResultSet>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// ホーム画面から開始
    pub fn new() -> Self {
        Self {
            page: Page::Home,
            history: Vec::new(),
            results: None,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn view(&self) -> View {
        self.page.view()
    }

    /// 直前の画面（戻る操作の行き先）
    pub fn previous_view(&self) -> Option<View> {
        self.history.last().map(Page::view)
    }

    /// 戻る操作で辿れる段数
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// 詳細表示中のレコードの一覧上の位置
    pub fn selected_record_index(&self) -> Option<usize> {
        match self.page {
            Page::Detail { position, .. } => Some(position),
            _ => None,
        }
    }

    /// 詳細表示中のレコードのカタログ上の位置
    pub fn selected_record(&self) -> Option<usize> {
        match self.page {
            Page::Detail { record, .. } => Some(record),
            _ => None,
        }
    }

    /// 選択中の先頭文字（詳細表示中は遷移元の値）
    pub fn selected_syllable(&self) -> Option<char> {
        self.pages_newest_first().find_map(|p| match p {
            Page::SyllabaryGroup { syllable } => Some(*syllable),
            _ => None,
        })
    }

    /// 選択済みの絞り込み値（詳細表示中は遷移元の値）
    pub fn selected_values(&self) -> &[String] {
        self.pages_newest_first()
            .find_map(|p| match p {
                Page::Drill { values } => Some(values.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn results(&self) -> Option<&SearchResultSet> {
        self.results.as_ref()
    }

    /// 現在ページから戻り先を遡る（50音・絞り込みの選択は遷移元が持つ）
    fn pages_newest_first(&self) -> impl Iterator<Item = &Page> {
        let tail: &[Page] = match self.page {
            Page::Detail { .. } => self.history.last().map(std::slice::from_ref).unwrap_or(&[]),
            _ => &[],
        };
        std::iter::once(&self.page).chain(tail.iter())
    }

    /// 現在の画面に表示する内容
    pub fn listing(&self, catalog: &RecordCatalog) -> Listing {
        match &self.page {
            Page::Home => match &self.results {
                Some(results) => Listing::Records(results.indices().to_vec()),
                None => Listing::Empty,
            },
            Page::List => Listing::Records((0..catalog.len()).collect()),
            Page::SyllabaryRows => Listing::Syllables(syllabary::layout(catalog.syllabary())),
            Page::SyllabaryGroup { syllable } => Listing::Records(
                catalog
                    .syllabary()
                    .get(*syllable)
                    .map(|g| g.to_vec())
                    .unwrap_or_default(),
            ),
            Page::CategoryList => drill_listing(catalog, &[]),
            Page::Drill { values } => drill_listing(catalog, values),
            Page::Detail { record, .. } => Listing::Record(*record),
        }
    }

    /// 操作を適用する
    ///
    /// 失敗した場合は状態を変更しない。
    pub fn apply(
        &mut self,
        action: Action,
        catalog: &RecordCatalog,
        policy: &SearchPolicy,
    ) -> Result<Outcome> {
        let from = self.view();
        let current = self.page.clone();

        let outcome = match (current, action) {
            (_, Action::Home) => {
                self.go_home();
                Outcome::Moved
            }

            (_, Action::Back) => {
                if let Some(previous) = self.history.pop() {
                    self.page = previous;
                }
                Outcome::Moved
            }

            (Page::Home, Action::Submit { query, mode }) => self.submit(&query, mode, catalog, policy)?,

            (Page::Home, Action::ShowAll) => {
                self.push(Page::List);
                Outcome::Moved
            }

            (Page::Home | Page::List, Action::ShowSyllabary) => {
                catalog.syllabary();
                self.push(Page::SyllabaryRows);
                Outcome::Moved
            }

            (Page::SyllabaryRows, Action::PickSyllable(c)) => {
                let key = normalizer::fold_key(&normalizer::to_reading(&c.to_string()))
                    .chars()
                    .next()
                    .ok_or_else(|| Error::NotFound(format!("「{}」は50音の見出しではありません", c)))?;
                if catalog.syllabary().get(key).is_none() {
                    return Err(Error::NotFound(format!("「{}」で始まる項目はありません", c)));
                }
                self.push(Page::SyllabaryGroup { syllable: key });
                Outcome::Moved
            }

            (Page::Home, Action::BrowseCategories) => {
                if catalog.category().drill.is_empty() {
                    return Err(Error::NotFound(format!(
                        "「{}」には分類項目がありません",
                        catalog.category().label
                    )));
                }
                self.push(Page::CategoryList);
                Outcome::Moved
            }

            (Page::CategoryList, Action::PickValue(value)) => {
                self.pick_value(&[], value, catalog)?;
                Outcome::Moved
            }

            (Page::Drill { values }, Action::PickValue(value)) => {
                self.pick_value(&values, value, catalog)?;
                Outcome::Moved
            }

            (_, Action::PickRecord(position)) => {
                let Listing::Records(entries) = self.listing(catalog) else {
                    return Err(Error::InvalidTransition {
                        from: from.to_string(),
                        action: Action::PickRecord(position).to_string(),
                    });
                };
                let record = *entries.get(position).ok_or_else(|| {
                    Error::NotFound(format!(
                        "{}番目の項目はありません（全{}件）",
                        position + 1,
                        entries.len()
                    ))
                })?;
                self.push(Page::Detail { position, record });
                Outcome::Moved
            }

            (_, action) => {
                return Err(Error::InvalidTransition {
                    from: from.to_string(),
                    action: action.to_string(),
                })
            }
        };

        tracing::debug!(%from, to = %self.view(), depth = self.depth(), "画面遷移");
        Ok(outcome)
    }

    fn push(&mut self, next: Page) {
        let current = std::mem::replace(&mut self.page, next);
        self.history.push(current);
    }

    fn go_home(&mut self) {
        self.page = Page::Home;
        self.history.clear();
        self.results = None;
    }

    fn submit(
        &mut self,
        query: &str,
        mode: MatchMode,
        catalog: &RecordCatalog,
        policy: &SearchPolicy,
    ) -> Result<Outcome> {
        if query.trim().is_empty() {
            return Err(Error::Validation("検索キーワードを入力してください。".to_string()));
        }

        let tokens = policy.tokens(query);
        if tokens.is_empty() {
            return Err(Error::Validation(format!(
                "{}文字以上のキーワードを入力してください。",
                policy.min_token_len
            )));
        }

        let results = search::search_tokens(tokens, catalog.records(), mode);
        let hits = results.len();
        self.results = Some(results);

        if hits == 0 {
            Ok(Outcome::NoHits { query: query.to_string() })
        } else {
            Ok(Outcome::Searched { hits })
        }
    }

    /// 絞り込みを1段進める。軸を使い切って1件だけ残れば詳細へ進む
    fn pick_value(&mut self, chosen: &[String], value: String, catalog: &RecordCatalog) -> Result<()> {
        let Listing::Values { dimension, values } = drill_listing(catalog, chosen) else {
            return Err(Error::InvalidTransition {
                from: self.view().to_string(),
                action: Action::PickValue(value).to_string(),
            });
        };

        if !values.contains(&value) {
            return Err(Error::NotFound(format!("{}「{}」はありません", dimension, value)));
        }

        let mut next = chosen.to_vec();
        next.push(value);
        self.push(Page::Drill { values: next });

        if let Listing::Records(entries) = self.listing(catalog) {
            if let [only] = entries.as_slice() {
                self.push(Page::Detail { position: 0, record: *only });
            }
        }
        Ok(())
    }
}

/// 選択済みの値に対する絞り込み画面の内容
fn drill_listing(catalog: &RecordCatalog, chosen: &[String]) -> Listing {
    let dims = &catalog.category().drill;
    let filters: Vec<(Dimension, String)> = dims
        .iter()
        .copied()
        .zip(chosen.iter().cloned())
        .collect();
    let narrowed = catalog.narrow(&filters);

    match dims.get(chosen.len()) {
        Some(&dimension) => Listing::Values {
            dimension,
            values: catalog.distinct_values(dimension, &narrowed),
        },
        None => Listing::Records(narrowed),
    }
}
