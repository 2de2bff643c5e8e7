//! FAQ Search Common Library
//!
//! 検索・読み仮名正規化・50音索引・画面遷移のコア。
//! ファイルや端末の入出力は持たず、CLIから呼び出される。

pub mod error;
pub mod normalizer;
pub mod record;
pub mod search;
pub mod syllabary;
pub mod catalog;
pub mod navigation;
pub mod session;

pub use error::{Error, Result};
pub use record::{Dimension, FaqEntry, Finding, Incident, RawRow, Record, RecordKind};
pub use search::{search, MatchMode, SearchPolicy, SearchResultSet};
pub use syllabary::{classify, layout, SyllabaryIndex};
pub use catalog::{CatalogCache, Category, DataSource, RecordCatalog, SourceTable};
pub use navigation::{Action, Listing, NavigationState, Outcome, Page, View};
pub use session::{AuthGate, NoHitReporter, NullReporter, Session};
