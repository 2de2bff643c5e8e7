//! セッションモジュール
//!
//! 1ユーザー分の画面状態と、共有カタログ・未ヒット記録先を束ねる。
//! 認証ゲートが通っていないとセッションは開けない。

use crate::catalog::RecordCatalog;
use crate::error::{Error, Result};
use crate::navigation::{Action, Listing, NavigationState, Outcome};
use crate::record::Record;
use crate::search::SearchPolicy;
use std::sync::Arc;

/// 検索で該当がなかったときの記録先
pub trait NoHitReporter {
    fn report(&self, category: &str, query: &str) -> Result<()>;
}

/// 何も記録しない
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl NoHitReporter for NullReporter {
    fn report(&self, _category: &str, _query: &str) -> Result<()> {
        Ok(())
    }
}

/// 認証状態
pub trait AuthGate {
    fn is_authenticated(&self) -> bool;
}

/// 1ユーザー分のセッション
pub struct Session {
    catalog: Arc<RecordCatalog>,
    state: NavigationState,
    policy: SearchPolicy,
    reporter: Arc<dyn NoHitReporter>,
}

impl Session {
    /// セッションを開く（未認証なら `Error::Auth`）
    pub fn open(
        gate: &dyn AuthGate,
        catalog: Arc<RecordCatalog>,
        policy: SearchPolicy,
        reporter: Arc<dyn NoHitReporter>,
    ) -> Result<Self> {
        if !gate.is_authenticated() {
            return Err(Error::Auth);
        }

        tracing::debug!(category = %catalog.category().id, records = catalog.len(), "セッション開始");

        Ok(Self {
            catalog,
            state: NavigationState::new(),
            policy,
            reporter,
        })
    }

    pub fn catalog(&self) -> &RecordCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// 操作を1つ処理する
    ///
    /// 該当なしの検索は未ヒット記録先に渡す。記録に失敗しても検索は失敗させない。
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let outcome = self.state.apply(action, &self.catalog, &self.policy)?;

        if let Outcome::NoHits { query } = &outcome {
            let label = &self.catalog.category().label;
            if let Err(e) = self.reporter.report(label, query) {
                tracing::warn!(category = %label, %query, error = %e, "未ヒット記録に失敗");
            }
        }

        Ok(outcome)
    }

    /// 現在の画面の表示内容
    pub fn listing(&self) -> Listing {
        self.state.listing(&self.catalog)
    }

    /// 詳細表示中のレコード
    pub fn current_record(&self) -> Option<&Record> {
        self.state
            .selected_record()
            .and_then(|i| self.catalog.get(i))
    }
}
