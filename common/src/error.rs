//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 空の検索語など、入力として受け付けられない値
    #[error("入力エラー: {0}")]
    Validation(String),

    /// 範囲外の選択番号、存在しない分類・行キー
    #[error("見つかりません: {0}")]
    NotFound(String),

    /// 現在の画面では実行できない操作
    #[error("この画面では「{action}」は実行できません（現在: {from}）")]
    InvalidTransition { from: String, action: String },

    /// カタログを構築できなかった
    #[error("データ読み込みエラー: {0}")]
    DataSource(String),

    #[error("認証されていません")]
    Auth,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 画面遷移層で回復できるエラーか（メッセージ表示＋ホームへ戻る導線）
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::NotFound(_) | Error::InvalidTransition { .. }
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
