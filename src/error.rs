use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqSearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("分類が見つかりません: {0}。`faq-search categories` で一覧を確認してください")]
    UnknownCategory(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("Excel読み込みエラー: {0}")]
    Excel(#[from] calamine::Error),

    #[error("CSV読み込みエラー: {0}")]
    Csv(String),

    #[error("パスワードが違います")]
    WrongPassword,

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Core(#[from] faq_search_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FaqSearchError>;

impl From<FaqSearchError> for faq_search_common::Error {
    /// データソース内部のエラーをカタログ構築エラーとして扱う
    fn from(e: FaqSearchError) -> Self {
        match e {
            FaqSearchError::Core(inner) => inner,
            other => faq_search_common::Error::DataSource(other.to_string()),
        }
    }
}
