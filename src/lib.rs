//! faq-search - FAQ・点検指摘・事故事例の検索ツール
//!
//! 検索・50音索引・画面遷移は `faq_search_common` にあり、
//! このクレートはファイル読み込み・設定・認証・未ヒット記録と端末UIを受け持つ。

pub mod attachment;
pub mod auth;
pub mod browse;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod reporter;
pub mod source;
