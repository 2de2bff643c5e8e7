use clap::{Parser, Subcommand};
use faq_search_common::MatchMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "faq-search")]
#[command(about = "FAQ・点検指摘・事故事例の検索／50音ブラウズツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時は ~/.config/faq-search/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 分類の一覧を表示
    Categories,

    /// キーワードで検索して結果を表示
    Search {
        /// 分類ID または 表示名
        #[arg(required = true)]
        category: String,

        /// 検索キーワード（空白区切り）
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// 検索モード (and/or)。省略時は設定の既定値
        #[arg(short, long)]
        mode: Option<MatchMode>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話式で検索・50音・分類から探す
    Browse {
        /// 分類ID または 表示名（省略時は選択）
        category: Option<String>,
    },

    /// 50音の索引を表示
    Syllabary {
        /// 分類ID または 表示名
        #[arg(required = true)]
        category: String,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// データフォルダを設定
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// パスワードを設定（対話入力）
        #[arg(long)]
        set_password: bool,

        /// パスワードを解除
        #[arg(long)]
        clear_password: bool,
    },

    /// 該当なしだった検索の記録
    NoHits {
        /// 記録を削除
        #[arg(long)]
        clear: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },
}
