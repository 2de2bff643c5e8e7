use crate::error::{FaqSearchError, Result};
use faq_search_common::{Category, Dimension, RecordKind, SearchPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 分類ごとのデータファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySource {
    pub id: String,
    pub label: String,
    /// データファイル（相対パスは data_dir 基準）
    pub path: PathBuf,
    #[serde(default)]
    pub kind: RecordKind,
    /// 絞り込み軸（省略時は種類ごとの既定）
    #[serde(default)]
    pub drill: Option<Vec<Dimension>>,
}

impl CategorySource {
    fn new(id: &str, label: &str, path: &str, kind: RecordKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
            kind,
            drill: None,
        }
    }

    /// コア側の分類定義に変換
    pub fn to_category(&self, data_dir: &Path) -> Category {
        let path = if self.path.is_relative() {
            data_dir.join(&self.path)
        } else {
            self.path.clone()
        };

        Category {
            id: self.id.clone(),
            label: self.label.clone(),
            kind: self.kind,
            location: path.to_string_lossy().to_string(),
            drill: self.drill.clone().unwrap_or_else(|| self.kind.default_drill()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub attachments_dir: PathBuf,
    /// 未ヒット記録ファイル（CSV）
    pub no_hit_log: PathBuf,
    pub categories: Vec<CategorySource>,
    pub search: SearchPolicy,
    /// パスワードのSHA-256（hex）。未設定なら認証なし
    pub password_hash: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（なければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FaqSearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("faq-search").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            attachments_dir: PathBuf::from("attachments"),
            no_hit_log: PathBuf::from("no_hit_log.csv"),
            categories: vec![
                CategorySource::new("construction", "工事関係", "faq.xlsx", RecordKind::Faq),
                CategorySource::new("office", "事務関係", "faq2.xlsx", RecordKind::Faq),
                CategorySource::new("other", "その他（作成中）", "other_faq.xlsx", RecordKind::Faq),
                CategorySource::new("findings", "点検指摘事項", "findings.xlsx", RecordKind::Finding),
                CategorySource::new("incidents", "事故事例", "incidents.xlsx", RecordKind::Incident),
            ],
            search: SearchPolicy::default(),
            password_hash: None,
        }
    }

    /// 分類IDまたは表示名で探す
    pub fn find_category(&self, key: &str) -> Result<&CategorySource> {
        self.categories
            .iter()
            .find(|c| c.id == key || c.label == key)
            .ok_or_else(|| FaqSearchError::UnknownCategory(key.to_string()))
    }

    /// data_dir 基準で解決した未ヒット記録ファイル
    pub fn no_hit_log_path(&self) -> PathBuf {
        resolve(&self.data_dir, &self.no_hit_log)
    }

    /// data_dir 基準で解決した添付ファイルフォルダ
    pub fn attachments_path(&self) -> PathBuf {
        resolve(&self.data_dir, &self.attachments_dir)
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(FaqSearchError::Config("分類が1つも定義されていません".into()));
        }
        for (i, c) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|other| other.id == c.id) {
                return Err(FaqSearchError::Config(format!("分類IDが重複しています: {}", c.id)));
            }
        }
        if self.search.min_token_len == 0 {
            return Err(FaqSearchError::Config("min_token_len は1以上にしてください".into()));
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
