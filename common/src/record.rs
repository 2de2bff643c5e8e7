//! レコード型定義
//!
//! 閲覧対象の1件を表す。3種類の形を `Record` 列挙型で統一する:
//! - Faq: 質問・回答・関連ワード・添付ファイル（+ 派生した読み）
//! - Finding: 点検指摘事項
//! - Incident: 事故事例

use crate::normalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// データソースから受け取る1行（列名 → 値、欠損は空文字）
pub type RawRow = HashMap<String, String>;

/// レコードの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Faq,
    Finding,
    Incident,
}

impl RecordKind {
    /// 絞り込み（ドリルダウン）の既定の軸
    pub fn default_drill(&self) -> Vec<Dimension> {
        match self {
            RecordKind::Faq => Vec::new(),
            RecordKind::Finding => vec![Dimension::EquipmentName, Dimension::Category],
            RecordKind::Incident => vec![
                Dimension::SiteName,
                Dimension::EquipmentName,
                Dimension::Category,
            ],
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "faq" => Ok(RecordKind::Faq),
            "finding" | "findings" | "指摘" => Ok(RecordKind::Finding),
            "incident" | "incidents" | "事故" => Ok(RecordKind::Incident),
            _ => Err(format!("Unknown kind: {}. Use faq, finding, or incident", s)),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Faq => write!(f, "faq"),
            RecordKind::Finding => write!(f, "finding"),
            RecordKind::Incident => write!(f, "incident"),
        }
    }
}

/// 絞り込みの軸（指摘・事故のカテゴリ項目）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    SiteName,
    EquipmentName,
    DetailEquipmentName,
    Category,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::SiteName => write!(f, "現場名"),
            Dimension::EquipmentName => write!(f, "設備名"),
            Dimension::DetailEquipmentName => write!(f, "詳細設備名"),
            Dimension::Category => write!(f, "分類"),
        }
    }
}

/// FAQ 1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub related_words: String,
    pub attachments: Vec<String>,
    /// 質問の読み（濁点除去済み）。50音分類のキーで、表示には使わない
    reading: String,
}

impl FaqEntry {
    pub fn new(question: &str, answer: &str, related_words: &str, attachments: Vec<String>) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            related_words: related_words.to_string(),
            attachments,
            reading: normalizer::grouping_key(question),
        }
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }
}

/// 点検指摘事項 1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub equipment_name: String,
    pub category: String,
    pub issue: String,
    pub response: String,
}

/// 事故事例 1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub site_name: String,
    pub equipment_name: String,
    pub detail_equipment_name: String,
    pub category: String,
    pub content: String,
    pub response: String,
}

/// 閲覧対象レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Faq(FaqEntry),
    Finding(Finding),
    Incident(Incident),
}

/// 列名の候補（日本語見出し + 英語キー）
const FAQ_COLUMNS: [(&str, &str); 4] = [
    ("質問", "question"),
    ("回答", "answer"),
    ("関連ワード", "relatedWords"),
    ("添付ファイル", "attachments"),
];

const FINDING_COLUMNS: [(&str, &str); 4] = [
    ("設備名", "equipmentName"),
    ("分類", "category"),
    ("指摘事項", "issue"),
    ("対応", "response"),
];

const INCIDENT_COLUMNS: [(&str, &str); 6] = [
    ("現場名", "siteName"),
    ("設備名", "equipmentName"),
    ("詳細設備名", "detailEquipmentName"),
    ("分類", "category"),
    ("内容", "content"),
    ("対応", "response"),
];

/// 日本語見出し・英語キーのどちらかで列を取り出す
fn column<'a>(row: &'a RawRow, (ja, en): (&str, &str)) -> &'a str {
    row.get(ja)
        .or_else(|| row.get(en))
        .map(|v| v.trim())
        .unwrap_or("")
}

/// 添付ファイル列（カンマ区切り）を分割
pub fn split_attachments(value: &str) -> Vec<String> {
    value
        .split([',', '、', '，'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

impl Record {
    /// 生データの1行からレコードを作る。全項目が空なら `None`
    pub fn from_row(kind: RecordKind, row: &RawRow) -> Option<Self> {
        let record = match kind {
            RecordKind::Faq => {
                let [q, a, r, att] = FAQ_COLUMNS.map(|c| column(row, c));
                Record::Faq(FaqEntry::new(q, a, r, split_attachments(att)))
            }
            RecordKind::Finding => {
                let [equipment_name, category, issue, response] =
                    FINDING_COLUMNS.map(|c| column(row, c).to_string());
                Record::Finding(Finding { equipment_name, category, issue, response })
            }
            RecordKind::Incident => {
                let [site_name, equipment_name, detail_equipment_name, category, content, response] =
                    INCIDENT_COLUMNS.map(|c| column(row, c).to_string());
                Record::Incident(Incident {
                    site_name,
                    equipment_name,
                    detail_equipment_name,
                    category,
                    content,
                    response,
                })
            }
        };

        if record.detail_fields().iter().all(|(_, v)| v.is_empty()) {
            None
        } else {
            Some(record)
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Faq(_) => RecordKind::Faq,
            Record::Finding(_) => RecordKind::Finding,
            Record::Incident(_) => RecordKind::Incident,
        }
    }

    /// 検索対象の文字列（フィールドごとに小文字化し空白で連結）
    pub fn haystack(&self) -> String {
        let fields: Vec<&str> = match self {
            Record::Faq(f) => vec![f.question.as_str(), f.related_words.as_str()],
            Record::Finding(f) => vec![
                f.equipment_name.as_str(),
                f.category.as_str(),
                f.issue.as_str(),
            ],
            Record::Incident(i) => vec![
                i.site_name.as_str(),
                i.equipment_name.as_str(),
                i.detail_equipment_name.as_str(),
                i.category.as_str(),
                i.content.as_str(),
            ],
        };

        fields
            .iter()
            .map(|f| f.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 一覧表示用の見出し
    pub fn title(&self) -> String {
        match self {
            Record::Faq(f) => f.question.clone(),
            Record::Finding(f) => format!("{}／{}", f.equipment_name, f.issue),
            Record::Incident(i) => format!("{}／{}／{}", i.site_name, i.equipment_name, i.content),
        }
    }

    /// 50音分類のキー。FAQは取り込み時に作った読みを使う
    pub fn reading_key(&self) -> String {
        match self {
            Record::Faq(f) => f.reading.clone(),
            Record::Finding(f) => normalizer::grouping_key(&f.equipment_name),
            Record::Incident(i) => normalizer::grouping_key(&i.equipment_name),
        }
    }

    /// 絞り込み軸の値
    pub fn dimension(&self, dimension: Dimension) -> &str {
        match (self, dimension) {
            (Record::Finding(f), Dimension::EquipmentName) => &f.equipment_name,
            (Record::Finding(f), Dimension::Category) => &f.category,
            (Record::Incident(i), Dimension::SiteName) => &i.site_name,
            (Record::Incident(i), Dimension::EquipmentName) => &i.equipment_name,
            (Record::Incident(i), Dimension::DetailEquipmentName) => &i.detail_equipment_name,
            (Record::Incident(i), Dimension::Category) => &i.category,
            _ => "",
        }
    }

    /// 詳細表示用の（見出し, 値）一覧
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Record::Faq(f) => vec![
                ("質問", f.question.clone()),
                ("回答", f.answer.clone()),
                ("関連ワード", f.related_words.clone()),
                ("添付ファイル", f.attachments.join(", ")),
            ],
            Record::Finding(f) => vec![
                ("設備名", f.equipment_name.clone()),
                ("分類", f.category.clone()),
                ("指摘事項", f.issue.clone()),
                ("対応", f.response.clone()),
            ],
            Record::Incident(i) => vec![
                ("現場名", i.site_name.clone()),
                ("設備名", i.equipment_name.clone()),
                ("詳細設備名", i.detail_equipment_name.clone()),
                ("分類", i.category.clone()),
                ("内容", i.content.clone()),
                ("対応", i.response.clone()),
            ],
        }
    }

    /// 添付ファイル名（FAQ以外は空）
    pub fn attachments(&self) -> &[String] {
        match self {
            Record::Faq(f) => &f.attachments,
            _ => &[],
        }
    }
}
