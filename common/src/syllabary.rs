//! 50音索引モジュール
//!
//! レコードを読みの先頭文字（濁点除去済み）でグループ化する。
//! 索引そのものはキー文字の昇順。あ行〜わ行の並びは `layout` で
//! 索引の上に重ねる表示順で、行に属さないキー（英数字など）は
//! 「その他」にまとめる。

use crate::record::Record;
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};

/// 50音の行と、その行に属する先頭文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabaryRow {
    pub name: &'static str,
    pub members: &'static [char],
}

static ROWS: [SyllabaryRow; 10] = [
    SyllabaryRow { name: "あ行", members: &['あ', 'い', 'う', 'え', 'お'] },
    SyllabaryRow { name: "か行", members: &['か', 'き', 'く', 'け', 'こ'] },
    SyllabaryRow { name: "さ行", members: &['さ', 'し', 'す', 'せ', 'そ'] },
    SyllabaryRow { name: "た行", members: &['た', 'ち', 'つ', 'て', 'と'] },
    SyllabaryRow { name: "な行", members: &['な', 'に', 'ぬ', 'ね', 'の'] },
    SyllabaryRow { name: "は行", members: &['は', 'ひ', 'ふ', 'へ', 'ほ'] },
    SyllabaryRow { name: "ま行", members: &['ま', 'み', 'む', 'め', 'も'] },
    SyllabaryRow { name: "や行", members: &['や', 'ゆ', 'よ'] },
    SyllabaryRow { name: "ら行", members: &['ら', 'り', 'る', 'れ', 'ろ'] },
    SyllabaryRow { name: "わ行", members: &['わ', 'を', 'ん'] },
];

/// 「その他」グループの表示名
pub const OTHER_ROW: &str = "その他";

lazy_static! {
    /// 先頭文字 → 行番号
    static ref ROW_OF_CHAR: HashMap<char, usize> = ROWS
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.members.iter().map(move |&c| (c, i)))
        .collect();
}

/// 行の一覧（あ行〜わ行の順）
pub fn row_order() -> &'static [SyllabaryRow] {
    &ROWS
}

/// 先頭文字が属する行
pub fn row_of(c: char) -> Option<&'static SyllabaryRow> {
    ROW_OF_CHAR.get(&c).map(|&i| &ROWS[i])
}

/// 先頭文字 → レコード位置の索引
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyllabaryIndex {
    groups: BTreeMap<char, Vec<usize>>,
}

impl SyllabaryIndex {
    /// 先頭文字のグループ
    pub fn get(&self, key: char) -> Option<&[usize]> {
        self.groups.get(&key).map(|v| v.as_slice())
    }

    /// キー文字（昇順）
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[usize])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// グループ数
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 全グループの合計件数
    pub fn total(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }
}

/// レコードを読みの先頭文字でグループ化する
///
/// 読みが空のレコードはどのグループにも入らない。
/// 同じグループに内容の等しいレコードは重ねて入れない。
pub fn classify(records: &[Record]) -> SyllabaryIndex {
    let mut groups: BTreeMap<char, Vec<usize>> = BTreeMap::new();

    for (i, record) in records.iter().enumerate() {
        let Some(key) = record.reading_key().chars().next() else {
            continue;
        };

        let group = groups.entry(key).or_default();
        if group.iter().any(|&j| records[j] == *record) {
            continue;
        }
        group.push(i);
    }

    tracing::debug!(groups = groups.len(), records = records.len(), "50音索引を構築");

    SyllabaryIndex { groups }
}

/// 表示用の行：行名と、索引に存在する先頭文字（件数付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub name: &'static str,
    pub keys: Vec<(char, usize)>,
}

/// 索引を行順に並べ直したもの
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLayout {
    /// 該当のある行のみ、あ行〜わ行の順
    pub rows: Vec<RowEntry>,
    /// 行に属さないキー（文字コード順）
    pub other: Vec<(char, usize)>,
}

impl RowLayout {
    /// 行名からエントリを引く（「その他」も可）
    pub fn row(&self, name: &str) -> Option<RowEntry> {
        if name == OTHER_ROW {
            return (!self.other.is_empty()).then(|| RowEntry {
                name: OTHER_ROW,
                keys: self.other.clone(),
            });
        }
        self.rows.iter().find(|r| r.name == name).cloned()
    }
}

/// 索引を50音の行順に並べる
pub fn layout(index: &SyllabaryIndex) -> RowLayout {
    let rows = ROWS
        .iter()
        .filter_map(|row| {
            let keys: Vec<(char, usize)> = row
                .members
                .iter()
                .filter_map(|&c| index.get(c).map(|g| (c, g.len())))
                .collect();
            (!keys.is_empty()).then_some(RowEntry { name: row.name, keys })
        })
        .collect();

    let other = index
        .iter()
        .filter(|(c, _)| row_of(*c).is_none())
        .map(|(c, g)| (c, g.len()))
        .collect();

    RowLayout { rows, other }
}
