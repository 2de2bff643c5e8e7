//! 読み仮名正規化モジュール
//!
//! 漢字・カタカナ・ひらがな混じりの文字列を、ひらがなの読みに変換する。
//! 50音グルーピング用に濁点・半濁点を落としたキーもここで作る。
//!
//! - `to_reading`: 表記 → 読み（ひらがな）
//! - `fold_voicing`: 1文字から濁点・半濁点を除去（が → か、ぱ → は）
//! - `grouping_key`: 読み + 濁点除去 + 記号除去。表示には使わない

use unicode_normalization::UnicodeNormalization;

/// 結合用濁点 (U+3099)
const COMBINING_VOICED: char = '\u{3099}';
/// 結合用半濁点 (U+309A)
const COMBINING_SEMI_VOICED: char = '\u{309A}';
/// 長音記号
const PROLONGED_SOUND: char = 'ー';

/// ひらがなか（踊り字を含む）
pub fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309E}')
}

/// ひらがなに変換できるカタカナか
pub fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30F6}' | '\u{30FD}'..='\u{30FE}')
}

/// 漢字（読みの辞書引きが必要な文字）か
pub fn is_kanji(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' | '々' | '〆'
    )
}

/// カタカナ1文字をひらがなに変換（対象外の文字はそのまま）
pub fn katakana_to_hiragana(c: char) -> char {
    if is_katakana(c) {
        char::from_u32(c as u32 - 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// 表記を読み（ひらがな）に変換する
///
/// 半角カナ・全角英数はNFKCで揃えてから変換する。
/// 漢字を含む場合のみ辞書変換を行い、かな・英数字だけの文字列は
/// カタカナ→ひらがなの置換だけで済ませる（ひらがなはそのまま通る）。
pub fn to_reading(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let normalized: String = text.nfkc().collect();

    let converted = if normalized.chars().any(is_kanji) {
        kakasi::convert(&normalized).hiragana
    } else {
        normalized
    };

    converted.chars().map(katakana_to_hiragana).collect()
}

/// 1文字から濁点・半濁点を取り除く
///
/// NFDで基底文字と結合文字に分解し、濁点・半濁点を捨ててから再合成する。
/// 再合成の結果が1文字にならない場合は元の文字を返す。
pub fn fold_voicing(c: char) -> char {
    let folded: String = std::iter::once(c)
        .nfd()
        .filter(|&m| m != COMBINING_VOICED && m != COMBINING_SEMI_VOICED)
        .nfc()
        .collect();

    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// グルーピングキーに残す文字か
fn is_key_char(c: char) -> bool {
    is_hiragana(c) || c == PROLONGED_SOUND || c.is_ascii_alphanumeric()
}

/// 50音グルーピング用のキーを作る
///
/// 読みに変換し、1文字ずつ濁点を落とし、ひらがな・長音・英数字以外を除く。
/// 英字は小文字に揃える。結果は表示用の文字列ではない。
pub fn grouping_key(text: &str) -> String {
    to_reading(text)
        .chars()
        .map(fold_voicing)
        .filter(|&c| is_key_char(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// グルーピングキーを再適用する（既にキーになった文字列用）
pub fn fold_key(key: &str) -> String {
    key.chars()
        .map(fold_voicing)
        .filter(|&c| is_key_char(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
