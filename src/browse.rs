//! 対話式ブラウズモジュール
//!
//! セッションの画面ごとにメニューを出し、選ばれた操作をセッションに渡す。
//! 入力ミスや該当なしは表示して続行し、それ以外のエラーで終了する。

use crate::attachment::AttachmentResolver;
use crate::error::Result;
use crate::render;
use dialoguer::{Input, Select};
use faq_search_common::syllabary::OTHER_ROW;
use faq_search_common::{Action, Listing, MatchMode, Outcome, Session, View};

/// メニューの選択肢
#[derive(Debug, Clone, PartialEq)]
pub enum MenuChoice {
    /// セッションに渡す操作
    Do(Action),
    /// キーワードを入力して検索
    Search,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub choice: MenuChoice,
}

impl MenuItem {
    fn new(label: impl Into<String>, choice: MenuChoice) -> Self {
        Self { label: label.into(), choice }
    }

    fn action(label: impl Into<String>, action: Action) -> Self {
        Self::new(label, MenuChoice::Do(action))
    }
}

/// 現在の画面のメニュー
pub fn menu_for(session: &Session) -> Vec<MenuItem> {
    let catalog = session.catalog();
    let view = session.state().view();
    let mut items = Vec::new();

    match session.listing() {
        Listing::Records(entries) => {
            for (position, &i) in entries.iter().enumerate() {
                if let Some(record) = catalog.get(i) {
                    items.push(MenuItem::action(
                        render::summary_line(position, record),
                        Action::PickRecord(position),
                    ));
                }
            }
        }
        Listing::Values { values, .. } => {
            for value in values {
                let label = render::value_label(&value).to_string();
                items.push(MenuItem::action(label, Action::PickValue(value)));
            }
        }
        Listing::Syllables(layout) => {
            let rows = layout
                .rows
                .iter()
                .map(|row| (row.name, &row.keys))
                .chain(std::iter::once((OTHER_ROW, &layout.other)));
            for (row, keys) in rows {
                for &(c, n) in keys {
                    items.push(MenuItem::action(
                        format!("{} ‐ {} ({}件)", row, c, n),
                        Action::PickSyllable(c),
                    ));
                }
            }
        }
        Listing::Record(_) | Listing::Empty => {}
    }

    match view {
        View::Home => {
            items.push(MenuItem::new("キーワード検索", MenuChoice::Search));
            items.push(MenuItem::action("全件一覧", Action::ShowAll));
            items.push(MenuItem::action("50音から探す", Action::ShowSyllabary));
            if !catalog.category().drill.is_empty() {
                items.push(MenuItem::action("分類から探す", Action::BrowseCategories));
            }
        }
        View::List => {
            items.push(MenuItem::action("50音から探す", Action::ShowSyllabary));
        }
        _ => {}
    }

    if view != View::Home {
        items.push(MenuItem::action("戻る", Action::Back));
        items.push(MenuItem::action("ホームに戻る", Action::Home));
    }
    items.push(MenuItem::new("終了", MenuChoice::Quit));
    items
}

/// 対話ループ
pub fn run_browse(session: &mut Session, resolver: &AttachmentResolver) -> Result<()> {
    println!("📋 {}（{}件）", session.catalog().category().label, session.catalog().len());

    loop {
        print_header(session);
        if let Some(record) = session.current_record() {
            render::print_detail(record, resolver);
        }

        let items = menu_for(session);
        let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
        let selected = Select::new()
            .with_prompt("選択してください")
            .items(&labels)
            .default(0)
            .interact()?;

        let action = match &items[selected].choice {
            MenuChoice::Quit => break,
            MenuChoice::Do(action) => action.clone(),
            MenuChoice::Search => prompt_search(session.policy().default_mode)?,
        };

        match session.dispatch(action) {
            Ok(Outcome::Searched { hits }) => println!("✔ {}件見つかりました", hits),
            Ok(Outcome::NoHits { query }) => println!("⚠ 「{}」に該当する項目はありません", query),
            Ok(Outcome::Moved) => {}
            Err(e) if e.is_recoverable() => {
                println!("⚠ {}", e);
                println!("  「ホームに戻る」で最初の画面に戻れます");
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("終了します");
    Ok(())
}

fn print_header(session: &Session) {
    let state = session.state();
    let mut crumbs = vec![state.view().to_string()];
    if let Some(c) = state.selected_syllable() {
        crumbs.push(format!("「{}」", c));
    }
    crumbs.extend(state.selected_values().iter().map(|v| render::value_label(v).to_string()));
    if let Some(results) = state.results().filter(|_| state.view() == View::Home) {
        crumbs.push(format!("検索結果 {}件（{}）", results.len(), results.mode()));
    }
    println!("\n--- {} ---", crumbs.join(" > "));
}

/// キーワードと検索モードを入力
fn prompt_search(default_mode: MatchMode) -> Result<Action> {
    let query: String = Input::new()
        .with_prompt("検索キーワード（空白区切り）")
        .allow_empty(true)
        .interact_text()?;

    let modes = [MatchMode::And, MatchMode::Or];
    let labels = ["AND（すべて含む）", "OR（いずれかを含む）"];
    let default = modes.iter().position(|m| *m == default_mode).unwrap_or(0);
    let selected = Select::new()
        .with_prompt("検索モード")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(Action::Submit { query, mode: modes[selected] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_search_common::{
        AuthGate, Category, Dimension, FaqEntry, Finding, NullReporter, Record, RecordCatalog,
        RecordKind, SearchPolicy,
    };
    use std::sync::Arc;

    struct Open;

    impl AuthGate for Open {
        fn is_authenticated(&self) -> bool {
            true
        }
    }

    fn faq_session() -> Session {
        let category = Category {
            id: "office".into(),
            label: "事務関係".into(),
            kind: RecordKind::Faq,
            location: "faq2.xlsx".into(),
            drill: Vec::new(),
        };
        let records = vec![
            Record::Faq(FaqEntry::new("交通費の精算", "月末締め", "交通費 精算", Vec::new())),
            Record::Faq(FaqEntry::new("休暇の申請", "前日まで", "休暇", Vec::new())),
        ];
        let catalog = Arc::new(RecordCatalog::from_records(category, "v1", records));
        Session::open(&Open, catalog, SearchPolicy::default(), Arc::new(NullReporter)).unwrap()
    }

    fn choices(items: &[MenuItem]) -> Vec<MenuChoice> {
        items.iter().map(|item| item.choice.clone()).collect()
    }

    #[test]
    fn test_home_menu_without_drill() {
        let session = faq_session();
        let items = menu_for(&session);
        assert_eq!(
            choices(&items),
            vec![
                MenuChoice::Search,
                MenuChoice::Do(Action::ShowAll),
                MenuChoice::Do(Action::ShowSyllabary),
                MenuChoice::Quit,
            ]
        );
    }

    #[test]
    fn test_home_menu_lists_results_first() {
        let mut session = faq_session();
        session
            .dispatch(Action::Submit { query: "交通費".into(), mode: MatchMode::And })
            .unwrap();
        let items = menu_for(&session);
        assert_eq!(items[0].choice, MenuChoice::Do(Action::PickRecord(0)));
        assert_eq!(items[0].label, "  1. 交通費の精算");
        assert_eq!(items[1].choice, MenuChoice::Search);
    }

    #[test]
    fn test_list_menu_has_back_and_home() {
        let mut session = faq_session();
        session.dispatch(Action::ShowAll).unwrap();
        let items = choices(&menu_for(&session));
        assert_eq!(items.len(), 2 + 4);
        assert!(items.contains(&MenuChoice::Do(Action::Back)));
        assert!(items.contains(&MenuChoice::Do(Action::Home)));
        assert!(!items.contains(&MenuChoice::Search));
    }

    #[test]
    fn test_syllabary_menu() {
        let mut session = faq_session();
        session.dispatch(Action::ShowSyllabary).unwrap();
        let items = menu_for(&session);
        assert_eq!(items[0].label, "か行 ‐ き (1件)");
        assert_eq!(items[0].choice, MenuChoice::Do(Action::PickSyllable('き')));
        assert_eq!(items[1].label, "か行 ‐ こ (1件)");
    }

    #[test]
    fn test_drill_menu_shows_values() {
        let category = Category {
            id: "findings".into(),
            label: "点検指摘事項".into(),
            kind: RecordKind::Finding,
            location: "findings.xlsx".into(),
            drill: vec![Dimension::EquipmentName, Dimension::Category],
        };
        let finding = |equipment: &str, category: &str| {
            Record::Finding(Finding {
                equipment_name: equipment.into(),
                category: category.into(),
                issue: "指摘".into(),
                response: String::new(),
            })
        };
        let records = vec![finding("受変電設備", "漏電"), finding("消火設備", "")];
        let catalog = Arc::new(RecordCatalog::from_records(category, "v1", records));
        let mut session =
            Session::open(&Open, catalog, SearchPolicy::default(), Arc::new(NullReporter)).unwrap();

        assert!(menu_for(&session)
            .iter()
            .any(|item| item.choice == MenuChoice::Do(Action::BrowseCategories)));

        session.dispatch(Action::BrowseCategories).unwrap();
        let labels: Vec<String> = menu_for(&session).into_iter().map(|item| item.label).collect();
        assert_eq!(labels[..2], ["受変電設備".to_string(), "消火設備".to_string()]);

        session.dispatch(Action::PickValue("消火設備".into())).unwrap();
        let items = menu_for(&session);
        assert_eq!(items[0].label, render::EMPTY_VALUE_LABEL);
        assert_eq!(items[0].choice, MenuChoice::Do(Action::PickValue(String::new())));
    }
}
