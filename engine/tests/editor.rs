use engine::item::{Item, ItemDamage};
use engine::store::{FlagStore, StoreError};
use engine::{DamagePart, GroupEditor, I18n, MemoryStore};
use serde_json::Value;

fn two_part_item() -> Item {
    Item {
        id: "sword".into(),
        name: "Sword".into(),
        damage: ItemDamage {
            parts: vec![
                DamagePart::new("1d8", Some("slashing")),
                DamagePart::new("1d6", Some("fire")),
            ],
            versatile: None,
        },
        ..Item::default()
    }
}

fn editor_with_three_groups() -> (GroupEditor, MemoryStore) {
    let i18n = I18n::en();
    let mut store = MemoryStore::new();
    let item = two_part_item();
    let mut editor = GroupEditor::open(&item, &store, &i18n);
    // the default group plus two more
    editor.add_group();
    editor.add_group();
    editor.rename_group(0, "First");
    editor.rename_group(1, "Second");
    editor.rename_group(2, "Third");
    editor.toggle_member(1, 0);
    editor.toggle_member(2, 1);
    editor.commit(&mut store, &i18n).expect("seed commit");
    (editor, store)
}

#[test]
fn opening_an_unconfigured_item_seeds_the_default_group() {
    let i18n = I18n::en();
    let store = MemoryStore::new();
    let editor = GroupEditor::open(&two_part_item(), &store, &i18n);
    assert_eq!(editor.config().groups.len(), 1);
    assert_eq!(editor.config().groups[0].parts, vec![0, 1]);
}

#[test]
fn opening_a_configured_item_reads_the_stored_flag() {
    let i18n = I18n::en();
    let mut item = two_part_item();
    item.flags = serde_json::from_value(serde_json::json!({
        "rollgroups": {"config": {"groups": [{"label": "Burn", "parts": [1]}]}}
    }))
    .expect("flags");
    let store = MemoryStore::from_items([&item]);

    let editor = GroupEditor::open(&item, &store, &i18n);
    assert_eq!(editor.config().groups.len(), 1);
    assert_eq!(editor.config().groups[0].label, "Burn");
}

#[test]
fn add_group_appends_blank_with_nothing_selected() {
    let i18n = I18n::en();
    let store = MemoryStore::new();
    let mut editor = GroupEditor::open(&two_part_item(), &store, &i18n);
    editor.add_group();
    let added = &editor.config().groups[1];
    assert_eq!(added.label, "");
    assert!(added.parts.is_empty());
}

#[test]
fn deleting_the_versatile_group_clears_the_reference() {
    let (mut editor, _store) = editor_with_three_groups();
    editor.set_versatile(Some(1));
    editor.delete_group(1);
    assert_eq!(editor.config().versatile, None);
}

#[test]
fn deleting_below_the_versatile_group_decrements_the_reference() {
    let (mut editor, _store) = editor_with_three_groups();
    editor.set_versatile(Some(2));
    editor.delete_group(0);
    assert_eq!(editor.config().versatile, Some(1));
}

#[test]
fn deleting_above_the_versatile_group_leaves_the_reference_alone() {
    let (mut editor, _store) = editor_with_three_groups();
    editor.set_versatile(Some(0));
    editor.delete_group(2);
    assert_eq!(editor.config().versatile, Some(0));
}

#[test]
fn toggle_member_flips_membership() {
    let (mut editor, _store) = editor_with_three_groups();
    assert!(editor.config().groups[1].contains(0));
    editor.toggle_member(1, 0);
    assert!(!editor.config().groups[1].contains(0));
    editor.toggle_member(1, 0);
    assert!(editor.config().groups[1].contains(0));
}

#[test]
fn out_of_bounds_edits_are_silent_no_ops() {
    let (mut editor, _store) = editor_with_three_groups();
    let before = editor.config().clone();

    editor.delete_group(9);
    editor.toggle_member(9, 0);
    editor.toggle_member(0, 9);
    editor.rename_group(9, "nope");
    editor.set_versatile(Some(9));

    assert_eq!(editor.config(), &before);
}

#[test]
fn versatile_choices_track_structural_edits() {
    let i18n = I18n::en();
    let (mut editor, _store) = editor_with_three_groups();
    editor.add_group();
    let choices = editor.versatile_choices(&i18n);
    assert_eq!(choices.len(), 4);
    assert_eq!(choices[1], (1, "Second".to_string()));
    // the fresh group shows the placeholder, not an empty label
    assert_eq!(choices[3].1, "New Group");

    editor.delete_group(0);
    assert_eq!(editor.versatile_choices(&i18n).len(), 3);
}

#[test]
fn commit_persists_the_normalized_form() {
    let i18n = I18n::en();
    let (mut editor, mut store) = editor_with_three_groups();
    editor.add_group(); // stays empty; must not be persisted
    editor.rename_group(1, "   ");
    editor.commit(&mut store, &i18n).expect("commit");

    let payload = store.get_flag("sword").unwrap();
    let groups = payload["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1]["label"], "New Group");
}

struct RejectingStore;

impl FlagStore for RejectingStore {
    fn get_flag(&self, _item_id: &str) -> Option<Value> {
        None
    }
    fn set_flag(&mut self, _item_id: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError("storage unavailable".into()))
    }
}

#[test]
fn a_rejected_commit_keeps_the_working_copy_for_retry() {
    let i18n = I18n::en();
    let item = two_part_item();
    let mut store = RejectingStore;
    let mut editor = GroupEditor::open(&item, &store, &i18n);
    editor.rename_group(0, "Precious edits");

    let error = editor.commit(&mut store, &i18n).expect_err("write must fail");
    assert_eq!(error.i18n_key(), "ROLLGROUPS.PersistenceFailed");
    assert_eq!(editor.config().groups[0].label, "Precious edits");
}
