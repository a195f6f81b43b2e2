use engine::item::{Item, ItemDamage};
use engine::{
    DamagePart, GroupConfig, RollGroup, RollGroupError, RollSelector, construct_parts,
};

fn item_with_parts(parts: Vec<DamagePart>) -> Item {
    Item {
        id: "item".into(),
        name: "Item".into(),
        damage: ItemDamage {
            parts,
            versatile: None,
        },
        ..Item::default()
    }
}

fn three_part_item() -> Item {
    item_with_parts(vec![
        DamagePart::new("1d6", Some("fire")),
        DamagePart::new("1d4", Some("cold")),
        DamagePart::new("2d6", Some("fire")),
    ])
}

#[test]
fn resolution_follows_source_order_not_selection_order() {
    let item = three_part_item();
    // positions entered back to front; the output must not care
    let config = GroupConfig {
        groups: vec![RollGroup::new("Fire", [2, 0])],
        ..GroupConfig::default()
    };

    let parts = construct_parts(&item, &config, &RollSelector::Group(0)).expect("resolves");
    assert_eq!(
        parts,
        vec![
            DamagePart::new("1d6", Some("fire")),
            DamagePart::new("2d6", Some("fire")),
        ]
    );
}

#[test]
fn positions_skip_blank_formulas() {
    // the blank entry does not occupy a position
    let item = item_with_parts(vec![
        DamagePart::new("1d6", Some("fire")),
        DamagePart::new("", None),
        DamagePart::new("2d6", Some("fire")),
    ]);
    let config = GroupConfig {
        groups: vec![RollGroup::new("All", [0, 1])],
        ..GroupConfig::default()
    };
    let parts = construct_parts(&item, &config, &RollSelector::Group(0)).expect("resolves");
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].formula(), "2d6");
}

#[test]
fn an_empty_group_fails_as_empty() {
    let item = three_part_item();
    let config = GroupConfig {
        groups: vec![RollGroup::new("Hollow", [])],
        ..GroupConfig::default()
    };
    assert_eq!(
        construct_parts(&item, &config, &RollSelector::Group(0)),
        Err(RollGroupError::EmptyGroup)
    );
}

#[test]
fn an_out_of_range_group_fails_as_a_stale_selector() {
    let item = three_part_item();
    let config = GroupConfig {
        groups: vec![RollGroup::new("Only", [0])],
        ..GroupConfig::default()
    };
    let error = construct_parts(&item, &config, &RollSelector::Group(3)).expect_err("stale");
    assert_eq!(error, RollGroupError::InvalidSelector(3));
    // but the user reads it as an empty group either way
    assert_eq!(error.i18n_key(), "ROLLGROUPS.RollGroupEmpty");
}

#[test]
fn positions_beyond_the_part_list_resolve_to_nothing() {
    let item = three_part_item();
    let config = GroupConfig {
        groups: vec![RollGroup::new("Stale", [7, 8])],
        ..GroupConfig::default()
    };
    assert_eq!(
        construct_parts(&item, &config, &RollSelector::Group(0)),
        Err(RollGroupError::EmptyGroup)
    );
}

#[test]
fn legacy_position_list_selectors_still_resolve() {
    let item = three_part_item();
    let config = GroupConfig::default();
    let selector = RollSelector::parse("0;2").expect("parses");
    assert_eq!(selector, RollSelector::Positions(vec![0, 2]));

    let parts = construct_parts(&item, &config, &selector).expect("resolves");
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].formula(), "1d6");
    assert_eq!(parts[1].formula(), "2d6");
}

#[test]
fn selector_parsing() {
    assert_eq!(RollSelector::parse("2"), Some(RollSelector::Group(2)));
    assert_eq!(
        RollSelector::parse(" 1 ; 0 "),
        Some(RollSelector::Positions(vec![1, 0]))
    );
    assert_eq!(RollSelector::parse(""), None);
    assert_eq!(RollSelector::parse("fish"), None);
}
