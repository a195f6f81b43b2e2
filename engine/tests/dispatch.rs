use engine::item::{Actor, CardEvent, ChatMessage, Item, ItemDamage, World};
use engine::{
    DamagePart, DamageRoll, DamageRoller, I18n, RollGroupError, RollRequest, SystemConfig,
    roll_damage_group, roll_from_card,
};
use serde_json::json;

/// Captures every handoff instead of rolling anything.
#[derive(Default)]
struct RecordingRoller {
    calls: Vec<(Item, RollRequest)>,
}

impl DamageRoller for RecordingRoller {
    fn roll_damage(&mut self, item: &Item, request: &RollRequest) -> Option<DamageRoll> {
        self.calls.push((item.clone(), request.clone()));
        Some(DamageRoll {
            title: request.title.clone(),
            flavor: request.flavor.clone(),
            rolls: Vec::new(),
            total: 0,
        })
    }
}

fn grouped_item() -> Item {
    Item {
        id: "torch-sword".into(),
        name: "Torch Sword".into(),
        actor: Some("hero".into()),
        damage: ItemDamage {
            parts: vec![
                DamagePart::new("1d8", Some("slashing")),
                DamagePart::new("1d6", Some("fire")),
            ],
            versatile: Some("1d10".into()),
        },
        flags: serde_json::from_value(json!({
            "rollgroups": {
                "config": {
                    "groups": [
                        {"label": "Hit", "parts": [0]},
                        {"label": "Burn", "parts": [1]}
                    ],
                    "versatile": 0
                }
            }
        }))
        .expect("flags"),
        ..Item::default()
    }
}

fn world_with(item: Item) -> World {
    World {
        actors: vec![Actor {
            id: "hero".into(),
            name: "Hero".into(),
            items: vec![item],
            ..Actor::default()
        }],
        ..World::default()
    }
}

fn click(action: &str, group: &str, item: &str) -> CardEvent {
    CardEvent {
        action: action.into(),
        group: Some(group.into()),
        item: Some(item.into()),
        actor: Some("hero".into()),
        ..CardEvent::default()
    }
}

#[test]
fn clicking_a_group_button_rolls_exactly_that_subset() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let world = world_with(grouped_item());
    let mut roller = RecordingRoller::default();

    let event = click("rollgroup-damage", "1", "torch-sword");
    let roll = roll_from_card(&event, &world, &system, &i18n, &mut roller).expect("dispatch");
    assert!(roll.is_some());

    let (rolled, request) = &roller.calls[0];
    assert_eq!(rolled.damage.parts, vec![DamagePart::new("1d6", Some("fire"))]);
    assert_eq!(rolled.id, "torch-sword");
    assert!(!request.versatile);
    assert_eq!(request.flavor, "Torch Sword - Damage Roll (Fire)");
}

#[test]
fn a_message_snapshot_wins_over_the_live_item() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();

    // live item has lost its fire formula since the card was posted
    let mut live = grouped_item();
    live.damage.parts = vec![DamagePart::new("1d8", Some("slashing"))];
    let mut world = world_with(live);
    world.messages.push(ChatMessage {
        id: "msg-1".into(),
        item_data: Some(grouped_item()),
    });

    let mut event = click("rollgroup-damage", "1", "torch-sword");
    event.message = Some("msg-1".into());

    let mut roller = RecordingRoller::default();
    roll_from_card(&event, &world, &system, &i18n, &mut roller)
        .expect("dispatch")
        .expect("roll");
    assert_eq!(
        roller.calls[0].0.damage.parts,
        vec![DamagePart::new("1d6", Some("fire"))]
    );
}

#[test]
fn a_snapshot_without_its_owner_aborts() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let world = World {
        messages: vec![ChatMessage {
            id: "msg-1".into(),
            item_data: Some(grouped_item()),
        }],
        ..World::default()
    };

    let mut event = click("rollgroup-damage", "1", "torch-sword");
    event.message = Some("msg-1".into());
    event.actor = Some("vanished".into());

    let mut roller = RecordingRoller::default();
    let error = roll_from_card(&event, &world, &system, &i18n, &mut roller).expect_err("no owner");
    assert_eq!(error, RollGroupError::ItemOwnerMissing);
    assert!(roller.calls.is_empty());
}

#[test]
fn a_dangling_live_reference_is_a_quiet_no_op() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let world = World::default();
    let mut roller = RecordingRoller::default();

    let event = click("rollgroup-damage", "0", "nothing-here");
    let outcome = roll_from_card(&event, &world, &system, &i18n, &mut roller).expect("dispatch");
    assert!(outcome.is_none());
    assert!(roller.calls.is_empty());
}

#[test]
fn an_unconfigured_item_rolls_all_formulas_at_once() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let mut item = grouped_item();
    item.flags = Default::default();
    let world = world_with(item);
    let mut roller = RecordingRoller::default();

    let event = click("rollgroup-damage", "0", "torch-sword");
    roll_from_card(&event, &world, &system, &i18n, &mut roller)
        .expect("dispatch")
        .expect("roll");
    assert_eq!(roller.calls[0].0.damage.parts.len(), 2);
}

#[test]
fn an_empty_group_aborts_without_a_roll() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let mut item = grouped_item();
    item.flags = serde_json::from_value(json!({
        "rollgroups": {"config": {"groups": [{"label": "Hollow", "parts": []}]}}
    }))
    .expect("flags");
    let world = world_with(item);
    let mut roller = RecordingRoller::default();

    let event = click("rollgroup-damage", "0", "torch-sword");
    let error =
        roll_from_card(&event, &world, &system, &i18n, &mut roller).expect_err("empty group");
    assert_eq!(error, RollGroupError::EmptyGroup);
    assert!(roller.calls.is_empty());
}

#[test]
fn the_versatile_control_carries_its_flag_through() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let world = world_with(grouped_item());
    let mut roller = RecordingRoller::default();

    let event = click("rollgroup-damage-versatile", "0", "torch-sword");
    roll_from_card(&event, &world, &system, &i18n, &mut roller)
        .expect("dispatch")
        .expect("roll");
    assert!(roller.calls[0].1.versatile);
}

#[test]
fn the_card_spell_level_outranks_the_item_level() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let mut item = grouped_item();
    item.level = Some(1);
    let world = world_with(item);
    let mut roller = RecordingRoller::default();

    let mut event = click("rollgroup-damage", "0", "torch-sword");
    event.spell_level = Some(3);
    roll_from_card(&event, &world, &system, &i18n, &mut roller)
        .expect("dispatch")
        .expect("roll");
    assert_eq!(roller.calls[0].1.spell_level, Some(3));
}

#[test]
fn roll_damage_group_narrows_the_item_directly() {
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();
    let item = grouped_item();
    let mut roller = RecordingRoller::default();

    roll_damage_group(&item, 0, RollRequest::default(), &system, &i18n, &mut roller)
        .expect("dispatch")
        .expect("roll");
    assert_eq!(
        roller.calls[0].0.damage.parts,
        vec![DamagePart::new("1d8", Some("slashing"))]
    );

    let stale = roll_damage_group(&item, 7, RollRequest::default(), &system, &i18n, &mut roller)
        .expect_err("stale group");
    assert_eq!(stale.i18n_key(), "ROLLGROUPS.RollGroupEmpty");
}
