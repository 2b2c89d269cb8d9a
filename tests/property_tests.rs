//! Property-based tests for the backup/restore engine and the tag tree.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use keepsake::core::item::{Item, LORE_KEY, NAME_KEY};
use keepsake::core::types::{NameFormat, StageTag};
use keepsake::nbt::{CompoundTag, ListTag, Tag};
use keepsake::rewrite::DisplayBackup;

/// Strategy for generating scalar tags.
///
/// Floats are drawn from finite ranges so tree comparisons stay reflexive.
fn scalar_tag() -> impl Strategy<Value = Tag> {
    prop_oneof![
        any::<i8>().prop_map(Tag::Byte),
        any::<i16>().prop_map(Tag::Short),
        any::<i32>().prop_map(Tag::Int),
        any::<i64>().prop_map(Tag::Long),
        (-1.0e6f32..1.0e6).prop_map(Tag::Float),
        (-1.0e9f64..1.0e9).prop_map(Tag::Double),
        prop::collection::vec(any::<i8>(), 0..4).prop_map(Tag::ByteArray),
        any::<String>().prop_map(Tag::String),
        prop::collection::vec(any::<i32>(), 0..4).prop_map(Tag::IntArray),
        prop::collection::vec(any::<i64>(), 0..4).prop_map(Tag::LongArray),
    ]
}

/// Strategy for generating arbitrary tags, including nested lists and
/// compounds.
fn arb_tag() -> impl Strategy<Value = Tag> {
    scalar_tag().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|tags| Tag::List(ListTag::from(tags))),
            prop::collection::vec((plain_key(), inner), 0..4).prop_map(|entries| {
                let mut compound = CompoundTag::new();
                for (key, tag) in entries {
                    compound.insert(key, tag);
                }
                Tag::Compound(compound)
            }),
        ]
    })
}

/// Strategy for compound keys.
///
/// Generated keys never contain `|`, so they cannot collide with the slot
/// keys of the `prop|stage` engines used below.
fn plain_key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.]{1,8}"
}

/// Strategy for a display compound with arbitrary entries.
fn arb_display() -> impl Strategy<Value = CompoundTag> {
    prop::collection::vec((plain_key(), arb_tag()), 0..5).prop_map(|entries| {
        let mut compound = CompoundTag::new();
        for (key, tag) in entries {
            compound.insert(key, tag);
        }
        compound
    })
}

/// Strategy for an arbitrary lore list.
fn arb_lore() -> impl Strategy<Value = ListTag> {
    prop::collection::vec(arb_tag(), 0..4).prop_map(ListTag::from)
}

/// Strategy for valid stage tags.
fn valid_stage_tag() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9|_.:-]{1,16}"
}

fn engine(tag: &str) -> DisplayBackup {
    DisplayBackup::new(StageTag::new(tag).unwrap(), NameFormat::Plain)
}

proptest! {
    /// Saving a name and restoring yields the original, with the slot gone.
    #[test]
    fn name_roundtrip(original in any::<String>(), replacement in any::<String>()) {
        let backup = engine("prop|stage");
        let mut display = CompoundTag::new();
        display.insert(NAME_KEY, Tag::from(original.clone()));

        backup.save_string(&mut display, &original, NAME_KEY);
        display.insert(NAME_KEY, Tag::from(replacement));

        backup.restore_display(&mut display);

        prop_assert_eq!(display.get_str(NAME_KEY), Some(original.as_str()));
        prop_assert_eq!(display.len(), 1);
    }

    /// A saved lore list is a deep copy: in-place edits of the live field
    /// never reach the backup.
    #[test]
    fn lore_roundtrip_is_deep_copied(original in arb_lore()) {
        let backup = engine("prop|stage");
        let mut display = CompoundTag::new();
        display.insert(LORE_KEY, Tag::List(original.clone()));

        backup.save_list(&mut display, &original, LORE_KEY);

        // Mutate the live list in place, including nested values.
        let live = display.get_list_mut(LORE_KEY).unwrap();
        live.push(Tag::from("injected"));
        if let Some(first) = live.get_mut(0) {
            *first = Tag::Int(-1);
        }

        backup.restore_display(&mut display);

        prop_assert_eq!(display.get_list(LORE_KEY), Some(&original));
        prop_assert!(!backup.has_backup(&display, LORE_KEY));
    }

    /// With duplicate saves, only the first value survives the round trip.
    #[test]
    fn save_is_first_writer_wins(first in any::<String>(), second in any::<String>()) {
        let backup = engine("prop|stage");
        let mut display = CompoundTag::new();

        backup.save_string(&mut display, &first, NAME_KEY);
        backup.save_string(&mut display, &second, NAME_KEY);

        backup.restore_display(&mut display);
        prop_assert_eq!(display.get_str(NAME_KEY), Some(first.as_str()));
    }

    /// When a marker and a backup slot coexist, the marker wins: the name
    /// is dropped and the stale slot is consumed with it.
    #[test]
    fn marker_wins_over_backup_slot(live in any::<String>(), stale in any::<String>()) {
        let backup = engine("prop|stage");
        let mut display = CompoundTag::new();
        display.insert(NAME_KEY, Tag::from(live));

        backup.save_string(&mut display, &stale, NAME_KEY);
        backup.mark_custom_name(&mut display);

        backup.restore_display(&mut display);

        prop_assert!(!display.contains_key(NAME_KEY));
        prop_assert!(!backup.has_backup(&display, NAME_KEY));
        prop_assert!(display.is_empty());
    }

    /// Restoring a display compound containing none of the engine's keys
    /// changes nothing.
    #[test]
    fn restore_without_slots_is_noop(display in arb_display()) {
        let backup = engine("prop|stage");
        let before = display.clone();

        let mut after = display;
        backup.restore_display(&mut after);

        prop_assert_eq!(after, before);
    }

    /// Restore is idempotent: a second call observes a fully consumed round
    /// trip and does nothing.
    #[test]
    fn restore_twice_equals_restore_once(
        original in any::<String>(),
        replacement in any::<String>(),
    ) {
        let backup = engine("prop|stage");
        let mut display = CompoundTag::new();
        display.insert(NAME_KEY, Tag::from(original.clone()));
        backup.save_string(&mut display, &original, NAME_KEY);
        display.insert(NAME_KEY, Tag::from(replacement));

        backup.restore_display(&mut display);
        let once = display.clone();
        backup.restore_display(&mut display);

        prop_assert_eq!(display, once);
    }

    /// Engines with different tags never read or clear each other's slots.
    #[test]
    fn distinct_stages_are_isolated(value in any::<String>()) {
        let first = engine("stage|one");
        let second = engine("stage|two");

        let mut display = CompoundTag::new();
        first.save_string(&mut display, &value, NAME_KEY);

        second.restore_display(&mut display);

        prop_assert!(first.has_backup(&display, NAME_KEY));
        prop_assert!(!second.has_backup(&display, NAME_KEY));
    }

    /// Items without metadata pass through restore unchanged.
    #[test]
    fn restore_tolerates_missing_structure(identifier in any::<i32>(), amount in any::<u8>()) {
        let backup = engine("prop|stage");

        // No metadata at all.
        let mut item = Item::new(identifier, amount);
        backup.restore_on_return(&mut item);
        prop_assert_eq!(&item, &Item::new(identifier, amount));

        // Metadata without a display compound.
        let mut tag = CompoundTag::new();
        tag.insert("Damage", Tag::Short(1));
        let mut item = Item::with_tag(identifier, amount, tag.clone());
        backup.restore_on_return(&mut item);
        prop_assert_eq!(item.tag, Some(tag));

        // A display entry of the wrong kind.
        let mut tag = CompoundTag::new();
        tag.insert("display", Tag::Int(0));
        let mut item = Item::with_tag(identifier, amount, tag.clone());
        backup.restore_on_return(&mut item);
        prop_assert_eq!(item.tag, Some(tag));
    }

    /// Any valid stage tag round-trips through serde.
    #[test]
    fn stage_tag_serde_roundtrip(raw in valid_stage_tag()) {
        let tag = StageTag::new(&raw).unwrap();
        let json = serde_json::to_string(&tag).unwrap();
        let parsed: StageTag = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(tag, parsed);
    }

    /// Compounds round-trip through serde with entry order preserved.
    #[test]
    fn compound_serde_roundtrip(display in arb_display()) {
        let json = serde_json::to_string(&display).unwrap();
        let parsed: CompoundTag = serde_json::from_str(&json).unwrap();

        let original_keys: Vec<_> = display.keys().collect();
        let parsed_keys: Vec<_> = parsed.keys().collect();
        prop_assert_eq!(parsed_keys, original_keys);
        prop_assert_eq!(parsed, display);
    }
}
