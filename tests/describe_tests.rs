//! End-to-end conversion tests through the public `Describer` API.
//!
//! These exercise the dispatcher and the per-kind converters the way
//! an external caller would: build a record, describe it, compare
//! the full sentence.

use std::collections::BTreeMap;

use skill_text::{ActiveSkill, Describer, SkillEffect};

fn describe(effect: SkillEffect) -> String {
    Describer::default()
        .describe(&ActiveSkill::anonymous(effect))
        .unwrap()
}

// =============================================================================
// Offense
// =============================================================================

#[test]
fn test_attr_nuke_through_dispatcher() {
    assert_eq!(
        describe(SkillEffect::AttrNuke {
            attribute: 0,
            multiplier: 30.0,
            mass_attack: true,
        }),
        "Deal 30x ATK Fire damage to all enemies"
    );
}

#[test]
fn test_randomized_nuke_renders_range() {
    assert_eq!(
        describe(SkillEffect::RandomNuke {
            attribute: 4,
            minimum_multiplier: 50.0,
            maximum_multiplier: 150.0,
            mass_attack: false,
        }),
        "Randomized Dark damage to an enemy(50~150x)"
    );
}

#[test]
fn test_suicide_nuke_two_clauses() {
    assert_eq!(
        describe(SkillEffect::SuicideRandomNuke {
            hp_remaining: 0.0,
            attribute: 0,
            minimum_multiplier: 100.0,
            maximum_multiplier: 200.0,
            mass_attack: true,
        }),
        "Reduce HP to 1; Deal 100~200x Fire damage to all enemies"
    );
}

// =============================================================================
// Recovery and binds
// =============================================================================

#[test]
fn test_full_heal_and_full_unbind() {
    assert_eq!(
        describe(SkillEffect::HealActive {
            hp: 0,
            rcv_multiplier_as_hp: 0.0,
            percentage_max_hp: 1.0,
            team_rcv_multiplier_as_hp: 0.0,
            card_bind: 9999,
            awoken_bind: 9999,
        }),
        "Recover all HP; Remove all binds and awoken skill binds"
    );
}

#[test]
fn test_bind_only_heal() {
    assert_eq!(
        describe(SkillEffect::HealActive {
            hp: 0,
            rcv_multiplier_as_hp: 0.0,
            percentage_max_hp: 0.0,
            team_rcv_multiplier_as_hp: 0.0,
            card_bind: 3,
            awoken_bind: 0,
        }),
        "Reduce binds by 3 turns"
    );
}

#[test]
fn test_no_effect_heal_is_empty_not_error() {
    assert_eq!(
        describe(SkillEffect::HealActive {
            hp: 0,
            rcv_multiplier_as_hp: 0.0,
            percentage_max_hp: 0.0,
            team_rcv_multiplier_as_hp: 0.0,
            card_bind: 0,
            awoken_bind: 0,
        }),
        ""
    );
}

// =============================================================================
// Buffs and durations
// =============================================================================

#[test]
fn test_single_turn_uses_singular_noun() {
    assert_eq!(
        describe(SkillEffect::NoSkyfall { duration: 1 }),
        "For 1 turn, no skyfall"
    );
    assert_eq!(
        describe(SkillEffect::NoSkyfall { duration: 3 }),
        "For 3 turns, no skyfall"
    );
}

#[test]
fn test_duration_range_phrasing() {
    assert_eq!(
        describe(SkillEffect::ChangeSkyfall {
            duration: 2,
            max_duration: Some(4),
            percentage: 0.3,
            orbs: vec![5],
        }),
        "For 2~4 turns, Heal orbs are more likely to appear by 30%"
    );
}

#[test]
fn test_target_bitmask_collapse() {
    let all = describe(SkillEffect::TeamTargetStatChange {
        duration: 1,
        target: 15,
        atk_mult: 2.0,
    });
    assert_eq!(all, "For 1 turn, 2x ATK for all monsters");

    let leaders = describe(SkillEffect::TeamTargetStatChange {
        duration: 1,
        target: 6,
        atk_mult: 1.5,
    });
    assert_eq!(leaders, "For 1 turn, 1.5x ATK for both leaders");

    // Unknown bits degrade to a placeholder instead of failing.
    let unknown = describe(SkillEffect::TeamTargetStatChange {
        duration: 1,
        target: 16,
        atk_mult: 2.0,
    });
    assert!(unknown.contains("???"), "got: {}", unknown);
}

// =============================================================================
// Contract violations
// =============================================================================

#[test]
fn test_conflicting_move_time_fields_raise() {
    let skill = ActiveSkill::new(
        4321,
        "Broken Buff",
        "raw",
        SkillEffect::MoveTimeBuff {
            duration: 1,
            static_bonus: 5.0,
            percentage: 1.5,
        },
    );
    let err = Describer::default().describe(&skill).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("4321"), "got: {}", message);
    assert!(message.contains("static bonus"), "got: {}", message);
}

#[test]
fn test_contract_violation_propagates_from_composite() {
    let skill = ActiveSkill::anonymous(SkillEffect::MultiPart {
        parts: vec![
            ActiveSkill::anonymous(SkillEffect::BoardRefresh),
            ActiveSkill::anonymous(SkillEffect::MoveTimeBuff {
                duration: 1,
                static_bonus: 5.0,
                percentage: 1.5,
            }),
        ],
    });
    assert!(Describer::default().describe(&skill).is_err());
}

// =============================================================================
// Composites
// =============================================================================

#[test]
fn test_multi_part_repeat_suffix() {
    let spawn = ActiveSkill::anonymous(SkillEffect::SpawnOrb {
        amount: 3,
        orbs: vec![0],
        excluding_orbs: vec![],
    });
    let skill = ActiveSkill::anonymous(SkillEffect::MultiPart {
        parts: vec![spawn.clone(), spawn],
    });
    assert_eq!(
        Describer::default().describe(&skill).unwrap(),
        "Create 3 Fire orbs over any orbs 2 times"
    );
}

#[test]
fn test_hp_guard_chain() {
    let skill = ActiveSkill::anonymous(SkillEffect::MultiPart {
        parts: vec![
            ActiveSkill::anonymous(SkillEffect::ConditionalHpThreshold {
                lower_limit: 50,
                upper_limit: 100,
            }),
            ActiveSkill::anonymous(SkillEffect::Gravity { percentage_hp: 0.5 }),
        ],
    });
    assert_eq!(
        Describer::default().describe(&skill).unwrap(),
        "If HP >= 50%: Reduce enemies' remaining HP by 50%"
    );
}

#[test]
fn test_random_transform_fraction_stability() {
    // Same weights in a different insertion order must render
    // identically: the map is ordered by id.
    let forward: BTreeMap<u32, u32> = [(100, 1), (200, 2)].into_iter().collect();
    let backward: BTreeMap<u32, u32> = [(200, 2), (100, 1)].into_iter().collect();

    let a = describe(SkillEffect::RandomChangeMonster {
        transform_ids: forward,
    });
    let b = describe(SkillEffect::RandomChangeMonster {
        transform_ids: backward,
    });
    assert_eq!(a, b);
    assert_eq!(
        a,
        "Randomly change to [100] (1/3 chance) or [200] (2/3 chance) \
         for the duration of the dungeon"
    );
}

#[test]
fn test_equal_weight_transform_is_plain_or_list() {
    let ids: BTreeMap<u32, u32> = [(7, 1), (8, 1), (9, 1)].into_iter().collect();
    assert_eq!(
        describe(SkillEffect::RandomChangeMonster { transform_ids: ids }),
        "Randomly change to [7], [8], or [9] for the duration of the dungeon"
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_conversion_is_deterministic() {
    let skill = ActiveSkill::anonymous(SkillEffect::MultiPart {
        parts: vec![
            ActiveSkill::anonymous(SkillEffect::Haste {
                turns: 1,
                max_turns: Some(2),
            }),
            ActiveSkill::anonymous(SkillEffect::BoardChange {
                to_attrs: vec![0, 1, 2],
            }),
        ],
    });
    let d = Describer::default();
    let first = d.describe(&skill).unwrap();
    let second = d.describe(&skill).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "Charge all allies' skills by 1~2 turns; Change all orbs to Fire, Water, and Wood orbs"
    );
}

#[test]
fn test_record_round_trips_through_serde() {
    let skill = ActiveSkill::new(
        2511,
        "Ultimate Destruction",
        "raw text",
        SkillEffect::MultiPart {
            parts: vec![
                ActiveSkill::anonymous(SkillEffect::Suicide { hp_remaining: 0.0 }),
                ActiveSkill::anonymous(SkillEffect::Laser {
                    damage: 300000,
                    mass_attack: true,
                }),
            ],
        },
    );

    let json = serde_json::to_string(&skill).unwrap();
    let back: ActiveSkill = serde_json::from_str(&json).unwrap();
    assert_eq!(skill, back);

    let d = Describer::default();
    assert_eq!(d.describe(&skill).unwrap(), d.describe(&back).unwrap());
}
