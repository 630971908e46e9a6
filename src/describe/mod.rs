//! The effect-to-text engine.
//!
//! `Describer` dispatches each effect kind to its converter through a
//! closed exhaustive match, so adding a variant without a phrasing
//! rule is a compile error. Converters are grouped by theme:
//! - `offense`: nukes, drains, suicides, gravities
//! - `support`: shields, heals, buffs, team utility, transforms
//! - `orbs`: orb changes, spawns, skyfall, clouds, tape
//! - `board`: the board-shape recognizer
//! - `composite`: multi-part, guards, evolving, random-choice
//!
//! Shared phrasing helpers (durations, targets, the bind/awoken-bind
//! rule, stat-multiplier text) live here.
//!
//! ## Failure tiers
//!
//! Data-quality issues (unknown target bits, unrecognized board
//! shapes, contradictory buff scopes) log to the `skill_text::audit`
//! tracing target and degrade to a best-effort or empty string.
//! Schema violations (mutually exclusive fields both set) surface as
//! [`DescribeError`].

mod board;
mod composite;
mod offense;
mod orbs;
mod support;

use thiserror::Error;

use crate::effect::{ActiveSkill, SkillEffect};
use crate::format::{concat_list, concat_list_and, fmt_mult, noun_count, noun_count_range, pluralize};
use crate::tables::NameTables;

/// Diagnostic sink target for data-quality reports.
pub(crate) const AUDIT: &str = "skill_text::audit";

/// Conversion failure: the effect record violates the documented
/// schema. Data-quality issues never surface here; they are logged
/// and rendered best-effort instead.
#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("skill {skill_id} ({name}): {detail}")]
    ContractViolation {
        skill_id: u32,
        name: String,
        detail: String,
    },
}

/// Position of a part within its enclosing composite, for the few
/// converters whose phrasing depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartContext {
    /// Index among siblings, in composite order.
    pub index: usize,
}

impl PartContext {
    pub fn is_first(self) -> bool {
        self.index == 0
    }
}

/// Converts effect records into English descriptions.
///
/// Stateless apart from the immutable name tables; safe to share
/// across threads.
#[derive(Clone, Debug, Default)]
pub struct Describer {
    tables: NameTables,
}

impl Describer {
    pub fn new(tables: NameTables) -> Self {
        Self { tables }
    }

    /// Describe a skill. An empty string means "nothing to say" and
    /// is a valid result, not an error.
    pub fn describe(&self, skill: &ActiveSkill) -> Result<String, DescribeError> {
        self.describe_in_context(skill, None)
    }

    /// Describe a skill that may sit inside a composite; `ctx` tells
    /// position-sensitive converters where the part is.
    pub fn describe_in_context(
        &self,
        skill: &ActiveSkill,
        ctx: Option<PartContext>,
    ) -> Result<String, DescribeError> {
        use SkillEffect::*;

        let text = match &skill.effect {
            // Offense
            AttrNuke { attribute, multiplier, mass_attack } => {
                self.attr_nuke(*attribute, *multiplier, *mass_attack)
            }
            FixedAttrNuke { attribute, damage, mass_attack } => {
                self.fixed_attr_nuke(*attribute, *damage, *mass_attack)
            }
            SelfAttrNuke { multiplier, mass_attack } => {
                self.self_attr_nuke(*multiplier, *mass_attack)
            }
            RandomNuke { attribute, minimum_multiplier, maximum_multiplier, mass_attack } => {
                self.random_nuke(*attribute, *minimum_multiplier, *maximum_multiplier, *mass_attack)
            }
            HpNuke { attribute, multiplier, mass_attack } => {
                self.hp_nuke(*attribute, *multiplier, *mass_attack)
            }
            Laser { damage, mass_attack } => self.laser(*damage, *mass_attack),
            MultiHitLaser { damage, mass_attack } => self.multi_hit_laser(*damage, *mass_attack),
            DamageToAttrEnemy { attack_attribute, enemy_attribute, damage } => {
                self.damage_to_attr_enemy(*attack_attribute, *enemy_attribute, *damage)
            }
            AttackAttrTeamAtk { attack_attribute, multiplier, team_attributes, mass_attack } => {
                self.attack_attr_team_atk(*attack_attribute, *multiplier, team_attributes, *mass_attack)
            }
            GrudgeStrike { attribute, mass_attack, low_multiplier, high_multiplier } => {
                self.grudge_strike(*attribute, *mass_attack, *low_multiplier, *high_multiplier)
            }
            DrainAttack { atk_multiplier, recover_multiplier, mass_attack } => {
                self.drain_attack(*atk_multiplier, *recover_multiplier, *mass_attack)
            }
            DrainAttrAttack { attribute, atk_multiplier, recover_multiplier, mass_attack } => {
                self.drain_attr_attack(*attribute, *atk_multiplier, *recover_multiplier, *mass_attack)
            }
            Poison { multiplier } => self.poison(*multiplier),
            Gravity { percentage_hp } => self.gravity(*percentage_hp),
            TrueGravity { percentage_max_hp } => self.true_gravity(*percentage_max_hp),
            Suicide { hp_remaining } => self.suicide(*hp_remaining),
            SuicideNuke { hp_remaining, attribute, damage, mass_attack } => {
                self.suicide_nuke(*hp_remaining, *attribute, *damage, *mass_attack)
            }
            SuicideRandomNuke {
                hp_remaining,
                attribute,
                minimum_multiplier,
                maximum_multiplier,
                mass_attack,
            } => self.suicide_random_nuke(
                *hp_remaining,
                *attribute,
                *minimum_multiplier,
                *maximum_multiplier,
                *mass_attack,
            ),

            // Defense / recovery
            Shield { duration, shield } => self.shield(*duration, *shield),
            ElementalShield { duration, attribute, shield } => {
                self.elemental_shield(*duration, *attribute, *shield)
            }
            DefenseReduction { duration, shield } => self.defense_reduction(*duration, *shield),
            HealActive {
                hp,
                rcv_multiplier_as_hp,
                percentage_max_hp,
                team_rcv_multiplier_as_hp,
                card_bind,
                awoken_bind,
            } => self.heal_active(
                *hp,
                *rcv_multiplier_as_hp,
                *percentage_max_hp,
                *team_rcv_multiplier_as_hp,
                *card_bind,
                *awoken_bind,
            ),
            Delay { turns } => self.delay(*turns),
            Counterattack { duration, multiplier, attribute } => {
                self.counterattack(*duration, *multiplier, *attribute)
            }
            AutoHeal { duration, percentage_max_hp, card_bind, awoken_bind } => {
                self.auto_heal(*duration, *percentage_max_hp, *card_bind, *awoken_bind)
            }

            // Stat buffs
            RcvBoost { duration, multiplier } => self.rcv_boost(*duration, *multiplier),
            AttributeAttackBoost { duration, multiplier, rcv_boost, attributes } => {
                self.attribute_attack_boost(*duration, *multiplier, *rcv_boost, attributes)
            }
            TypeAttackBoost { duration, multiplier, types } => {
                self.type_attack_boost(*duration, *multiplier, types)
            }
            HpBoost { duration, hp } => self.hp_boost(*duration, *hp),
            MassAttack { duration } => self.mass_attack_buff(*duration),
            ExtraCombo { duration, combos } => self.extra_combo(*duration, *combos),
            AbsorbShieldBypass { duration, attribute_absorb, damage_absorb } => {
                self.absorb_shield_bypass(*duration, *attribute_absorb, *damage_absorb)
            }
            VoidShieldBypass { duration } => self.void_shield_bypass(*duration),

            // Awakening-scaled
            AwakeningHeal { amount_per, awakenings } => {
                self.awakening_heal(*amount_per, awakenings)
            }
            AwakeningAttackBoost { duration, amount_per, awakenings } => {
                self.awakening_attack_boost(*duration, *amount_per, awakenings)
            }
            AwakeningShield { duration, amount_per, awakenings } => {
                self.awakening_shield(*duration, *amount_per, awakenings)
            }
            AwakeningStatBoost { duration, atk_per, rcv_per, awakenings } => {
                self.awakening_stat_boost(*duration, *atk_per, *rcv_per, awakenings)
            }

            // Team / enemy utility
            ChangeEnemyAttribute { attribute, turns } => {
                self.change_enemy_attribute(*attribute, *turns)
            }
            Haste { turns, max_turns } => self.haste(*turns, *max_turns),
            SelfAttributeChange { attribute, duration } => {
                self.self_attribute_change(*attribute, *duration)
            }
            LeaderSwap => self.leader_swap(),
            LeadSwapSub { sub_slot } => self.lead_swap_sub(*sub_slot),
            AllyActiveDisable { turns } => self.ally_active_disable(*turns),
            AllyActiveDelay { turns } => self.ally_active_delay(*turns),
            MatchDisable { duration } => self.match_disable(*duration),
            TeamTargetStatChange { duration, target, atk_mult } => {
                self.team_target_stat_change(skill, *duration, *target, *atk_mult)
            }
            CompositionBuff { duration, attributes, types, atk_boost, rcv_boost } => {
                self.composition_buff(skill, *duration, attributes, types, *atk_boost, *rcv_boost)
            }
            SevenBySixBoard { duration } => self.seven_by_six_board(*duration),
            DamageCapBoost { duration, damage_cap } => {
                self.damage_cap_boost(*duration, *damage_cap)
            }
            InflictEnemySkill { selector_type, players } => {
                self.inflict_enemy_skill(*selector_type, players)
            }
            ChangeMonster { transform_ids } => self.change_monster(transform_ids),
            RandomChangeMonster { transform_ids } => self.random_change_monster(transform_ids),

            // Orbs and board
            DoubleOrbChange { from_attrs, to_attrs } => {
                self.double_orb_change(from_attrs, to_attrs)
            }
            RandomOrbChange { from_attrs, to_attrs } => {
                self.random_orb_change(from_attrs, to_attrs)
            }
            BoardChange { to_attrs } => self.board_change(to_attrs),
            BoardRefresh => self.board_refresh(),
            Enhance { orbs } => self.enhance(orbs),
            Lock { orbs, count } => self.lock(orbs, *count),
            UnlockAllOrbs => self.unlock_all_orbs(),
            UnlockBoardPath => self.unlock_board_path(),
            SpawnOrb { amount, orbs, excluding_orbs } => {
                self.spawn_orb(*amount, orbs, excluding_orbs)
            }
            DoubleSpawnOrb { amount, orbs, excluding_orbs, amount2, orbs2, excluding_orbs2 } => {
                self.double_spawn_orb(*amount, orbs, excluding_orbs, *amount2, orbs2, excluding_orbs2)
            }
            RowChange { rows } => self.row_change(rows),
            ColumnChange { columns } => self.column_change(columns),
            ChangeSkyfall { duration, max_duration, percentage, orbs } => {
                self.change_skyfall(*duration, *max_duration, *percentage, orbs)
            }
            EnhanceSkyfall { duration, percentage_increase } => {
                self.enhance_skyfall(*duration, *percentage_increase)
            }
            NoSkyfall { duration } => self.no_skyfall(*duration),
            SkyfallLock { duration, orbs } => self.skyfall_lock(*duration, orbs),
            NailOrbSkyfall { duration, chance } => self.nail_orb_skyfall(*duration, *chance),
            CreateUnmatchable { duration, orbs } => self.create_unmatchable(*duration, orbs),
            FreeOrbMovement { duration } => self.free_orb_movement(*duration),
            MoveTimeBuff { duration, static_bonus, percentage } => {
                self.move_time_buff(skill, *duration, *static_bonus, *percentage)?
            }
            FixedPositionSpawn { attribute, positions } => {
                let orb = format!("{} orb", self.tables.attribute(*attribute));
                self.fixed_shape(positions, &orb, skill)
            }
            SpawnSpinner { random_count, speed, turns, positions } => {
                self.spawn_spinner(skill, *random_count, *speed, *turns, positions)
            }
            Cloud { width, height, origin_row, origin_column, duration } => {
                self.cloud(*width, *height, *origin_row, *origin_column, *duration)
            }
            Tape { duration, column } => self.tape(*duration, *column),

            // Composite
            MultiPart { parts } => self.multi_part(parts)?,
            ConditionalHpThreshold { lower_limit, upper_limit } => {
                self.conditional_hp_threshold(*lower_limit, *upper_limit)
            }
            ConditionalFloorThreshold { lower_limit, upper_limit } => {
                self.conditional_floor_threshold(*lower_limit, *upper_limit, ctx)
            }
            RandomSkill { child_skills } => self.random_skill(child_skills)?,
            EvolvingSkill { child_skills } => self.evolving_skill(child_skills, false)?,
            LoopingEvolvingSkill { child_skills } => self.evolving_skill(child_skills, true)?,
        };

        Ok(text)
    }

    // === Shared phrasing helpers ===

    pub(crate) fn tables(&self) -> &NameTables {
        &self.tables
    }

    /// "For N turns, " prefix; singular noun only at exactly one turn.
    pub(crate) fn fmt_duration(&self, duration: i64) -> String {
        format!("For {}, ", noun_count("turn", duration))
    }

    /// Duration prefix with an optional max: "For 1~3 turns, ".
    pub(crate) fn fmt_duration_range(&self, duration: i64, max_duration: Option<i64>) -> String {
        match max_duration {
            Some(max) if max != duration => {
                format!("For {}~{}, ", duration, noun_count("turn", max))
            }
            _ => self.fmt_duration(duration),
        }
    }

    /// "all enemies" or "an enemy".
    pub(crate) fn fmt_mass_atk(&self, mass_attack: bool) -> &'static str {
        if mass_attack {
            "all enemies"
        } else {
            "an enemy"
        }
    }

    /// Append a repeat count to a rendered part: "… 2 times".
    pub(crate) fn fmt_repeated(&self, text: &str, amount: i64) -> String {
        format!("{} {}", text, noun_count("time", amount))
    }

    /// Damage-reduction phrasing; a full shield voids instead.
    pub(crate) fn fmt_reduct_text(&self, shield: f64) -> String {
        if shield == 1.0 {
            "void all damage".to_string()
        } else {
            format!("reduce damage taken by {}%", fmt_mult(shield * 100.0))
        }
    }

    /// The shared four-way bind/awoken-bind reduction rule. Empty
    /// when both counts are zero. A count of 9999 or more means full
    /// removal.
    pub(crate) fn fmt_bind_removal(&self, unbind: i64, awoken_unbind: i64) -> String {
        if unbind >= 9999 && awoken_unbind != 0 {
            "Remove all binds and awoken skill binds".to_string()
        } else if unbind != 0 && awoken_unbind != 0 {
            format!(
                "Reduce binds and awoken skill binds by {}",
                noun_count("turn", awoken_unbind)
            )
        } else if unbind >= 9999 {
            "Remove all binds".to_string()
        } else if unbind != 0 {
            format!("Reduce binds by {}", noun_count("turn", unbind))
        } else if awoken_unbind >= 9999 {
            "Remove all awoken skill binds".to_string()
        } else if awoken_unbind != 0 {
            format!(
                "Reduce awoken skill binds by {}",
                noun_count("turn", awoken_unbind)
            )
        } else {
            String::new()
        }
    }

    /// Stat-multiplier phrasing: "2x all stats", "2x ATK & RCV",
    /// "2x HP and 1.5x RCV". Stats at the default value are skipped.
    pub(crate) fn fmt_multiplier_text(&self, hp: f64, atk: f64, rcv: f64, default: f64) -> String {
        if hp == atk && atk == rcv {
            if hp == default {
                return String::new();
            }
            return format!("{}x all stats", fmt_mult(hp));
        }

        let mut mults: Vec<(&str, f64)> = [("HP", hp), ("ATK", atk), ("RCV", rcv)]
            .into_iter()
            .filter(|(_, v)| *v != default)
            .collect();
        mults.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut chunks: Vec<(String, f64)> = Vec::new();
        let mut i = 0;
        while i < mults.len() {
            if i + 1 < mults.len() && mults[i].1 == mults[i + 1].1 {
                chunks.push((format!("{} & {}", mults[i].0, mults[i + 1].0), mults[i].1));
                i += 2;
            } else {
                chunks.push((mults[i].0.to_string(), mults[i].1));
                i += 1;
            }
        }

        chunks
            .iter()
            .map(|(names, value)| format!("{}x {}", fmt_mult(*value), names))
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Multiplier text scoped to attributes or types:
    /// "2x ATK for Fire Att.", "2x ATK for Dragon types".
    pub(crate) fn fmt_stats_type_attr_bonus(
        &self,
        attributes: &[u8],
        types: &[u8],
        hp: f64,
        atk: f64,
        rcv: f64,
    ) -> String {
        let mult_text = self.fmt_multiplier_text(hp, atk, rcv, 1.0);
        if !types.is_empty() {
            format!(
                "{} for {} {}",
                mult_text,
                self.typing_to_str(types, "and"),
                pluralize("type", types.len() as i64)
            )
        } else if !attributes.is_empty() && attributes.len() < crate::tables::MATCHABLE_ATTRIBUTES {
            format!("{} for {} Att.", mult_text, self.attrs_to_str(attributes))
        } else {
            mult_text
        }
    }

    /// "Fire, Water, and Wood" for a list of attribute ids.
    pub(crate) fn attrs_to_str(&self, attrs: &[u8]) -> String {
        concat_list_and(attrs.iter().map(|a| self.tables.attribute(*a)))
    }

    /// Attribute list that collapses to "all" at the full universe.
    pub(crate) fn attrs_to_str_or_all(&self, attrs: &[u8]) -> String {
        if attrs.len() >= crate::tables::ATTRIBUTE_UNIVERSE {
            "all".to_string()
        } else {
            self.attrs_to_str(attrs)
        }
    }

    /// Monster-type list with a caller-chosen conjunction.
    pub(crate) fn typing_to_str(&self, types: &[u8], conj: &str) -> String {
        concat_list(types.iter().map(|t| self.tables.monster_type(*t)), conj)
    }

    /// Template references for awakening ids, resolved downstream by
    /// the document renderer.
    pub(crate) fn awakening_refs(&self, awakenings: &[u32]) -> String {
        concat_list_and(
            awakenings
                .iter()
                .filter(|a| **a != 0)
                .map(|a| format!("{{{{ awoskills.id{}|default('???') }}}}", a)),
        )
    }

    /// Run-length phrasing for line changes: adjacent lines with the
    /// same target join into one clause ("Change the top row and the
    /// bottom row to Fire orbs").
    pub(crate) fn line_change_text(&self, lines: &[(u8, String)], phrases: &[&str]) -> String {
        let lines: Vec<(&str, &String)> = lines
            .iter()
            .map(|(index, target)| (phrases[*index as usize], target))
            .collect();

        let mut clauses: Vec<String> = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let mut run = i + 1;
            while run < lines.len() && lines[run].1 == lines[i].1 {
                run += 1;
            }
            let places = lines[i..run]
                .iter()
                .map(|(place, _)| *place)
                .collect::<Vec<_>>()
                .join(" and ");
            clauses.push(format!("change {} to {}", places, lines[i].1));
            i = run;
        }

        crate::format::capitalize_first(&clauses.join(" and "))
    }

    /// Haste-style turn range.
    pub(crate) fn fmt_turns(&self, turns: i64, max_turns: Option<i64>) -> String {
        noun_count_range("turn", turns, max_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fmt_duration() {
        let d = Describer::default();
        assert_eq!(d.fmt_duration(1), "For 1 turn, ");
        assert_eq!(d.fmt_duration(3), "For 3 turns, ");
        assert_eq!(d.fmt_duration_range(1, Some(3)), "For 1~3 turns, ");
        assert_eq!(d.fmt_duration_range(2, Some(2)), "For 2 turns, ");
        assert_eq!(d.fmt_duration_range(2, None), "For 2 turns, ");
    }

    #[test]
    fn test_bind_removal_rule() {
        let d = Describer::default();
        assert_eq!(
            d.fmt_bind_removal(9999, 5),
            "Remove all binds and awoken skill binds"
        );
        assert_eq!(
            d.fmt_bind_removal(3, 3),
            "Reduce binds and awoken skill binds by 3 turns"
        );
        assert_eq!(d.fmt_bind_removal(9999, 0), "Remove all binds");
        assert_eq!(d.fmt_bind_removal(3, 0), "Reduce binds by 3 turns");
        assert_eq!(d.fmt_bind_removal(0, 9999), "Remove all awoken skill binds");
        assert_eq!(
            d.fmt_bind_removal(0, 2),
            "Reduce awoken skill binds by 2 turns"
        );
        assert_eq!(d.fmt_bind_removal(0, 0), "");
    }

    #[test]
    fn test_multiplier_text() {
        let d = Describer::default();
        assert_eq!(d.fmt_multiplier_text(2.0, 2.0, 2.0, 1.0), "2x all stats");
        assert_eq!(d.fmt_multiplier_text(1.0, 2.0, 1.0, 1.0), "2x ATK");
        assert_eq!(d.fmt_multiplier_text(1.0, 2.0, 2.0, 1.0), "2x ATK & RCV");
        assert_eq!(
            d.fmt_multiplier_text(1.0, 2.0, 1.5, 1.0),
            "2x ATK and 1.5x RCV"
        );
        assert_eq!(d.fmt_multiplier_text(1.0, 1.0, 1.0, 1.0), "");
    }

    #[test]
    fn test_attr_lists() {
        let d = Describer::default();
        assert_eq!(d.attrs_to_str(&[0, 1, 2]), "Fire, Water, and Wood");
        assert_eq!(d.attrs_to_str_or_all(&[0, 1]), "Fire and Water");
        assert_eq!(
            d.attrs_to_str_or_all(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]),
            "all"
        );
    }

    #[test]
    fn test_line_change_runs() {
        let d = Describer::default();
        let lines = vec![
            (0u8, "Fire orbs".to_string()),
            (4u8, "Fire orbs".to_string()),
        ];
        assert_eq!(
            d.line_change_text(&lines, &crate::tables::ROW_PHRASES),
            "Change the top row and the bottom row to Fire orbs"
        );

        let lines = vec![
            (0u8, "Fire orbs".to_string()),
            (4u8, "Water orbs".to_string()),
        ];
        assert_eq!(
            d.line_change_text(&lines, &crate::tables::ROW_PHRASES),
            "Change the top row to Fire orbs and change the bottom row to Water orbs"
        );
    }

    proptest! {
        #[test]
        fn duration_prefix_shape(dur in 1i64..10_000) {
            let d = Describer::default();
            let text = d.fmt_duration(dur);
            prop_assert!(text.starts_with("For "));
            prop_assert!(text.ends_with(", "));
            prop_assert_eq!(text.contains("turns"), dur != 1);
        }
    }
}
