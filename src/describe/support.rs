//! Converters for defensive, recovery, buff, and team-utility effects.

use std::collections::BTreeMap;

use crate::format::{
    concat_list, concat_list_and, fmt_mult, noun_count, ordinal, reduced_fraction,
};

use super::{Describer, AUDIT};

impl Describer {
    pub(crate) fn shield(&self, duration: i64, shield: f64) -> String {
        format!("{}{}", self.fmt_duration(duration), self.fmt_reduct_text(shield))
    }

    pub(crate) fn elemental_shield(&self, duration: i64, attribute: u8, shield: f64) -> String {
        let mut text = self.fmt_duration(duration);
        if shield == 1.0 {
            text.push_str(&format!(
                "void all {} damage",
                self.tables().attribute(attribute)
            ));
        } else {
            text.push_str(&format!(
                "reduce {} damage by {}%",
                self.tables().attribute(attribute),
                fmt_mult(shield * 100.0)
            ));
        }
        text
    }

    pub(crate) fn defense_reduction(&self, duration: i64, shield: f64) -> String {
        format!(
            "{}reduce enemies' defense by {}%",
            self.fmt_duration(duration),
            fmt_mult(shield * 100.0)
        )
    }

    /// At most one heal quantity is set; the bind clause is appended
    /// after "; " when present. All-zero input yields an empty string.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn heal_active(
        &self,
        hp: i64,
        rcv_multiplier_as_hp: f64,
        percentage_max_hp: f64,
        team_rcv_multiplier_as_hp: f64,
        card_bind: i64,
        awoken_bind: i64,
    ) -> String {
        let heal = if hp != 0 {
            format!("Recover {} HP", crate::format::fmt_thousands(hp))
        } else if rcv_multiplier_as_hp != 0.0 {
            format!("Recover {}x RCV as HP", fmt_mult(rcv_multiplier_as_hp))
        } else if percentage_max_hp == 1.0 {
            "Recover all HP".to_string()
        } else if percentage_max_hp > 0.0 {
            format!("Recover {}% of max HP", fmt_mult(percentage_max_hp * 100.0))
        } else if team_rcv_multiplier_as_hp > 0.0 {
            format!(
                "Recover HP equal to {}x team's total RCV",
                fmt_mult(team_rcv_multiplier_as_hp)
            )
        } else {
            String::new()
        };

        let binds = self.fmt_bind_removal(card_bind, awoken_bind);
        match (heal.is_empty(), binds.is_empty()) {
            (false, false) => format!("{}; {}", heal, binds),
            (false, true) => heal,
            (true, _) => binds,
        }
    }

    pub(crate) fn delay(&self, turns: i64) -> String {
        format!("Delay enemies' next attack by {}", noun_count("turn", turns))
    }

    pub(crate) fn counterattack(&self, duration: i64, multiplier: f64, attribute: u8) -> String {
        format!(
            "{}{}x {} counterattack",
            self.fmt_duration(duration),
            fmt_mult(multiplier),
            self.tables().attribute(attribute)
        )
    }

    pub(crate) fn auto_heal(
        &self,
        duration: i64,
        percentage_max_hp: f64,
        card_bind: i64,
        awoken_bind: i64,
    ) -> String {
        let mut clauses: Vec<String> = Vec::new();
        if duration != 0 {
            clauses.push(format!(
                "{}recover {}% of max HP",
                self.fmt_duration(duration),
                fmt_mult(percentage_max_hp * 100.0)
            ));
        }
        let binds = self.fmt_bind_removal(card_bind, awoken_bind);
        if !binds.is_empty() {
            clauses.push(binds);
        }
        clauses.join("; ")
    }

    pub(crate) fn rcv_boost(&self, duration: i64, multiplier: f64) -> String {
        format!("{}{}x RCV", self.fmt_duration(duration), fmt_mult(multiplier))
    }

    pub(crate) fn attribute_attack_boost(
        &self,
        duration: i64,
        multiplier: f64,
        rcv_boost: bool,
        attributes: &[u8],
    ) -> String {
        let mut clauses: Vec<String> = Vec::new();
        if rcv_boost {
            clauses.push(format!(
                "{}{}x RCV",
                self.fmt_duration(duration),
                fmt_mult(multiplier)
            ));
        }
        clauses.push(format!(
            "{}{}",
            self.fmt_duration(duration),
            self.fmt_stats_type_attr_bonus(attributes, &[], 1.0, multiplier, 1.0)
        ));
        clauses.join("; ")
    }

    pub(crate) fn type_attack_boost(&self, duration: i64, multiplier: f64, types: &[u8]) -> String {
        format!(
            "{}{}x ATK for {} {}",
            self.fmt_duration(duration),
            fmt_mult(multiplier),
            self.typing_to_str(types, "and"),
            crate::format::pluralize("type", types.len() as i64)
        )
    }

    pub(crate) fn hp_boost(&self, duration: i64, hp: f64) -> String {
        format!("{}{}x HP", self.fmt_duration(duration), fmt_mult(hp))
    }

    pub(crate) fn mass_attack_buff(&self, duration: i64) -> String {
        format!("{}all attacks become mass attack", self.fmt_duration(duration))
    }

    pub(crate) fn extra_combo(&self, duration: i64, combos: i64) -> String {
        format!(
            "{}increase combo count by {}",
            self.fmt_duration(duration),
            combos
        )
    }

    pub(crate) fn absorb_shield_bypass(
        &self,
        duration: i64,
        attribute_absorb: bool,
        damage_absorb: bool,
    ) -> String {
        let mechanic = match (attribute_absorb, damage_absorb) {
            (true, true) => "bypass damage absorb shield and att. absorb shield effects",
            (true, false) => "bypass att. absorb shield effects",
            (false, true) => "bypass damage absorb shield effects",
            (false, false) => return String::new(),
        };
        format!("{}{}", self.fmt_duration(duration), mechanic)
    }

    pub(crate) fn void_shield_bypass(&self, duration: i64) -> String {
        format!(
            "{}bypass void damage shield effects",
            self.fmt_duration(duration)
        )
    }

    pub(crate) fn awakening_heal(&self, amount_per: i64, awakenings: &[u32]) -> String {
        format!(
            "Heal {}x RCV for each {} awakening on the team",
            amount_per,
            self.awakening_refs(awakenings)
        )
    }

    pub(crate) fn awakening_attack_boost(
        &self,
        duration: i64,
        amount_per: f64,
        awakenings: &[u32],
    ) -> String {
        format!(
            "{}increase ATK by {}% for each {} awakening on the team",
            self.fmt_duration(duration),
            fmt_mult(amount_per * 100.0),
            self.awakening_refs(awakenings)
        )
    }

    pub(crate) fn awakening_shield(
        &self,
        duration: i64,
        amount_per: f64,
        awakenings: &[u32],
    ) -> String {
        format!(
            "{}reduce damage taken by {}% for each {} awakening on the team",
            self.fmt_duration(duration),
            fmt_mult(amount_per * 100.0),
            self.awakening_refs(awakenings)
        )
    }

    pub(crate) fn awakening_stat_boost(
        &self,
        duration: i64,
        atk_per: f64,
        rcv_per: f64,
        awakenings: &[u32],
    ) -> String {
        let mut text = self.fmt_duration(duration);
        if atk_per != 0.0 && atk_per == rcv_per {
            text.push_str(&format!("increase ATK & RCV by {}%", fmt_mult(atk_per * 100.0)));
        } else {
            if atk_per != 0.0 {
                text.push_str(&format!("increase ATK by {}%", fmt_mult(atk_per * 100.0)));
                if rcv_per != 0.0 {
                    text.push_str(" and ");
                }
            }
            if rcv_per != 0.0 {
                text.push_str(&format!("increase RCV by {}%", fmt_mult(rcv_per * 100.0)));
            }
        }
        text.push_str(&format!(
            " for each {} awakening on the team",
            self.awakening_refs(awakenings)
        ));
        text
    }

    pub(crate) fn change_enemy_attribute(&self, attribute: u8, turns: Option<i64>) -> String {
        let lead = match turns {
            Some(turns) => format!("{}change", self.fmt_duration(turns)),
            None => "Change".to_string(),
        };
        format!(
            "{} all enemies to {} Att.",
            lead,
            self.tables().attribute(attribute)
        )
    }

    pub(crate) fn haste(&self, turns: i64, max_turns: Option<i64>) -> String {
        format!(
            "Charge all allies' skills by {}",
            self.fmt_turns(turns, max_turns)
        )
    }

    pub(crate) fn self_attribute_change(&self, attribute: u8, duration: i64) -> String {
        format!(
            "Change own Att. to {} for {} turns",
            self.tables().attribute(attribute),
            duration
        )
    }

    pub(crate) fn leader_swap(&self) -> String {
        "Becomes Team leader; changes back when used again".to_string()
    }

    pub(crate) fn lead_swap_sub(&self, sub_slot: i64) -> String {
        format!(
            "Swap team leader with the sub in the {} position",
            ordinal(sub_slot)
        )
    }

    pub(crate) fn ally_active_disable(&self, turns: i64) -> String {
        format!("Disable team active skills for {}", noun_count("turn", turns))
    }

    pub(crate) fn ally_active_delay(&self, turns: i64) -> String {
        format!("Self-delay active skills by {}", noun_count("turn", turns))
    }

    pub(crate) fn match_disable(&self, duration: i64) -> String {
        format!(
            "Reduce unable to match orbs effect by {}",
            noun_count("turn", duration)
        )
    }

    /// Target bitmask: 1 = self, 2 = leader, 4 = friend leader,
    /// 8 = subs. All four together collapse to "all monsters";
    /// unknown bits degrade to a "???" entry with an audit warning.
    pub(crate) fn team_target_stat_change(
        &self,
        skill: &crate::effect::ActiveSkill,
        duration: i64,
        target: u32,
        atk_mult: f64,
    ) -> String {
        let text = format!(
            "{}{}",
            self.fmt_duration(duration),
            self.fmt_multiplier_text(1.0, atk_mult, 1.0, 1.0)
        );

        let mut targets: Vec<&str> = Vec::new();
        if target & 1 != 0 {
            targets.push("this monster");
        }
        if target & 6 == 6 {
            targets.push("both leaders");
        } else if target & 2 != 0 {
            targets.push("team leader");
        } else if target & 4 != 0 {
            targets.push("friend leader");
        }
        if target & 8 != 0 {
            targets.push("all subs");
        }
        if target & 15 == 15 {
            targets = vec!["all monsters"];
        }
        if target & !15 != 0 {
            tracing::warn!(
                target: AUDIT,
                skill_id = skill.skill_id,
                target_bits = target,
                "can't parse active skill: unknown target"
            );
            targets.push("???");
        }

        format!("{} for {}", text, concat_list_and(targets))
    }

    /// `attributes` and `types` are mutually exclusive scopes; both
    /// set is unparseable data, reported and rendered empty.
    pub(crate) fn composition_buff(
        &self,
        skill: &crate::effect::ActiveSkill,
        duration: i64,
        attributes: &[u8],
        types: &[u8],
        atk_boost: f64,
        rcv_boost: f64,
    ) -> String {
        if !attributes.is_empty() && !types.is_empty() {
            tracing::warn!(
                target: AUDIT,
                skill_id = skill.skill_id,
                "can't parse active skill: attributes and types"
            );
            return String::new();
        }

        let text = format!(
            "{}+{}",
            self.fmt_duration(duration),
            self.fmt_multiplier_text(0.0, atk_boost, rcv_boost, 0.0)
        );
        if !attributes.is_empty() {
            format!("{} for each {} card in team", text, self.attrs_to_str(attributes))
        } else {
            format!(
                "{} for each instance of {} in team",
                text,
                self.typing_to_str(types, "or")
            )
        }
    }

    pub(crate) fn seven_by_six_board(&self, duration: i64) -> String {
        format!("{}the board becomes 7x6", self.fmt_duration(duration))
    }

    pub(crate) fn damage_cap_boost(&self, duration: i64, damage_cap: f64) -> String {
        format!(
            "{}this monster damage cap becomes {}",
            self.fmt_duration(duration),
            fmt_mult(damage_cap * 1e8)
        )
    }

    pub(crate) fn inflict_enemy_skill(&self, selector_type: i64, players: &[i64]) -> String {
        let lead = match selector_type {
            2 if players.len() == 1 => {
                format!("To the player in the {} place, ", ordinal(players[0]))
            }
            2 => format!(
                "To the players in the {} places, ",
                concat_list_and(players.iter().map(|p| ordinal(*p)))
            ),
            3 => "To all players higher ranked than you, ".to_string(),
            _ => {
                tracing::warn!(
                    target: AUDIT,
                    selector_type,
                    "invalid enemy-skill selector type"
                );
                "To some other players, ".to_string()
            }
        };
        format!("{}do something mean (probably)", lead)
    }

    pub(crate) fn change_monster(&self, transform_ids: &[u32]) -> String {
        match transform_ids.first() {
            Some(id) => format!("Change to [{}] for the duration of the dungeon", id),
            None => {
                tracing::warn!(target: AUDIT, "transform skill with no transform targets");
                String::new()
            }
        }
    }

    /// Equal weights read as a plain "or" list; otherwise each option
    /// carries its reduced-fraction probability. BTreeMap ordering
    /// keeps the output stable regardless of load order.
    pub(crate) fn random_change_monster(&self, transform_ids: &BTreeMap<u32, u32>) -> String {
        let mons = if transform_ids.values().all(|count| *count == 1) {
            concat_list(transform_ids.keys().map(|id| format!("[{}]", id)), "or")
        } else {
            let denom: u32 = transform_ids.values().sum();
            concat_list(
                transform_ids.iter().map(|(id, numer)| {
                    format!(
                        "[{}] ({} chance)",
                        id,
                        reduced_fraction(*numer as u64, denom as u64)
                    )
                }),
                "or",
            )
        };
        format!("Randomly change to {} for the duration of the dungeon", mons)
    }
}
