//! Converters for damage-dealing effects.

use crate::format::{fmt_mult, fmt_thousands, minmax};

use super::Describer;

impl Describer {
    pub(crate) fn attr_nuke(&self, attribute: u8, multiplier: f64, mass_attack: bool) -> String {
        format!(
            "Deal {}x ATK {} damage to {}",
            fmt_mult(multiplier),
            self.tables().attribute(attribute),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn fixed_attr_nuke(&self, attribute: u8, damage: i64, mass_attack: bool) -> String {
        format!(
            "Deal {} {} damage to {}",
            fmt_thousands(damage),
            self.tables().attribute(attribute),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn self_attr_nuke(&self, multiplier: f64, mass_attack: bool) -> String {
        format!(
            "Deal {}x ATK damage to {}",
            fmt_mult(multiplier),
            self.fmt_mass_atk(mass_attack)
        )
    }

    /// A genuinely randomized multiplier renders as a parenthetical
    /// range; a degenerate range reads as a plain nuke.
    pub(crate) fn random_nuke(
        &self,
        attribute: u8,
        minimum_multiplier: f64,
        maximum_multiplier: f64,
        mass_attack: bool,
    ) -> String {
        if minimum_multiplier != maximum_multiplier {
            format!(
                "Randomized {} damage to {}({}~{}x)",
                self.tables().attribute(attribute),
                self.fmt_mass_atk(mass_attack),
                fmt_mult(minimum_multiplier),
                fmt_mult(maximum_multiplier)
            )
        } else {
            format!(
                "Deal {}x {} damage to {}",
                fmt_mult(maximum_multiplier),
                self.tables().attribute(attribute),
                self.fmt_mass_atk(mass_attack)
            )
        }
    }

    pub(crate) fn hp_nuke(&self, attribute: u8, multiplier: f64, mass_attack: bool) -> String {
        format!(
            "Deal {} damage equal to {}x of team's total HP to {}",
            self.tables().attribute(attribute),
            fmt_mult(multiplier),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn laser(&self, damage: i64, mass_attack: bool) -> String {
        format!(
            "Deal {} fixed damage to {}",
            fmt_thousands(damage),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn multi_hit_laser(&self, damage: i64, mass_attack: bool) -> String {
        format!(
            "Deal {} damage to {}",
            fmt_thousands(damage),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn damage_to_attr_enemy(
        &self,
        attack_attribute: u8,
        enemy_attribute: u8,
        damage: i64,
    ) -> String {
        format!(
            "Deal {} {} damage to all {} Att. enemies",
            fmt_thousands(damage),
            self.tables().attribute(attack_attribute),
            self.tables().attribute(enemy_attribute)
        )
    }

    pub(crate) fn attack_attr_team_atk(
        &self,
        attack_attribute: u8,
        multiplier: f64,
        team_attributes: &[u8],
        mass_attack: bool,
    ) -> String {
        format!(
            "Deal {} damage equal to {}x of team's total {} ATK to {}",
            self.tables().attribute(attack_attribute),
            fmt_mult(multiplier),
            self.attrs_to_str(team_attributes),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn grudge_strike(
        &self,
        attribute: u8,
        mass_attack: bool,
        low_multiplier: f64,
        high_multiplier: f64,
    ) -> String {
        format!(
            "Deal {} damage to {} depending on HP level ({}x at 1 HP and {}x at 100% HP)",
            self.tables().attribute(attribute),
            self.fmt_mass_atk(mass_attack),
            fmt_mult(low_multiplier),
            fmt_mult(high_multiplier)
        )
    }

    pub(crate) fn drain_attack(
        &self,
        atk_multiplier: f64,
        recover_multiplier: f64,
        mass_attack: bool,
    ) -> String {
        let mut text = format!(
            "Deal {}x ATK damage to {}",
            fmt_mult(atk_multiplier),
            self.fmt_mass_atk(mass_attack)
        );
        if recover_multiplier == 1.0 {
            text.push_str(" and recover the same amount as HP");
        } else {
            text.push_str(&format!(
                " and recover {}% of the damage as HP",
                fmt_mult(recover_multiplier * 100.0)
            ));
        }
        text
    }

    pub(crate) fn drain_attr_attack(
        &self,
        attribute: u8,
        atk_multiplier: f64,
        recover_multiplier: f64,
        mass_attack: bool,
    ) -> String {
        let mut text = format!(
            "Deal {}x ATK {} damage to {}",
            fmt_mult(atk_multiplier),
            self.tables().attribute(attribute),
            self.fmt_mass_atk(mass_attack)
        );
        if recover_multiplier == 1.0 {
            text.push_str(" and recover the amount as HP");
        } else {
            text.push_str(&format!(
                " and recover {}% of the damage as HP",
                fmt_mult(recover_multiplier * 100.0)
            ));
        }
        text
    }

    pub(crate) fn poison(&self, multiplier: f64) -> String {
        format!("Poison all enemies ({}x ATK)", fmt_mult(multiplier))
    }

    pub(crate) fn gravity(&self, percentage_hp: f64) -> String {
        format!(
            "Reduce enemies' remaining HP by {}%",
            fmt_mult(percentage_hp * 100.0)
        )
    }

    pub(crate) fn true_gravity(&self, percentage_max_hp: f64) -> String {
        format!(
            "Deal damage equal to {}% of enemies' max HP",
            fmt_mult(percentage_max_hp * 100.0)
        )
    }

    pub(crate) fn suicide(&self, hp_remaining: f64) -> String {
        if hp_remaining == 0.0 {
            "Reduce HP to 1".to_string()
        } else {
            format!("Reduce HP by {}%", fmt_mult((1.0 - hp_remaining) * 100.0))
        }
    }

    pub(crate) fn suicide_nuke(
        &self,
        hp_remaining: f64,
        attribute: u8,
        damage: i64,
        mass_attack: bool,
    ) -> String {
        format!(
            "{}; Deal {} {} damage to {}",
            self.suicide(hp_remaining),
            fmt_thousands(damage),
            self.tables().attribute(attribute),
            self.fmt_mass_atk(mass_attack)
        )
    }

    pub(crate) fn suicide_random_nuke(
        &self,
        hp_remaining: f64,
        attribute: u8,
        minimum_multiplier: f64,
        maximum_multiplier: f64,
        mass_attack: bool,
    ) -> String {
        format!(
            "{}; Deal {}x {} damage to {}",
            self.suicide(hp_remaining),
            minmax(minimum_multiplier, maximum_multiplier),
            self.tables().attribute(attribute),
            self.fmt_mass_atk(mass_attack)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_nuke() {
        let d = Describer::default();
        assert_eq!(
            d.attr_nuke(0, 20.0, false),
            "Deal 20x ATK Fire damage to an enemy"
        );
        assert_eq!(
            d.attr_nuke(4, 2.5, true),
            "Deal 2.5x ATK Dark damage to all enemies"
        );
    }

    #[test]
    fn test_fixed_nukes() {
        let d = Describer::default();
        assert_eq!(
            d.fixed_attr_nuke(3, 100000, true),
            "Deal 100,000 Light damage to all enemies"
        );
        assert_eq!(d.laser(99999, false), "Deal 99,999 fixed damage to an enemy");
        assert_eq!(d.multi_hit_laser(500, true), "Deal 500 damage to all enemies");
    }

    #[test]
    fn test_random_nuke_range() {
        let d = Describer::default();
        assert_eq!(
            d.random_nuke(1, 1.0, 5.0, false),
            "Randomized Water damage to an enemy(1~5x)"
        );
        assert_eq!(
            d.random_nuke(1, 3.0, 3.0, true),
            "Deal 3x Water damage to all enemies"
        );
    }

    #[test]
    fn test_drain_attack() {
        let d = Describer::default();
        assert_eq!(
            d.drain_attack(10.0, 1.0, true),
            "Deal 10x ATK damage to all enemies and recover the same amount as HP"
        );
        assert_eq!(
            d.drain_attack(5.0, 0.5, false),
            "Deal 5x ATK damage to an enemy and recover 50% of the damage as HP"
        );
    }

    #[test]
    fn test_gravities() {
        let d = Describer::default();
        assert_eq!(d.gravity(0.3), "Reduce enemies' remaining HP by 30%");
        assert_eq!(
            d.true_gravity(1.0),
            "Deal damage equal to 100% of enemies' max HP"
        );
    }

    #[test]
    fn test_suicide_family() {
        let d = Describer::default();
        assert_eq!(d.suicide(0.0), "Reduce HP to 1");
        assert_eq!(d.suicide(0.5), "Reduce HP by 50%");
        assert_eq!(
            d.suicide_random_nuke(0.0, 0, 50.0, 100.0, true),
            "Reduce HP to 1; Deal 50~100x Fire damage to all enemies"
        );
        assert_eq!(
            d.suicide_nuke(0.25, 4, 40000, false),
            "Reduce HP by 75%; Deal 40,000 Dark damage to an enemy"
        );
    }

    #[test]
    fn test_grudge_strike() {
        let d = Describer::default();
        assert_eq!(
            d.grudge_strike(4, false, 1.0, 10.0),
            "Deal Dark damage to an enemy depending on HP level (1x at 1 HP and 10x at 100% HP)"
        );
    }

    #[test]
    fn test_team_scaled_nukes() {
        let d = Describer::default();
        assert_eq!(
            d.hp_nuke(3, 2.0, true),
            "Deal Light damage equal to 2x of team's total HP to all enemies"
        );
        assert_eq!(
            d.attack_attr_team_atk(0, 3.0, &[0, 1], false),
            "Deal Fire damage equal to 3x of team's total Fire and Water ATK to an enemy"
        );
        assert_eq!(
            d.damage_to_attr_enemy(3, 4, 50000),
            "Deal 50,000 Light damage to all Dark Att. enemies"
        );
    }
}
