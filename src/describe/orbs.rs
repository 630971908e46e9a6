//! Converters for orb-change, spawn, skyfall, and board-surface effects.

use crate::effect::{ActiveSkill, Board, LineChange};
use crate::format::{
    concat_list_and, fmt_mult, noun_count, noun_count_fmt, ordinal, pluralize, pluralize_verb,
};
use crate::tables::{ATTRIBUTE_UNIVERSE, COLUMN_PHRASES, MATCHABLE_ATTRIBUTES, ROW_PHRASES};

use super::{Describer, DescribeError, AUDIT};

impl Describer {
    pub(crate) fn double_orb_change(&self, from_attrs: &[u8], to_attrs: &[u8]) -> String {
        if to_attrs.len() == 1 {
            format!(
                "Change {} and {} orbs to {} orbs",
                self.tables().attribute(from_attrs[0]),
                self.tables().attribute(from_attrs[1]),
                self.tables().attribute(to_attrs[0])
            )
        } else {
            format!(
                "Change {} orbs to {} orbs; Change {} orbs to {} orbs",
                self.tables().attribute(from_attrs[0]),
                self.tables().attribute(to_attrs[0]),
                self.tables().attribute(from_attrs[1]),
                self.tables().attribute(to_attrs[1])
            )
        }
    }

    pub(crate) fn random_orb_change(&self, from_attrs: &[u8], to_attrs: &[u8]) -> String {
        let source = if from_attrs.len() >= ATTRIBUTE_UNIVERSE {
            "all orbs to ".to_string()
        } else {
            format!("{} orbs to ", self.attrs_to_str(from_attrs))
        };
        format!("Change {}{} orbs", source, self.attrs_to_str(to_attrs))
    }

    pub(crate) fn board_change(&self, to_attrs: &[u8]) -> String {
        format!("Change all orbs to {} orbs", self.attrs_to_str(to_attrs))
    }

    pub(crate) fn board_refresh(&self) -> String {
        "Replace all orbs".to_string()
    }

    pub(crate) fn enhance(&self, orbs: &[u8]) -> String {
        if orbs.is_empty() {
            String::new()
        } else if orbs.len() == MATCHABLE_ATTRIBUTES {
            "Enhance all orbs".to_string()
        } else {
            format!("Enhance all {} orbs", self.attrs_to_str(orbs))
        }
    }

    /// Lock counts of 42 or more cover any possible board and read
    /// as "all"; a full attribute list drops the color qualifier.
    pub(crate) fn lock(&self, orbs: &[u8], count: i64) -> String {
        let amount = if count >= 42 {
            "all".to_string()
        } else {
            count.to_string()
        };
        if orbs.len() >= ATTRIBUTE_UNIVERSE {
            format!("Lock {} orbs", amount)
        } else {
            format!("Lock {} {} orbs", amount, self.attrs_to_str(orbs))
        }
    }

    pub(crate) fn unlock_all_orbs(&self) -> String {
        "Unlock all orbs".to_string()
    }

    pub(crate) fn unlock_board_path(&self) -> String {
        "Unlock all orbs; Change all orbs to Fire, Water, Wood, and Light orbs; \
         Show path to 3 combos"
            .to_string()
    }

    pub(crate) fn spawn_orb(&self, amount: i64, orbs: &[u8], excluding_orbs: &[u8]) -> String {
        let mut text = format!(
            "Create {} {} {}",
            amount,
            self.attrs_to_str(orbs),
            pluralize("orb", amount)
        );
        if orbs != excluding_orbs && !excluding_orbs.is_empty() {
            // Exclusions beyond the created colors, in stable id order.
            let mut extra: Vec<u8> = excluding_orbs
                .iter()
                .copied()
                .filter(|o| !orbs.contains(o))
                .collect();
            extra.sort_unstable();
            extra.dedup();
            text.push_str(&format!(
                " over non {} orbs",
                concat_list_and(extra.iter().map(|o| self.tables().attribute(*o)))
            ));
        } else if excluding_orbs.is_empty() {
            text.push_str(&format!(" over any {}", pluralize("orb", amount)));
        }
        text
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn double_spawn_orb(
        &self,
        amount: i64,
        orbs: &[u8],
        excluding_orbs: &[u8],
        amount2: i64,
        orbs2: &[u8],
        excluding_orbs2: &[u8],
    ) -> String {
        let mut text = self.spawn_orb(amount, orbs, excluding_orbs);
        text.push_str(&format!(
            ", and create {} {} {}",
            amount2,
            self.attrs_to_str(orbs2),
            pluralize("orb", amount2)
        ));
        if orbs != excluding_orbs2 && !excluding_orbs2.is_empty() {
            let mut extra: Vec<u8> = excluding_orbs2
                .iter()
                .copied()
                .filter(|o| !orbs2.contains(o))
                .collect();
            extra.sort_unstable();
            extra.dedup();
            text.push_str(&format!(
                " over non {} orbs",
                concat_list_and(extra.iter().map(|o| self.tables().attribute(*o)))
            ));
        } else if excluding_orbs2.is_empty() {
            text.push_str(&format!(" over any {}", pluralize("orb", amount2)));
        }
        text
    }

    pub(crate) fn row_change(&self, rows: &[LineChange]) -> String {
        self.line_change(rows, &ROW_PHRASES)
    }

    pub(crate) fn column_change(&self, columns: &[LineChange]) -> String {
        self.line_change(columns, &COLUMN_PHRASES)
    }

    fn line_change(&self, lines: &[LineChange], phrases: &[&str]) -> String {
        let lines: Vec<(u8, String)> = lines
            .iter()
            .map(|line| (line.index, format!("{} orbs", self.attrs_to_str(&line.attrs))))
            .collect();
        self.line_change_text(&lines, phrases)
    }

    pub(crate) fn change_skyfall(
        &self,
        duration: i64,
        max_duration: Option<i64>,
        percentage: f64,
        orbs: &[u8],
    ) -> String {
        let text = self.fmt_duration_range(duration, max_duration);
        let rate = fmt_mult(percentage * 100.0);
        if rate == "100" {
            format!("{}only {} orbs will appear", text, self.attrs_to_str(orbs))
        } else {
            format!(
                "{}{} orbs are more likely to appear by {}%",
                text,
                self.attrs_to_str(orbs),
                rate
            )
        }
    }

    pub(crate) fn enhance_skyfall(&self, duration: i64, percentage_increase: f64) -> String {
        format!(
            "{}enhanced orbs are more likely to appear by {}%",
            self.fmt_duration(duration),
            fmt_mult(percentage_increase * 100.0)
        )
    }

    pub(crate) fn no_skyfall(&self, duration: i64) -> String {
        format!("{}no skyfall", self.fmt_duration(duration))
    }

    pub(crate) fn skyfall_lock(&self, duration: i64, orbs: &[u8]) -> String {
        let attrs = if orbs.is_empty() {
            "all".to_string()
        } else {
            self.attrs_to_str(orbs)
        };
        format!("{}{} orbs appear locked", self.fmt_duration(duration), attrs)
    }

    pub(crate) fn nail_orb_skyfall(&self, duration: i64, chance: f64) -> String {
        format!(
            "{}+{}% chance for nail orb skyfall",
            self.fmt_duration(duration),
            fmt_mult(chance * 100.0)
        )
    }

    pub(crate) fn create_unmatchable(&self, duration: i64, orbs: &[u8]) -> String {
        let mut text = self.fmt_duration(duration);
        if !orbs.is_empty() {
            text.push_str(&format!("{} ", self.attrs_to_str(orbs)));
        }
        format!("{}orbs are unmatchable", text)
    }

    pub(crate) fn free_orb_movement(&self, duration: i64) -> String {
        format!("Freely move orbs for {}", noun_count("second", duration))
    }

    /// Exactly one of the static and percentage bonuses may be set;
    /// both nonzero is a schema violation, not a describable state.
    pub(crate) fn move_time_buff(
        &self,
        skill: &ActiveSkill,
        duration: i64,
        static_bonus: f64,
        percentage: f64,
    ) -> Result<String, DescribeError> {
        if static_bonus == 0.0 {
            Ok(format!(
                "{}{}x orb move time",
                self.fmt_duration(duration),
                fmt_mult(percentage)
            ))
        } else if percentage == 0.0 {
            Ok(format!(
                "{}increase orb move time by {}",
                self.fmt_duration(duration),
                noun_count_fmt("second", static_bonus)
            ))
        } else {
            Err(DescribeError::ContractViolation {
                skill_id: skill.skill_id,
                name: skill.name.clone(),
                detail: format!(
                    "move-time buff sets both a static bonus ({}) and a percentage ({})",
                    static_bonus, percentage
                ),
            })
        }
    }

    pub(crate) fn spawn_spinner(
        &self,
        skill: &ActiveSkill,
        random_count: i64,
        speed: f64,
        turns: i64,
        positions: &Board,
    ) -> String {
        if random_count != 0 {
            format!(
                "Create {} that {} every {:.1}s for {}",
                noun_count("spinner", random_count),
                pluralize_verb("change", random_count),
                speed,
                noun_count("turn", turns)
            )
        } else {
            self.fixed_shape(positions, "spinner", skill)
        }
    }

    pub(crate) fn cloud(
        &self,
        width: i64,
        height: i64,
        origin_row: Option<i64>,
        origin_column: Option<i64>,
        duration: i64,
    ) -> String {
        let shape = if width == 6 && height == 1 {
            "row".to_string()
        } else if width == 1 && height == 5 {
            "column".to_string()
        } else if width == height {
            format!("{}×{} square", width, height)
        } else {
            format!("{}×{} rectangle", width, height)
        };

        let mut pos: Vec<String> = Vec::new();
        if let Some(row) = origin_row {
            if shape != "row" {
                pos.push(format!("{} row", ordinal(row)));
            }
        }
        if let Some(column) = origin_column {
            if shape != "column" {
                pos.push(format!("{} column", ordinal(column)));
            }
        }
        if pos.is_empty() {
            pos.push("a random location".to_string());
        }

        format!(
            "A {} of clouds appears for {} at {}",
            shape,
            noun_count("turn", duration),
            pos.join(", ")
        )
    }

    /// `column` is 1-based; out-of-range values degrade to a
    /// placeholder.
    pub(crate) fn tape(&self, duration: i64, column: i64) -> String {
        let phrase = if (1..=6).contains(&column) {
            COLUMN_PHRASES[(column - 1) as usize]
        } else {
            tracing::warn!(
                target: AUDIT,
                column,
                "tape column outside the board"
            );
            "???"
        };
        format!("{}seal {}", self.fmt_duration(duration), phrase)
    }
}
