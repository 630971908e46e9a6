//! Active-skill effect records.
//!
//! Effects are immutable tagged values produced by an external data
//! loader. The tag selects which converter applies; fields are drawn
//! from a shared vocabulary of multipliers, turn counts, attribute
//! ids, flags, and board positions. Composite kinds own an ordered
//! sequence of child skills (tree-shaped, never shared).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One active skill as loaded from the game data.
///
/// Carries identifying metadata alongside the effect so data-quality
/// diagnostics can point at the offending skill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveSkill {
    pub skill_id: u32,
    pub name: String,
    pub raw_description: String,
    pub effect: SkillEffect,
}

impl ActiveSkill {
    pub fn new(
        skill_id: u32,
        name: impl Into<String>,
        raw_description: impl Into<String>,
        effect: SkillEffect,
    ) -> Self {
        Self {
            skill_id,
            name: name.into(),
            raw_description: raw_description.into(),
            effect,
        }
    }

    /// A skill with blank metadata, for tests and ad-hoc conversion.
    pub fn anonymous(effect: SkillEffect) -> Self {
        Self::new(0, "", "", effect)
    }
}

/// Which cells of the 5x6 board an effect touches.
///
/// Per-row ordered column indices; valid columns are 0..=5 and rows
/// may be empty. The shape recognizer clones this before consuming
/// matched cells, so the caller's record is never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub rows: [SmallVec<[u8; 6]>; 5],
}

impl Board {
    /// Build a board from per-row column-index slices.
    pub fn from_rows(rows: [&[u8]; 5]) -> Self {
        Self {
            rows: rows.map(SmallVec::from_slice),
        }
    }

    /// Total number of affected cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Structural equality against a literal pattern.
    pub fn matches(&self, pattern: [&[u8]; 5]) -> bool {
        self.rows
            .iter()
            .zip(pattern)
            .all(|(row, expected)| row.as_slice() == expected)
    }

    /// 'O'/'X' picture of the board, one line per row.
    pub fn ascii(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                (0u8..6)
                    .map(|col| if row.contains(&col) { 'O' } else { 'X' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One row or column conversion in a line-change effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// Row or column index (rows 0..=4 top-down, columns 0..=5 left-right).
    pub index: u8,
    /// Attributes the line's orbs become.
    pub attrs: Vec<u8>,
}

impl LineChange {
    pub fn new(index: u8, attrs: impl Into<Vec<u8>>) -> Self {
        Self {
            index,
            attrs: attrs.into(),
        }
    }
}

/// One active-skill effect.
///
/// One variant per effect kind in the game data; the converter for a
/// variant encodes its phrasing rules. Composite variants own child
/// skills and are resolved recursively.
///
/// ## Conventions
///
/// - `duration`/`turns` are turn counts; `max_*` variants describe a
///   range when present and different.
/// - `mass_attack` selects "all enemies" over "an enemy".
/// - Multipliers are decimal factors; `percentage_*` fields are
///   fractions of one (0.5 = 50%).
/// - Attribute/type ids are resolved through [`crate::NameTables`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    // === Offense ===

    /// ATK-multiplier nuke of a fixed attribute.
    AttrNuke {
        attribute: u8,
        multiplier: f64,
        mass_attack: bool,
    },

    /// Fixed-damage nuke of a fixed attribute.
    FixedAttrNuke {
        attribute: u8,
        damage: i64,
        mass_attack: bool,
    },

    /// ATK-multiplier nuke using the monster's own attribute.
    SelfAttrNuke {
        multiplier: f64,
        mass_attack: bool,
    },

    /// Nuke with a randomized multiplier range.
    RandomNuke {
        attribute: u8,
        minimum_multiplier: f64,
        maximum_multiplier: f64,
        mass_attack: bool,
    },

    /// Nuke scaled by the team's total HP.
    HpNuke {
        attribute: u8,
        multiplier: f64,
        mass_attack: bool,
    },

    /// Fixed true damage.
    Laser {
        damage: i64,
        mass_attack: bool,
    },

    /// Fixed damage dealt in multiple hits.
    MultiHitLaser {
        damage: i64,
        mass_attack: bool,
    },

    /// Fixed damage to all enemies of one attribute.
    DamageToAttrEnemy {
        attack_attribute: u8,
        enemy_attribute: u8,
        damage: i64,
    },

    /// Nuke scaled by the team's total ATK of selected attributes.
    AttackAttrTeamAtk {
        attack_attribute: u8,
        multiplier: f64,
        team_attributes: Vec<u8>,
        mass_attack: bool,
    },

    /// Nuke whose multiplier scales inversely with remaining HP.
    GrudgeStrike {
        attribute: u8,
        mass_attack: bool,
        low_multiplier: f64,
        high_multiplier: f64,
    },

    /// Nuke that recovers a share of the damage as HP.
    DrainAttack {
        atk_multiplier: f64,
        recover_multiplier: f64,
        mass_attack: bool,
    },

    /// Attribute nuke that recovers a share of the damage as HP.
    DrainAttrAttack {
        attribute: u8,
        atk_multiplier: f64,
        recover_multiplier: f64,
        mass_attack: bool,
    },

    /// Poison all enemies.
    Poison {
        multiplier: f64,
    },

    /// Reduce enemies' remaining HP by a percentage.
    Gravity {
        percentage_hp: f64,
    },

    /// Damage equal to a percentage of enemies' max HP.
    TrueGravity {
        percentage_max_hp: f64,
    },

    /// Reduce own HP.
    Suicide {
        hp_remaining: f64,
    },

    /// Reduce own HP, then a fixed-damage nuke.
    SuicideNuke {
        hp_remaining: f64,
        attribute: u8,
        damage: i64,
        mass_attack: bool,
    },

    /// Reduce own HP, then a randomized-multiplier nuke.
    SuicideRandomNuke {
        hp_remaining: f64,
        attribute: u8,
        minimum_multiplier: f64,
        maximum_multiplier: f64,
        mass_attack: bool,
    },

    // === Defense / recovery ===

    /// Damage reduction shield.
    Shield {
        duration: i64,
        shield: f64,
    },

    /// Damage reduction against a single attribute.
    ElementalShield {
        duration: i64,
        attribute: u8,
        shield: f64,
    },

    /// Reduce enemies' defense.
    DefenseReduction {
        duration: i64,
        shield: f64,
    },

    /// Heal and/or bind removal. At most one heal quantity is set.
    HealActive {
        hp: i64,
        rcv_multiplier_as_hp: f64,
        percentage_max_hp: f64,
        team_rcv_multiplier_as_hp: f64,
        card_bind: i64,
        awoken_bind: i64,
    },

    /// Delay enemies' next attack.
    Delay {
        turns: i64,
    },

    /// Counterattack with a multiplier and attribute.
    Counterattack {
        duration: i64,
        multiplier: f64,
        attribute: u8,
    },

    /// Heal-over-time and/or bind removal.
    AutoHeal {
        duration: i64,
        percentage_max_hp: f64,
        card_bind: i64,
        awoken_bind: i64,
    },

    // === Stat buffs ===

    /// RCV multiplier.
    RcvBoost {
        duration: i64,
        multiplier: f64,
    },

    /// ATK multiplier for selected attributes, optionally with RCV.
    AttributeAttackBoost {
        duration: i64,
        multiplier: f64,
        rcv_boost: bool,
        attributes: Vec<u8>,
    },

    /// ATK multiplier for selected monster types.
    TypeAttackBoost {
        duration: i64,
        multiplier: f64,
        types: Vec<u8>,
    },

    /// HP multiplier.
    HpBoost {
        duration: i64,
        hp: f64,
    },

    /// All attacks hit all enemies.
    MassAttack {
        duration: i64,
    },

    /// Flat combo-count increase.
    ExtraCombo {
        duration: i64,
        combos: i64,
    },

    /// Bypass damage/attribute absorb shields.
    AbsorbShieldBypass {
        duration: i64,
        attribute_absorb: bool,
        damage_absorb: bool,
    },

    /// Bypass void-damage shields.
    VoidShieldBypass {
        duration: i64,
    },

    // === Awakening-scaled effects ===

    /// Heal scaled by awakening count on the team.
    AwakeningHeal {
        amount_per: i64,
        awakenings: Vec<u32>,
    },

    /// ATK boost scaled by awakening count.
    AwakeningAttackBoost {
        duration: i64,
        amount_per: f64,
        awakenings: Vec<u32>,
    },

    /// Damage reduction scaled by awakening count.
    AwakeningShield {
        duration: i64,
        amount_per: f64,
        awakenings: Vec<u32>,
    },

    /// ATK/RCV boost scaled by awakening count.
    AwakeningStatBoost {
        duration: i64,
        atk_per: f64,
        rcv_per: f64,
        awakenings: Vec<u32>,
    },

    // === Team / enemy utility ===

    /// Change all enemies to one attribute.
    ChangeEnemyAttribute {
        attribute: u8,
        turns: Option<i64>,
    },

    /// Charge allies' skills.
    Haste {
        turns: i64,
        max_turns: Option<i64>,
    },

    /// Change own attribute.
    SelfAttributeChange {
        attribute: u8,
        duration: i64,
    },

    /// Become the team leader until used again.
    LeaderSwap,

    /// Swap the leader with a specific sub slot.
    LeadSwapSub {
        sub_slot: i64,
    },

    /// Disable the team's active skills.
    AllyActiveDisable {
        turns: i64,
    },

    /// Self-delay the team's active skills.
    AllyActiveDelay {
        turns: i64,
    },

    /// Reduce the unable-to-match debuff.
    MatchDisable {
        duration: i64,
    },

    /// ATK change for targets selected by bitmask
    /// (1 = self, 2 = leader, 4 = friend leader, 8 = subs).
    TeamTargetStatChange {
        duration: i64,
        target: u32,
        atk_mult: f64,
    },

    /// Stat boost per matching team member. `attributes` and `types`
    /// are mutually exclusive scopes.
    CompositionBuff {
        duration: i64,
        attributes: Vec<u8>,
        types: Vec<u8>,
        atk_boost: f64,
        rcv_boost: f64,
    },

    /// The board becomes 7x6.
    SevenBySixBoard {
        duration: i64,
    },

    /// Raise this monster's damage cap (in units of 100 million).
    DamageCapBoost {
        duration: i64,
        damage_cap: f64,
    },

    /// Inflict an enemy-skill effect on other players (ranked play).
    InflictEnemySkill {
        selector_type: i64,
        players: Vec<i64>,
    },

    /// Transform into another monster for the dungeon.
    ChangeMonster {
        transform_ids: Vec<u32>,
    },

    /// Transform into a randomly chosen monster, weighted by count.
    RandomChangeMonster {
        transform_ids: BTreeMap<u32, u32>,
    },

    // === Orbs and board ===

    /// Change two source attributes to target attributes.
    DoubleOrbChange {
        from_attrs: Vec<u8>,
        to_attrs: Vec<u8>,
    },

    /// Change selected (or all) attributes to target attributes.
    RandomOrbChange {
        from_attrs: Vec<u8>,
        to_attrs: Vec<u8>,
    },

    /// Change every orb on the board.
    BoardChange {
        to_attrs: Vec<u8>,
    },

    /// Replace all orbs with a fresh random board.
    BoardRefresh,

    /// Enhance orbs of selected attributes.
    Enhance {
        orbs: Vec<u8>,
    },

    /// Lock orbs of selected attributes.
    Lock {
        orbs: Vec<u8>,
        count: i64,
    },

    /// Unlock all orbs.
    UnlockAllOrbs,

    /// Unlock, recolor, and show a combo path (a named one-off skill).
    UnlockBoardPath,

    /// Create orbs of selected attributes.
    SpawnOrb {
        amount: i64,
        orbs: Vec<u8>,
        excluding_orbs: Vec<u8>,
    },

    /// Two orb creations in one skill.
    DoubleSpawnOrb {
        amount: i64,
        orbs: Vec<u8>,
        excluding_orbs: Vec<u8>,
        amount2: i64,
        orbs2: Vec<u8>,
        excluding_orbs2: Vec<u8>,
    },

    /// Change whole rows to attributes.
    RowChange {
        rows: Vec<LineChange>,
    },

    /// Change whole columns to attributes.
    ColumnChange {
        columns: Vec<LineChange>,
    },

    /// Skew skyfall odds toward selected attributes.
    ChangeSkyfall {
        duration: i64,
        max_duration: Option<i64>,
        percentage: f64,
        orbs: Vec<u8>,
    },

    /// Raise enhanced-orb skyfall odds.
    EnhanceSkyfall {
        duration: i64,
        percentage_increase: f64,
    },

    /// No skyfall matches.
    NoSkyfall {
        duration: i64,
    },

    /// Skyfall orbs appear locked.
    SkyfallLock {
        duration: i64,
        orbs: Vec<u8>,
    },

    /// Chance of nail-orb skyfall.
    NailOrbSkyfall {
        duration: i64,
        chance: f64,
    },

    /// Selected orbs cannot be matched.
    CreateUnmatchable {
        duration: i64,
        orbs: Vec<u8>,
    },

    /// Freely move orbs for a number of seconds.
    FreeOrbMovement {
        duration: i64,
    },

    /// Orb move-time bonus; exactly one of the two fields is set.
    MoveTimeBuff {
        duration: i64,
        static_bonus: f64,
        percentage: f64,
    },

    /// Create orbs at fixed board positions (shape-recognized).
    FixedPositionSpawn {
        attribute: u8,
        positions: Board,
    },

    /// Create spinners, either randomly placed or at fixed positions.
    SpawnSpinner {
        random_count: i64,
        speed: f64,
        turns: i64,
        positions: Board,
    },

    /// A cloud obscures part of the board.
    Cloud {
        width: i64,
        height: i64,
        origin_row: Option<i64>,
        origin_column: Option<i64>,
        duration: i64,
    },

    /// Tape seals a column (1-based, 1..=6; out-of-range columns
    /// render a placeholder).
    Tape {
        duration: i64,
        column: i64,
    },

    // === Composite ===

    /// Several independent effects combined into one skill.
    MultiPart {
        parts: Vec<ActiveSkill>,
    },

    /// Guard: following parts apply only in an HP band.
    ConditionalHpThreshold {
        lower_limit: i64,
        upper_limit: i64,
    },

    /// Guard: following parts apply only in a dungeon-floor band.
    /// Phrasing depends on the guard's position among its siblings.
    ConditionalFloorThreshold {
        lower_limit: i64,
        upper_limit: i64,
    },

    /// Activate one child skill at random.
    RandomSkill {
        child_skills: Vec<ActiveSkill>,
    },

    /// Skill evolves to the next child after each use.
    EvolvingSkill {
        child_skills: Vec<ActiveSkill>,
    },

    /// Skill evolves after each use, looping at the end.
    LoopingEvolvingSkill {
        child_skills: Vec<ActiveSkill>,
    },
}

impl SkillEffect {
    /// Guards embed their own separator semantics: the multi-part
    /// joiner does not insert "; " after them.
    pub fn is_conditional(&self) -> bool {
        matches!(
            self,
            SkillEffect::ConditionalHpThreshold { .. }
                | SkillEffect::ConditionalFloorThreshold { .. }
        )
    }

    /// Whether this effect's phrasing depends on its position among
    /// composite siblings.
    pub fn needs_context(&self) -> bool {
        matches!(self, SkillEffect::ConditionalFloorThreshold { .. })
    }
}
