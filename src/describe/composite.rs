//! Resolution of composite effects: multi-part skills, threshold
//! guards, evolving/looping skills, and random choices.

use crate::effect::ActiveSkill;
use crate::format::concat_list_and;

use super::{Describer, DescribeError, PartContext};

/// One distinct rendered part with its repeat count, in first-
/// occurrence order.
struct RenderedPart {
    text: String,
    repeat: i64,
    guard: bool,
}

impl Describer {
    /// Combine several independent parts into one sentence.
    ///
    /// Parts rendering to identical text collapse into one item with
    /// a repeat suffix. Items join with "; ", except that a guard
    /// prefixes the item after it directly.
    pub(crate) fn multi_part(&self, parts: &[ActiveSkill]) -> Result<String, DescribeError> {
        let mut items: Vec<RenderedPart> = Vec::new();
        for (index, part) in parts.iter().enumerate() {
            let ctx = part
                .effect
                .needs_context()
                .then_some(PartContext { index });
            let text = self.describe_in_context(part, ctx)?;
            match items.iter_mut().find(|item| item.text == text) {
                Some(item) => item.repeat += 1,
                None => items.push(RenderedPart {
                    text,
                    repeat: 1,
                    guard: part.effect.is_conditional(),
                }),
            }
        }

        let mut out = String::new();
        for (c, item) in items.iter().enumerate() {
            if item.repeat > 1 {
                out.push_str(&self.fmt_repeated(&item.text, item.repeat));
            } else {
                out.push_str(&item.text);
            }
            if c != items.len() - 1 && !item.guard {
                out.push_str("; ");
            }
        }
        Ok(out)
    }

    pub(crate) fn conditional_hp_threshold(&self, lower_limit: i64, upper_limit: i64) -> String {
        if lower_limit == 0 {
            format!("If HP <= {}%: ", upper_limit)
        } else if upper_limit == 100 {
            format!("If HP >= {}%: ", lower_limit)
        } else {
            format!("If HP is between {}% and {}%: ", lower_limit, upper_limit)
        }
    }

    /// Floor guards phrase differently when they open the composite:
    /// the first branch states a usage requirement, later branches
    /// read as plain conditions.
    pub(crate) fn conditional_floor_threshold(
        &self,
        lower_limit: i64,
        upper_limit: i64,
        ctx: Option<PartContext>,
    ) -> String {
        let clause = if lower_limit == 0 {
            format!(" on floor {} or earlier: ", upper_limit)
        } else if upper_limit == 9999 {
            format!(" on floor {} or later: ", lower_limit)
        } else {
            format!(
                " between floor {} and floor {} (inclusive): ",
                lower_limit, upper_limit
            )
        };

        let lead = match ctx {
            Some(ctx) if ctx.is_first() => {
                if lower_limit == 0 {
                    "Must be used"
                } else if upper_limit == 9999 {
                    "Can only be used"
                } else {
                    "Must (and can only) be used"
                }
            }
            _ => "If",
        };
        format!("{}{}", lead, clause)
    }

    pub(crate) fn random_skill(
        &self,
        child_skills: &[ActiveSkill],
    ) -> Result<String, DescribeError> {
        let mut options = Vec::with_capacity(child_skills.len());
        for (c, child) in child_skills.iter().enumerate() {
            options.push(format!("{}) {}", c + 1, self.describe(child)?));
        }
        Ok(format!(
            "Activate a random skill from the list: {}",
            concat_list_and(options)
        ))
    }

    pub(crate) fn evolving_skill(
        &self,
        child_skills: &[ActiveSkill],
        looping: bool,
    ) -> Result<String, DescribeError> {
        let mut text = if looping {
            "After each skill, evolve to the next looping around if the end is reached:"
                .to_string()
        } else {
            "After each skill, evolve to the next:".to_string()
        };
        for (c, child) in child_skills.iter().enumerate() {
            text.push_str(&format!(" {}) {}", c + 1, self.describe(child)?));
        }
        Ok(text)
    }
}
