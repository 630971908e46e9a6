//! Board-shape recognition for fixed-position orb spawns.
//!
//! Works on a local clone of the board so matched cells can be
//! consumed without touching the caller's record. Precedence is
//! load-bearing: named table, then cross, then L, then square, then
//! full column/row, then diagnostic failure - several real boards
//! are simultaneously "almost" a cross and "almost" an L, and the
//! order decides which reading wins.

use smallvec::SmallVec;

use crate::effect::{ActiveSkill, Board};
use crate::format::{indef_article, pluralize};
use crate::tables::{COLUMN_PHRASES, ROW_PHRASES};

use super::{Describer, AUDIT};

/// A recognized shape primitive anchored at a board cell.
struct ShapeMatch {
    shape: &'static str,
    row: usize,
    column: u8,
}

impl Describer {
    /// Describe a fixed board pattern as orb creation. `orb` is the
    /// singular phrase for one created cell ("Fire orb", "spinner").
    ///
    /// Returns an empty string (after logging) for boards that match
    /// nothing; callers treat empty as "no effect text".
    pub(crate) fn fixed_shape(&self, positions: &Board, orb: &str, skill: &ActiveSkill) -> String {
        let orb_count = positions.cell_count();
        let orb = pluralize(orb, orb_count as i64);

        if let Some(named) = named_shape(positions, &orb) {
            return named;
        }

        if positions.rows.iter().flatten().any(|col| *col > 5) {
            tracing::warn!(
                target: AUDIT,
                skill_id = skill.skill_id,
                board = ?positions.rows,
                "board position outside the 5x6 grid"
            );
            return String::new();
        }

        // Consumable clone; the caller's record stays intact.
        let mut rows = positions.rows.clone();
        let mut output: Vec<ShapeMatch> = Vec::new();

        if orb_count % 5 == 0 {
            // Crosses: a 3-cell interior row flanked by single cells.
            for row in 1..4 {
                if rows[row].len() == 3 && rows[row - 1].len() == 1 && rows[row + 1].len() == 1 {
                    let column = rows[row][1];
                    rows[row].remove(1);
                    output.push(ShapeMatch { shape: "cross", row, column });
                }
            }
            // L shapes: a 3-cell row plus one cell from a neighbor.
            for row in 0..5 {
                if rows[row].len() != 3 {
                    continue;
                }
                if let Some(column) = take_l_foot(&mut rows, row) {
                    output.push(ShapeMatch { shape: "L shape", row, column });
                }
            }
        }

        if orb_count % 9 == 0 {
            // Squares: three consecutive 3-cell rows.
            for row in 1..4 {
                if rows[row].len() == 3 && rows[row - 1].len() == 3 && rows[row + 1].len() == 3 {
                    let column = rows[row][1];
                    rows[row].remove(1);
                    output.push(ShapeMatch { shape: "square", row, column });
                }
            }
        }

        let text = if !output.is_empty() {
            output
                .iter()
                .map(|m| {
                    format!(
                        "Create {} of {} with its center at {} and {}",
                        indef_article(m.shape),
                        orb,
                        ROW_PHRASES[m.row],
                        COLUMN_PHRASES[m.column as usize]
                    )
                })
                .collect::<Vec<_>>()
                .join("; ")
        } else {
            // No primitive consumed anything; the board is still
            // fully populated, so test it for whole lines.
            let columns: Vec<(u8, String)> = (0u8..6)
                .filter(|col| rows.iter().all(|row| row.contains(col)))
                .map(|col| (col, orb.clone()))
                .collect();
            let full_rows: Vec<(u8, String)> = (0u8..5)
                .filter(|row| rows[*row as usize].len() == 6)
                .map(|row| (row, orb.clone()))
                .collect();
            if !columns.is_empty() {
                self.line_change_text(&columns, &COLUMN_PHRASES)
            } else if !full_rows.is_empty() {
                self.line_change_text(&full_rows, &ROW_PHRASES)
            } else {
                String::new()
            }
        };

        if text.is_empty() {
            tracing::error!(
                target: AUDIT,
                skill_id = skill.skill_id,
                name = %skill.name,
                raw_description = %skill.raw_description,
                board = %positions.ascii(),
                "unknown board shape"
            );
        }

        text
    }
}

/// Hand-identified historical shapes, checked by exact structure
/// before the generic decomposition runs.
fn named_shape(board: &Board, orb: &str) -> Option<String> {
    let text = if board.matches([&[], &[], &[], &[], &[]]) {
        String::new()
    } else if board.matches([&[5], &[], &[], &[], &[]]) {
        format!("Create one {} in the top-right corner", orb)
    } else if board.matches([&[3, 4, 5], &[3, 5], &[5], &[5], &[]]) {
        format!("Create a 7-shape of {} in the upper right corner", orb)
    } else if board.matches([&[0, 5], &[], &[], &[], &[0, 5]]) {
        format!("Create 4 {} at the corners of the board", orb)
    } else if board.matches([&[0, 1, 2], &[0, 1, 2], &[], &[], &[]]) {
        format!("Create a 3x2 rectangle of {} in the upper left corner", orb)
    } else if board.matches([&[], &[1, 2, 3, 4], &[1, 2, 3, 4], &[1, 2, 3, 4], &[]]) {
        format!("Change all positions except for the outer ring to {}", orb)
    } else if board.matches([&[2, 3, 4], &[1, 4, 5], &[5], &[1, 4, 5], &[2, 3, 4]]) {
        format!("Create 13 {} in the shape of a crescent moon.", orb)
    } else if board.matches([
        &[0, 1, 2, 3, 4, 5],
        &[0, 5],
        &[0, 5],
        &[0, 5],
        &[0, 1, 2, 3, 4, 5],
    ]) {
        format!("Change the outermost positions of the board to {}", orb)
    } else if board.matches([&[4, 5], &[3, 4], &[2, 3], &[1, 2], &[0, 1]]) {
        format!(
            "Create a 2-orb wide bottom-left to top-right diagonal of {}",
            orb
        )
    } else if board.matches([&[], &[], &[1, 2, 3, 4], &[1, 2, 3, 4], &[1, 2, 3, 4]]) {
        format!(
            "Create a 3x4 rectangle of {} in the bottom center of the board",
            orb
        )
    } else if board.matches([&[0, 1, 2, 3, 4], &[3], &[2], &[1], &[0, 1, 2, 3, 4]]) {
        format!("Create 13 {} in the shape of a Z.", orb)
    } else {
        return None;
    };
    Some(text)
}

/// Consume the single cell completing an L anchored at `row`.
///
/// Rows near the top prefer the row below, rows near the bottom the
/// row above; the middle row takes the row below if it has any cell,
/// else the row above. The preference order is observed game data
/// behavior, kept as-is. Returns `None` (consuming nothing) when no
/// candidate neighbor has a cell, leaving the board to fall through
/// to the diagnostic path.
fn take_l_foot(rows: &mut [SmallVec<[u8; 6]>; 5], row: usize) -> Option<u8> {
    let candidates: [Option<usize>; 2] = if row < 2 {
        [Some(row + 1), row.checked_sub(1)]
    } else if row > 2 {
        [Some(row - 1), if row < 4 { Some(row + 1) } else { None }]
    } else {
        [Some(row + 1), Some(row - 1)]
    };

    for neighbor in candidates.into_iter().flatten() {
        if !rows[neighbor].is_empty() {
            return Some(rows[neighbor].remove(0));
        }
    }
    None
}
