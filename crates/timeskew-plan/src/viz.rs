//! ASCII visualization of a 1D plan.

use crate::tile::Plan1D;

/// Render a 1D plan as an ASCII diagram, one row per half-step with the
/// newest half-step on top.
///
/// Stage-0 tiles are labeled from `'0'`, stage-1 tiles from `'A'`,
/// incrementing per tile. Cells no tile ever writes show as `'!'` —
/// on odd rows the final column is expected to stay unwritten (the
/// magnetic boundary clip), anywhere else a `'!'` marks a planner bug.
/// Debugging aid only; nothing parses this format.
pub fn render_plan(plan: &Plan1D) -> String {
    let width = plan.total_width();
    let half_steps = plan.half_steps();

    let mut cells = vec!['!'; width * half_steps];
    for (stage_idx, stage) in plan.stages().enumerate() {
        let mut label = if stage_idx == 0 { '0' } else { 'A' };
        for tile in stage {
            for (half_step, range) in tile.ranges.iter().enumerate() {
                if range.is_empty() {
                    continue;
                }
                for pos in range.first..=range.last {
                    cells[half_step * width + pos] = label;
                }
            }
            label = char::from_u32(label as u32 + 1).unwrap_or('?');
        }
    }

    let mut out = String::with_capacity((width + 1) * half_steps);
    for half_step in (0..half_steps).rev() {
        out.extend(&cells[half_step * width..(half_step + 1) * width]);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallelogram::parallelogram_tiles;
    use crate::trapezoid::trapezoid_tiles;

    #[test]
    fn diagram_has_one_row_per_half_step() {
        let plan = parallelogram_tiles(30, 6, 4).unwrap();
        let diagram = render_plan(&plan);
        assert_eq!(diagram.lines().count(), 4);
        assert!(diagram.lines().all(|line| line.len() == 30));
    }

    #[test]
    fn rows_are_newest_first_and_fully_labeled() {
        let plan = trapezoid_tiles(30, 8, 4).unwrap();
        let diagram = render_plan(&plan);
        let rows: Vec<&str> = diagram.lines().collect();

        // Bottom row is half-step 0: every cell belongs to a tile.
        let bottom = rows[rows.len() - 1];
        assert!(!bottom.contains('!'));
        // Top row is the final (magnetic) half-step: only the boundary
        // column may be unwritten.
        let top = rows[0];
        assert!(!top[..top.len() - 1].contains('!'));
        assert!(top.ends_with('!'));
    }

    #[test]
    fn stages_use_distinct_label_alphabets() {
        let plan = trapezoid_tiles(30, 8, 4).unwrap();
        let diagram = render_plan(&plan);
        // Mountains from '0', valleys from 'A'.
        assert!(diagram.contains('0'));
        assert!(diagram.contains('A'));
    }
}
