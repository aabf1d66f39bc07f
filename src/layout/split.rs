//! # Content Splitter
//!
//! Partitions the linear block sequence into per-page runs. Greedy
//! first-fit in a single pass: fill the current page while blocks fit,
//! then decide what happens to the block that overflows.
//!
//! The overflow rules, in order:
//! 1. A splittable block that partially fits breaks at the last line
//!    boundary inside the remaining space; the remainder continues on the
//!    next page as a new block with the same formatting and id.
//! 2. An atomic block moves to the next page whole.
//! 3. A block that does not fit even a fresh page is never dropped or
//!    truncated: splittable blocks break at the largest boundary the full
//!    budget allows (at least one line per page), atomic blocks take the
//!    page alone and overflow it.
//!
//! An empty input still yields exactly one run, so a document always has
//! at least one page.

use std::collections::VecDeque;

use crate::measure::BlockMeasurer;
use crate::model::{Block, BlockKind};

/// Fit tolerance for accumulated floating-point heights, in pixels.
pub(crate) const FIT_EPSILON: f64 = 0.01;

/// Partition `blocks` into page runs. `budget_for` yields the body pixel
/// height available on the page at a given index; budgets may differ per
/// page when pages carry individual attributes.
pub fn split_blocks<F>(
    blocks: Vec<Block>,
    measurer: &dyn BlockMeasurer,
    mut budget_for: F,
) -> Vec<Vec<Block>>
where
    F: FnMut(usize) -> f64,
{
    let mut runs: Vec<Vec<Block>> = Vec::new();
    let mut queue: VecDeque<Block> = blocks.into();
    let mut current: Vec<Block> = Vec::new();
    let mut used = 0.0;
    let mut budget = budget_for(0).max(0.0);

    while let Some(block) = queue.pop_front() {
        let height = measurer.measure(&block);

        if used + height <= budget + FIT_EPSILON {
            used += height;
            current.push(block);
            continue;
        }

        // The block overflows the current page.
        if block.is_splittable() {
            if let Some((head, tail)) = split_block(&block, budget - used, false) {
                current.push(head);
                runs.push(std::mem::take(&mut current));
                used = 0.0;
                budget = budget_for(runs.len()).max(0.0);
                queue.push_front(tail);
                continue;
            }
        }

        if current.is_empty() {
            // Fresh page and the block still does not fit. Break a
            // splittable block at whatever the full budget allows; an
            // atomic block takes the page whole and overflows.
            if block.is_splittable() {
                if let Some((head, tail)) = split_block(&block, budget, true) {
                    runs.push(vec![head]);
                    budget = budget_for(runs.len()).max(0.0);
                    queue.push_front(tail);
                    continue;
                }
            }
            runs.push(vec![block]);
            budget = budget_for(runs.len()).max(0.0);
        } else {
            // Close the page and retry the block on the next one.
            runs.push(std::mem::take(&mut current));
            used = 0.0;
            budget = budget_for(runs.len()).max(0.0);
            queue.push_front(block);
        }
    }

    if !current.is_empty() || runs.is_empty() {
        runs.push(current);
    }

    runs
}

/// Split a block at the last line boundary that fits `available` pixels.
///
/// Returns `None` when no useful boundary exists: the block has no line
/// information, fewer than two lines, or (unless `force_first` is set) not
/// even its first line fits. With `force_first`, the head always keeps at
/// least one line, which guarantees progress on a fresh page regardless of
/// the budget.
pub(crate) fn split_block(
    block: &Block,
    available: f64,
    force_first: bool,
) -> Option<(Block, Block)> {
    let lines = block.line_heights()?;
    if lines.len() < 2 {
        return None;
    }

    let mut fitting = 0;
    let mut sum = 0.0;
    for &line in lines {
        if sum + line > available + FIT_EPSILON {
            break;
        }
        sum += line;
        fitting += 1;
    }

    if force_first {
        fitting = fitting.max(1);
    }
    if fitting == 0 || fitting == lines.len() {
        return None;
    }

    Some(carve(block, fitting))
}

/// Produce the two fragments of a block broken after `line_count` lines.
/// Both keep the block's kind, formatting and id.
fn carve(block: &Block, line_count: usize) -> (Block, Block) {
    let rebuild = |lines: Vec<f64>| {
        let kind = match &block.kind {
            BlockKind::Paragraph { .. } => BlockKind::Paragraph { lines },
            BlockKind::Heading { level, .. } => BlockKind::Heading {
                level: *level,
                lines,
            },
            BlockKind::ListItem { depth, .. } => BlockKind::ListItem {
                depth: *depth,
                lines,
            },
            // Atomic kinds never reach carve; split_block returns None for
            // blocks without line information.
            other => other.clone(),
        };
        Block {
            height: match &kind {
                BlockKind::Paragraph { lines }
                | BlockKind::Heading { lines, .. }
                | BlockKind::ListItem { lines, .. } => lines.iter().sum(),
                _ => block.height,
            },
            kind,
            wrap: block.wrap,
            id: block.id.clone(),
        }
    };

    let lines = block.line_heights().unwrap_or(&[]);
    let head = rebuild(lines[..line_count].to_vec());
    let tail = rebuild(lines[line_count..].to_vec());
    (head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::StoredHeights;

    fn split(blocks: Vec<Block>, budget: f64) -> Vec<Vec<Block>> {
        split_blocks(blocks, &StoredHeights, |_| budget)
    }

    fn total_line_count(runs: &[Vec<Block>]) -> usize {
        runs.iter()
            .flatten()
            .map(|b| b.line_heights().map_or(1, <[f64]>::len))
            .sum()
    }

    #[test]
    fn test_empty_input_yields_one_empty_run() {
        let runs = split(vec![], 600.0);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].is_empty());
    }

    #[test]
    fn test_greedy_fill_until_budget() {
        let runs = split(
            vec![
                Block::table(200.0),
                Block::table(200.0),
                Block::table(200.0),
                Block::table(200.0),
            ],
            600.0,
        );
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 3);
        assert_eq!(runs[1].len(), 1);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        // 300 + 300 = 600 exactly; the epsilon keeps float noise from
        // spilling the second block.
        let runs = split(vec![Block::table(300.0), Block::table(300.0)], 600.0);
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn test_atomic_overflow_moves_whole_block() {
        let runs = split(vec![Block::table(300.0), Block::image(400.0)], 600.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 1);
        assert!(matches!(runs[1][0].kind, BlockKind::Image));
    }

    #[test]
    fn test_splittable_block_breaks_at_line_boundary() {
        let para = Block::paragraph(vec![200.0; 5]).with_id("p");
        let runs = split(vec![Block::table(300.0), para], 600.0);
        // Page 1: table + one line (300 + 200 <= 600); rest carries over.
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0][1].line_heights().unwrap().len(), 1);
        assert_eq!(runs[1][0].line_heights().unwrap().len(), 3);
        assert_eq!(runs[2][0].line_heights().unwrap().len(), 1);
        let fragments = runs
            .iter()
            .flatten()
            .filter(|b| matches!(b.kind, BlockKind::Paragraph { .. }));
        for fragment in fragments {
            assert_eq!(fragment.id.as_deref(), Some("p"));
        }
    }

    #[test]
    fn test_no_line_fits_remaining_space_moves_whole_block() {
        // 500 used, 100 left; first line is 200 so nothing fits the gap.
        let para = Block::paragraph(vec![200.0, 200.0]);
        let runs = split(vec![Block::table(500.0), para], 600.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1][0].line_heights().unwrap().len(), 2);
    }

    #[test]
    fn test_oversized_atomic_gets_its_own_page_and_overflows() {
        let runs = split(
            vec![
                Block::table(100.0),
                Block::image(900.0),
                Block::table(100.0),
            ],
            600.0,
        );
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].len(), 1);
        assert!((runs[1][0].height - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_paragraph_splits_across_pages() {
        let para = Block::paragraph(vec![250.0; 6]).with_id("long");
        let runs = split(vec![para], 600.0);
        // Two lines per page.
        assert_eq!(runs.len(), 3);
        assert_eq!(total_line_count(&runs), 6);
    }

    #[test]
    fn test_zero_budget_still_makes_progress() {
        let runs = split(
            vec![Block::paragraph(vec![20.0, 20.0]), Block::table(50.0)],
            0.0,
        );
        // One line or one atomic block per page; nothing is lost.
        assert_eq!(runs.len(), 3);
        assert_eq!(total_line_count(&runs), 3);
    }

    #[test]
    fn test_wrap_false_paragraph_is_atomic() {
        let mut para = Block::paragraph(vec![200.0, 200.0]);
        para.wrap = Some(false);
        let runs = split(vec![Block::table(300.0), para], 600.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1][0].line_heights().unwrap().len(), 2);
    }

    #[test]
    fn test_varying_budget_per_page() {
        let budgets = [400.0, 200.0];
        let runs = split_blocks(
            vec![Block::table(400.0), Block::table(200.0), Block::table(200.0)],
            &StoredHeights,
            |idx| budgets.get(idx).copied().unwrap_or(200.0),
        );
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].len(), 1);
        assert_eq!(runs[1].len(), 1);
    }

    #[test]
    fn test_split_block_boundary_cases() {
        let para = Block::paragraph(vec![100.0, 100.0, 100.0]);
        assert!(split_block(&para, 50.0, false).is_none());
        assert!(split_block(&para, 350.0, false).is_none());
        let (head, tail) = split_block(&para, 250.0, false).unwrap();
        assert_eq!(head.line_heights().unwrap().len(), 2);
        assert_eq!(tail.line_heights().unwrap().len(), 1);
        assert!((head.height - 200.0).abs() < 1e-9);
        assert!((tail.height - 100.0).abs() < 1e-9);

        // Forced split keeps at least one line on the page.
        let (head, _) = split_block(&para, 0.0, true).unwrap();
        assert_eq!(head.line_heights().unwrap().len(), 1);

        assert!(split_block(&Block::table(300.0), 600.0, false).is_none());
        assert!(split_block(&Block::paragraph(vec![100.0]), 600.0, true).is_none());
    }
}
