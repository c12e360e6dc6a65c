//! Position algebra: collapsing many spans into their bounding span.

use crate::error::{IndexError, Result};
use crate::position::Position;

/// Merge positions into the minimal span enclosing all of them.
///
/// Line/char coordinates of the start come from the position with the
/// smallest `start` (ties go to the smallest line/char), those of the end
/// from the position with the largest `end` (ties go to the largest
/// line/char). The merged span carries no n-gram value.
pub fn merge_positions<'a, I>(positions: I) -> Result<Position>
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut iter = positions.into_iter();
    let first = iter.next().ok_or(IndexError::EmptyInput)?;

    let mut head = first;
    let mut tail = first;

    for pos in iter {
        if (pos.start, pos.start_line, pos.start_char)
            < (head.start, head.start_line, head.start_char)
        {
            head = pos;
        }
        if (pos.end, pos.end_line, pos.end_char) > (tail.end, tail.end_line, tail.end_char) {
            tail = pos;
        }
    }

    Ok(Position::new(
        head.start,
        tail.end,
        head.start_line,
        head.start_char,
        tail.end_line,
        tail.end_char,
    ))
}

/// Merge aligned `(left, right)` pairs side by side.
///
/// Lefts merge with lefts and rights with rights; the two streams never mix.
pub fn merge_aligned_positions<'a, I>(pairs: I) -> Result<(Position, Position)>
where
    I: IntoIterator<Item = (&'a Position, &'a Position)>,
{
    let (lefts, rights): (Vec<&Position>, Vec<&Position>) = pairs.into_iter().unzip();
    Ok((merge_positions(lefts)?, merge_positions(rights)?))
}
