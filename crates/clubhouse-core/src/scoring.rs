//! The fixed position → points mapping.

use crate::event::PLACES;

/// Points awarded per finishing position, first place first.
pub const POINTS: [u32; PLACES] = [3, 2, 1];

/// Points for a finishing position. Positions outside 1..=3 score nothing.
pub fn points_for(position: u8) -> u32 {
  match position {
    1..=3 => POINTS[usize::from(position) - 1],
    _ => 0,
  }
}

/// `(position, points)` pairs in position order, for clients that display
/// the policy.
pub fn table() -> impl Iterator<Item = (u8, u32)> {
  (1u8..).zip(POINTS)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn podium_scores_three_two_one() {
    assert_eq!(points_for(1), 3);
    assert_eq!(points_for(2), 2);
    assert_eq!(points_for(3), 1);
  }

  #[test]
  fn other_positions_score_zero() {
    assert_eq!(points_for(0), 0);
    assert_eq!(points_for(4), 0);
    assert_eq!(points_for(u8::MAX), 0);
  }

  #[test]
  fn table_lists_each_position() {
    assert_eq!(table().collect::<Vec<_>>(), [(1, 3), (2, 2), (3, 1)]);
  }
}
