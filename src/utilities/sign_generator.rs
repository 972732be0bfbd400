use std::iter::FusedIterator;

use shared_resources::direction::Direction;
use shared_resources::sign_entry::SignEntry;

use super::floor_name::floor_label;

const BASEMENT_LABEL: &str = "Basement";
const ROOFTOP_LABEL: &str = "Rooftop";

/// Most floors one elevator may have. Keeps the sign count within `usize`
/// on 32-bit targets.
pub const MAX_FLOORS: u32 = 100_000;

/// The floors one elevator serves, as entered at the prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorLayout {
    pub num_floors: u32,
    pub has_basement: bool,
    pub has_rooftop: bool,
}

impl ElevatorLayout {
    pub fn new(num_floors: u32, has_basement: bool, has_rooftop: bool) -> Self {
        ElevatorLayout {
            num_floors,
            has_basement,
            has_rooftop,
        }
    }

    /// Whether floor `floor` gets a sign calling the lift in `direction`.
    /// The bottom floor has no down sign and the top floor no up sign, unless
    /// a basement or rooftop lies beyond them.
    pub fn has_call(&self, floor: u32, direction: Direction) -> bool {
        match direction {
            Direction::Down => self.has_basement || floor != 1,
            Direction::Up => self.has_rooftop || floor != self.num_floors,
        }
    }

    pub fn sign_count(&self) -> usize {
        let floors = usize::try_from(self.num_floors).unwrap_or(usize::MAX);
        let extras = 2 * usize::from(self.has_basement) + 2 * usize::from(self.has_rooftop);
        floors.saturating_sub(1).saturating_mul(2).saturating_add(extras)
    }

    pub fn signs(self) -> SignSequence {
        generate_signs(self.num_floors, self.has_basement, self.has_rooftop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Basement,
    Floor(u32, Direction),
    Rooftop,
    Done,
}

/// Lazily produced signs for one elevator, bottom to top. Consumed once; call
/// [`generate_signs`] again for a fresh pass.
#[derive(Debug)]
pub struct SignSequence {
    layout: ElevatorLayout,
    stage: Stage,
    remaining: usize,
}

/// Signs for `num_floors` floors plus an optional basement and rooftop.
///
/// # Panics
/// An elevator has between 1 and [`MAX_FLOORS`] floors; anything else panics.
pub fn generate_signs(num_floors: u32, has_basement: bool, has_rooftop: bool) -> SignSequence {
    assert!(num_floors > 0, "generate_signs: an elevator needs at least one floor");
    assert!(
        num_floors <= MAX_FLOORS,
        "generate_signs: an elevator has at most {MAX_FLOORS} floors"
    );

    let layout = ElevatorLayout::new(num_floors, has_basement, has_rooftop);
    SignSequence {
        layout,
        stage: Stage::Basement,
        remaining: layout.sign_count(),
    }
}

impl SignSequence {
    fn advance(&self) -> (Option<SignEntry>, Stage) {
        match self.stage {
            Stage::Basement => (
                self.layout
                    .has_basement
                    .then(|| SignEntry::new(BASEMENT_LABEL, Direction::Up)),
                Stage::Floor(1, Direction::Down),
            ),
            Stage::Floor(floor, direction) => {
                let entry = self
                    .layout
                    .has_call(floor, direction)
                    .then(|| SignEntry::new(floor_label(floor), direction));
                let next = match direction {
                    Direction::Down => Stage::Floor(floor, Direction::Up),
                    Direction::Up if floor < self.layout.num_floors => {
                        Stage::Floor(floor + 1, Direction::Down)
                    }
                    Direction::Up => Stage::Rooftop,
                };
                (entry, next)
            }
            Stage::Rooftop => (
                self.layout
                    .has_rooftop
                    .then(|| SignEntry::new(ROOFTOP_LABEL, Direction::Down)),
                Stage::Done,
            ),
            Stage::Done => (None, Stage::Done),
        }
    }
}

impl Iterator for SignSequence {
    type Item = SignEntry;

    fn next(&mut self) -> Option<SignEntry> {
        while self.stage != Stage::Done {
            let (entry, next_stage) = self.advance();
            self.stage = next_stage;
            if let Some(entry) = entry {
                self.remaining -= 1;
                return Some(entry);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SignSequence {}

impl FusedIterator for SignSequence {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn signs(num_floors: u32, has_basement: bool, has_rooftop: bool) -> Vec<(String, &'static str)> {
        generate_signs(num_floors, has_basement, has_rooftop)
            .map(|entry| (entry.label, entry.direction.as_sign_text()))
            .collect()
    }

    fn owned(expected: &[(&str, &'static str)]) -> Vec<(String, &'static str)> {
        expected
            .iter()
            .map(|(label, direction)| (label.to_string(), *direction))
            .collect()
    }

    #[test]
    fn three_floors_without_extras() {
        assert_eq!(
            signs(3, false, false),
            owned(&[
                ("Ground Floor", "[Lift Up]"),
                ("2nd Floor", "[Lift Down]"),
                ("2nd Floor", "[Lift Up]"),
                ("3rd Floor", "[Lift Down]"),
            ])
        );
    }

    #[test]
    fn single_floor_with_basement_and_rooftop() {
        assert_eq!(
            signs(1, true, true),
            owned(&[
                ("Basement", "[Lift Up]"),
                ("Ground Floor", "[Lift Down]"),
                ("Ground Floor", "[Lift Up]"),
                ("Rooftop", "[Lift Down]"),
            ])
        );
    }

    #[test]
    fn basement_gives_ground_floor_a_down_sign() {
        assert_eq!(
            signs(2, true, false),
            owned(&[
                ("Basement", "[Lift Up]"),
                ("Ground Floor", "[Lift Down]"),
                ("Ground Floor", "[Lift Up]"),
                ("2nd Floor", "[Lift Down]"),
            ])
        );
    }

    #[test]
    fn rooftop_gives_top_floor_an_up_sign() {
        assert_eq!(
            signs(2, false, true),
            owned(&[
                ("Ground Floor", "[Lift Up]"),
                ("2nd Floor", "[Lift Down]"),
                ("2nd Floor", "[Lift Up]"),
                ("Rooftop", "[Lift Down]"),
            ])
        );
    }

    #[test]
    fn lone_floor_has_no_signs() {
        assert!(signs(1, false, false).is_empty());
    }

    #[test_case(false, false)]
    #[test_case(true, false)]
    #[test_case(false, true)]
    #[test_case(true, true)]
    fn sign_count_matches_formula(has_basement: bool, has_rooftop: bool) {
        for num_floors in 1..=25u32 {
            let expected = 2 * num_floors as usize + 2 * usize::from(has_basement) + 2 * usize::from(has_rooftop) - 2;
            let sequence = generate_signs(num_floors, has_basement, has_rooftop);
            assert_eq!(sequence.len(), expected);
            assert_eq!(sequence.count(), expected);
        }
    }

    #[test]
    fn length_shrinks_as_signs_are_taken() {
        let mut sequence = generate_signs(4, true, false);
        assert_eq!(sequence.len(), 7);
        sequence.next();
        sequence.next();
        assert_eq!(sequence.len(), 5);
        assert_eq!(sequence.by_ref().count(), 5);
        assert_eq!(sequence.next(), None);
        assert_eq!(sequence.next(), None);
    }

    #[test]
    fn every_call_points_at_another_reachable_level() {
        let layout = ElevatorLayout::new(5, false, true);
        for entry in layout.signs() {
            if entry.label == "Ground Floor" {
                assert_eq!(entry.direction, Direction::Up);
            }
        }
        assert!(!layout.has_call(1, Direction::Down));
        assert!(layout.has_call(5, Direction::Up));
    }

    #[test]
    fn fresh_sequence_per_call() {
        let layout = ElevatorLayout::new(3, true, true);
        let first: Vec<SignEntry> = layout.signs().collect();
        let second: Vec<SignEntry> = layout.signs().collect();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "at least one floor")]
    fn zero_floors_panics() {
        generate_signs(0, true, true);
    }

    #[test]
    #[should_panic(expected = "at most 100000 floors")]
    fn too_many_floors_panics() {
        generate_signs(MAX_FLOORS + 1, false, false);
    }

    #[test]
    fn tallest_elevator_is_counted_without_overflow() {
        let sequence = generate_signs(MAX_FLOORS, true, true);
        assert_eq!(sequence.len(), 2 * MAX_FLOORS as usize + 2);
        assert!(ElevatorLayout::new(u32::MAX, true, true).sign_count() >= 2 * MAX_FLOORS as usize);
    }
}
