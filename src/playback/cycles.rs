// Cycle partitioning - recovers transposition-cycle boundaries
// A boundary is any index where the timestamp drops below its predecessor

use crate::exercise::step::SequenceStep;

/// Partition a step list into cycles of step indices.
///
/// Within one cycle timestamps are non-decreasing; a cycle-relative step
/// list restarts its timestamps at each new transposition, so every
/// decrease marks a boundary. A list with globally non-decreasing
/// timestamps comes back as a single cycle. Each returned group is
/// non-empty; an empty input yields no groups.
pub fn detect_cycles(steps: &[SequenceStep]) -> Vec<Vec<usize>> {
    let mut cycles: Vec<Vec<usize>> = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        let starts_new_cycle = match index.checked_sub(1).map(|i| &steps[i]) {
            None => true,
            Some(prev) => step.timestamp_ms < prev.timestamp_ms,
        };

        if starts_new_cycle {
            cycles.push(Vec::new());
        }
        cycles.last_mut().unwrap().push(index);
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::generator::{
        generate_cycle_relative_steps, generate_transposed_steps, transposition_offsets,
    };
    use crate::exercise::sequence::TranspositionDirection;
    use crate::pitch::Note;

    fn note(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn base() -> Vec<SequenceStep> {
        vec![
            SequenceStep::new(note("C3"), 0.0, 0.3),
            SequenceStep::new(note("E3"), 300.0, 0.3),
            SequenceStep::new(note("G3"), 600.0, 0.3),
        ]
    }

    #[test]
    fn test_empty_input_has_no_cycles() {
        assert!(detect_cycles(&[]).is_empty());
    }

    #[test]
    fn test_recovers_every_generated_cycle() {
        let steps = generate_cycle_relative_steps(
            &base(),
            note("C3"),
            note("C3"),
            note("E3"),
            TranspositionDirection::BothWays,
        );
        let cycles = detect_cycles(&steps);

        let offsets = transposition_offsets(0, 4, TranspositionDirection::BothWays);
        assert_eq!(cycles.len(), offsets.len());

        for cycle in &cycles {
            assert_eq!(cycle.len(), base().len());
            // internally non-decreasing
            for pair in cycle.windows(2) {
                assert!(steps[pair[0]].timestamp_ms <= steps[pair[1]].timestamp_ms);
            }
        }

        // groups tile the whole list in order
        let flattened: Vec<usize> = cycles.into_iter().flatten().collect();
        assert_eq!(flattened, (0..steps.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_absolute_timestamps_form_one_cycle() {
        let steps = generate_transposed_steps(
            &base(),
            note("C3"),
            note("C3"),
            note("E3"),
            TranspositionDirection::OneWay,
        );
        let cycles = detect_cycles(&steps);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), steps.len());
    }

    #[test]
    fn test_single_step_cycles() {
        // One note per cycle, timestamps all zero: no decreases, one group
        let steps = vec![
            SequenceStep::new(note("C3"), 0.0, 0.3),
            SequenceStep::new(note("C#3"), 0.0, 0.3),
        ];
        assert_eq!(detect_cycles(&steps).len(), 1);
    }
}
