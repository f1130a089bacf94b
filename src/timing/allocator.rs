//! Per-element duration budgets.
//!
//! Every rule has the same shape: a reveal capped at a share of the total,
//! then a hold for the rest with a floor so nothing is shown for less than a
//! readable moment. The floors differ per kind.

// Plain text
pub const TEXT_REVEAL_CAP: f64 = 1.5;
pub const TEXT_REVEAL_SHARE: f64 = 0.3;
pub const TEXT_HOLD_FLOOR: f64 = 1.0;

// Math equation
pub const MATH_REVEAL_CAP: f64 = 2.0;
pub const MATH_REVEAL_SHARE: f64 = 0.4;
pub const MATH_HOLD_FLOOR: f64 = 1.0;
pub const MATH_HIGHLIGHT: f64 = 1.0;

// Graph: axes and curve use the same rule
pub const GRAPH_PHASE_CAP: f64 = 2.0;
pub const GRAPH_PHASE_SHARE: f64 = 0.4;
pub const GRAPH_HOLD_FLOOR: f64 = 0.5;

// Step-by-step
pub const STEP_FLOOR: f64 = 2.0;
pub const STEP_REVEAL_CAP: f64 = 1.5;
pub const STEP_REVEAL_SHARE: f64 = 0.5;
pub const STEP_HOLD_OFFSET: f64 = 1.5;
pub const STEP_HOLD_FLOOR: f64 = 0.5;

// Highlight-parts
pub const HIGHLIGHT_REVEAL_CAP: f64 = 2.0;
pub const HIGHLIGHT_REVEAL_SHARE: f64 = 0.3;
pub const HIGHLIGHT_MIN_REMAINING: f64 = 2.0;
pub const HIGHLIGHT_PART_CAP: f64 = 1.0;
pub const HIGHLIGHT_MAX_PARTS: usize = 3;

// Real-world example
pub const EXAMPLE_LABEL_CAP: f64 = 1.0;
pub const EXAMPLE_LABEL_SHARE: f64 = 0.3;
pub const EXAMPLE_BODY_CAP: f64 = 1.5;
pub const EXAMPLE_BODY_SHARE: f64 = 0.4;
pub const EXAMPLE_HOLD_FLOOR: f64 = 0.5;

// Fallback placeholder
pub const FALLBACK_REVEAL_SHARE: f64 = 0.5;

/// Phase of an element's display time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Reveal,
    Hold,
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBudget {
    pub reveal: f64,
    pub hold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathBudget {
    pub reveal: f64,
    pub hold: f64,
    pub highlight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBudget {
    pub axes_reveal: f64,
    pub curve_reveal: f64,
    pub hold: f64,
}

/// Budget of one sub-step; every sub-step gets the same
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepBudget {
    pub count: usize,
    pub step_duration: f64,
    pub reveal: f64,
    pub hold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightBudget {
    pub reveal: f64,
    /// One entry per emphasized part, in order; empty when the rest is a hold
    pub emphasis: Vec<f64>,
    pub hold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExampleBudget {
    pub label_reveal: f64,
    pub body_reveal: f64,
    pub hold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackBudget {
    pub reveal: f64,
    pub hold: f64,
}

/// What the allocator needs to know about the content besides its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    Text,
    Math,
    Graph,
    Steps { count: usize },
    Highlight { parts: usize },
    Example,
    Fallback,
}

/// Result of [`DurationAllocator::allocate`]
#[derive(Debug, Clone, PartialEq)]
pub enum Allocation {
    Text(TextBudget),
    Math(MathBudget),
    Graph(GraphBudget),
    Steps(StepBudget),
    Highlight(HighlightBudget),
    Example(ExampleBudget),
    Fallback(FallbackBudget),
}

impl Allocation {
    /// Seconds assigned to `role` across the whole element
    pub fn seconds(&self, role: Role) -> f64 {
        match (self, role) {
            (Allocation::Text(b), Role::Reveal) => b.reveal,
            (Allocation::Text(b), Role::Hold) => b.hold,
            (Allocation::Math(b), Role::Reveal) => b.reveal,
            (Allocation::Math(b), Role::Hold) => b.hold,
            (Allocation::Math(b), Role::Highlight) => b.highlight,
            (Allocation::Graph(b), Role::Reveal) => b.axes_reveal + b.curve_reveal,
            (Allocation::Graph(b), Role::Hold) => b.hold,
            (Allocation::Steps(b), Role::Reveal) => b.reveal * b.count as f64,
            (Allocation::Steps(b), Role::Hold) => b.hold * b.count as f64,
            (Allocation::Highlight(b), Role::Reveal) => b.reveal,
            (Allocation::Highlight(b), Role::Hold) => b.hold,
            (Allocation::Highlight(b), Role::Highlight) => b.emphasis.iter().sum(),
            (Allocation::Example(b), Role::Reveal) => b.label_reveal + b.body_reveal,
            (Allocation::Example(b), Role::Hold) => b.hold,
            (Allocation::Fallback(b), Role::Reveal) => b.reveal,
            (Allocation::Fallback(b), Role::Hold) => b.hold,
            _ => 0.0,
        }
    }

    /// Sum over all roles
    pub fn total(&self) -> f64 {
        [Role::Reveal, Role::Hold, Role::Highlight]
            .into_iter()
            .map(|role| self.seconds(role))
            .sum()
    }
}

/// Deterministic split of an element budget into sub-phases
pub struct DurationAllocator;

impl DurationAllocator {
    pub fn allocate(total: f64, shape: ContentShape) -> Allocation {
        match shape {
            ContentShape::Text => Allocation::Text(Self::text(total)),
            ContentShape::Math => Allocation::Math(Self::math(total)),
            ContentShape::Graph => Allocation::Graph(Self::graph(total)),
            ContentShape::Steps { count } => Allocation::Steps(Self::steps(total, count)),
            ContentShape::Highlight { parts } => Allocation::Highlight(Self::highlight(total, parts)),
            ContentShape::Example => Allocation::Example(Self::example(total)),
            ContentShape::Fallback => Allocation::Fallback(Self::fallback(total)),
        }
    }

    pub fn text(total: f64) -> TextBudget {
        let total = sanitize(total);
        let reveal = TEXT_REVEAL_CAP.min(total * TEXT_REVEAL_SHARE);
        TextBudget {
            reveal,
            hold: TEXT_HOLD_FLOOR.max(total - reveal),
        }
    }

    pub fn math(total: f64) -> MathBudget {
        let total = sanitize(total);
        let reveal = MATH_REVEAL_CAP.min(total * MATH_REVEAL_SHARE);
        MathBudget {
            reveal,
            hold: MATH_HOLD_FLOOR.max(total - reveal - MATH_HIGHLIGHT),
            highlight: MATH_HIGHLIGHT,
        }
    }

    pub fn graph(total: f64) -> GraphBudget {
        let total = sanitize(total);
        let axes_reveal = GRAPH_PHASE_CAP.min(total * GRAPH_PHASE_SHARE);
        let curve_reveal = GRAPH_PHASE_CAP.min(total * GRAPH_PHASE_SHARE);
        GraphBudget {
            axes_reveal,
            curve_reveal,
            hold: GRAPH_HOLD_FLOOR.max(total - axes_reveal - curve_reveal),
        }
    }

    pub fn steps(total: f64, count: usize) -> StepBudget {
        let total = sanitize(total);
        let count = count.max(1);
        let step_duration = STEP_FLOOR.max(total / count as f64);
        StepBudget {
            count,
            step_duration,
            reveal: STEP_REVEAL_CAP.min(step_duration * STEP_REVEAL_SHARE),
            hold: STEP_HOLD_FLOOR.max(step_duration - STEP_HOLD_OFFSET),
        }
    }

    /// `parts` is the number of addressable sub-parts of the rendered object
    pub fn highlight(total: f64, parts: usize) -> HighlightBudget {
        let total = sanitize(total);
        let reveal = HIGHLIGHT_REVEAL_CAP.min(total * HIGHLIGHT_REVEAL_SHARE);
        let remaining = total - reveal;

        if remaining > HIGHLIGHT_MIN_REMAINING && parts > 1 {
            let per_part = HIGHLIGHT_PART_CAP.min(remaining / parts as f64);
            HighlightBudget {
                reveal,
                emphasis: vec![per_part; parts.min(HIGHLIGHT_MAX_PARTS)],
                hold: 0.0,
            }
        } else {
            HighlightBudget {
                reveal,
                emphasis: Vec::new(),
                hold: remaining,
            }
        }
    }

    pub fn example(total: f64) -> ExampleBudget {
        let total = sanitize(total);
        let label_reveal = EXAMPLE_LABEL_CAP.min(total * EXAMPLE_LABEL_SHARE);
        let body_reveal = EXAMPLE_BODY_CAP.min(total * EXAMPLE_BODY_SHARE);
        ExampleBudget {
            label_reveal,
            body_reveal,
            hold: EXAMPLE_HOLD_FLOOR.max(total - label_reveal - body_reveal),
        }
    }

    pub fn fallback(total: f64) -> FallbackBudget {
        let total = sanitize(total);
        let reveal = total * FALLBACK_REVEAL_SHARE;
        FallbackBudget {
            reveal,
            hold: total - reveal,
        }
    }
}

fn sanitize(total: f64) -> f64 {
    if total.is_finite() {
        total.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    fn shapes() -> Vec<ContentShape> {
        vec![
            ContentShape::Text,
            ContentShape::Math,
            ContentShape::Graph,
            ContentShape::Steps { count: 1 },
            ContentShape::Steps { count: 3 },
            ContentShape::Highlight { parts: 1 },
            ContentShape::Highlight { parts: 2 },
            ContentShape::Highlight { parts: 7 },
            ContentShape::Example,
            ContentShape::Fallback,
        ]
    }

    #[test]
    fn test_math_scenario() {
        let b = DurationAllocator::math(10.0);
        assert_eq!(b.reveal, 2.0);
        assert_eq!(b.hold, 7.0);
        assert_eq!(b.highlight, 1.0);
    }

    #[test]
    fn test_text_rule() {
        let b = DurationAllocator::text(10.0);
        assert_eq!(b.reveal, 1.5);
        assert_eq!(b.hold, 8.5);

        let short = DurationAllocator::text(2.0);
        assert!((short.reveal - 0.6).abs() < 1e-9);
        assert!((short.hold - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_graph_rule() {
        let b = DurationAllocator::graph(10.0);
        assert_eq!((b.axes_reveal, b.curve_reveal, b.hold), (2.0, 2.0, 6.0));

        // floor kicks in for tiny budgets
        let tiny = DurationAllocator::graph(1.0);
        assert_eq!(tiny.hold, 0.5);
    }

    #[test]
    fn test_steps_rule() {
        let b = DurationAllocator::steps(12.0, 3);
        assert_eq!(b.step_duration, 4.0);
        assert_eq!(b.reveal, 1.5);
        assert_eq!(b.hold, 2.5);

        let crowded = DurationAllocator::steps(3.0, 6);
        assert_eq!(crowded.step_duration, 2.0);
        assert_eq!(crowded.reveal, 1.0);
        assert_eq!(crowded.hold, 0.5);

        assert_eq!(DurationAllocator::steps(10.0, 0).count, 1);
    }

    #[test]
    fn test_highlight_rule() {
        let b = DurationAllocator::highlight(10.0, 5);
        assert_eq!(b.reveal, 2.0);
        assert_eq!(b.emphasis, vec![1.0, 1.0, 1.0]);
        assert_eq!(b.hold, 0.0);

        let two = DurationAllocator::highlight(5.0, 2);
        assert_eq!(two.reveal, 1.5);
        assert_eq!(two.emphasis, vec![1.0, 1.0]);

        // single part: everything after the reveal is one hold
        let single = DurationAllocator::highlight(10.0, 1);
        assert!(single.emphasis.is_empty());
        assert_eq!(single.hold, 8.0);

        // not enough time left to emphasize
        let short = DurationAllocator::highlight(2.5, 3);
        assert!(short.emphasis.is_empty());
        assert!((short.hold - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_example_rule() {
        let b = DurationAllocator::example(10.0);
        assert_eq!((b.label_reveal, b.body_reveal, b.hold), (1.0, 1.5, 7.5));
    }

    #[test]
    fn test_fallback_splits_evenly() {
        let b = DurationAllocator::fallback(7.0);
        assert_eq!(b.reveal, 3.5);
        assert_eq!(b.reveal + b.hold, 7.0);
    }

    #[test]
    fn test_outputs_never_negative() {
        for shape in shapes() {
            for i in 0..=60 {
                let total = i as f64 * 0.5 - 5.0;
                let alloc = DurationAllocator::allocate(total, shape);
                for role in [Role::Reveal, Role::Hold, Role::Highlight] {
                    assert!(
                        alloc.seconds(role) >= 0.0,
                        "{:?} {:?} at {} went negative",
                        shape,
                        role,
                        total
                    );
                }
            }
        }
    }

    #[test]
    fn test_sum_within_total_above_floors() {
        for shape in shapes() {
            let count = match shape {
                ContentShape::Steps { count } => count as f64,
                _ => 1.0,
            };
            // above every floor footprint the split is exact or under
            for i in 0..=100 {
                let total = 5.0 * count + i as f64 * 0.25;
                let alloc = DurationAllocator::allocate(total, shape);
                assert!(
                    alloc.total() <= total + EPS,
                    "{:?} at {}: {} > {}",
                    shape,
                    total,
                    alloc.total(),
                    total
                );
            }
        }
    }

    #[test]
    fn test_role_lookup() {
        let alloc = DurationAllocator::allocate(10.0, ContentShape::Math);
        assert_eq!(alloc.seconds(Role::Reveal), 2.0);
        assert_eq!(alloc.seconds(Role::Hold), 7.0);
        assert_eq!(alloc.seconds(Role::Highlight), 1.0);
        assert_eq!(alloc.total(), 10.0);

        let text = DurationAllocator::allocate(10.0, ContentShape::Text);
        assert_eq!(text.seconds(Role::Highlight), 0.0);
    }
}
