use crate::budget_line::LineId;
use log::warn;

/// Which transition placed a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Depth 0: the chain is cleared.
    Root,
    /// Same depth as the previous line: shares its parent.
    Sibling,
    /// Deeper than the previous line: the previous line becomes the parent.
    Descend,
    /// Shallower than the previous line with a tracked ancestor at `depth - 1`.
    Ascend,
    /// Shallower than the previous line past the tracked chain. Parent is
    /// dropped and the chain is cleared.
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub parent: Option<LineId>,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy)]
struct PreviousLine {
    id: LineId,
    depth: usize,
    parent: Option<LineId>,
}

/// Open-ancestor chain for a single forward pass over the rows.
///
/// `ancestors()[d]` is the open ancestor at depth `d` as long as depths grow by
/// one at a time. Larger jumps still append a single entry.
#[derive(Debug, Default)]
pub struct AncestorTracker {
    ancestors: Vec<LineId>,
    previous: Option<PreviousLine>,
}

impl AncestorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ancestors(&self) -> &[LineId] {
        &self.ancestors
    }

    pub fn ancestor_at(&self, position: usize) -> Option<LineId> {
        self.ancestors.get(position).copied()
    }

    pub fn last_line(&self) -> Option<LineId> {
        self.previous.map(|p| p.id)
    }

    pub fn last_depth(&self) -> usize {
        self.previous.map_or(0, |p| p.depth)
    }

    /// Resolves the parent of a line at `depth` and updates the chain.
    ///
    /// The caller must follow up with [`AncestorTracker::record`] once the line
    /// exists, so the next row sees it as the previous line.
    pub fn place(&mut self, depth: usize) -> Placement {
        let last_depth = self.last_depth();

        if depth == 0 {
            self.clear();
            return Placement {
                parent: None,
                transition: Transition::Root,
            };
        }

        if depth == last_depth {
            return Placement {
                parent: self.previous.and_then(|p| p.parent),
                transition: Transition::Sibling,
            };
        }

        if depth > last_depth {
            let parent = self.previous.map(|p| p.id);
            if let Some(id) = parent {
                self.ancestors.push(id);
            }
            return Placement {
                parent,
                transition: Transition::Descend,
            };
        }

        match self.ancestor_at(depth - 1) {
            Some(parent) => {
                self.truncate(depth);
                Placement {
                    parent: Some(parent),
                    transition: Transition::Ascend,
                }
            }
            None => {
                warn!(
                    "Ancestor chain has {} entries, none at position {}; resetting ancestry",
                    self.ancestors.len(),
                    depth - 1
                );
                self.clear();
                Placement {
                    parent: None,
                    transition: Transition::Recovered,
                }
            }
        }
    }

    pub fn record(&mut self, id: LineId, depth: usize, parent: Option<LineId>) {
        self.previous = Some(PreviousLine { id, depth, parent });
    }

    fn clear(&mut self) {
        self.ancestors.clear();
    }

    fn truncate(&mut self, len: usize) {
        self.ancestors.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Places and records a line, handing out ids in call order.
    fn step(
        tracker: &mut AncestorTracker,
        next_id: &mut usize,
        depth: usize,
    ) -> (LineId, Placement) {
        let placement = tracker.place(depth);
        let id = LineId(*next_id);
        *next_id += 1;
        tracker.record(id, depth, placement.parent);
        (id, placement)
    }

    #[test]
    fn test_initial_state() {
        let tracker = AncestorTracker::new();
        assert!(tracker.ancestors().is_empty());
        assert_eq!(tracker.last_line(), None);
        assert_eq!(tracker.last_depth(), 0);
    }

    #[test]
    fn test_root_siblings_and_descent() {
        let mut tracker = AncestorTracker::new();
        let mut next = 0;

        let (root, p) = step(&mut tracker, &mut next, 0);
        assert_eq!(p.transition, Transition::Root);
        assert_eq!(p.parent, None);

        let (_, p) = step(&mut tracker, &mut next, 1);
        assert_eq!(p.transition, Transition::Descend);
        assert_eq!(p.parent, Some(root));
        assert_eq!(tracker.ancestors(), &[root]);

        let (_, p) = step(&mut tracker, &mut next, 1);
        assert_eq!(p.transition, Transition::Sibling);
        assert_eq!(p.parent, Some(root));
        assert_eq!(tracker.ancestors(), &[root]);

        let (_, p) = step(&mut tracker, &mut next, 0);
        assert_eq!(p.transition, Transition::Root);
        assert!(tracker.ancestors().is_empty());
    }

    #[test]
    fn test_ascend_truncates_deeper_ancestors() {
        let mut tracker = AncestorTracker::new();
        let mut next = 0;

        let (root, _) = step(&mut tracker, &mut next, 0);
        let (mid, _) = step(&mut tracker, &mut next, 1);
        let (deep, _) = step(&mut tracker, &mut next, 2);
        step(&mut tracker, &mut next, 3);
        assert_eq!(tracker.ancestors(), &[root, mid, deep]);

        let (_, p) = step(&mut tracker, &mut next, 1);
        assert_eq!(p.transition, Transition::Ascend);
        assert_eq!(p.parent, Some(root));
        assert_eq!(tracker.ancestors(), &[root]);
    }

    #[test]
    fn test_ascend_one_level() {
        let mut tracker = AncestorTracker::new();
        let mut next = 0;

        let (root, _) = step(&mut tracker, &mut next, 0);
        let (mid, _) = step(&mut tracker, &mut next, 1);
        step(&mut tracker, &mut next, 2);

        let (_, p) = step(&mut tracker, &mut next, 1);
        assert_eq!(p.parent, Some(root));
        assert_eq!(tracker.ancestors(), &[root]);
        assert_ne!(p.parent, Some(mid));
    }

    #[test]
    fn test_ascend_past_chain_recovers() {
        let mut tracker = AncestorTracker::new();
        let mut next = 0;

        // Leading line at depth 3 has no previous line to descend from, so
        // nothing enters the chain.
        let (_, p) = step(&mut tracker, &mut next, 3);
        assert_eq!(p.parent, None);
        assert!(tracker.ancestors().is_empty());

        let (_, p) = step(&mut tracker, &mut next, 2);
        assert_eq!(p.transition, Transition::Recovered);
        assert_eq!(p.parent, None);
        assert!(tracker.ancestors().is_empty());
    }

    #[test]
    fn test_depth_jump_appends_previous_line_once() {
        let mut tracker = AncestorTracker::new();
        let mut next = 0;

        let (root, _) = step(&mut tracker, &mut next, 0);
        let (_, p) = step(&mut tracker, &mut next, 2);
        assert_eq!(p.transition, Transition::Descend);
        assert_eq!(p.parent, Some(root));
        // The root sits at position 0 even though the new line skipped depth 1.
        assert_eq!(tracker.ancestors(), &[root]);

        let (_, p) = step(&mut tracker, &mut next, 1);
        assert_eq!(p.transition, Transition::Ascend);
        assert_eq!(p.parent, Some(root));
    }

    #[test]
    fn test_sibling_of_parentless_line_has_no_parent() {
        let mut tracker = AncestorTracker::new();
        let mut next = 0;

        step(&mut tracker, &mut next, 2);
        let (_, p) = step(&mut tracker, &mut next, 2);
        assert_eq!(p.transition, Transition::Sibling);
        assert_eq!(p.parent, None);
    }
}
