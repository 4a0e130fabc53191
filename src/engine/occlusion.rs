use smallvec::SmallVec;

/// Closed range of screen columns already painted by a nearer face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub left: i32,
    pub right: i32,
}

/// The set of occluded screen-column spans for one frame's paint pass.
///
/// Always sorted left-to-right, pairwise disjoint and non-adjacent (any two
/// neighbours are separated by at least one free column). Two sentinel
/// spans cover everything left of column 0 and everything right of the last
/// column, so the insert scan never has to worry about running off either
/// end of the storage and the set never has fewer than two elements.
#[derive(Clone, Debug, Default)]
pub struct SpanSet {
    spans: SmallVec<[Span; 16]>,
}

impl SpanSet {
    pub fn new(screen_w: i32) -> Self {
        let mut set = Self::default();
        set.reset(screen_w);
        set
    }

    /// Install the two sentinels for a fresh paint pass.
    pub fn reset(&mut self, screen_w: i32) {
        self.spans.clear();
        self.spans.push(Span {
            left: i32::MIN,
            right: -1,
        });
        self.spans.push(Span {
            left: screen_w,
            right: i32::MAX,
        });
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The sentinels have merged into a single span covering the whole
    /// screen: no farther face can contribute a pixel, and the frame's face
    /// loop may stop.
    pub fn fully_occluded(&self) -> bool {
        self.spans.len() == 1
    }

    /// Record `[left, right]` as painted.
    ///
    /// Returns the sub-range the caller may actually draw (the part of the
    /// input not already covered by nearer faces), or `None` when the whole
    /// range is occluded. Overlapping or adjacent spans are merged
    /// immediately, so the set stays minimal and disjoint after every call.
    pub fn insert(&mut self, left: i32, right: i32) -> Option<(i32, i32)> {
        if self.spans.len() < 2 {
            eprintln!(
                "ERROR: SpanSet::insert() called with {} spans, need at least the two sentinels",
                self.spans.len()
            );
            return None;
        }
        let last = self.spans.len() - 1;
        if self.spans[0].left != i32::MIN || self.spans[last].right != i32::MAX {
            eprintln!("ERROR: SpanSet::insert() sentinel bounds are missing");
            return None;
        }

        // 1. scan for the neighbour pair the new range interacts with:
        //    overlap with the left element, overlap with the right element,
        //    or a strict gap between the two
        let covers = |s: &Span, v: i32| s.left <= v && v <= s.right;
        let mut i = 0;
        let mut found = false;
        while !found && i + 1 < self.spans.len() {
            let (prev, next) = (self.spans[i], self.spans[i + 1]);
            found = covers(&prev, left)
                || covers(&next, right)
                || (left > prev.right && right < next.left);
            if !found {
                i += 1;
            }
        }
        if !found {
            // swallowed by an existing span, nothing left to draw
            return None;
        }

        // 2. extend the left neighbour in place on overlap/adjacency,
        //    otherwise splice in a new span after it
        let clip_left;
        if self.spans[i].right + 1 >= left {
            clip_left = self.spans[i].right + 1;
            if self.spans[i].left > left {
                eprintln!(
                    "WARNING: SpanSet::insert() range [{left}, {right}] extends left of the span absorbing it"
                );
            }
            self.spans[i].right = self.spans[i].right.max(right);
        } else {
            clip_left = left;
            i += 1;
            self.spans.insert(i, Span { left, right });
        }

        // 3. right clip against the next span, before any merging
        let clip_right = if self.spans[i].right + 1 >= self.spans[i + 1].left {
            self.spans[i + 1].left - 1
        } else {
            right
        };

        // 4. merge the chain of spans the extension now touches
        while i + 1 < self.spans.len() && self.spans[i].right + 1 >= self.spans[i + 1].left {
            self.spans[i].left = self.spans[i].left.min(self.spans[i + 1].left);
            self.spans[i].right = self.spans[i].right.max(self.spans[i + 1].right);
            self.spans.remove(i + 1);
        }

        // single-column results (clip_left == clip_right) are accepted
        (clip_left <= clip_right).then_some((clip_left, clip_right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sorted, disjoint, non-adjacent: the structural invariant after any
    /// sequence of inserts.
    fn assert_well_formed(set: &SpanSet) {
        let spans = set.spans();
        assert!(!spans.is_empty());
        for w in spans.windows(2) {
            assert!(
                w[1].left > w[0].right + 1,
                "spans {:?} and {:?} overlap or touch",
                w[0],
                w[1]
            );
        }
        for s in spans {
            assert!(s.left <= s.right, "inverted span {s:?}");
        }
    }

    #[test]
    fn no_double_paint_sequence() {
        let mut set = SpanSet::new(400);

        assert_eq!(set.insert(0, 100), Some((0, 100)));
        assert_eq!(set.insert(50, 150), Some((101, 150)));
        assert_eq!(set.insert(200, 300), Some((200, 300)));

        assert_eq!(
            set.spans(),
            &[
                Span { left: i32::MIN, right: 150 },
                Span { left: 200, right: 300 },
                Span { left: 400, right: i32::MAX },
            ]
        );
        assert_well_formed(&set);
    }

    #[test]
    fn fully_swallowed_range_rejected_without_mutation() {
        let mut set = SpanSet::new(400);
        set.insert(0, 100).unwrap();
        let before = set.spans().to_vec();

        assert_eq!(set.insert(10, 20), None);
        assert_eq!(set.spans(), &before[..]);
    }

    #[test]
    fn full_occlusion_short_circuit() {
        let mut set = SpanSet::new(400);
        assert_eq!(set.insert(0, 399), Some((0, 399)));
        assert!(set.fully_occluded());
        // anything after that is rejected (precondition reported, non-fatal)
        assert_eq!(set.insert(10, 20), None);
    }

    #[test]
    fn single_column_span_accepted() {
        // the `<=` accept rule keeps one-column-wide faces drawable
        let mut set = SpanSet::new(400);
        assert_eq!(set.insert(5, 5), Some((5, 5)));
        assert_eq!(set.insert(5, 6), Some((6, 6)));
        assert_well_formed(&set);
    }

    #[test]
    fn bridging_span_merges_whole_chain() {
        let mut set = SpanSet::new(400);
        set.insert(0, 5).unwrap();
        set.insert(8, 12).unwrap();
        set.insert(13, 20).unwrap(); // adjacent, merges into [8, 20]
        assert_eq!(set.len(), 3); // left sentinel+[0,5], [8,20], right sentinel

        // closes the 6..7 gap and must coalesce everything to its right
        assert_eq!(set.insert(6, 9), Some((6, 7)));
        assert_eq!(
            set.spans(),
            &[
                Span { left: i32::MIN, right: 20 },
                Span { left: 400, right: i32::MAX },
            ]
        );
        assert_well_formed(&set);
    }

    #[test]
    fn off_screen_ranges_clip_against_sentinels() {
        let mut set = SpanSet::new(400);
        // face projecting partly left of the screen
        assert_eq!(set.insert(-50, 30), Some((0, 30)));
        // face projecting partly right of the screen
        assert_eq!(set.insert(350, 500), Some((350, 399)));
        assert_well_formed(&set);
    }

    #[test]
    fn uninitialized_set_reports_and_rejects() {
        let mut set = SpanSet::default();
        assert_eq!(set.insert(0, 10), None);
    }

    #[test]
    fn invariant_holds_over_arbitrary_sequence() {
        let mut set = SpanSet::new(640);
        for (l, r) in [
            (100, 200),
            (50, 120),
            (300, 310),
            (205, 299),
            (0, 640),
            (10, 20),
            (-5, 700),
        ] {
            set.insert(l, r);
            assert_well_formed(&set);
        }
        assert!(set.fully_occluded());
    }
}
