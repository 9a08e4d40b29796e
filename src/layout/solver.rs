//! Layout Solver
//!
//! Box layout for one [`SpaceTree`] subtree, recomputed from scratch on every call.
//!
//! # Algorithm
//!
//! 1. **Prepare**: BFS from the root to get parents-before-children order;
//!    disabled subtrees are set aside
//! 2. **Pass 1**: Auto sizes (bottom-up, leaf → root) from flow children
//! 3. **Pass 2**: Sizes (top-down, root → leaf), splitting the remaining
//!    main-axis space between `Fraction` children by weight
//! 4. **Pass 3**: Positions (top-down): a cursor for flow children, offsets
//!    for detached ones
//! 5. **Write-back**: rects onto the tree; disabled subtrees become `Rect::ZERO`
//!
//! Passes only read the tree and fill the shadow state. Nothing is written
//! before all of them finish, so a failed precondition leaves every rect as
//! it was.
//!
//! # Degenerate input
//!
//! Zero total fraction weight, negative remaining space, empty containers and
//! padding larger than the box are all clamped to zero sizes. None of them is
//! an error and none is logged: they are normal intermediate states while a
//! layout animates.

use crate::engine::{Space, SpaceId, SpaceTree};
use crate::error::LayoutError;
use crate::scalar::ScalarKind;
use crate::types::{Axis, Rect, Sides};

use super::types::{LayoutOptions, SState};

const AXES: [Axis; 2] = [Axis::X, Axis::Y];

// =============================================================================
// MAIN ENTRY POINTS
// =============================================================================

/// Lay out the subtree under `root` with default options.
///
/// `root` may be any space; it acts as the root of this computation, so its
/// offsets, sizes and extra sizes must be `Absolute`.
pub fn compute_layout(tree: &mut SpaceTree, root: SpaceId) -> Result<(), LayoutError> {
    LayoutSolver::new().compute(tree, root)
}

/// Lay out the subtree under `root` with explicit options.
pub fn compute_layout_with(
    tree: &mut SpaceTree,
    root: SpaceId,
    options: LayoutOptions,
) -> Result<(), LayoutError> {
    LayoutSolver::with_options(options).compute(tree, root)
}

/// Reusable solver. Keeps its working arrays between calls so per-frame
/// layouts do not reallocate; results never depend on a previous call.
#[derive(Debug, Default)]
pub struct LayoutSolver {
    options: LayoutOptions,
    /// Shadow node per arena slot.
    shadow: Vec<SState>,
    /// Live spaces, parents before children.
    order: Vec<SpaceId>,
    /// Roots of disabled subtrees.
    disabled: Vec<SpaceId>,
}

impl LayoutSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    /// Run all passes for the subtree under `root` and write the rects back.
    pub fn compute(&mut self, tree: &mut SpaceTree, root: SpaceId) -> Result<(), LayoutError> {
        let span = tracing::debug_span!(
            "compute_layout",
            root = %root,
            nodes = tracing::field::Empty
        );
        let _guard = span.enter();

        let root_rect = resolve_root(tree, root)?;

        self.prepare(tree, root);
        span.record("nodes", self.order.len());

        if !self.order.is_empty() {
            self.measure(tree);
            self.distribute(tree, root_rect);
            self.position(tree);
        }
        self.write_back(tree);
        Ok(())
    }

    // =========================================================================
    // PREPARE: BFS order
    // =========================================================================

    fn prepare(&mut self, tree: &SpaceTree, root: SpaceId) {
        self.order.clear();
        self.disabled.clear();
        self.shadow.clear();
        self.shadow.resize(tree.slot_count(), SState::default());

        if !is_enabled(tree, root) {
            self.disabled.push(root);
            return;
        }

        self.order.push(root);
        let mut head = 0;
        while head < self.order.len() {
            let parent = self.order[head];
            head += 1;

            for &child in tree.children(parent) {
                if is_enabled(tree, child) {
                    self.order.push(child);
                } else {
                    self.disabled.push(child);
                }
            }
        }
    }

    // =========================================================================
    // PASS 1: Auto sizes (bottom-up)
    // =========================================================================

    fn measure(&mut self, tree: &SpaceTree) {
        let mut visited = 0usize;

        for &id in self.order.iter().rev() {
            let Some(space) = tree.get(id) else { continue };
            let fit = space.fit_children();
            if fit.is_empty() {
                continue;
            }
            visited += 1;

            let main = space.direction.main_axis();
            let cross = main.other();
            let padding = space.padding.map(|p| p.compute_or_zero(0.0, 0.0));
            let gap = space.gap.compute_or_zero(0.0, 0.0);

            let mut sum_main = 0.0;
            let mut max_cross: f32 = 0.0;
            let mut count = 0usize;
            for (child_id, child) in flow_children(tree, id) {
                let state = &self.shadow[child_id.index()];
                sum_main += intrinsic_size(child, state, main);
                max_cross = max_cross.max(intrinsic_size(child, state, cross));
                count += 1;
            }
            sum_main += gap * count.saturating_sub(1) as f32;

            let state = &mut self.shadow[id.index()];
            if fit.has(main) {
                state.set_size(main, sum_main + padding.along(main));
            }
            if fit.has(cross) {
                state.set_size(cross, max_cross + padding.along(cross));
            }
        }

        tracing::trace!(visited, "pass 1: auto sizes");
    }

    // =========================================================================
    // PASS 2: Sizes and fraction distribution (top-down)
    // =========================================================================

    fn distribute(&mut self, tree: &SpaceTree, root_rect: Rect) {
        if let Some(&root) = self.order.first() {
            let state = &mut self.shadow[root.index()];
            state.x = root_rect.x;
            state.y = root_rect.y;
            state.sx = root_rect.width;
            state.sy = root_rect.height;
        }

        for &id in &self.order {
            let Some(space) = tree.get(id) else { continue };
            let main = space.direction.main_axis();
            let cross = main.other();

            // Padding against own size, gap against the inner box
            let state = &mut self.shadow[id.index()];
            let (w, h) = (state.sx, state.sy);
            state.padding = Sides::new(
                space.padding.top.compute_or_zero(h, w),
                space.padding.right.compute_or_zero(w, h),
                space.padding.bottom.compute_or_zero(h, w),
                space.padding.left.compute_or_zero(w, h),
            );
            let inner_main = state.inner(main);
            let inner_cross = state.inner(cross);
            state.gap = space.gap.compute_or_zero(inner_main, inner_cross);
            let gap = state.gap;
            let inner = |axis: Axis| if axis == main { inner_main } else { inner_cross };

            // Step 1: fixed main sizes and fraction weights of flow children
            let mut fixed_main = 0.0;
            let mut total_weight = 0.0;
            let mut flow_count = 0usize;
            for (child_id, child) in flow_children(tree, id) {
                flow_count += 1;
                let size = child.size(main);
                if size.is_fraction() {
                    total_weight += size.value.max(0.0);
                } else {
                    let state = &self.shadow[child_id.index()];
                    fixed_main +=
                        base_size(child, state, main, inner_main, inner_cross).max(0.0);
                }
            }

            let gaps = gap * flow_count.saturating_sub(1) as f32;
            let remaining = (inner_main - fixed_main - gaps).max(0.0);

            // Step 2: resolve both axes of every child, then add extra sizes
            for (child_id, child) in live_children(tree, id) {
                let shares = !child.is_detached();
                let mut resolved = self.shadow[child_id.index()];

                for axis in AXES {
                    let (along, other) = (inner(axis), inner(axis.other()));
                    let size = child.size(axis);

                    let base = if shares && axis == main && size.is_fraction() {
                        if total_weight > 0.0 {
                            remaining * size.value.max(0.0) / total_weight
                        } else {
                            0.0
                        }
                    } else {
                        base_size(child, &resolved, axis, along, other)
                    };
                    let extra = child.extra_size(axis).compute_or_zero(along, other);
                    resolved.set_size(axis, (base + extra).max(0.0));
                }

                self.shadow[child_id.index()] = resolved;
            }
        }

        tracing::trace!(visited = self.order.len(), "pass 2: sizes");
    }

    // =========================================================================
    // PASS 3: Positions (top-down)
    // =========================================================================

    fn position(&mut self, tree: &SpaceTree) {
        for &id in &self.order {
            let Some(space) = tree.get(id) else { continue };
            let parent = self.shadow[id.index()];
            let main = space.direction.main_axis();
            let cross = main.other();
            let inner_main = parent.inner(main);
            let inner_cross = parent.inner(cross);

            // Leftover main-axis space is split once, by the alignment factor
            let mut used = 0.0;
            let mut count = 0usize;
            for (child_id, _) in flow_children(tree, id) {
                used += self.shadow[child_id.index()].size(main);
                count += 1;
            }
            used += parent.gap * count.saturating_sub(1) as f32;
            let leftover = inner_main - used;
            let mut cursor = parent.inner_origin(main) + leftover * space.align_children(main);

            for (child_id, child) in live_children(tree, id) {
                let state = &mut self.shadow[child_id.index()];

                if child.is_detached() {
                    for axis in AXES {
                        let along = parent.inner(axis);
                        let offset = child.offset(axis);
                        let start = if offset.is_auto() {
                            let align = child.align_self(axis).unwrap_or(space.align_children(axis));
                            (along - state.size(axis)) * align
                        } else {
                            offset.compute(along, parent.inner(axis.other()))
                        };
                        state.set_pos(axis, parent.inner_origin(axis) + start);
                    }
                    continue;
                }

                let align = child.align_self(cross).unwrap_or(space.align_children(cross));
                let cross_pos =
                    parent.inner_origin(cross) + (inner_cross - state.size(cross)) * align;

                // Offsets nudge a flow child without moving the cursor
                let nudge_main = child.offset(main).compute_or_zero(inner_main, inner_cross);
                let nudge_cross = child.offset(cross).compute_or_zero(inner_cross, inner_main);

                state.set_pos(main, cursor + nudge_main);
                state.set_pos(cross, cross_pos + nudge_cross);
                cursor += state.size(main) + parent.gap;
            }
        }

        tracing::trace!(visited = self.order.len(), "pass 3: positions");
    }

    // =========================================================================
    // WRITE-BACK
    // =========================================================================

    fn write_back(&mut self, tree: &mut SpaceTree) {
        let snap = self.options.snap_to_pixels;
        for &id in &self.order {
            let s = &self.shadow[id.index()];
            let rect = Rect::new(s.x, s.y, s.sx, s.sy);
            tree.set_rect(id, if snap { rect.snapped() } else { rect });
        }

        let mut zeroed = 0usize;
        while let Some(id) = self.disabled.pop() {
            tree.set_rect(id, Rect::ZERO);
            self.disabled.extend_from_slice(tree.children(id));
            zeroed += 1;
        }

        tracing::trace!(written = self.order.len(), zeroed, "write-back");
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Root rect from its own declarations. Every one of them must be absolute.
fn resolve_root(tree: &SpaceTree, root: SpaceId) -> Result<Rect, LayoutError> {
    let space = tree.get(root).ok_or(LayoutError::UnknownSpace(root))?;

    let fields = [
        ("offset_x", space.offset_x),
        ("offset_y", space.offset_y),
        ("size_x", space.size_x),
        ("size_y", space.size_y),
        ("extra_size_x", space.extra_size_x),
        ("extra_size_y", space.extra_size_y),
    ];
    if let Some((field, scalar)) = fields.into_iter().find(|(_, scalar)| !scalar.is_absolute()) {
        tracing::warn!(root = %root, field, kind = %scalar.kind, "root scalar is not absolute");
        return Err(LayoutError::RootNotAbsolute {
            field,
            kind: scalar.kind,
        });
    }

    Ok(Rect::new(
        space.offset_x.value,
        space.offset_y.value,
        (space.size_x.value + space.extra_size_x.value).max(0.0),
        (space.size_y.value + space.extra_size_y.value).max(0.0),
    ))
}

fn is_enabled(tree: &SpaceTree, id: SpaceId) -> bool {
    tree.get(id).is_some_and(|space| space.enabled)
}

/// Enabled children, in order.
fn live_children(tree: &SpaceTree, id: SpaceId) -> impl Iterator<Item = (SpaceId, &Space)> {
    tree.children(id).iter().filter_map(move |&child| {
        tree.get(child)
            .filter(|space| space.enabled)
            .map(|space| (child, space))
    })
}

/// Enabled flow children, in order.
fn flow_children(tree: &SpaceTree, id: SpaceId) -> impl Iterator<Item = (SpaceId, &Space)> {
    live_children(tree, id).filter(|(_, space)| !space.is_detached())
}

/// Size a child contributes to an auto-sized parent (pass 1).
///
/// The parent's size is unknown here, so parent-relative declarations
/// resolve against zero and fractions contribute nothing.
fn intrinsic_size(child: &Space, state: &SState, axis: Axis) -> f32 {
    let size = child.size(axis);
    let base = match size.kind {
        ScalarKind::Auto => state.size(axis),
        ScalarKind::Fraction => 0.0,
        _ => size.compute(0.0, 0.0),
    };
    (base + child.extra_size(axis).compute_or_zero(0.0, 0.0)).max(0.0)
}

/// Size of a child on `axis` before extra sizes, outside fraction distribution.
///
/// Auto axes keep their pass-1 size; everything else resolves against the
/// parent's inner box (a fraction off the main axis fills it).
fn base_size(child: &Space, state: &SState, axis: Axis, inner: f32, inner_other: f32) -> f32 {
    let size = child.size(axis);
    match size.kind {
        ScalarKind::Auto => state.size(axis),
        _ => size.compute(inner, inner_other),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;
    use crate::types::Direction;

    const EPS: f32 = 1e-4;

    fn assert_rect(tree: &SpaceTree, id: SpaceId, expected: Rect) {
        let actual = tree.rect(id).expect("space exists");
        let close = |a: f32, b: f32| (a - b).abs() <= EPS;
        assert!(
            close(actual.x, expected.x)
                && close(actual.y, expected.y)
                && close(actual.width, expected.width)
                && close(actual.height, expected.height),
            "rect of {id}: expected {expected:?}, got {actual:?}"
        );
    }

    fn root(tree: &mut SpaceTree, width: f32, height: f32) -> SpaceId {
        tree.insert(Space::fixed(0.0, 0.0, width, height))
    }

    fn child(tree: &mut SpaceTree, parent: SpaceId, space: Space) -> SpaceId {
        let id = tree.insert(space);
        tree.attach(parent, id).unwrap();
        id
    }

    // =========================================================================
    // Root preconditions
    // =========================================================================

    #[test]
    fn test_root_rect_from_absolute_declarations() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(Space::fixed(5.0, 6.0, 100.0, 50.0).with_extra_size(10.0, 0.0));
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, r, Rect::new(5.0, 6.0, 110.0, 50.0));
    }

    #[test]
    fn test_root_must_be_absolute() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 100.0);
        let c = child(&mut tree, r, Space::new());
        compute_layout(&mut tree, r).unwrap();
        let before = tree.rect(c);

        tree.get_mut(r).unwrap().size_x = Scalar::relative(1.0);
        assert_eq!(
            compute_layout(&mut tree, r),
            Err(LayoutError::RootNotAbsolute {
                field: "size_x",
                kind: ScalarKind::Relative,
            })
        );
        // Nothing written on failure
        assert_eq!(tree.rect(c), before);

        tree.get_mut(r).unwrap().size_x = Scalar::absolute(100.0);
        tree.get_mut(r).unwrap().offset_y = Scalar::AUTO;
        assert!(matches!(
            compute_layout(&mut tree, r),
            Err(LayoutError::RootNotAbsolute { field: "offset_y", .. })
        ));
    }

    #[test]
    fn test_unknown_root() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 10.0, 10.0);
        tree.release(r).unwrap();
        assert_eq!(compute_layout(&mut tree, r), Err(LayoutError::UnknownSpace(r)));
    }

    #[test]
    fn test_subtree_acts_as_root() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 100.0);
        let panel = child(&mut tree, r, Space::fixed(10.0, 20.0, 40.0, 30.0));
        let inner = child(&mut tree, panel, Space::new());
        compute_layout(&mut tree, panel).unwrap();
        assert_rect(&tree, panel, Rect::new(10.0, 20.0, 40.0, 30.0));
        assert_rect(&tree, inner, Rect::new(10.0, 20.0, 40.0, 30.0));
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    #[test]
    fn test_fixed_children_with_gap() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(Space::fixed(0.0, 0.0, 100.0, 20.0).with_gap(5.0));
        let a = child(&mut tree, r, Space::new().with_size_x(10.0));
        let b = child(&mut tree, r, Space::new().with_size_x(20.0));
        compute_layout(&mut tree, r).unwrap();

        // Cross-axis fraction fills the inner height
        assert_rect(&tree, a, Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_rect(&tree, b, Rect::new(15.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_fractions_share_remaining_after_fixed() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 300.0, 100.0);
        let fixed = child(&mut tree, r, Space::new().with_size_x(100.0));
        let f1 = child(&mut tree, r, Space::new());
        let f2 = child(&mut tree, r, Space::new());
        compute_layout(&mut tree, r).unwrap();

        assert_rect(&tree, fixed, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_rect(&tree, f1, Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_rect(&tree, f2, Rect::new(200.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_extra_size_skips_fraction_accounting() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 300.0, 100.0);
        let a = child(
            &mut tree,
            r,
            Space::new()
                .with_size_x(Scalar::fraction(1.0))
                .with_extra_size(50.0, 0.0),
        );
        let b = child(&mut tree, r, Space::new().with_size_x(Scalar::fraction(2.0)));
        compute_layout(&mut tree, r).unwrap();

        // Ratios stay 1:2 on the base sizes; the extra rides on top
        assert_rect(&tree, a, Rect::new(0.0, 0.0, 150.0, 100.0));
        assert_rect(&tree, b, Rect::new(150.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_overflow_clamps_fractions_to_zero() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 10.0);
        child(&mut tree, r, Space::new().with_size_x(80.0));
        child(&mut tree, r, Space::new().with_size_x(40.0));
        let f = child(&mut tree, r, Space::new());
        compute_layout(&mut tree, r).unwrap();

        let rect = tree.rect(f).unwrap();
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.x, 120.0);
    }

    #[test]
    fn test_negative_fixed_size_takes_no_space() {
        for negative in [Scalar::absolute(-50.0), Scalar::relative(-0.5)] {
            let mut tree = SpaceTree::new();
            let r = root(&mut tree, 100.0, 10.0);
            let neg = child(&mut tree, r, Space::new().with_size_x(negative));
            let frac = child(&mut tree, r, Space::new());
            compute_layout(&mut tree, r).unwrap();

            assert_rect(&tree, neg, Rect::new(0.0, 0.0, 0.0, 10.0));
            assert_rect(&tree, frac, Rect::new(0.0, 0.0, 100.0, 10.0));
            assert!(tree.rect(frac).unwrap().right() <= 100.0);
        }
    }

    #[test]
    fn test_zero_weights_give_zero_sizes() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 10.0);
        let a = child(&mut tree, r, Space::new().with_size_x(Scalar::fraction(0.0)));
        let b = child(&mut tree, r, Space::new().with_size_x(Scalar::fraction(-1.0)));
        compute_layout(&mut tree, r).unwrap();

        for id in [a, b] {
            let rect = tree.rect(id).unwrap();
            assert_eq!(rect.width, 0.0);
            assert!(rect.x.is_finite());
        }
    }

    #[test]
    fn test_auto_size_from_children() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(
            Space::fixed(0.0, 0.0, 500.0, 500.0).with_direction(Direction::Vertical),
        );
        let auto = child(
            &mut tree,
            r,
            Space::new()
                .with_size(Scalar::AUTO, Scalar::AUTO)
                .with_padding(2.0)
                .with_gap(3.0),
        );
        let g1 = child(&mut tree, auto, Space::new().with_size(10.0, 5.0));
        let g2 = child(&mut tree, auto, Space::new().with_size(20.0, 8.0));
        compute_layout(&mut tree, r).unwrap();

        // main: 10 + 3 + 20 + 2 * 2, cross: max(5, 8) + 2 * 2
        assert_rect(&tree, auto, Rect::new(0.0, 0.0, 37.0, 12.0));
        assert_rect(&tree, g1, Rect::new(2.0, 2.0, 10.0, 5.0));
        assert_rect(&tree, g2, Rect::new(15.0, 2.0, 20.0, 8.0));
    }

    #[test]
    fn test_auto_ignores_detached_and_disabled_children() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 500.0, 500.0);
        let auto = child(&mut tree, r, Space::new().with_size(Scalar::AUTO, Scalar::AUTO));
        child(&mut tree, auto, Space::new().with_size(10.0, 10.0));
        child(&mut tree, auto, Space::new().with_size(99.0, 99.0).detached());
        child(&mut tree, auto, Space::new().with_size(77.0, 77.0).with_enabled(false));
        compute_layout(&mut tree, r).unwrap();

        assert_rect(&tree, auto, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_relative_padding_uses_own_size() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(
            Space::fixed(0.0, 0.0, 200.0, 100.0).with_padding(Scalar::relative(0.1)),
        );
        let c = child(&mut tree, r, Space::new());
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, c, Rect::new(20.0, 10.0, 160.0, 80.0));
    }

    #[test]
    fn test_opposite_and_smaller_relative_sizes() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 200.0, 100.0);
        let c = child(
            &mut tree,
            r,
            Space::new()
                .with_size(Scalar::opposite_relative(0.5), Scalar::smaller_relative(0.5))
                .detached(),
        );
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, c, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    #[test]
    fn test_center_alignment_vertical() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(
            Space::fixed(0.0, 0.0, 100.0, 100.0)
                .with_direction(Direction::Vertical)
                .with_align_children(0.5, 0.5),
        );
        let c = child(&mut tree, r, Space::new().with_size(20.0, 10.0));
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, c, Rect::new(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_align_self_overrides_cross_alignment() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 100.0);
        let a = child(&mut tree, r, Space::new().with_size(10.0, 10.0));
        let b = child(
            &mut tree,
            r,
            Space::new()
                .with_size(10.0, 10.0)
                .with_align_self(None, Some(1.0)),
        );
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, a, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_rect(&tree, b, Rect::new(10.0, 90.0, 10.0, 10.0));
    }

    #[test]
    fn test_detached_auto_offset_aligns() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(
            Space::fixed(0.0, 0.0, 100.0, 100.0)
                .with_padding(10.0)
                .with_align_children(1.0, 0.5),
        );
        let c = child(
            &mut tree,
            r,
            Space::new()
                .detached()
                .with_offset(Scalar::AUTO, Scalar::AUTO)
                .with_size(20.0, 20.0),
        );
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, c, Rect::new(70.0, 40.0, 20.0, 20.0));
    }

    #[test]
    fn test_detached_relative_offset() {
        let mut tree = SpaceTree::new();
        let r = tree.insert(Space::fixed(0.0, 0.0, 100.0, 100.0).with_padding(10.0));
        let c = child(
            &mut tree,
            r,
            Space::new()
                .detached()
                .with_offset(Scalar::relative(0.5), 0.0)
                .with_size(5.0, 5.0),
        );
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, c, Rect::new(50.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn test_flow_offset_nudges_without_moving_siblings() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 100.0);
        let a = child(&mut tree, r, Space::new().with_size(10.0, 10.0).with_offset(5.0, 3.0));
        let b = child(&mut tree, r, Space::new().with_size(10.0, 10.0));
        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, a, Rect::new(5.0, 3.0, 10.0, 10.0));
        assert_rect(&tree, b, Rect::new(10.0, 0.0, 10.0, 10.0));
    }

    // =========================================================================
    // Disabled spaces
    // =========================================================================

    #[test]
    fn test_disabled_subtree_is_zeroed_and_excluded() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 50.0);
        let off = child(&mut tree, r, Space::new());
        let nested = child(&mut tree, off, Space::new());
        let on = child(&mut tree, r, Space::new());

        compute_layout(&mut tree, r).unwrap();
        assert_rect(&tree, on, Rect::new(50.0, 0.0, 50.0, 50.0));

        tree.get_mut(off).unwrap().enabled = false;
        compute_layout(&mut tree, r).unwrap();
        assert_eq!(tree.rect(off), Some(Rect::ZERO));
        assert_eq!(tree.rect(nested), Some(Rect::ZERO));
        assert_rect(&tree, on, Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_disabled_root_zeroes_everything() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 50.0);
        let c = child(&mut tree, r, Space::new());
        compute_layout(&mut tree, r).unwrap();

        tree.get_mut(r).unwrap().enabled = false;
        compute_layout(&mut tree, r).unwrap();
        assert_eq!(tree.rect(r), Some(Rect::ZERO));
        assert_eq!(tree.rect(c), Some(Rect::ZERO));
    }

    // =========================================================================
    // Options and reuse
    // =========================================================================

    #[test]
    fn test_snap_to_pixels_keeps_edges_shared() {
        let mut tree = SpaceTree::new();
        let r = root(&mut tree, 100.0, 10.0);
        let kids = tree.populate(r, 3, |_| Space::new()).unwrap();
        compute_layout_with(&mut tree, r, LayoutOptions::snapped()).unwrap();

        let rects: Vec<Rect> = kids.iter().filter_map(|&k| tree.rect(k)).collect();
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 33.0, 10.0));
        assert_eq!(rects[1], Rect::new(33.0, 0.0, 34.0, 10.0));
        assert_eq!(rects[2], Rect::new(67.0, 0.0, 33.0, 10.0));
    }

    #[test]
    fn test_solver_reuse_across_trees() {
        let mut solver = LayoutSolver::new();

        let mut big = SpaceTree::new();
        let big_root = root(&mut big, 100.0, 100.0);
        big.populate(big_root, 8, |_| Space::new()).unwrap();
        solver.compute(&mut big, big_root).unwrap();

        let mut small = SpaceTree::new();
        let small_root = root(&mut small, 40.0, 10.0);
        let only = child(&mut small, small_root, Space::new());
        solver.compute(&mut small, small_root).unwrap();
        assert_rect(&small, only, Rect::new(0.0, 0.0, 40.0, 10.0));

        solver.set_options(LayoutOptions::snapped());
        assert!(solver.options().snap_to_pixels);
    }
}
