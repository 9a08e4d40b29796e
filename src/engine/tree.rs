//! SpaceTree - arena storage and the tree-authoring API.
//!
//! Spaces are NOT linked objects. They are slots in one flat arena:
//!
//! ```text
//! Slot 0: root    (parent=None,    children=[1, 2], root=0)
//! Slot 1: header  (parent=Some(0), children=[],     root=0)
//! Slot 2: body    (parent=Some(0), children=[3],    root=0)
//! Slot 3: card    (parent=Some(2), children=[],     root=0)
//! ```
//!
//! Structural mutation is list surgery on those slots, so cycles can only
//! come from an explicit attach, which is checked. Released slots go to a
//! free pool for O(1) reuse; every slot carries a generation so a
//! [`SpaceId`] from before the release never resolves again.
//!
//! Traversals (`descendants`, `ancestors`, `leaves`) are explicit worklist
//! iterators: finite, restartable, no recursion.

use std::fmt;

use crate::error::TreeError;
use crate::types::Rect;

use super::space::Space;

// =============================================================================
// SpaceId
// =============================================================================

/// Generational handle to a space in a [`SpaceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId {
    index: u32,
    generation: u32,
}

impl SpaceId {
    /// Slot index in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Arena State
// =============================================================================

#[derive(Debug, Clone)]
struct Node {
    space: Space,
    parent: Option<SpaceId>,
    children: Vec<SpaceId>,
    /// Top-most ancestor, refreshed for the whole subtree on every move.
    root: SpaceId,
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u32,
    node: Option<Node>,
}

/// Forest of spaces. Every parentless space is the root of its own tree.
#[derive(Debug, Clone, Default)]
pub struct SpaceTree {
    entries: Vec<Entry>,
    /// Pool of released slot indices for reuse.
    free: Vec<u32>,
    len: usize,
}

impl SpaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live spaces.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots (live or free). Shadow state is sized by this.
    pub(crate) fn slot_count(&self) -> usize {
        self.entries.len()
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Add a parentless space. It is the root of a new tree until attached.
    pub fn insert(&mut self, space: Space) -> SpaceId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    node: None,
                });
                (self.entries.len() - 1) as u32
            }
        };

        let entry = &mut self.entries[index as usize];
        let id = SpaceId {
            index,
            generation: entry.generation,
        };
        entry.node = Some(Node {
            space,
            parent: None,
            children: Vec::new(),
            root: id,
        });
        self.len += 1;
        id
    }

    /// Detach `id` and free it together with its whole subtree.
    ///
    /// Returns the number of released spaces. All their ids become stale.
    pub fn release(&mut self, id: SpaceId) -> Result<usize, TreeError> {
        self.detach(id)?;

        let doomed: Vec<SpaceId> = std::iter::once(id).chain(self.descendants(id)).collect();
        for &gone in &doomed {
            let entry = &mut self.entries[gone.index()];
            entry.node = None;
            entry.generation = entry.generation.saturating_add(1);
            // Exhausted slots are retired so old handles can never match again
            if entry.generation < u32::MAX {
                self.free.push(gone.index);
            }
        }
        self.len -= doomed.len();

        tracing::trace!(space = %id, released = doomed.len(), "released subtree");
        Ok(doomed.len())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    fn node(&self, id: SpaceId) -> Option<&Node> {
        self.entries
            .get(id.index())
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_ref())
    }

    fn node_mut(&mut self, id: SpaceId) -> Option<&mut Node> {
        self.entries
            .get_mut(id.index())
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.node.as_mut())
    }

    fn require(&self, id: SpaceId) -> Result<&Node, TreeError> {
        self.node(id).ok_or(TreeError::UnknownSpace(id))
    }

    pub fn contains(&self, id: SpaceId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: SpaceId) -> Option<&Space> {
        self.node(id).map(|node| &node.space)
    }

    /// Mutable access to a declaration. Rects stay stale until the next layout.
    pub fn get_mut(&mut self, id: SpaceId) -> Option<&mut Space> {
        self.node_mut(id).map(|node| &mut node.space)
    }

    /// Rect from the last layout run.
    pub fn rect(&self, id: SpaceId) -> Option<Rect> {
        self.get(id).map(Space::rect)
    }

    pub(crate) fn set_rect(&mut self, id: SpaceId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.space.rect = rect;
        }
    }

    pub fn parent(&self, id: SpaceId) -> Option<SpaceId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Ordered children. Empty for unknown ids.
    pub fn children(&self, id: SpaceId) -> &[SpaceId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Top-most ancestor (the space itself when parentless).
    pub fn root(&self, id: SpaceId) -> Option<SpaceId> {
        self.node(id).map(|node| node.root)
    }

    /// All live spaces in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SpaceId, &Space)> + '_ {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry.node.as_ref().map(|node| {
                (
                    SpaceId {
                        index: index as u32,
                        generation: entry.generation,
                    },
                    &node.space,
                )
            })
        })
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    /// Append `child` to `parent`'s children.
    pub fn attach(&mut self, parent: SpaceId, child: SpaceId) -> Result<(), TreeError> {
        let len = self.require(parent)?.children.len();
        self.attach_at(parent, len, child)
    }

    /// Insert `child` at `index` in `parent`'s children.
    ///
    /// `child` must be parentless. Attaching a tree's root under one of its
    /// own descendants is rejected as a cycle.
    pub fn attach_at(
        &mut self,
        parent: SpaceId,
        index: usize,
        child: SpaceId,
    ) -> Result<(), TreeError> {
        let parent_node = self.require(parent)?;
        let child_node = self.require(child)?;

        if child_node.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        // A parentless child is an ancestor of `parent` exactly when it is
        // `parent`'s root.
        if parent_node.root == child {
            return Err(TreeError::Cycle { parent, child });
        }
        let len = parent_node.children.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }
        let root = parent_node.root;

        if let Some(node) = self.node_mut(parent) {
            node.children.insert(index, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        self.set_subtree_root(child, root);

        tracing::trace!(parent = %parent, child = %child, index, "attached");
        Ok(())
    }

    /// Remove `child` from its parent. The subtree becomes its own tree.
    ///
    /// Detaching a parentless space is a no-op.
    pub fn detach(&mut self, child: SpaceId) -> Result<(), TreeError> {
        let Some(parent) = self.require(child)?.parent else {
            return Ok(());
        };

        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
        self.set_subtree_root(child, child);

        tracing::trace!(parent = %parent, child = %child, "detached");
        Ok(())
    }

    /// Move `child` (and its subtree) under `new_parent`, appended last.
    ///
    /// Checked before anything moves: on error the tree is unchanged.
    pub fn reparent(&mut self, child: SpaceId, new_parent: SpaceId) -> Result<(), TreeError> {
        self.require(child)?;
        self.require(new_parent)?;
        if child == new_parent || self.ancestors(new_parent).any(|a| a == child) {
            return Err(TreeError::Cycle {
                parent: new_parent,
                child,
            });
        }
        self.detach(child)?;
        self.attach(new_parent, child)
    }

    /// Reorder one child within `parent`'s children.
    pub fn move_child(&mut self, parent: SpaceId, from: usize, to: usize) -> Result<(), TreeError> {
        let node = self.node_mut(parent).ok_or(TreeError::UnknownSpace(parent))?;
        let len = node.children.len();
        if from >= len {
            return Err(TreeError::IndexOutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(TreeError::IndexOutOfBounds { index: to, len });
        }
        let child = node.children.remove(from);
        node.children.insert(to, child);
        Ok(())
    }

    /// Create `count` children of `parent`, in order, from `make(i)`.
    pub fn populate(
        &mut self,
        parent: SpaceId,
        count: usize,
        mut make: impl FnMut(usize) -> Space,
    ) -> Result<Vec<SpaceId>, TreeError> {
        self.require(parent)?;
        let mut created = Vec::with_capacity(count);
        for i in 0..count {
            let child = self.insert(make(i));
            self.attach(parent, child)?;
            created.push(child);
        }
        Ok(created)
    }

    /// Point every node of the subtree at `root`.
    fn set_subtree_root(&mut self, subtree: SpaceId, root: SpaceId) {
        let mut stack = vec![subtree];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node_mut(id) {
                node.root = root;
                stack.extend_from_slice(&node.children);
            }
        }
    }

    // =========================================================================
    // Paths and Search
    // =========================================================================

    /// Follow child indices from `from`. An empty path is `from` itself.
    pub fn at_path(&self, from: SpaceId, path: &[usize]) -> Option<SpaceId> {
        let mut current = self.node(from).map(|_| from)?;
        for &step in path {
            current = *self.children(current).get(step)?;
        }
        Some(current)
    }

    /// Child indices leading from the root to `id`.
    pub fn path_of(&self, id: SpaceId) -> Option<Vec<usize>> {
        self.node(id)?;
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let position = self.children(parent).iter().position(|&c| c == current)?;
            path.push(position);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// First space in `from`'s subtree (pre-order, `from` included) matching `predicate`.
    pub fn find(&self, from: SpaceId, mut predicate: impl FnMut(&Space) -> bool) -> Option<SpaceId> {
        self.node(from)?;
        std::iter::once(from)
            .chain(self.descendants(from))
            .find(|&id| self.get(id).is_some_and(&mut predicate))
    }

    pub fn find_by_name(&self, from: SpaceId, name: &str) -> Option<SpaceId> {
        self.find(from, |space| space.name.as_deref() == Some(name))
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Every space below `id`, pre-order, `id` excluded.
    pub fn descendants(&self, id: SpaceId) -> Descendants<'_> {
        let mut stack: Vec<SpaceId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: SpaceId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Childless spaces of the subtree, `id` included if it has no children.
    pub fn leaves(&self, id: SpaceId) -> impl Iterator<Item = SpaceId> + '_ {
        let start = self.node(id).map(|_| id);
        start
            .into_iter()
            .chain(self.descendants(id))
            .filter(move |&space| self.children(space).is_empty())
    }
}

/// Pre-order iterator over a subtree. See [`SpaceTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a SpaceTree,
    stack: Vec<SpaceId>,
}

impl Iterator for Descendants<'_> {
    type Item = SpaceId;

    fn next(&mut self) -> Option<SpaceId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

/// Nearest-first ancestor iterator. See [`SpaceTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SpaceTree,
    next: Option<SpaceId>,
}

impl Iterator for Ancestors<'_> {
    type Item = SpaceId;

    fn next(&mut self) -> Option<SpaceId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// root ─┬─ a ─┬─ a0
    ///       │     └─ a1
    ///       └─ b
    fn sample() -> (SpaceTree, [SpaceId; 5]) {
        let mut tree = SpaceTree::new();
        let root = tree.insert(Space::new().named("root"));
        let a = tree.insert(Space::new().named("a"));
        let b = tree.insert(Space::new().named("b"));
        let a0 = tree.insert(Space::new().named("a0"));
        let a1 = tree.insert(Space::new().named("a1"));
        tree.attach(root, a).unwrap();
        tree.attach(root, b).unwrap();
        tree.attach(a, a0).unwrap();
        tree.attach(a, a1).unwrap();
        (tree, [root, a, b, a0, a1])
    }

    fn assert_roots_consistent(tree: &SpaceTree) {
        for (id, _) in tree.iter() {
            let top = tree.ancestors(id).last().unwrap_or(id);
            assert_eq!(tree.root(id), Some(top), "stale root cache for {id}");
        }
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    #[test]
    fn test_insert_creates_parentless_root() {
        let mut tree = SpaceTree::new();
        let id = tree.insert(Space::new());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.parent(id), None);
        assert_eq!(tree.root(id), Some(id));
        assert!(tree.children(id).is_empty());
    }

    #[test]
    fn test_release_frees_subtree_and_reuses_slots() {
        let (mut tree, [root, a, _b, a0, a1]) = sample();
        assert_eq!(tree.release(a), Ok(3));
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(a));
        assert!(!tree.contains(a0));
        assert!(!tree.contains(a1));
        assert_eq!(tree.children(root).len(), 1);

        // Reused slot, new generation: old handle stays dead
        let fresh = tree.insert(Space::new());
        assert!(tree.contains(fresh));
        assert!(!tree.contains(a1));
        assert!([a.index(), a0.index(), a1.index()].contains(&fresh.index()));
        assert_eq!(tree.slot_count(), 5);
    }

    #[test]
    fn test_exhausted_slot_is_retired() {
        let mut tree = SpaceTree::new();
        let first = tree.insert(Space::new());
        tree.entries[first.index()].generation = u32::MAX - 1;
        let worn = SpaceId {
            index: first.index,
            generation: u32::MAX - 1,
        };
        assert!(tree.contains(worn));

        assert_eq!(tree.release(worn), Ok(1));
        assert!(tree.free.is_empty());

        let fresh = tree.insert(Space::new());
        assert_ne!(fresh.index(), worn.index());
        assert!(!tree.contains(worn));
        assert!(!tree.contains(first));
        assert_eq!(tree.slot_count(), 2);
    }

    #[test]
    fn test_stale_id_is_unknown() {
        let (mut tree, [root, a, ..]) = sample();
        tree.release(a).unwrap();
        assert_eq!(tree.attach(root, a), Err(TreeError::UnknownSpace(a)));
        assert_eq!(tree.get(a), None);
        assert_eq!(tree.release(a), Err(TreeError::UnknownSpace(a)));
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    #[test]
    fn test_attach_sets_parent_and_root() {
        let (tree, [root, a, b, a0, _]) = sample();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a0), Some(a));
        assert_eq!(tree.root(a0), Some(root));
        assert_roots_consistent(&tree);
    }

    #[test]
    fn test_attach_at_orders_children() {
        let (mut tree, [root, a, b, ..]) = sample();
        let c = tree.insert(Space::new());
        tree.attach_at(root, 1, c).unwrap();
        assert_eq!(tree.children(root), &[a, c, b]);

        let d = tree.insert(Space::new());
        assert_eq!(
            tree.attach_at(root, 9, d),
            Err(TreeError::IndexOutOfBounds { index: 9, len: 3 })
        );
    }

    #[test]
    fn test_attach_rejects_second_parent() {
        let (mut tree, [_, a, b, a0, _]) = sample();
        assert_eq!(tree.attach(b, a0), Err(TreeError::AlreadyAttached(a0)));
        assert_eq!(tree.children(a).len(), 2);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let (mut tree, [root, _, _, a0, _]) = sample();
        assert_eq!(
            tree.attach(a0, root),
            Err(TreeError::Cycle { parent: a0, child: root })
        );
        assert_eq!(
            tree.attach(root, root),
            Err(TreeError::Cycle { parent: root, child: root })
        );
    }

    #[test]
    fn test_detach_makes_new_tree() {
        let (mut tree, [root, a, b, a0, a1]) = sample();
        tree.detach(a).unwrap();
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.root(a0), Some(a));
        assert_eq!(tree.root(a1), Some(a));
        assert_roots_consistent(&tree);

        // Detaching a root is a no-op
        assert_eq!(tree.detach(a), Ok(()));
    }

    #[test]
    fn test_reparent_moves_subtree() {
        let (mut tree, [root, a, b, a0, a1]) = sample();
        tree.reparent(a, b).unwrap();
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.children(b), &[a]);
        assert_eq!(tree.path_of(a1), Some(vec![0, 0, 1]));
        assert_eq!(tree.root(a0), Some(root));
        assert_roots_consistent(&tree);
    }

    #[test]
    fn test_reparent_into_own_subtree_is_rejected_untouched() {
        let (mut tree, [root, a, _, a0, _]) = sample();
        assert_eq!(tree.reparent(a, a0), Err(TreeError::Cycle { parent: a0, child: a }));
        assert_eq!(tree.parent(a), Some(root));
        assert_roots_consistent(&tree);
    }

    #[test]
    fn test_move_child() {
        let (mut tree, [root, a, b, ..]) = sample();
        tree.move_child(root, 0, 1).unwrap();
        assert_eq!(tree.children(root), &[b, a]);
        assert_eq!(
            tree.move_child(root, 2, 0),
            Err(TreeError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_populate() {
        let mut tree = SpaceTree::new();
        let root = tree.insert(Space::new());
        let kids = tree
            .populate(root, 3, |i| Space::new().named(format!("cell{i}")))
            .unwrap();
        assert_eq!(tree.children(root), kids.as_slice());
        assert_eq!(tree.find_by_name(root, "cell2"), Some(kids[2]));
    }

    #[test]
    fn test_no_duplicate_children_after_mutations() {
        let (mut tree, [root, a, b, a0, a1]) = sample();
        tree.reparent(a0, b).unwrap();
        tree.reparent(a1, root).unwrap();
        tree.reparent(a0, a).unwrap();
        for (id, _) in tree.iter() {
            let mut kids = tree.children(id).to_vec();
            kids.sort();
            kids.dedup();
            assert_eq!(kids.len(), tree.children(id).len());
        }
        assert_roots_consistent(&tree);
    }

    // =========================================================================
    // Paths and Traversal
    // =========================================================================

    #[test]
    fn test_paths() {
        let (tree, [root, a, _, _, a1]) = sample();
        assert_eq!(tree.at_path(root, &[]), Some(root));
        assert_eq!(tree.at_path(root, &[0, 1]), Some(a1));
        assert_eq!(tree.at_path(a, &[1]), Some(a1));
        assert_eq!(tree.at_path(root, &[5]), None);
        assert_eq!(tree.path_of(a1), Some(vec![0, 1]));
        assert_eq!(tree.path_of(root), Some(vec![]));
    }

    #[test]
    fn test_descendants_pre_order() {
        let (tree, [root, a, b, a0, a1]) = sample();
        let order: Vec<_> = tree.descendants(root).collect();
        assert_eq!(order, vec![a, a0, a1, b]);

        // Restartable
        assert_eq!(tree.descendants(root).count(), 4);
        assert_eq!(tree.descendants(b).count(), 0);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (tree, [root, a, _, a0, _]) = sample();
        let up: Vec<_> = tree.ancestors(a0).collect();
        assert_eq!(up, vec![a, root]);
        assert_eq!(tree.ancestors(root).count(), 0);
    }

    #[test]
    fn test_leaves() {
        let (tree, [root, _, b, a0, a1]) = sample();
        let leaves: Vec<_> = tree.leaves(root).collect();
        assert_eq!(leaves, vec![a0, a1, b]);
        assert_eq!(tree.leaves(b).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_find() {
        let (tree, [root, a, ..]) = sample();
        assert_eq!(tree.find_by_name(root, "a"), Some(a));
        assert_eq!(tree.find_by_name(a, "b"), None);
        assert_eq!(tree.find(root, |s| s.name.is_none()), None);
    }

    #[test]
    fn test_get_mut_edits_declaration() {
        let (mut tree, [_, a, ..]) = sample();
        if let Some(space) = tree.get_mut(a) {
            space.enabled = false;
        }
        assert_eq!(tree.get(a).map(|s| s.enabled), Some(false));
    }
}
