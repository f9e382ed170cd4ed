use std::{
    cmp::Ordering::*,
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem,
    ptr::NonNull,
};

use rand::{Rng, rngs::StdRng};

use crate::{
    comparator::prelude::*,
    error::{Error, Result},
    level::LevelGenerator,
    options::{DEFAULT_MAX_LEVEL, DEFAULT_PROMOTION_PROBABILITY, SkipListOptions},
};

type Link<K, V> = Option<NonNull<Node<K, V>>>;

/// One stored key-value pair.
///
/// The tower holds one forward link per level the node participates in, so a
/// node of height `h` owns `h + 1` links. The tower is sized once on creation.
pub struct Node<K, V> {
    key: K,
    value: V,
    tower: Box<[Link<K, V>]>,
}

impl<K, V> Node<K, V> {
    fn new_leaked(key: K, value: V, height: usize) -> NonNull<Self> {
        let node = Box::new(Node {
            key,
            value,
            tower: vec![None; height + 1].into_boxed_slice(),
        });
        NonNull::from(Box::leak(node))
    }

    fn get_next(&self, level: usize) -> Link<K, V> {
        self.tower[level]
    }

    fn set_next(&mut self, level: usize, node: Link<K, V>) {
        self.tower[level] = node;
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Highest level index this node is linked at.
    pub fn height(&self) -> usize {
        self.tower.len() - 1
    }
}

impl<K, V> fmt::Display for Node<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.key, self.value)
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("height", &self.height())
            .finish()
    }
}

/// Predecessor position recorded while walking down the levels.
enum Cursor<K, V> {
    Head,
    Node(NonNull<Node<K, V>>),
}

impl<K, V> Clone for Cursor<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<K, V> {}

/// Ordered map backed by a probabilistic multi-level linked list.
///
/// Level 0 links every node in key order and is the owning chain: a node is
/// freed only after it has been unlinked from level 0. Links at higher levels
/// point into the same set of nodes.
///
/// The head tower always spans `max_level + 1` levels, but only levels
/// `0..=current_level` are walked.
pub struct SkipList<K, V, C = DefaultComparator<K>, R = StdRng> {
    head: Box<[Link<K, V>]>,
    level: usize,
    len: usize,
    c: C,
    levels: LevelGenerator<R>,
    _marker: PhantomData<Box<Node<K, V>>>,
}

unsafe impl<K, V, C, R> Send for SkipList<K, V, C, R>
where
    K: Send,
    V: Send,
    C: Send,
    R: Send,
{
}

unsafe impl<K, V, C, R> Sync for SkipList<K, V, C, R>
where
    K: Sync,
    V: Sync,
    C: Sync,
    R: Sync,
{
}

impl<K, V> SkipList<K, V>
where
    K: Ord,
{
    /// Creates an empty list.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero or `p` is not inside `(0, 1)`.
    pub fn new(max_level: usize, p: f64) -> Self {
        Self::try_new(max_level, p).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(max_level: usize, p: f64) -> Result<Self> {
        SkipListOptions::new()
            .max_level(max_level)
            .promotion_probability(p)
            .build()
    }

    /// Same as [`SkipList::try_new`], with reproducible node heights.
    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Result<Self> {
        SkipListOptions::new()
            .max_level(max_level)
            .promotion_probability(p)
            .seed(seed)
            .build()
    }
}

impl<K, V> Default for SkipList<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL, DEFAULT_PROMOTION_PROBABILITY)
    }
}

impl<K, V, C, R> SkipList<K, V, C, R> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level that holds at least one node, `0` when empty.
    pub fn current_level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.head.len() - 1
    }

    pub fn promotion_probability(&self) -> f64 {
        self.levels.probability()
    }

    fn next_of(&self, cur: Cursor<K, V>, level: usize) -> Link<K, V> {
        match cur {
            Cursor::Head => self.head[level],
            Cursor::Node(node) => unsafe { node.as_ref().get_next(level) },
        }
    }

    fn set_next_of(&mut self, cur: Cursor<K, V>, level: usize, next: Link<K, V>) {
        match cur {
            Cursor::Head => self.head[level] = next,
            Cursor::Node(mut node) => unsafe { node.as_mut().set_next(level, next) },
        }
    }

    /// Walks the nodes linked at `level`, in key order.
    ///
    /// # Panics
    ///
    /// Panics if `level` is above [`SkipList::current_level`].
    pub fn level_nodes(&self, level: usize) -> Level<'_, K, V> {
        self.try_level_nodes(level).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_level_nodes(&self, level: usize) -> Result<Level<'_, K, V>> {
        if level > self.level {
            return Err(Error::LevelOutOfRange {
                level,
                current: self.level,
            });
        }
        Ok(Level {
            next: self.head[level],
            level,
            _marker: PhantomData,
        })
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: self.level_nodes(0),
            remaining: self.len,
        }
    }

    pub fn first(&self) -> Option<&Node<K, V>> {
        self.head[0].map(|node| unsafe { node.as_ref() })
    }

    pub fn last(&self) -> Option<&Node<K, V>> {
        let mut cur = Cursor::Head;
        for level in (0..=self.level).rev() {
            while let Some(next) = self.next_of(cur, level) {
                cur = Cursor::Node(next);
            }
        }
        match cur {
            Cursor::Head => None,
            Cursor::Node(node) => Some(unsafe { node.as_ref() }),
        }
    }

    pub fn clear(&mut self) {
        self.free_nodes();
        self.head.fill(None);
        if self.level != 0 {
            tracing::debug!(from = self.level, to = 0, "shrink skip list level");
        }
        self.level = 0;
        self.len = 0;
    }

    fn free_nodes(&mut self) {
        let mut cur = self.head[0];
        while let Some(node) = cur {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            cur = node.get_next(0);
        }
    }
}

impl<K, V, C, R> SkipList<K, V, C, R>
where
    C: Comparator<Item = K>,
    R: Rng,
{
    pub fn with_parts(c: C, levels: LevelGenerator<R>) -> Self {
        SkipList {
            head: vec![None; levels.max_level() + 1].into_boxed_slice(),
            level: 0,
            len: 0,
            c,
            levels,
            _marker: PhantomData,
        }
    }

    /// Advances from `start` along `level` while the next key is below `key`.
    fn find_prev_at(&self, key: &K, start: Cursor<K, V>, level: usize) -> Cursor<K, V> {
        let mut cur = start;
        while let Some(next) = self.next_of(cur, level) {
            let next_key = unsafe { &next.as_ref().key };
            match self.c.compare(next_key, key) {
                Less => cur = Cursor::Node(next),
                Equal | Greater => break,
            }
        }
        cur
    }

    /// Records the last node below `key` on every live level into `path` and
    /// returns the level-0 successor of that node.
    fn find_prev_path(&self, key: &K, path: &mut [Cursor<K, V>]) -> Link<K, V> {
        let mut cur = Cursor::Head;
        for level in (0..=self.level).rev() {
            cur = self.find_prev_at(key, cur, level);
            path[level] = cur;
        }
        self.next_of(cur, 0)
    }

    fn find_node(&self, key: &K) -> Link<K, V> {
        let mut cur = Cursor::Head;
        for level in (0..=self.level).rev() {
            cur = self.find_prev_at(key, cur, level);
        }
        self.next_of(cur, 0)
            .filter(|node| self.c.compare(unsafe { &node.as_ref().key }, key).is_eq())
    }

    fn new_path(&self) -> Vec<Cursor<K, V>> {
        vec![Cursor::Head; self.head.len()]
    }

    /// Returns the node stored under `key`.
    pub fn search(&self, key: &K) -> Option<&Node<K, V>> {
        self.find_node(key).map(|node| unsafe { node.as_ref() })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(Node::value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_node(key).map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Inserts `key` with `value`.
    ///
    /// An existing key keeps its node and has its value replaced, the old value
    /// is returned. Otherwise a node of random height is spliced in after the
    /// recorded predecessors on each of its levels.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut path = self.new_path();
        if let Some(mut next) = self.find_prev_path(&key, &mut path) {
            let next = unsafe { next.as_mut() };
            if self.c.compare(&next.key, &key).is_eq() {
                return Some(mem::replace(&mut next.value, value));
            }
        }

        let height = self.levels.random_level();
        tracing::trace!(height, "sampled node height");
        if height > self.level {
            // path above the old level still points at the head
            tracing::debug!(from = self.level, to = height, "raise skip list level");
            self.level = height;
        }

        let new_node = Node::new_leaked(key, value, height);
        for (level, prev) in path.iter().copied().enumerate().take(height + 1) {
            let next = self.next_of(prev, level);
            unsafe { (*new_node.as_ptr()).set_next(level, next) };
            self.set_next_of(prev, level, Some(new_node));
        }
        self.len += 1;
        None
    }

    /// Unlinks the node stored under `key` from every level and hands back
    /// its key and value.
    pub fn delete(&mut self, key: &K) -> Option<(K, V)> {
        let mut path = self.new_path();
        let target = self.find_prev_path(key, &mut path)?;
        if !self.c.compare(unsafe { &target.as_ref().key }, key).is_eq() {
            return None;
        }

        for (level, prev) in path.iter().copied().enumerate().take(self.level + 1) {
            // nested levels: once a predecessor skips the target, all higher ones do
            if self.next_of(prev, level) != Some(target) {
                break;
            }
            let next = unsafe { target.as_ref().get_next(level) };
            self.set_next_of(prev, level, next);
        }
        self.shrink_level();
        self.len -= 1;

        let node = unsafe { Box::from_raw(target.as_ptr()) };
        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        self.delete(key)
    }

    fn shrink_level(&mut self) {
        let before = self.level;
        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }
        if self.level != before {
            tracing::debug!(from = before, to = self.level, "shrink skip list level");
        }
    }
}

impl<K, V, C, R> Drop for SkipList<K, V, C, R> {
    fn drop(&mut self) {
        self.free_nodes();
    }
}

impl<K, V, C, R> Extend<(K, V)> for SkipList<K, V, C, R>
where
    C: Comparator<Item = K>,
    R: Rng,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, C, R> IntoIterator for &'a SkipList<K, V, C, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, R> fmt::Display for SkipList<K, V, C, R>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in 0..=self.level {
            write!(f, "Level {level}:")?;
            for node in self.level_nodes(level) {
                write!(f, " {}", node.key)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<K, V, C, R> fmt::Debug for SkipList<K, V, C, R>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Nodes of one level, see [`SkipList::level_nodes`].
pub struct Level<'a, K, V> {
    next: Link<K, V>,
    level: usize,
    _marker: PhantomData<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Level<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = unsafe { self.next?.as_ref() };
        self.next = node.get_next(self.level);
        Some(node)
    }
}

impl<K, V> FusedIterator for Level<'_, K, V> {}

/// Key-value pairs in ascending key order.
pub struct Iter<'a, K, V> {
    nodes: Level<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
