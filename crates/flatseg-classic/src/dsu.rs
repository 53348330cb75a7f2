/// Disjoint-set union (union-find) over the elements `0..len`
///
/// `find` compresses paths so that every operation runs in amortized `O(α(n))` time.
/// Both union strategies keep the rank and size of every root up to date, so they can
/// be mixed freely on the same instance.
///
/// # Panics
///
/// Every method panics if an element is outside of `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
    size: Vec<usize>,
    sets: usize,
}

impl DisjointSet {
    /// Creates `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            size: vec![1; len],
            sets: len,
        }
    }

    /// Returns the representative of the set containing `u`
    pub fn find(&mut self, u: usize) -> usize {
        let mut root = u;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut node = u;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `u` and `v`, attaching the lower ranked root below the other.
    ///
    /// Returns `false` if both already belong to the same set.
    pub fn union_by_rank(&mut self, u: usize, v: usize) -> bool {
        let (pu, pv) = (self.find(u), self.find(v));
        if pu == pv {
            return false;
        }
        if self.rank[pu] < self.rank[pv] {
            self.attach(pu, pv);
        } else {
            self.attach(pv, pu);
        }
        true
    }

    /// Merges the sets of `u` and `v`, attaching the smaller set below the larger one.
    ///
    /// Returns `false` if both already belong to the same set.
    pub fn union_by_size(&mut self, u: usize, v: usize) -> bool {
        let (pu, pv) = (self.find(u), self.find(v));
        if pu == pv {
            return false;
        }
        if self.size[pu] < self.size[pv] {
            self.attach(pu, pv);
        } else {
            self.attach(pv, pu);
        }
        true
    }

    fn attach(&mut self, child: usize, root: usize) {
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.rank[root] = self.rank[root].max(self.rank[child] + 1);
        self.sets -= 1;
    }

    /// Returns `true` if `u` and `v` belong to the same set
    pub fn connected(&mut self, u: usize, v: usize) -> bool {
        self.find(u) == self.find(v)
    }

    /// Returns the number of elements in the set containing `u`
    pub fn size_of(&mut self, u: usize) -> usize {
        let root = self.find(u);
        self.size[root]
    }

    /// Returns the number of disjoint sets
    #[inline]
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Returns the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
