use crate::Error;

/// Binary lifting table for k-th ancestor queries on a rooted tree
///
/// `up[j][u]` holds the `2^j`-th ancestor of `u`. The root is its own parent, so jumps
/// past the root saturate at the root.
///
/// Preprocessing takes `O(n log n)` time and every ancestor query `O(log n)`.
///
/// ```
/// use flatseg_classic::BinaryLifting;
///
/// //      0
/// //     / \
/// //    1   2
/// //   /
/// //  3
/// let lifting = BinaryLifting::new(&[0, 0, 0, 1], 0).unwrap();
/// assert_eq!(lifting.lift(3, 1), Some(1));
/// assert_eq!(lifting.lift(3, 2), Some(0));
/// assert_eq!(lifting.lca(3, 2), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct BinaryLifting {
    up: Vec<Vec<usize>>,
    depth: Vec<usize>,
    root: usize,
}

impl BinaryLifting {
    /// Builds the lifting table from a parent array and the root
    ///
    /// The parent entry of the root is ignored.
    pub fn new(parents: &[usize], root: usize) -> Result<Self, Error> {
        let n = parents.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        Error::check_node(root, n)?;
        for &p in parents {
            Error::check_node(p, n)?;
        }

        let mut direct = parents.to_vec();
        direct[root] = root;
        let depth = depths(&direct, root)?;

        let levels = (usize::BITS - n.leading_zeros()) as usize;
        let mut up = Vec::with_capacity(levels);
        up.push(direct);
        for j in 1..levels {
            let prev = &up[j - 1];
            let next = (0..n).map(|u| prev[prev[u]]).collect();
            up.push(next);
        }
        log::debug!("built binary lifting table with {levels} levels over {n} nodes");

        Ok(Self { up, depth, root })
    }

    /// Returns the `k`-th ancestor of `u`, or `None` if `u` is not a node of the tree
    ///
    /// Lifting beyond the root returns the root.
    pub fn lift(&self, u: usize, k: usize) -> Option<usize> {
        let depth = *self.depth.get(u)?;
        if k >= depth {
            return Some(self.root);
        }
        let mut node = u;
        for (j, level) in self.up.iter().enumerate() {
            if k >> j & 1 == 1 {
                node = level[node];
            }
        }
        Some(node)
    }

    /// Returns the lowest common ancestor of `u` and `v`
    pub fn lca(&self, u: usize, v: usize) -> Option<usize> {
        let (du, dv) = (*self.depth.get(u)?, *self.depth.get(v)?);
        let (mut u, mut v) = if du >= dv {
            (self.lift(u, du - dv)?, v)
        } else {
            (u, self.lift(v, dv - du)?)
        };
        if u == v {
            return Some(u);
        }
        for level in self.up.iter().rev() {
            if level[u] != level[v] {
                u = level[u];
                v = level[v];
            }
        }
        Some(self.up[0][u])
    }

    /// Returns the number of edges between `u` and the root
    pub fn depth(&self, u: usize) -> Option<usize> {
        self.depth.get(u).copied()
    }

    /// Returns the root of the tree
    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }
}

fn depths(parents: &[usize], root: usize) -> Result<Vec<usize>, Error> {
    let n = parents.len();
    let mut depth: Vec<Option<usize>> = vec![None; n];
    depth[root] = Some(0);
    let mut stack = Vec::new();

    for start in 0..n {
        let mut node = start;
        while depth[node].is_none() {
            stack.push(node);
            // a walk longer than n nodes can only happen on a cycle
            if stack.len() > n {
                return Err(Error::NotATree { node });
            }
            node = parents[node];
        }
        let mut d = depth[node].unwrap_or_default();
        while let Some(u) = stack.pop() {
            d += 1;
            depth[u] = Some(d);
        }
    }
    Ok(depth.into_iter().map(Option::unwrap_or_default).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_lift(parents: &[usize], root: usize, mut u: usize, k: usize) -> usize {
        for _ in 0..k {
            if u == root {
                break;
            }
            u = parents[u];
        }
        u
    }

    #[test]
    fn chain() {
        let parents: Vec<usize> = (0..10).map(|i: usize| i.saturating_sub(1)).collect();
        let lifting = BinaryLifting::new(&parents, 0).unwrap();
        assert_eq!(lifting.depth(9), Some(9));
        assert_eq!(lifting.lift(9, 4), Some(5));
        assert_eq!(lifting.lift(9, 9), Some(0));
        assert_eq!(lifting.lift(9, 1000), Some(0));
        assert_eq!(lifting.lift(10, 1), None);
        assert_eq!(lifting.lca(4, 7), Some(4));
    }

    #[test]
    fn random_trees_match_naive_walk() {
        for n in 1..60 {
            // parents always precede children, any node may be the root
            let root = fastrand::usize(0..n);
            let order: Vec<usize> = {
                let mut order: Vec<usize> = (0..n).filter(|&u| u != root).collect();
                fastrand::shuffle(&mut order);
                order.insert(0, root);
                order
            };
            let mut parents = vec![root; n];
            for i in 1..n {
                parents[order[i]] = order[fastrand::usize(0..i)];
            }
            let lifting = BinaryLifting::new(&parents, root).unwrap();
            for u in 0..n {
                for k in 0..n + 2 {
                    assert_eq!(lifting.lift(u, k), Some(naive_lift(&parents, root, u, k)));
                }
            }
        }
    }

    #[test]
    fn invalid_input() {
        assert!(BinaryLifting::new(&[], 0).unwrap_err().is_empty_input());
        assert_eq!(
            BinaryLifting::new(&[0, 5], 0).unwrap_err(),
            Error::NodeOutOfRange { node: 5, len: 2 }
        );
        let err = BinaryLifting::new(&[0, 2, 1], 0).unwrap_err();
        assert!(err.is_not_a_tree());
    }

    #[test]
    fn lca_in_branching_tree() {
        //        0
        //      /   \
        //     1     2
        //    / \     \
        //   3   4     5
        //       |
        //       6
        let lifting = BinaryLifting::new(&[0, 0, 0, 1, 1, 2, 4], 0).unwrap();
        assert_eq!(lifting.lca(3, 6), Some(1));
        assert_eq!(lifting.lca(6, 5), Some(0));
        assert_eq!(lifting.lca(4, 6), Some(4));
        assert_eq!(lifting.lca(2, 2), Some(2));
        assert_eq!(lifting.lca(2, 9), None);
    }
}
