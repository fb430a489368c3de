use super::{Location, SelectError};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Number of level offsets stored inline; covers up to `2^30` leaves without a heap allocation.
const INLINE_LEVELS: usize = 32;

/// Aggregation hierarchy over a fixed number of leaf weights.
///
/// Level 0 holds the leaf weights, level `k + 1` holds the pairwise sums of level `k`, and the
/// last level is a single root holding the total weight. If a level has odd length, its last
/// node is carried to the next level unchanged, i.e. the tree is never padded with phantom
/// zero-weight siblings.
///
/// All levels are stored back to back in a single buffer (finest level first) that is allocated
/// once at construction; neither [`WeightTree::add_weight_at`] nor [`WeightTree::select`]
/// allocate.
///
/// # Example
/// ```
/// use weight_tree::WeightTree;
///
/// let tree = WeightTree::from_weights([1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(tree.level(1), Some(&[3.0, 3.0][..]));
/// assert_eq!(tree.total_weight(), 6.0);
/// ```
#[derive(Clone, Debug)]
pub struct WeightTree {
    nodes: Vec<f64>,
    level_offsets: SmallVec<[usize; INLINE_LEVELS]>,
}

impl WeightTree {
    /// Creates a tree with `num_leaves` leaves, each carrying `default_weight`.
    ///
    /// An invalid `default_weight` is reported as [`SelectError::InvalidWeight`] for location 0.
    pub fn with_default_weight(num_leaves: usize, default_weight: f64) -> Result<Self, SelectError> {
        if num_leaves == 0 {
            return Err(SelectError::Empty);
        }

        let default_weight = check_weight(0, default_weight)?;
        Ok(Self::from_leaves(vec![default_weight; num_leaves]))
    }

    /// Creates a tree whose leaves are the given weights, in order.
    pub fn from_weights(weights: impl IntoIterator<Item = f64>) -> Result<Self, SelectError> {
        let leaves = weights
            .into_iter()
            .enumerate()
            .map(|(index, weight)| check_weight(index, weight))
            .collect::<Result<Vec<_>, _>>()?;

        if leaves.is_empty() {
            return Err(SelectError::Empty);
        }

        Ok(Self::from_leaves(leaves))
    }

    fn from_leaves(mut nodes: Vec<f64>) -> Self {
        let num_leaves = nodes.len();
        let num_nodes: usize = level_lengths(num_leaves).sum();
        nodes.reserve_exact(num_nodes - num_leaves);

        let mut level_offsets = SmallVec::new();
        let mut begin = 0;

        for len in level_lengths(num_leaves) {
            level_offsets.push(begin);
            let end = begin + len;

            if len > 1 {
                for left in (begin..end - 1).step_by(2) {
                    let sum = nodes[left] + nodes[left + 1];
                    nodes.push(sum);
                }

                if len % 2 == 1 {
                    let unpaired = nodes[end - 1];
                    nodes.push(unpaired);
                }
            }

            begin = end;
        }
        level_offsets.push(begin);

        debug_assert_eq!(nodes.len(), num_nodes);
        debug!(
            num_leaves,
            num_levels = level_offsets.len() - 1,
            num_nodes,
            "built weight tree"
        );

        Self {
            nodes,
            level_offsets,
        }
    }

    /// Number of leaves.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.level_offsets[1]
    }

    /// Sum of all leaf weights, as stored in the root.
    pub fn total_weight(&self) -> f64 {
        self.nodes[self.nodes.len() - 1]
    }

    /// Current weights of all leaves.
    pub fn leaves(&self) -> &[f64] {
        &self.nodes[..self.len()]
    }

    pub fn weight(&self, index: Location) -> Option<f64> {
        self.leaves().get(index).copied()
    }

    /// Number of levels including the leaf level and the root.
    pub fn num_levels(&self) -> usize {
        self.level_offsets.len() - 1
    }

    /// Returns level `k`, where level 0 are the leaves and the last level is the root.
    pub fn level(&self, k: usize) -> Option<&[f64]> {
        let end = *self.level_offsets.get(k + 1)?;
        Some(&self.nodes[self.level_offsets[k]..end])
    }

    /// Iterates over all levels, finest first.
    pub fn levels(&self) -> impl DoubleEndedIterator<Item = &[f64]> + '_ {
        self.level_offsets
            .windows(2)
            .map(move |bounds| &self.nodes[bounds[0]..bounds[1]])
    }

    /// Adds `delta` to the weight of leaf `index` and refreshes every ancestor up to the root.
    ///
    /// Each ancestor is recomputed as the sum of its (at most two) children instead of receiving
    /// `delta` itself, so inner nodes carry no accumulated rounding error: a subtree whose leaves
    /// are all zero stores exactly zero.
    ///
    /// The resulting weight is not checked for sign; driving a leaf below zero is a caller
    /// error that is only reported as a warning.
    pub fn add_weight_at(&mut self, index: Location, delta: f64) -> Result<(), SelectError> {
        let len = self.len();
        if index >= len {
            return Err(SelectError::OutOfRange { index, len });
        }
        if !delta.is_finite() {
            return Err(SelectError::NonFiniteDelta { index, delta });
        }

        self.nodes[index] += delta;

        let mut position = index;
        for bounds in self.level_offsets.windows(3) {
            // bounds[0]..bounds[1] is the child level; the parent level starts at bounds[1]
            let left = bounds[0] + (position & !1);
            let sum = if left + 1 < bounds[1] {
                self.nodes[left] + self.nodes[left + 1]
            } else {
                self.nodes[left]
            };

            position /= 2;
            self.nodes[bounds[1] + position] = sum;
        }

        if self.nodes[index] < 0.0 {
            warn!(index, weight = self.nodes[index], "weight dropped below zero");
        }

        Ok(())
    }

    /// Maps `value` from `[0, total_weight)` to the leaf whose prefix-sum interval contains it.
    ///
    /// At each level the residual is compared against the left child: strictly smaller values
    /// go left, all others go right with the left weight subtracted. A right child without
    /// positive mass is never entered. Together with the exact zero sums kept by
    /// [`WeightTree::add_weight_at`], every node on the path has positive mass as long as all
    /// weights are non-negative, so a zero-weight leaf is never returned. The result is always in
    /// `0..len()`, even for values outside the documented range.
    pub fn locate(&self, value: f64) -> Location {
        let mut residual = value;
        let mut position = 0;

        for level in self.levels().rev().skip(1) {
            let left = 2 * position;
            let right = left + 1;

            position = match level.get(right) {
                Some(&right_weight) if residual >= level[left] && right_weight > 0.0 => {
                    residual -= level[left];
                    right
                }
                _ => left,
            };
        }

        position
    }

    /// Draws a leaf with probability proportional to its weight.
    ///
    /// Consumes exactly one uniform draw from `rng` in `[0, total_weight)`. Fails without
    /// touching `rng` if the total weight is not positive and finite.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Location, SelectError> {
        let total = self.total_weight();
        if total > 0.0 && total.is_finite() {
            Ok(self.locate(rng.gen_range(0.0..total)))
        } else {
            Err(SelectError::NonPositiveTotal(total))
        }
    }
}

/// Lengths of all levels for `num_leaves` leaves, finest first, ending with the root.
fn level_lengths(num_leaves: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(num_leaves), |&len| (len > 1).then(|| (len + 1) / 2))
}

pub(crate) fn check_weight(index: Location, weight: f64) -> Result<f64, SelectError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(SelectError::InvalidWeight { index, weight })
    }
}
