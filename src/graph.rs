use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GraphError;
use crate::hops_cache::HopsCache;
use crate::lower_bound;

/// A single vertex, identified by its position in [`Graph::vertices`].
///
/// `breadcrumb` is BFS scratch space: `None` means unvisited, `Some(self)`
/// marks the search origin, and any other `Some(parent)` is the predecessor
/// on the current search tree. It is always cleared back to `None` before
/// and after a [`Graph::hops`] call.
#[derive(Debug, Clone)]
struct Vertex {
    edges_to: Vec<usize>,
    breadcrumb: Option<usize>,
}

impl Vertex {
    fn new() -> Self {
        Self {
            edges_to: Vec::new(),
            breadcrumb: None,
        }
    }
}

/// A k-regular (at most) undirected graph on a fixed vertex set, with
/// memoized shortest-path analysis.
///
/// Vertices are addressed by index into an internal arena rather than by
/// reference, so graphs can be freely duplicated and edges freely rewired
/// without fighting the borrow checker over cyclic neighbour pointers.
#[derive(Clone)]
pub struct Graph {
    order: usize,
    degree: usize,
    vertices: Vec<Vertex>,
    diameter_lower_bound: usize,
    aspl_lower_bound: f64,
    diameter: Option<usize>,
    aspl: Option<f64>,
    mspl: Option<f64>,
    dirty: bool,
    hops_cache: HopsCache,
}

impl Graph {
    /// Builds an empty graph (no edges) of the given order and degree.
    pub fn new(order: usize, degree: usize) -> Self {
        debug_assert!(order >= 2, "order must be at least 2");
        debug_assert!(degree >= 2, "degree must be at least 2");
        let (diameter_lower_bound, aspl_lower_bound) = lower_bound::lower_bounds(order, degree)
            .expect("order and degree already validated by caller");
        Self {
            order,
            degree,
            vertices: (0..order).map(|_| Vertex::new()).collect(),
            diameter_lower_bound,
            aspl_lower_bound,
            diameter: None,
            aspl: None,
            mspl: None,
            dirty: true,
            hops_cache: HopsCache::new(order),
        }
    }

    /// Builds a graph from an explicit edge list. Does not validate that the
    /// resulting graph is k-regular; callers loading untrusted input should
    /// validate with [`crate::edge_list::read_edge_list`] first.
    pub fn from_edges(order: usize, degree: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(order, degree);
        for &(u, v) in edges {
            graph.add_edge_unsafe(u, v);
        }
        graph
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn degree_of(&self, v: usize) -> usize {
        self.vertices[v].edges_to.len()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.vertices[v].edges_to
    }

    pub fn diameter_lower_bound(&self) -> usize {
        self.diameter_lower_bound
    }

    pub fn aspl_lower_bound(&self) -> f64 {
        self.aspl_lower_bound
    }

    pub fn diameter(&self) -> Option<usize> {
        self.diameter
    }

    pub fn aspl(&self) -> Option<f64> {
        self.aspl
    }

    pub fn mspl(&self) -> Option<f64> {
        self.mspl
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// A graph only participates in quality comparisons once it has been
    /// analyzed to completion without being abandoned early.
    pub fn is_analyzed(&self) -> bool {
        !self.dirty && self.diameter.is_some() && self.aspl.is_some()
    }

    /// The graph meets the theoretical Moore-bound lower bounds exactly.
    pub fn is_ideal(&self) -> bool {
        self.is_analyzed()
            && self.diameter == Some(self.diameter_lower_bound)
            && self.aspl == Some(self.aspl_lower_bound)
    }

    /// All edges as `(u, v)` pairs with `u < v`, each listed once.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for (u, vertex) in self.vertices.iter().enumerate() {
            for &v in &vertex.edges_to {
                if u < v {
                    edges.push((u, v));
                }
            }
        }
        edges
    }

    pub fn add_edge_unsafe(&mut self, u: usize, v: usize) {
        debug_assert_ne!(u, v, "cannot add a self-loop");
        debug_assert!(
            !self.vertices[u].edges_to.contains(&v),
            "edge ({u}, {v}) already exists"
        );
        debug_assert!(
            self.vertices[u].edges_to.len() < self.degree,
            "vertex {u} is already at degree {}",
            self.degree
        );
        debug_assert!(
            self.vertices[v].edges_to.len() < self.degree,
            "vertex {v} is already at degree {}",
            self.degree
        );
        self.vertices[u].edges_to.push(v);
        self.vertices[v].edges_to.push(u);
        self.dirty = true;
    }

    pub fn remove_edge_unsafe(&mut self, u: usize, v: usize) {
        debug_assert_ne!(u, v, "no self-loop to remove");
        let pos_u = self.vertices[u]
            .edges_to
            .iter()
            .position(|&x| x == v)
            .expect("edge must exist to be removed");
        self.vertices[u].edges_to.swap_remove(pos_u);
        let pos_v = self.vertices[v]
            .edges_to
            .iter()
            .position(|&x| x == u)
            .expect("edge must exist in both directions");
        self.vertices[v].edges_to.swap_remove(pos_v);
        self.dirty = true;
    }

    /// Greedily pairs up vertices with free ports, shuffling between rounds,
    /// until no two remaining candidates can be connected. Restricting to
    /// `limit_to` only considers (and only completes) that subset of
    /// vertices; `None` considers the whole graph.
    pub fn add_as_many_random_edges_as_possible(
        &mut self,
        limit_to: Option<Vec<usize>>,
        rng: &mut impl Rng,
    ) {
        let mut overall: Vec<usize> = limit_to.unwrap_or_else(|| (0..self.order).collect());

        for _ in 0..self.degree {
            if overall.len() < 2 {
                break;
            }
            let mut shuffled = overall.clone();
            shuffled.shuffle(rng);
            let mut current: VecDeque<usize> = shuffled.into();

            while current.len() > 1 {
                let u = current.pop_front().unwrap();
                if self.degree_of(u) == self.degree {
                    overall.retain(|&x| x != u);
                    continue;
                }

                let mut i = 0;
                while i < current.len() {
                    let v = current[i];
                    if self.degree_of(v) == self.degree {
                        current.remove(i);
                        overall.retain(|&x| x != v);
                        continue;
                    }
                    if self.vertices[u].edges_to.contains(&v) {
                        i += 1;
                        continue;
                    }
                    self.add_edge_unsafe(u, v);
                    break;
                }
            }
        }
    }

    /// Returns the interior vertices on a shortest path from `a` to `b`
    /// (excluding both endpoints), populating the hops cache along the way.
    ///
    /// Requires the graph not be dirty; an analyzed graph's cache is
    /// consistent with its current edges.
    pub fn hops(&mut self, a: usize, b: usize) -> Result<Vec<usize>, GraphError> {
        debug_assert_ne!(a, b);
        let (lo, hi, reversed) = if a < b { (a, b, false) } else { (b, a, true) };

        if let Some(hops) = self.hops_cache.get(lo, hi) {
            return Ok(if reversed {
                hops.into_iter().rev().collect()
            } else {
                hops
            });
        }

        let hops = self.bfs_hops(lo, hi)?;
        Ok(if reversed {
            hops.into_iter().rev().collect()
        } else {
            hops
        })
    }

    fn bfs_hops(&mut self, lo: usize, hi: usize) -> Result<Vec<usize>, GraphError> {
        self.vertices[lo].breadcrumb = Some(lo);
        let mut queue = VecDeque::new();
        queue.push_back(lo);
        let mut found = false;

        while let Some(cur) = queue.pop_front() {
            if cur == hi {
                found = true;
                break;
            }
            for i in 0..self.vertices[cur].edges_to.len() {
                let nb = self.vertices[cur].edges_to[i];
                if self.vertices[nb].breadcrumb.is_none() {
                    self.vertices[nb].breadcrumb = Some(cur);
                    queue.push_back(nb);
                }
            }
        }

        if !found {
            self.clear_breadcrumbs();
            return Err(GraphError::Partitioned { from: lo, to: hi });
        }

        let mut full_path = Vec::new();
        let mut cur = hi;
        loop {
            full_path.push(cur);
            let parent = self.vertices[cur].breadcrumb.unwrap();
            if parent == cur {
                break;
            }
            cur = parent;
        }
        full_path.reverse();

        let mut result = Vec::new();
        for i in 0..full_path.len() - 1 {
            let w = full_path[i];
            let sub_hops = full_path[i + 1..full_path.len() - 1].to_vec();
            if i == 0 {
                result = sub_hops.clone();
            }
            if self.hops_cache.get(w, hi).is_none() {
                self.hops_cache.set(w, hi, sub_hops);
            }
        }

        self.clear_breadcrumbs();
        Ok(result)
    }

    fn clear_breadcrumbs(&mut self) {
        for vertex in &mut self.vertices {
            vertex.breadcrumb = None;
        }
    }

    /// Recomputes diameter, ASPL and MSPL from scratch. A no-op if the graph
    /// is not dirty. Abandons early (diameter set, ASPL/MSPL left unset,
    /// graph left dirty) once the running diameter exceeds the previous
    /// analysis's diameter, since such a candidate cannot win a comparison
    /// anyway.
    pub fn analyze(&mut self) -> Result<(), GraphError> {
        if !self.dirty {
            return Ok(());
        }

        self.hops_cache.clear();
        let previous_diameter = self.diameter.unwrap_or(self.order.saturating_sub(1));
        let previous_aspl = self.aspl;

        let mut diameter = 0usize;
        let mut sum = 0u64;
        let mut count = 0u64;
        let mut lengths = Vec::with_capacity(self.order * (self.order.saturating_sub(1)) / 2);

        for a in 0..self.order {
            for b in (a + 1)..self.order {
                let hops = self.hops(a, b)?;
                let length = hops.len() + 1;
                diameter = diameter.max(length);
                sum += length as u64;
                count += 1;
                lengths.push(length);

                if diameter > previous_diameter {
                    self.diameter = Some(diameter);
                    self.aspl = None;
                    self.mspl = None;
                    return Ok(());
                }
            }
        }

        let aspl = sum as f64 / count as f64;
        self.diameter = Some(diameter);
        self.aspl = Some(aspl);

        if previous_aspl.is_some_and(|previous| aspl > previous) {
            self.mspl = None;
        } else {
            lengths.sort_unstable();
            self.mspl = Some(median(&lengths));
        }

        self.dirty = false;
        Ok(())
    }

    /// Orders two fully analyzed graphs by `(diameter, aspl, mspl)`, smaller
    /// is better. Both operands must be clean and analyzed.
    pub fn compare_quality(&self, other: &Graph) -> Ordering {
        debug_assert!(self.is_analyzed() && other.is_analyzed());
        let mine = (
            self.diameter.unwrap(),
            self.aspl.unwrap(),
            self.mspl.unwrap_or(f64::INFINITY),
        );
        let theirs = (
            other.diameter.unwrap(),
            other.aspl.unwrap(),
            other.mspl.unwrap_or(f64::INFINITY),
        );
        mine.0
            .cmp(&theirs.0)
            .then_with(|| mine.1.partial_cmp(&theirs.1).unwrap_or(Ordering::Equal))
            .then_with(|| mine.2.partial_cmp(&theirs.2).unwrap_or(Ordering::Equal))
    }

    /// A full copy, including cached analysis, suitable as a mutation
    /// starting point that does not disturb `self`.
    pub fn duplicate(&self) -> Graph {
        Graph {
            order: self.order,
            degree: self.degree,
            vertices: self.vertices.clone(),
            diameter_lower_bound: self.diameter_lower_bound,
            aspl_lower_bound: self.aspl_lower_bound,
            diameter: self.diameter,
            aspl: self.aspl,
            mspl: self.mspl,
            dirty: self.dirty,
            hops_cache: HopsCache::import_ids(self.order, self.hops_cache.export_ids()),
        }
    }
}

fn median(sorted_lengths: &[usize]) -> f64 {
    let n = sorted_lengths.len();
    if n % 2 == 1 {
        sorted_lengths[n / 2] as f64
    } else {
        (sorted_lengths[n / 2 - 1] + sorted_lengths[n / 2]) as f64 / 2.0
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph(order={}, degree={}, diameter={}, aspl={}, mspl={})",
            self.order,
            self.degree,
            self.diameter
                .map(|d| d.to_string())
                .unwrap_or_else(|| "n/a".into()),
            self.aspl
                .map(|a| format!("{a:.6}"))
                .unwrap_or_else(|| "n/a".into()),
            self.mspl
                .map(|m| format!("{m:.6}"))
                .unwrap_or_else(|| "n/a".into()),
        )
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("order", &self.order)
            .field("degree", &self.degree)
            .field("diameter", &self.diameter)
            .field("aspl", &self.aspl)
            .field("mspl", &self.mspl)
            .field("dirty", &self.dirty)
            .field("edges", &self.edges())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn line_3_2() -> Graph {
        // 0 - 1 - 2, each vertex capped at degree 2
        Graph::from_edges(3, 2, &[(0, 1), (1, 2)])
    }

    fn triangle_3_2() -> Graph {
        Graph::from_edges(3, 2, &[(0, 1), (1, 2), (0, 2)])
    }

    fn rectangle_4_2() -> Graph {
        Graph::from_edges(4, 2, &[(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    fn full_5_4() -> Graph {
        Graph::from_edges(
            5,
            4,
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 2),
                (1, 3),
                (1, 4),
                (2, 3),
                (2, 4),
                (3, 4),
            ],
        )
    }

    #[test]
    fn line_has_diameter_two_and_expected_aspl() {
        let mut g = line_3_2();
        g.analyze().unwrap();
        assert_eq!(g.diameter(), Some(2));
        // distances: (0,1)=1 (1,2)=1 (0,2)=2 -> average = 4/3
        assert!((g.aspl().unwrap() - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn triangle_is_ideal() {
        let mut g = triangle_3_2();
        g.analyze().unwrap();
        assert_eq!(g.diameter(), Some(1));
        assert!((g.aspl().unwrap() - 1.0).abs() < 1e-9);
        assert!(g.is_ideal());
    }

    #[test]
    fn rectangle_has_diameter_two() {
        let mut g = rectangle_4_2();
        g.analyze().unwrap();
        assert_eq!(g.diameter(), Some(2));
    }

    #[test]
    fn full_graph_has_diameter_one() {
        let mut g = full_5_4();
        g.analyze().unwrap();
        assert_eq!(g.diameter(), Some(1));
        assert!((g.aspl().unwrap() - 1.0).abs() < 1e-9);
        assert!(g.is_ideal());
    }

    #[test]
    fn hops_reports_interior_vertices_in_path_order() {
        let mut g = line_3_2();
        g.analyze().unwrap();
        assert_eq!(g.hops(0, 2).unwrap(), vec![1]);
        assert_eq!(g.hops(2, 0).unwrap(), vec![1]);
        assert_eq!(g.hops(0, 1).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn analyze_is_idempotent_once_clean() {
        let mut g = triangle_3_2();
        g.analyze().unwrap();
        let (d1, a1) = (g.diameter(), g.aspl());
        g.analyze().unwrap();
        assert_eq!(g.diameter(), d1);
        assert_eq!(g.aspl(), a1);
    }

    #[test]
    fn disconnected_graph_reports_partitioned() {
        let mut g = Graph::new(4, 2);
        g.add_edge_unsafe(0, 1);
        // vertex 2 and 3 left isolated from {0,1}
        let err = g.analyze().unwrap_err();
        assert_eq!(err, GraphError::Partitioned { from: 0, to: 2 });
    }

    #[test]
    fn duplicate_is_independent_of_original() {
        let mut g = triangle_3_2();
        g.analyze().unwrap();
        let mut dup = g.duplicate();
        dup.remove_edge_unsafe(0, 1);
        assert_eq!(g.degree_of(0), 2);
        assert_eq!(dup.degree_of(0), 1);
    }

    #[test]
    fn add_as_many_random_edges_as_possible_completes_a_ring() {
        let mut g = Graph::new(6, 2);
        g.add_as_many_random_edges_as_possible(None, &mut rng());
        for v in 0..6 {
            assert_eq!(g.degree_of(v), 2);
        }
        g.analyze().unwrap();
        assert!(g.diameter().unwrap() >= g.diameter_lower_bound());
        assert!(g.aspl().unwrap() >= g.aspl_lower_bound() - 1e-9);
    }

    #[test]
    fn edges_lists_each_pair_once_with_lower_id_first() {
        let g = triangle_3_2();
        let mut edges = g.edges();
        edges.sort();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
    }
}
