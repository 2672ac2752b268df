use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::EdgeListError;
use crate::graph::Graph;

/// Reads a plain-text edge list ("`u v`" per line, 0-indexed) and validates
/// it against the expected order and degree before handing back the raw
/// pairs for [`Graph::from_edges`].
pub fn read_edge_list(path: &Path, order: usize, degree: usize) -> Result<Vec<(usize, usize)>, EdgeListError> {
    let contents = fs::read_to_string(path).map_err(|source| EdgeListError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut edges = Vec::new();
    let mut seen = HashSet::new();
    let mut degrees = vec![0usize; order];

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(u_text), Some(v_text), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(EdgeListError::ParseLine {
                path: path.to_path_buf(),
                line_no: line_no + 1,
                text: line.to_string(),
            });
        };

        let parse = |text: &str| -> Result<usize, EdgeListError> {
            text.parse().map_err(|_| EdgeListError::ParseLine {
                path: path.to_path_buf(),
                line_no: line_no + 1,
                text: line.to_string(),
            })
        };
        let u = parse(u_text)?;
        let v = parse(v_text)?;

        for vertex in [u, v] {
            if vertex >= order {
                return Err(EdgeListError::VertexOutOfRange {
                    path: path.to_path_buf(),
                    vertex,
                    order,
                });
            }
        }

        let key = (u.min(v), u.max(v));
        if !seen.insert(key) {
            return Err(EdgeListError::DuplicateEdge {
                path: path.to_path_buf(),
                u: key.0,
                v: key.1,
            });
        }

        degrees[u] += 1;
        degrees[v] += 1;
        for vertex in [u, v] {
            if degrees[vertex] > degree {
                return Err(EdgeListError::DegreeExceeded {
                    path: path.to_path_buf(),
                    vertex,
                    degree,
                });
            }
        }

        edges.push((u, v));
    }

    Ok(edges)
}

/// Writes an edge list in the same "`u v`" per line format `read_edge_list`
/// accepts, one line per edge with `u < v`.
pub fn write_edge_list(path: &Path, edges: &[(usize, usize)]) -> Result<(), EdgeListError> {
    let mut contents = String::new();
    for &(u, v) in edges {
        contents.push_str(&format!("{u} {v}\n"));
    }
    fs::write(path, contents).map_err(|source| EdgeListError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// The canonical output filename for a result graph, encoding its shape and
/// quality so a directory of attempts sorts and greps meaningfully.
pub fn output_filename(graph: &Graph) -> String {
    format!(
        "edges-order={}-degree={}-diameter={}-aspl={}",
        graph.order(),
        graph.degree(),
        graph.diameter().map(|d| d as i64).unwrap_or(-1),
        graph.aspl().map(|a| a.to_string()).unwrap_or_else(|| "na".into()),
    )
}
