//! 汎用最短路ソルバーのモジュール
//!
//! このモジュールは、重み付き有向グラフ上の最小コストパスを求める
//! 一般化Bellman-Fordアルゴリズムを提供します。辺の重みは負でも
//! 構いません。タガーのラティスは連接に基づく非循環グラフですが、
//! 緩和が収束しない場合は負閉路として防御的に報告します。
//!
//! # 決定性
//!
//! 緩和は与えられた辺順で行われ、距離の更新は厳密に小さくなる場合に
//! 限られます。そのため、同コストのパスが複数ある場合は、与えられた
//! 順序で最初にその距離を達成した辺が勝ちます。これは偶然の性質では
//! なく、呼び出し側が辺を`(from.start, to.end)`で整列することと併せて
//! 出力互換性のために保証される仕様です。

use crate::errors::{HantagError, Result};

/// 重み付き有向辺
///
/// ノードは`0..num_nodes`のインデックスで表されます。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// 始点ノードのインデックス
    pub from: usize,
    /// 終点ノードのインデックス
    pub to: usize,
    /// 加算的なコスト（小さいほど良い）
    pub weight: f64,
}

/// 最短路の探索結果
#[derive(Debug, Clone, PartialEq)]
pub struct MinCostPath {
    /// 始点から終点までのノード列（両端を含む）
    pub nodes: Vec<usize>,
    /// パスの総コスト
    pub cost: f64,
}

/// 始点から終点への最小コストパスを求めます
///
/// 距離は始点を0、それ以外を`(最大辺重み + 1) × ノード数`という
/// どの実パスのコストよりも大きい番兵値で初期化します。最大でノード数
/// 回の緩和パスを辺順で繰り返し、1パスで更新がなければ早期終了します。
/// 収束後にさらに1パス実行し、なお改善する辺があれば負閉路として
/// 報告します。
///
/// # 引数
///
/// * `edges` - 辺のスライス（呼び出し側が整列済みであること）
/// * `num_nodes` - ノード数
/// * `source` - 始点ノードのインデックス
/// * `target` - 終点ノードのインデックス
///
/// # 戻り値
///
/// 最小コストパスとその総コスト
///
/// # エラー
///
/// 始点または終点が辺集合に現れない場合、および終点に到達できない
/// 場合は[`HantagError::NoPath`]が返されます。緩和が収束しない場合は
/// [`HantagError::NegativeCycle`]が返されます。
///
/// # 計算量
///
/// 最悪で O(ノード数 × 辺数)
pub fn solve(edges: &[Edge], num_nodes: usize, source: usize, target: usize) -> Result<MinCostPath> {
    if !edges.iter().any(|e| e.from == source || e.to == source) {
        return Err(HantagError::no_path(format!(
            "the source node {source} is absent from the edge set"
        )));
    }
    if !edges.iter().any(|e| e.from == target || e.to == target) {
        return Err(HantagError::no_path(format!(
            "the target node {target} is absent from the edge set"
        )));
    }

    // A sentinel guaranteed to be larger than any real path cost. The clamp
    // keeps the guarantee when every edge weight is negative.
    let max_weight = edges.iter().map(|e| e.weight).fold(f64::NEG_INFINITY, f64::max);
    let inf = (max_weight.max(0.0) + 1.0) * num_nodes as f64;

    let mut distance = vec![inf; num_nodes];
    let mut predecessor: Vec<Option<usize>> = vec![None; num_nodes];
    distance[source] = 0.0;

    for _ in 0..num_nodes {
        let mut changed = false;
        for edge in edges {
            let relaxed = distance[edge.from] + edge.weight;
            if relaxed < distance[edge.to] {
                distance[edge.to] = relaxed;
                predecessor[edge.to] = Some(edge.from);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for edge in edges {
        if distance[edge.from] + edge.weight < distance[edge.to] {
            return Err(HantagError::negative_cycle(edge.from, edge.to, edge.weight));
        }
    }

    let mut nodes = vec![target];
    let mut current = target;
    while current != source {
        let Some(previous) = predecessor[current] else {
            return Err(HantagError::no_path(format!(
                "the target node {target} is unreachable from the source node {source}"
            )));
        };
        nodes.push(previous);
        current = previous;
    }
    nodes.reverse();

    Ok(MinCostPath {
        nodes,
        cost: distance[target],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: usize, to: usize, weight: f64) -> Edge {
        Edge { from, to, weight }
    }

    /// Enumerates every source-to-target path cost by depth-first search.
    fn brute_force_min(edges: &[Edge], source: usize, target: usize) -> Option<f64> {
        fn walk(
            edges: &[Edge],
            current: usize,
            target: usize,
            cost: f64,
            best: &mut Option<f64>,
        ) {
            if current == target {
                if best.map_or(true, |b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for e in edges.iter().filter(|e| e.from == current) {
                walk(edges, e.to, target, cost + e.weight, best);
            }
        }
        let mut best = None;
        walk(edges, source, target, 0.0, &mut best);
        best
    }

    #[test]
    fn test_chain() {
        let edges = [edge(0, 1, 1.0), edge(1, 2, 2.0)];
        let path = solve(&edges, 3, 0, 2).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2]);
        assert_eq!(path.cost, 3.0);
    }

    #[test]
    fn test_diamond_prefers_cheaper_branch() {
        let edges = [
            edge(0, 1, 1.0),
            edge(0, 2, 5.0),
            edge(1, 3, 1.0),
            edge(2, 3, 1.0),
        ];
        let path = solve(&edges, 4, 0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 3]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn test_negative_edge_changes_choice() {
        let edges = [
            edge(0, 1, 1.0),
            edge(0, 2, 5.0),
            edge(1, 3, 1.0),
            edge(2, 3, -4.0),
        ];
        let path = solve(&edges, 4, 0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 2, 3]);
        assert_eq!(path.cost, 1.0);
    }

    #[test]
    fn test_matches_brute_force() {
        // A layered DAG with a negative edge mixed in.
        let edges = [
            edge(0, 1, 2.0),
            edge(0, 2, 4.0),
            edge(0, 3, 1.5),
            edge(1, 4, 3.0),
            edge(1, 5, 1.0),
            edge(2, 4, -1.0),
            edge(2, 5, 2.0),
            edge(3, 5, 6.0),
            edge(4, 6, 2.5),
            edge(4, 7, 1.0),
            edge(5, 6, 0.5),
            edge(5, 7, 4.0),
            edge(6, 7, 0.0),
        ];
        let path = solve(&edges, 8, 0, 7).unwrap();
        let expected = brute_force_min(&edges, 0, 7).unwrap();
        assert_eq!(path.cost, expected);

        // The returned node sequence is an actual path with that cost.
        let mut cost = 0.0;
        for pair in path.nodes.windows(2) {
            let e = edges
                .iter()
                .find(|e| e.from == pair[0] && e.to == pair[1])
                .unwrap();
            cost += e.weight;
        }
        assert_eq!(cost, expected);
    }

    #[test]
    fn test_tie_break_is_first_in_edge_order() {
        // Two paths with the same total cost. The first edge in the given
        // order that reaches the target must win.
        let edges = [
            edge(0, 1, 1.0),
            edge(0, 2, 1.0),
            edge(1, 3, 1.0),
            edge(2, 3, 1.0),
        ];
        let path = solve(&edges, 4, 0, 3).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 3]);
    }

    #[test]
    fn test_source_absent() {
        let edges = [edge(1, 2, 1.0)];
        assert!(matches!(
            solve(&edges, 3, 0, 2),
            Err(HantagError::NoPath(_))
        ));
    }

    #[test]
    fn test_target_absent() {
        let edges = [edge(0, 1, 1.0)];
        assert!(matches!(
            solve(&edges, 3, 0, 2),
            Err(HantagError::NoPath(_))
        ));
    }

    #[test]
    fn test_target_unreachable() {
        // The target appears in the edge set but is fed only from a node
        // that the source never reaches.
        let edges = [edge(0, 1, 1.0), edge(2, 3, -100.0)];
        assert!(matches!(
            solve(&edges, 4, 0, 3),
            Err(HantagError::NoPath(_))
        ));
    }

    #[test]
    fn test_negative_cycle() {
        let edges = [edge(0, 1, 1.0), edge(1, 2, -3.0), edge(2, 1, 1.0)];
        assert!(matches!(
            solve(&edges, 3, 0, 2),
            Err(HantagError::NegativeCycle(_))
        ));
    }

    #[test]
    fn test_single_edge() {
        let edges = [edge(0, 1, -2.5)];
        let path = solve(&edges, 2, 0, 1).unwrap();
        assert_eq!(path.nodes, vec![0, 1]);
        assert_eq!(path.cost, -2.5);
    }
}
