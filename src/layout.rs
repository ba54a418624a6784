use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use dagre_rust::{
    GraphConfig as DagreConfig, GraphEdge as DagreEdge, GraphNode as DagreNode,
    layout as dagre_layout,
};
use graphlib_rust::{Graph as DagreGraph, GraphOption};

use crate::config::{Direction, LayoutConfig};
use crate::graph::Graph;
use crate::metrics;
use crate::theme::Theme;

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: TextBlock,
}

impl NodeLayout {
    fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: BTreeMap<String, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

fn side_is_vertical(side: Side) -> bool {
    matches!(side, Side::Left | Side::Right)
}

fn is_horizontal(direction: Direction) -> bool {
    matches!(direction, Direction::LeftRight | Direction::RightLeft)
}

fn dagre_rankdir(direction: Direction) -> &'static str {
    match direction {
        Direction::TopDown => "tb",
        Direction::BottomUp => "bt",
        Direction::LeftRight => "lr",
        Direction::RightLeft => "rl",
    }
}

pub fn compute_layout(graph: &Graph, theme: &Theme, config: &LayoutConfig) -> Layout {
    let mut nodes = BTreeMap::new();
    for styled in graph.nodes.values() {
        let label = measure_label(&styled.label, theme, config);
        let width = (label.width + config.node_padding_x * 2.0).max(40.0);
        let height = (label.height + config.node_padding_y * 2.0).max(28.0);
        nodes.insert(
            styled.name.clone(),
            NodeLayout {
                name: styled.name.clone(),
                x: 0.0,
                y: 0.0,
                width,
                height,
                label,
            },
        );
    }

    let node_ids: Vec<String> = graph
        .ordered_nodes()
        .iter()
        .map(|node| node.name.clone())
        .collect();
    let node_order: HashMap<String, usize> = graph
        .nodes
        .values()
        .map(|node| (node.name.clone(), node.order))
        .collect();

    let used_dagre = assign_positions_dagre(graph, &node_ids, &node_order, &mut nodes, config);
    if !used_dagre {
        assign_positions_manual(graph, &node_ids, &node_order, &mut nodes, config);
        if matches!(
            config.direction,
            Direction::RightLeft | Direction::BottomUp
        ) {
            apply_direction_mirror(config.direction, &mut nodes);
        }
    }

    let mut edges = route_edges(graph, &nodes, config);

    normalize_layout(&mut nodes, &mut edges);
    let (width, height) = bounds_from_layout(&nodes);

    Layout {
        nodes,
        edges,
        width,
        height,
    }
}

fn assign_positions_dagre(
    graph: &Graph,
    node_ids: &[String],
    node_order: &HashMap<String, usize>,
    nodes: &mut BTreeMap<String, NodeLayout>,
    config: &LayoutConfig,
) -> bool {
    if node_ids.is_empty() {
        return false;
    }

    let mut dagre_graph: DagreGraph<DagreConfig, DagreNode, DagreEdge> =
        DagreGraph::new(Some(GraphOption {
            directed: Some(true),
            multigraph: Some(false),
            compound: Some(false),
        }));

    let mut graph_config = DagreConfig::default();
    graph_config.rankdir = Some(dagre_rankdir(config.direction).to_string());
    graph_config.nodesep = Some(config.node_spacing);
    graph_config.ranksep = Some(config.rank_spacing);
    graph_config.marginx = Some(8.0);
    graph_config.marginy = Some(8.0);
    dagre_graph.set_graph(graph_config);

    for node_id in node_ids {
        let Some(layout) = nodes.get(node_id) else {
            continue;
        };
        let mut node = DagreNode::default();
        node.width = layout.width;
        node.height = layout.height;
        if let Some(order) = node_order.get(node_id) {
            node.order = Some(*order);
        }
        dagre_graph.set_node(node_id.clone(), Some(node));
    }

    // Multigraph mode is off: duplicate pairs collapse here and pick up
    // distinct midpoint offsets during routing instead. Self-loops never
    // reach the engine.
    let mut edge_set: HashSet<(String, String)> = HashSet::new();
    for edge in &graph.edges {
        if edge.from == edge.to {
            continue;
        }
        if !edge_set.insert((edge.from.clone(), edge.to.clone())) {
            continue;
        }
        let edge_label = DagreEdge::default();
        let _ = dagre_graph.set_edge(&edge.from, &edge.to, Some(edge_label), None);
    }

    dagre_layout::run_layout(&mut dagre_graph);

    let mut applied = false;
    for node_id in node_ids {
        let Some(dagre_node) = dagre_graph.node(node_id) else {
            continue;
        };
        if let Some(node) = nodes.get_mut(node_id) {
            node.x = dagre_node.x - node.width / 2.0;
            node.y = dagre_node.y - node.height / 2.0;
            applied = true;
        }
    }

    applied
}

/// Layered fallback used when the engine yields nothing: Kahn ranks tolerant
/// of cycles, barycenter ordering sweeps, then rank-by-rank placement.
fn assign_positions_manual(
    graph: &Graph,
    node_ids: &[String],
    node_order: &HashMap<String, usize>,
    nodes: &mut BTreeMap<String, NodeLayout>,
    config: &LayoutConfig,
) {
    let ranks = compute_ranks(node_ids, graph);
    let mut max_rank = 0usize;
    for rank in ranks.values() {
        max_rank = max_rank.max(*rank);
    }

    let mut rank_nodes: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
    for node_id in node_ids {
        let rank = *ranks.get(node_id).unwrap_or(&0);
        if let Some(bucket) = rank_nodes.get_mut(rank) {
            bucket.push(node_id.clone());
        }
    }
    for bucket in &mut rank_nodes {
        bucket.sort_by_key(|id| node_order.get(id).copied().unwrap_or(usize::MAX));
    }
    order_rank_nodes(&mut rank_nodes, graph, node_order);

    let horizontal = is_horizontal(config.direction);
    let mut main_cursor = 0.0;
    for bucket in &rank_nodes {
        let mut max_main: f32 = 0.0;
        for node_id in bucket {
            if let Some(node) = nodes.get_mut(node_id) {
                if horizontal {
                    node.x = main_cursor;
                    max_main = max_main.max(node.width);
                } else {
                    node.y = main_cursor;
                    max_main = max_main.max(node.height);
                }
            }
        }
        main_cursor += max_main + config.rank_spacing;
    }

    let mut incoming: HashMap<String, Vec<String>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &graph.edges {
        if edge.from == edge.to {
            continue;
        }
        incoming
            .entry(edge.to.clone())
            .or_default()
            .push(edge.from.clone());
        outgoing
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
    }

    let mut cross_pos: HashMap<String, f32> = HashMap::new();
    let place_rank = |rank_idx: usize,
                          use_incoming: bool,
                          cross_pos: &mut HashMap<String, f32>,
                          nodes: &mut BTreeMap<String, NodeLayout>| {
        let bucket = &rank_nodes[rank_idx];
        if bucket.is_empty() {
            return;
        }
        let neighbors = if use_incoming { &incoming } else { &outgoing };
        let mut entries: Vec<(String, f32, f32)> = Vec::new();
        for node_id in bucket {
            let Some(node) = nodes.get(node_id) else {
                continue;
            };
            let mut sum = 0.0;
            let mut count = 0.0;
            if let Some(list) = neighbors.get(node_id) {
                for neighbor_id in list {
                    if let Some(center) = cross_pos.get(neighbor_id) {
                        sum += *center;
                        count += 1.0;
                    }
                }
            }
            let desired = if count > 0.0 { sum / count } else { 0.0 };
            let half = if horizontal {
                node.height / 2.0
            } else {
                node.width / 2.0
            };
            entries.push((node_id.clone(), desired, half));
        }
        if entries.is_empty() {
            return;
        }
        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        let desired_mean = entries.iter().map(|(_, d, _)| *d).sum::<f32>() / entries.len() as f32;
        let mut assigned: Vec<(String, f32)> = Vec::new();
        let mut prev_center: Option<f32> = None;
        let mut prev_half = 0.0;
        for (node_id, desired, half) in entries {
            let center = match prev_center {
                Some(prev) => desired.max(prev + prev_half + half + config.node_spacing),
                None => desired,
            };
            assigned.push((node_id, center));
            prev_center = Some(center);
            prev_half = half;
        }
        let actual_mean = assigned.iter().map(|(_, c)| *c).sum::<f32>() / assigned.len() as f32;
        let delta = desired_mean - actual_mean;
        for (node_id, center) in assigned {
            let center = center + delta;
            if let Some(node) = nodes.get_mut(&node_id) {
                if horizontal {
                    node.y = center - node.height / 2.0;
                } else {
                    node.x = center - node.width / 2.0;
                }
            }
            cross_pos.insert(node_id, center);
        }
    };

    for _ in 0..2 {
        for rank_idx in 0..rank_nodes.len() {
            place_rank(rank_idx, true, &mut cross_pos, nodes);
        }
        for rank_idx in (0..rank_nodes.len()).rev() {
            place_rank(rank_idx, false, &mut cross_pos, nodes);
        }
    }
}

/// Kahn-style ranking. Nodes left over after the acyclic pass (cycle
/// members) are appended in document order so cyclic inputs still place.
fn compute_ranks(node_ids: &[String], graph: &Graph) -> HashMap<String, usize> {
    let set: HashSet<&str> = node_ids.iter().map(String::as_str).collect();
    let mut indeg: HashMap<&str, usize> = HashMap::new();
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for id in node_ids {
        indeg.insert(id.as_str(), 0);
    }
    for edge in &graph.edges {
        if edge.from == edge.to {
            continue;
        }
        if set.contains(edge.from.as_str()) && set.contains(edge.to.as_str()) {
            adj.entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
            *indeg.entry(edge.to.as_str()).or_insert(0) += 1;
        }
    }

    let mut queue: VecDeque<&str> = node_ids
        .iter()
        .map(String::as_str)
        .filter(|id| indeg.get(id).copied().unwrap_or(0) == 0)
        .collect();
    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = queue.iter().copied().collect();
    while let Some(node) = queue.pop_front() {
        order.push(node);
        if let Some(nexts) = adj.get(node) {
            for next in nexts {
                if let Some(deg) = indeg.get_mut(next) {
                    *deg = deg.saturating_sub(1);
                    if *deg == 0 && seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
    }
    if order.len() < node_ids.len() {
        for id in node_ids {
            if !order.contains(&id.as_str()) {
                order.push(id.as_str());
            }
        }
    }

    let order_index: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();
    let mut ranks: HashMap<String, usize> = HashMap::new();
    for node in &order {
        let rank = *ranks.get(*node).unwrap_or(&0);
        ranks.entry((*node).to_string()).or_insert(rank);
        if let Some(nexts) = adj.get(node) {
            let from_idx = *order_index.get(node).unwrap_or(&0);
            for next in nexts {
                let to_idx = *order_index.get(next).unwrap_or(&from_idx);
                if to_idx <= from_idx {
                    continue;
                }
                let entry = ranks.entry((*next).to_string()).or_insert(0);
                *entry = (*entry).max(rank + 1);
            }
        }
    }
    ranks
}

fn order_rank_nodes(
    rank_nodes: &mut [Vec<String>],
    graph: &Graph,
    node_order: &HashMap<String, usize>,
) {
    if rank_nodes.len() <= 1 {
        return;
    }
    let mut incoming: HashMap<String, Vec<String>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &graph.edges {
        outgoing
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
        incoming
            .entry(edge.to.clone())
            .or_default()
            .push(edge.from.clone());
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let update_positions =
        |rank_nodes: &mut [Vec<String>], positions: &mut HashMap<String, usize>| {
            positions.clear();
            for bucket in rank_nodes.iter() {
                for (idx, node_id) in bucket.iter().enumerate() {
                    positions.insert(node_id.clone(), idx);
                }
            }
        };
    update_positions(rank_nodes, &mut positions);

    let sort_bucket = |bucket: &mut Vec<String>,
                       neighbors: &HashMap<String, Vec<String>>,
                       positions: &HashMap<String, usize>| {
        let current: HashMap<String, usize> = bucket
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        bucket.sort_by(|a, b| {
            let a_score = barycenter(a, neighbors, positions, &current);
            let b_score = barycenter(b, neighbors, positions, &current);
            match a_score.partial_cmp(&b_score) {
                Some(Ordering::Equal) | None => node_order
                    .get(a)
                    .copied()
                    .unwrap_or(usize::MAX)
                    .cmp(&node_order.get(b).copied().unwrap_or(usize::MAX)),
                Some(ordering) => ordering,
            }
        });
    };

    for _ in 0..2 {
        for rank in 1..rank_nodes.len() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &incoming, &positions);
            update_positions(rank_nodes, &mut positions);
        }
        for rank in (0..rank_nodes.len().saturating_sub(1)).rev() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &outgoing, &positions);
            update_positions(rank_nodes, &mut positions);
        }
    }
}

fn barycenter(
    node_id: &str,
    neighbors: &HashMap<String, Vec<String>>,
    positions: &HashMap<String, usize>,
    current: &HashMap<String, usize>,
) -> f32 {
    let Some(list) = neighbors.get(node_id) else {
        return *current.get(node_id).unwrap_or(&0) as f32;
    };
    let mut total = 0.0;
    let mut count = 0.0;
    for neighbor in list {
        if let Some(pos) = positions.get(neighbor) {
            total += *pos as f32;
            count += 1.0;
        }
    }
    if count == 0.0 {
        *current.get(node_id).unwrap_or(&0) as f32
    } else {
        total / count
    }
}

struct PortCandidate {
    edge_idx: usize,
    is_start: bool,
    other_pos: f32,
}

#[derive(Clone, Copy, Default)]
struct EdgePorts {
    start_offset: f32,
    end_offset: f32,
}

fn route_edges(
    graph: &Graph,
    nodes: &BTreeMap<String, NodeLayout>,
    config: &LayoutConfig,
) -> Vec<EdgeLayout> {
    let horizontal = is_horizontal(config.direction);

    let mut sides: Vec<(Side, Side)> = Vec::with_capacity(graph.edges.len());
    let mut port_candidates: HashMap<(String, Side), Vec<PortCandidate>> = HashMap::new();
    for (idx, edge) in graph.edges.iter().enumerate() {
        let (Some(from), Some(to)) = (nodes.get(&edge.from), nodes.get(&edge.to)) else {
            sides.push((Side::Bottom, Side::Top));
            continue;
        };
        let pair = if edge.from == edge.to {
            (Side::Right, Side::Right)
        } else {
            edge_sides(from, to, horizontal)
        };
        sides.push(pair);

        let from_center = from.center();
        let to_center = to.center();
        port_candidates
            .entry((edge.from.clone(), pair.0))
            .or_default()
            .push(PortCandidate {
                edge_idx: idx,
                is_start: true,
                other_pos: if side_is_vertical(pair.0) {
                    to_center.1
                } else {
                    to_center.0
                },
            });
        port_candidates
            .entry((edge.to.clone(), pair.1))
            .or_default()
            .push(PortCandidate {
                edge_idx: idx,
                is_start: false,
                other_pos: if side_is_vertical(pair.1) {
                    from_center.1
                } else {
                    from_center.0
                },
            });
    }

    // Spread the ports of edges sharing a node side so they do not stack on
    // the border midpoint.
    let mut ports: Vec<EdgePorts> = vec![EdgePorts::default(); graph.edges.len()];
    for ((node_id, side), mut candidates) in port_candidates {
        let Some(node) = nodes.get(&node_id) else {
            continue;
        };
        candidates.sort_by(|a, b| a.other_pos.partial_cmp(&b.other_pos).unwrap_or(Ordering::Equal));
        let node_len = if side_is_vertical(side) {
            node.height
        } else {
            node.width
        };
        let pad = (node_len * 0.2).clamp(4.0, 12.0);
        let usable = (node_len - 2.0 * pad).max(1.0);
        let step = usable / (candidates.len() as f32 + 1.0);
        for (i, candidate) in candidates.iter().enumerate() {
            let offset = pad + step * (i as f32 + 1.0) - node_len / 2.0;
            if let Some(info) = ports.get_mut(candidate.edge_idx) {
                if candidate.is_start {
                    info.start_offset = offset;
                } else {
                    info.end_offset = offset;
                }
            }
        }
    }

    let mut pair_counts: HashMap<(String, String), usize> = HashMap::new();
    for edge in &graph.edges {
        *pair_counts
            .entry((edge.from.clone(), edge.to.clone()))
            .or_insert(0) += 1;
    }
    let mut pair_seen: HashMap<(String, String), usize> = HashMap::new();

    let mut edges = Vec::with_capacity(graph.edges.len());
    for (idx, edge) in graph.edges.iter().enumerate() {
        let (Some(from), Some(to)) = (nodes.get(&edge.from), nodes.get(&edge.to)) else {
            continue;
        };
        let key = (edge.from.clone(), edge.to.clone());
        let total = *pair_counts.get(&key).unwrap_or(&1) as f32;
        let seen = pair_seen.entry(key).or_insert(0usize);
        let idx_in_pair = *seen as f32;
        *seen += 1;
        let parallel_offset = if total > 1.0 {
            (idx_in_pair - (total - 1.0) / 2.0) * (config.node_spacing * 0.35)
        } else {
            0.0
        };

        let (start_side, end_side) = sides[idx];
        let port = ports[idx];
        let points = if edge.from == edge.to {
            self_loop_points(from, config)
        } else if start_side == end_side {
            detour_points(from, to, start_side, port, config)
        } else {
            straight_points(from, to, start_side, end_side, port, parallel_offset)
        };

        edges.push(EdgeLayout {
            from: edge.from.clone(),
            to: edge.to.clone(),
            points,
        });
    }
    edges
}

fn edge_sides(from: &NodeLayout, to: &NodeLayout, horizontal: bool) -> (Side, Side) {
    let from_center = from.center();
    let to_center = to.center();
    if horizontal {
        if to.x >= from.x + from.width {
            (Side::Right, Side::Left)
        } else if to.x + to.width <= from.x {
            // Cycle-closing edge against the flow: detour around the bottom.
            (Side::Bottom, Side::Bottom)
        } else if to_center.1 >= from_center.1 {
            (Side::Bottom, Side::Top)
        } else {
            (Side::Top, Side::Bottom)
        }
    } else if to.y >= from.y + from.height {
        (Side::Bottom, Side::Top)
    } else if to.y + to.height <= from.y {
        (Side::Right, Side::Right)
    } else if to_center.0 >= from_center.0 {
        (Side::Right, Side::Left)
    } else {
        (Side::Left, Side::Right)
    }
}

fn port_point(node: &NodeLayout, side: Side, offset: f32) -> (f32, f32) {
    let (cx, cy) = node.center();
    match side {
        Side::Top => (cx + offset, node.y),
        Side::Bottom => (cx + offset, node.y + node.height),
        Side::Left => (node.x, cy + offset),
        Side::Right => (node.x + node.width, cy + offset),
    }
}

fn straight_points(
    from: &NodeLayout,
    to: &NodeLayout,
    start_side: Side,
    end_side: Side,
    port: EdgePorts,
    parallel_offset: f32,
) -> Vec<(f32, f32)> {
    let start = port_point(from, start_side, port.start_offset);
    let end = port_point(to, end_side, port.end_offset);
    if parallel_offset == 0.0 {
        return vec![start, end];
    }
    let mid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
    let mid = if side_is_vertical(start_side) {
        (mid.0, mid.1 + parallel_offset)
    } else {
        (mid.0 + parallel_offset, mid.1)
    };
    vec![start, mid, end]
}

/// Backward edges leave and enter the same side and run through a channel
/// beside the spanned nodes.
fn detour_points(
    from: &NodeLayout,
    to: &NodeLayout,
    side: Side,
    port: EdgePorts,
    config: &LayoutConfig,
) -> Vec<(f32, f32)> {
    let start = port_point(from, side, port.start_offset);
    let end = port_point(to, side, port.end_offset);
    match side {
        Side::Right | Side::Left => {
            let channel = if side == Side::Right {
                (from.x + from.width).max(to.x + to.width) + config.node_spacing * 0.8
            } else {
                from.x.min(to.x) - config.node_spacing * 0.8
            };
            vec![start, (channel, start.1), (channel, end.1), end]
        }
        Side::Top | Side::Bottom => {
            let channel = if side == Side::Bottom {
                (from.y + from.height).max(to.y + to.height) + config.node_spacing * 0.8
            } else {
                from.y.min(to.y) - config.node_spacing * 0.8
            };
            vec![start, (start.0, channel), (end.0, channel), end]
        }
    }
}

fn self_loop_points(node: &NodeLayout, config: &LayoutConfig) -> Vec<(f32, f32)> {
    let right = node.x + node.width;
    let (_, cy) = node.center();
    let reach = config.node_spacing * 0.6;
    vec![
        (right, cy - 8.0),
        (right + reach, cy - 8.0),
        (right + reach, cy + 8.0),
        (right, cy + 8.0),
    ]
}

fn apply_direction_mirror(direction: Direction, nodes: &mut BTreeMap<String, NodeLayout>) {
    let mut max_x: f32 = 0.0;
    let mut max_y: f32 = 0.0;
    for node in nodes.values() {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    if matches!(direction, Direction::RightLeft) {
        for node in nodes.values_mut() {
            node.x = max_x - node.x - node.width;
        }
    }
    if matches!(direction, Direction::BottomUp) {
        for node in nodes.values_mut() {
            node.y = max_y - node.y - node.height;
        }
    }
}

fn normalize_layout(nodes: &mut BTreeMap<String, NodeLayout>, edges: &mut [EdgeLayout]) {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    for node in nodes.values() {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
    }
    for edge in edges.iter() {
        for point in &edge.points {
            min_x = min_x.min(point.0);
            min_y = min_y.min(point.1);
        }
    }
    if nodes.is_empty() && edges.is_empty() {
        return;
    }

    let padding = 24.0;
    let shift_x = if min_x < padding { padding - min_x } else { 0.0 };
    let shift_y = if min_y < padding { padding - min_y } else { 0.0 };
    if shift_x == 0.0 && shift_y == 0.0 {
        return;
    }

    for node in nodes.values_mut() {
        node.x += shift_x;
        node.y += shift_y;
    }
    for edge in edges.iter_mut() {
        for point in edge.points.iter_mut() {
            point.0 += shift_x;
            point.1 += shift_y;
        }
    }
}

fn bounds_from_layout(nodes: &BTreeMap<String, NodeLayout>) -> (f32, f32) {
    let mut max_x: f32 = 0.0;
    let mut max_y: f32 = 0.0;
    for node in nodes.values() {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    (max_x + 24.0, max_y + 24.0)
}

fn measure_label(text: &str, theme: &Theme, config: &LayoutConfig) -> TextBlock {
    let lines: Vec<String> = if text.is_empty() {
        vec![String::new()]
    } else {
        text.split('\n').map(|line| line.trim().to_string()).collect()
    };

    let mut width: f32 = 0.0;
    for line in &lines {
        let measured = metrics::text_width(line, theme.font_size, &theme.font_family)
            .unwrap_or_else(|| line.chars().count() as f32 * theme.font_size * 0.56);
        width = width.max(measured);
    }
    let height = lines.len() as f32 * theme.font_size * config.label_line_height;

    TextBlock {
        lines,
        width,
        height,
    }
}
