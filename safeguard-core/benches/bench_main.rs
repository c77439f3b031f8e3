use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;
use petgraph::graph::{NodeIndex, UnGraph};

use safeguard_core::model::{RoadEdge, RoadNetwork, RoadNode};
use safeguard_core::routing::{baseline_dijkstra, bidirectional_dijkstra};

/// Square grid with 100 m blocks, diverse enough to keep both frontiers busy.
fn grid_network(side: usize) -> RoadNetwork {
    let mut graph = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = (0..side * side)
        .map(|i| {
            let (x, y) = ((i % side) as f64, (i / side) as f64);
            graph.add_node(RoadNode {
                id: i as i64,
                geometry: Point::new(x * 0.001, y * 0.001),
            })
        })
        .collect();
    for y in 0..side {
        for x in 0..side {
            let i = y * side + x;
            if x + 1 < side {
                graph.add_edge(nodes[i], nodes[i + 1], RoadEdge { base_weight: 100.0 });
            }
            if y + 1 < side {
                graph.add_edge(nodes[i], nodes[i + side], RoadEdge { base_weight: 100.0 });
            }
        }
    }
    RoadNetwork::new(graph)
}

fn bench_searches(c: &mut Criterion) {
    let side = 60;
    let network = grid_network(side);
    let source = NodeIndex::new(0);
    let target = NodeIndex::new(side * side - 1);

    c.bench_function("bidirectional_grid", |b| {
        b.iter(|| {
            bidirectional_dijkstra(&network, source, target, |a, n| network.base_weight(a, n))
        })
    });

    c.bench_function("baseline_grid", |b| {
        b.iter(|| baseline_dijkstra(&network, source, target))
    });
}

criterion_group!(benches, bench_searches);
criterion_main!(benches);
