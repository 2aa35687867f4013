//! Graph and geometry regression test
//!
//! Edge bookkeeping, vertex deletion with renumbering, attribute columns
//! and the polygon predicates used by the tessellation.

use glandgraph_core::{AttributeValues, Graph, Polygon, Pta};
use glandgraph_test::RegParams;

#[test]
fn graph_reg() {
    let mut rp = RegParams::new("graph");

    eprintln!("=== Edges ===");
    let mut g = Graph::from_edges(6, [(0, 1), (1, 2), (2, 0), (4, 5), (5, 4)]).expect("graph");
    rp.compare_values(4.0, g.edge_count() as f64, 0.0);
    rp.compare_values(2.0, g.degree(2) as f64, 0.0);
    rp.compare_values(0.0, g.degree(3) as f64, 0.0);
    rp.compare_values(1.0, g.add_edge(3, 4).is_ok() as u8 as f64, 0.0);
    rp.compare_values(1.0, g.add_edge(3, 3).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, g.add_edge(3, 6).is_err() as u8 as f64, 0.0);

    eprintln!("=== Attributes and deletion ===");
    g.set_attribute(
        "is_border",
        AttributeValues::Bool(vec![true, false, false, true, false, true]),
    )
    .expect("attribute");
    rp.compare_values(
        1.0,
        g.set_attribute("short", AttributeValues::Float(vec![1.0]))
            .is_err() as u8 as f64,
        0.0,
    );
    g.delete_vertices(1..3).expect("delete");
    rp.compare_values(4.0, g.vertex_count() as f64, 0.0);
    // (3, 4) and (4, 5) survive as (1, 2) and (2, 3)
    rp.compare_edges(&[(1, 2), (2, 3)], &g);
    let flags = match g.attribute("is_border") {
        Some(AttributeValues::Bool(v)) => v.clone(),
        _ => Vec::new(),
    };
    rp.compare_values(1.0, (flags == vec![true, true, false, true]) as u8 as f64, 0.0);

    eprintln!("=== Polygon ===");
    let tri = Polygon::new(
        [(0.0, 0.0), (4.0, 0.0), (0.0, 3.0), (0.0, 0.0)]
            .into_iter()
            .collect::<Pta>(),
    )
    .expect("triangle");
    rp.compare_values(3.0, tri.len() as f64, 0.0);
    rp.compare_values(6.0, tri.area(), 1e-12);
    rp.compare_values(1.0, tri.contains_strict(1.0, 1.0) as u8 as f64, 0.0);
    rp.compare_values(0.0, tri.contains_strict(2.0, 0.0) as u8 as f64, 0.0);
    rp.compare_values(0.0, tri.contains_strict(3.0, 3.0) as u8 as f64, 0.0);
    let rect = Polygon::rectangle(0.0, 0.0, 2.0, 5.0).expect("rect");
    rp.compare_values(10.0, rect.signed_area(), 1e-12);
    rp.compare_values(
        1.0,
        Polygon::rectangle(1.0, 1.0, 1.0, 4.0).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "graph regression test failed");
}
