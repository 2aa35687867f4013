//! Proximity graph regression test
//!
//! Radius graphs from explicit points, from random point sets checked
//! against the brute-force builder, and from a mask.
//!
//! Run with:
//! ```text
//! cargo test -p glandgraph-spatial --test proximity_reg
//! ```

use glandgraph_core::{Pix, PixelDepth, Pta};
use glandgraph_spatial::{
    KdTree, KdTreeOptions, SpatialError, brute_force_radius_graph, build_radius_graph,
    graph_from_mask, random_points,
};
use glandgraph_test::RegParams;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn proximity_reg() {
    let mut rp = RegParams::new("proximity");

    eprintln!("=== Three points ===");
    let pts: Pta = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 5.0)].into_iter().collect();
    let g = build_radius_graph(&pts, 1.5).expect("graph");
    rp.compare_values(3.0, g.vertex_count() as f64, 0.0);
    rp.compare_edges(&[(0, 1)], &g);

    eprintln!("=== Zero radius rejected ===");
    let res = build_radius_graph(&pts, 0.0);
    rp.compare_values(
        1.0,
        matches!(res, Err(SpatialError::InvalidInput(_))) as u8 as f64,
        0.0,
    );

    eprintln!("=== k-d tree against brute force ===");
    let mut rng = StdRng::seed_from_u64(2024);
    for (trial, &(n, radius)) in [(10, 0.3), (200, 0.05), (500, 0.08), (64, 2.0)]
        .iter()
        .enumerate()
    {
        let pts = random_points(n, &mut rng);
        let fast = build_radius_graph(&pts, radius).expect("kd");
        let slow = brute_force_radius_graph(&pts, radius).expect("brute");
        eprintln!(
            "  trial {}: {} points, {} edges",
            trial,
            n,
            slow.edge_count()
        );
        rp.compare_values(1.0, (fast == slow) as u8 as f64, 0.0);

        // every edge within the radius, no loops
        let bad = fast
            .edges()
            .filter(|&(a, b)| {
                let (xa, ya) = pts.get(a).unwrap_or_default();
                let (xb, yb) = pts.get(b).unwrap_or_default();
                a == b || ((xa - xb).powi(2) + (ya - yb).powi(2)).sqrt() > radius
            })
            .count();
        rp.compare_values(0.0, bad as f64, 0.0);

        let small = KdTree::with_options(&pts, KdTreeOptions::new().with_leaf_size(1)).expect("kd");
        rp.compare_values(
            slow.edge_count() as f64,
            small.query_pairs(radius).len() as f64,
            0.0,
        );
    }

    eprintln!("=== Graph from mask ===");
    // three 2x2 objects, plane y = height - row
    let mut pm = Pix::new(12, 8, PixelDepth::Bit8).expect("pix").to_mut();
    for &(x0, y0) in &[(1u32, 1u32), (4, 1), (9, 5)] {
        for y in y0..y0 + 2 {
            for x in x0..x0 + 2 {
                pm.set_pixel_unchecked(x, y, 255);
            }
        }
    }
    let mask: Pix = pm.into();
    let (g, centroids) = graph_from_mask(&mask, 4.0).expect("mask graph");
    rp.compare_values(3.0, centroids.len() as f64, 0.0);
    rp.compare_values(1.5, centroids.get(0).map_or(-1.0, |p| p.0), 1e-12);
    rp.compare_values(6.5, centroids.get(0).map_or(-1.0, |p| p.1), 1e-12);
    rp.compare_values(2.5, centroids.get(2).map_or(-1.0, |p| p.1), 1e-12);
    rp.compare_edges(&[(0, 1)], &g);

    assert!(rp.cleanup(), "proximity regression test failed");
}
