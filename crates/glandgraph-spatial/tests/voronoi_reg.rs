//! Voronoi regression test
//!
//! Bounded tessellations of hand-placed and random points: cell areas,
//! border flags, adjacency, sparse input and cells that cannot be built.
//!
//! Run with:
//! ```text
//! cargo test -p glandgraph-spatial --test voronoi_reg
//! ```

use glandgraph_core::{AttributeValues, Pix, Polygon, Pta};
use glandgraph_spatial::{
    CellIssue, DegenerateReason, SpatialError, voronoi, voronoi_from_mask, voronoi_random,
};
use glandgraph_test::RegParams;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn voronoi_reg() {
    let mut rp = RegParams::new("voronoi");

    eprintln!("=== Square corners ===");
    let corners: Pta = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        .into_iter()
        .collect();
    let tess = voronoi(&corners, None).expect("voronoi");
    rp.compare_values(4.0, tess.cells.len() as f64, 0.0);
    rp.compare_values(100.0, tess.total_area(), 1e-9);
    rp.compare_values(4.0, tess.border_flags().iter().filter(|&&b| b).count() as f64, 0.0);
    rp.compare_edges(&[(0, 1), (0, 3), (1, 2), (2, 3)], &tess.graph);

    eprintln!("=== Random points in a custom region ===");
    let mut rng = StdRng::seed_from_u64(5);
    let region = Polygon::new(
        vec![(0.1, 0.1), (0.9, 0.2), (0.8, 0.9), (0.2, 0.8)]
            .into_iter()
            .collect(),
    )
    .expect("region");
    for trial in 0..3 {
        let (tess, points) = voronoi_random(60, Some(&region), &mut rng).expect("voronoi");
        eprintln!(
            "  trial {}: {} cells, {} issues, {} edges",
            trial,
            tess.cells.len(),
            tess.issues.len(),
            tess.graph.edge_count()
        );
        rp.compare_values(60.0, tess.graph.vertex_count() as f64, 0.0);
        // cells of points outside the region may be clipped away; the rest
        // still tile it
        rp.compare_values(region.area(), tess.total_area(), 1e-9);

        let mut wrong_flags = 0;
        for cell in &tess.cells {
            let clipped = cell.raw_area - cell.polygon.area() > 1e-9 * cell.raw_area;
            if clipped != cell.is_border {
                wrong_flags += 1;
            }
        }
        rp.compare_values(0.0, wrong_flags as f64, 0.0);

        let positions_ok = matches!(
            tess.graph.attribute("position"),
            Some(AttributeValues::Point(p)) if p.len() == points.len()
        );
        rp.compare_values(1.0, positions_ok as u8 as f64, 0.0);
        let loops = tess.graph.edges().filter(|&(a, b)| a == b).count();
        rp.compare_values(0.0, loops as f64, 0.0);
    }

    eprintln!("=== Sparse and collinear input ===");
    let one: Pta = vec![(1.0, 1.0)].into_iter().collect();
    let res = voronoi(&one, None);
    rp.compare_values(
        1.0,
        matches!(res, Err(SpatialError::InvalidInput(_))) as u8 as f64,
        0.0,
    );
    let line: Pta = vec![(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]
        .into_iter()
        .collect();
    let tess = voronoi(&line, None).expect("voronoi of a line");
    rp.compare_values(4.0, tess.cells.len() as f64, 0.0);
    rp.compare_values(18.0, tess.total_area(), 1e-9);
    let pair: Pta = vec![(0.0, 0.0), (1.0, 1.0)].into_iter().collect();
    let tess = voronoi(&pair, None).expect("voronoi of two points");
    rp.compare_values(2.0, tess.cells.len() as f64, 0.0);
    rp.compare_values(1.0, tess.total_area(), 1e-9);

    eprintln!("=== Cells that cannot be built ===");
    let dup: Pta = vec![
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (5.0, 5.0),
        (5.0, 5.0),
    ]
    .into_iter()
    .collect();
    let tess = voronoi(&dup, None).expect("voronoi with duplicate");
    let missing = tess
        .issues
        .iter()
        .filter(|i| {
            matches!(
                i,
                CellIssue::DegenerateGeometry {
                    reason: DegenerateReason::Missing,
                    ..
                }
            )
        })
        .count();
    rp.compare_values(1.0, tess.issues.len() as f64, 0.0);
    rp.compare_values(1.0, missing as f64, 0.0);
    rp.compare_values(5.0, tess.cells.len() as f64, 0.0);
    rp.compare_values(100.0, tess.total_area(), 1e-9);

    let far: Pta = vec![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (20.0, 20.0)]
        .into_iter()
        .collect();
    let square = Polygon::rectangle(0.0, 0.0, 4.0, 4.0).expect("region");
    let tess = voronoi(&far, Some(&square)).expect("voronoi with far point");
    let clipped_away = tess.issues
        == [CellIssue::DegenerateGeometry {
            point: 4,
            reason: DegenerateReason::ClippedAway,
        }];
    rp.compare_values(1.0, clipped_away as u8 as f64, 0.0);
    rp.compare_values(4.0, tess.cells.len() as f64, 0.0);
    rp.compare_values(16.0, tess.total_area(), 1e-9);

    eprintln!("=== Voronoi from mask ===");
    let mask = Pix::from_rows(&[
        &[255, 0, 0, 0, 0, 0, 0, 255],
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[255, 0, 0, 0, 0, 0, 0, 255],
    ])
    .expect("mask");
    let (tess, centroids) = voronoi_from_mask(&mask).expect("voronoi from mask");
    rp.compare_values(4.0, centroids.len() as f64, 0.0);
    rp.compare_values(35.0, tess.total_area(), 1e-9);
    rp.compare_values(4.0, tess.graph.edge_count() as f64, 0.0);

    assert!(rp.cleanup(), "voronoi regression test failed");
}
