use approx::assert_relative_eq;
use glam::{DVec3, IVec3};
use woolz_hull::{
    convex_hull_3d, hull_of_int_points, hull_of_points, Degeneracy, HullOutcome, HullPoint3,
    HullStatus, HullVertices, VertexType, Vertices,
};

fn unit_tetra() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    ]
}

fn sorted(mut v: Vec<DVec3>) -> Vec<DVec3> {
    v.sort_by(|a, b| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });
    v
}

#[test]
fn tetrahedron_is_its_own_hull() {
    let pts = unit_tetra();
    let outcome = convex_hull_3d(VertexType::D3, 4, Some(Vertices::D3(&pts))).unwrap();
    assert_eq!(outcome.status, HullStatus::Ok);
    assert_eq!(outcome.domain.vertex_count(), 4);
    assert_eq!(outcome.domain.face_count(), 4);
    let c = outcome.domain.centroid_dvec3();
    assert_relative_eq!(c.x, 0.25);
    assert_relative_eq!(c.y, 0.25);
    assert_relative_eq!(c.z, 0.25);
    assert_eq!(sorted(outcome.domain.positions()), sorted(pts));
}

#[test]
fn interior_point_is_discarded() {
    let mut pts = unit_tetra();
    let plain = hull_of_points(&pts).unwrap();
    pts.push(DVec3::splat(0.1));
    let outcome = hull_of_points(&pts).unwrap();
    assert_eq!(outcome.status, HullStatus::Ok);
    assert_eq!(outcome.domain.vertex_count(), 4);
    assert_eq!(outcome.domain.face_count(), 4);
    assert_eq!(
        sorted(outcome.domain.positions()),
        sorted(plain.domain.positions())
    );
}

#[test]
fn cube_corners() {
    let cube: Vec<DVec3> = (0..8)
        .map(|i| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
        .collect();
    let outcome = hull_of_points(&cube).unwrap();
    assert_eq!(outcome.status, HullStatus::Ok);
    assert_eq!(outcome.domain.vertex_count(), 8);
    assert_eq!(outcome.domain.face_count(), 12);
    let c = outcome.domain.centroid_dvec3();
    assert_relative_eq!(c.x, 0.5);
    assert_relative_eq!(c.y, 0.5);
    assert_relative_eq!(c.z, 0.5);
}

#[test]
fn integer_cube_keeps_integer_representation() {
    let cube: Vec<IVec3> = (0..8)
        .map(|i| IVec3::new(i & 1, (i >> 1) & 1, (i >> 2) & 1) * 2)
        .collect();
    let outcome = hull_of_int_points(&cube).unwrap();
    assert_eq!(outcome.domain.vertex_type(), VertexType::I3);
    assert_eq!(outcome.domain.face_count(), 12);
    assert_eq!(outcome.domain.centroid(), HullPoint3::Int(IVec3::ONE));
    let HullVertices::Int(vertices) = outcome.domain.vertices() else {
        panic!("expected integer vertices");
    };
    for v in vertices {
        assert!(cube.contains(v));
    }
}

#[test]
fn coplanar_pentagon_gives_fan() {
    let pentagon: Vec<DVec3> = (0..5)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 5.0;
            DVec3::new(a.cos(), a.sin(), 0.0)
        })
        .collect();
    let outcome = hull_of_points(&pentagon).unwrap();
    assert_eq!(outcome.status, HullStatus::Degenerate(Degeneracy::Coplanar));
    assert_eq!(outcome.domain.vertex_count(), 6);
    assert_eq!(outcome.domain.face_count(), 5);

    let hub = outcome.domain.position(0);
    assert_relative_eq!(hub.length(), 0.0, epsilon = 1.0e-9);
    for p in outcome.domain.positions() {
        assert_relative_eq!(p.z, 0.0, epsilon = 1.0e-9);
    }
    for (i, face) in outcome.domain.faces().iter().enumerate() {
        assert_eq!(face[0], 0);
        assert_eq!(face[1], i + 1);
        assert_eq!(face[2], (i + 1) % 5 + 1);
    }
}

#[test]
fn coincident_points_give_single_vertex() {
    let pts = [DVec3::ZERO; 5];
    let outcome = hull_of_points(&pts).unwrap();
    assert_eq!(outcome.status, HullStatus::Degenerate(Degeneracy::Coincident));
    assert_eq!(outcome.domain.vertex_count(), 1);
    assert_eq!(outcome.domain.face_count(), 1);
    assert_eq!(outcome.domain.faces(), &[[0, 0, 0]]);
    assert_eq!(outcome.domain.centroid(), HullPoint3::Double(DVec3::ZERO));
}

#[test]
fn outcome_survives_json() {
    let pts = unit_tetra();
    let outcome = hull_of_points(&pts).unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let back: HullOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcome);

    let flat = hull_of_int_points(&[IVec3::ZERO, IVec3::X, IVec3::Y, IVec3::ONE.with_z(0)]).unwrap();
    let json = serde_json::to_string(&flat).unwrap();
    assert!(json.contains("Coplanar"));
    let back: HullOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back, flat);
}
