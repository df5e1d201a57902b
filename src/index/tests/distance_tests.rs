use crate::index::distance::{euclidean_distance_squared, magnitude};

#[test]
fn test_euclidean_distance_squared() {
    let a = vec![1.0, 2.0];
    let b = vec![4.0, 6.0];
    // dx=3, dy=4. sq = 9+16=25.
    assert!((euclidean_distance_squared(&a, &b) - 25.0).abs() < 1e-6);
}

#[test]
fn test_identical_vectors_zero_distance() {
    let v = vec![0.3, -1.2, 4.5, 0.0, 2.2];
    assert_eq!(euclidean_distance_squared(&v, &v), 0.0);
}

#[test]
fn test_magnitude() {
    let v = vec![3.0, 4.0];
    assert!((magnitude(&v) - 5.0).abs() < 1e-6);
}

#[test]
fn test_loop_unrolling_matches_naive() {
    // Lengths around the unroll width exercise both the main loop and remainder
    for n in 1..12 {
        let a: Vec<f32> = (0..n).map(|i| i as f32 * 0.5).collect();
        let b: Vec<f32> = (0..n).map(|i| (n - i) as f32 * 0.25).collect();

        let naive: f32 = a.iter().zip(&b).map(|(x, y)| (x - y) * (x - y)).sum();
        assert!((euclidean_distance_squared(&a, &b) - naive).abs() < 1e-4, "n = {}", n);

        let naive_mag: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude(&a) - naive_mag).abs() < 1e-4, "n = {}", n);
    }
}

#[test]
fn test_unit_vectors_distance_relates_to_cosine() {
    // For unit vectors: |a - b|^2 = 2 - 2 cos(a, b)
    let a = vec![1.0, 0.0];
    let b = vec![0.0, 1.0];
    assert!((euclidean_distance_squared(&a, &b) - 2.0).abs() < 1e-6);

    let c = vec![-1.0, 0.0];
    assert!((euclidean_distance_squared(&a, &c) - 4.0).abs() < 1e-6);
}
