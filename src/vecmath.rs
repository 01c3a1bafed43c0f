//! contains some very simple helpers for 2d steering math

pub type Vector = [f64; 2];

/// calculates the length of a vector
pub fn len(inp: Vector) -> f64 {
    ((inp[0] * inp[0]) + (inp[1] * inp[1])).sqrt()
}

/// turns the input into a vector that has length 1.
/// a zero-length input comes back as the zero vector, not as NaN,
/// callers treat that as "no direction".
pub fn norm(mut inp: Vector) -> Vector {
    let len = len(inp);
    if len == 0. {
        return inp;
    }
    inp[0] /= len;
    inp[1] /= len;
    inp
}

/// componet-wise addition
pub fn add(mut a: Vector, b: Vector) -> Vector {
    a[0] += b[0];
    a[1] += b[1];
    a
}

/// componet-wise subtraction, a - b
pub fn sub(mut a: Vector, b: Vector) -> Vector {
    a[0] -= b[0];
    a[1] -= b[1];
    a
}

/// scales a vector by a scalar
pub fn scale(mut a: Vector, scalar: f64) -> Vector {
    a[0] *= scalar;
    a[1] *= scalar;
    a
}

/// euclidean distance between two points
pub fn dist(a: Vector, b: Vector) -> f64 {
    len(sub(a, b))
}

/// heading of a vector in radians, (-pi, pi]
pub fn atan2(inp: Vector) -> f64 {
    inp[1].atan2(inp[0])
}

/// caps the length of a vector while keeping its direction.
/// goes through the heading angle instead of rescaling by the ratio,
/// which stays stable for inputs of near-zero length.
pub fn clamp_len(inp: Vector, max: f64) -> Vector {
    if len(inp) > max {
        let angle = atan2(inp);
        [angle.cos() * max, angle.sin() * max]
    } else {
        inp
    }
}

#[test]
fn norm_of_zero_is_zero() {
    assert_eq!(norm([0., 0.]), [0., 0.]);
}

#[test]
fn norm_unit() {
    let n = norm([3., 4.]);
    assert!((n[0] - 0.6).abs() < 1e-12);
    assert!((n[1] - 0.8).abs() < 1e-12);
    assert!((len(n) - 1.).abs() < 1e-12);
}

#[test]
fn dist_345() {
    assert!((dist([1., 1.], [4., 5.]) - 5.).abs() < 1e-12);
}

#[test]
fn clamp_len_leaves_short_vectors_alone() {
    let v = [0.03, -0.04];
    assert_eq!(clamp_len(v, 0.1), v);
}

#[test]
fn clamp_len_caps_and_keeps_direction() {
    let v = [30., 40.];
    let c = clamp_len(v, 0.1);
    assert!((len(c) - 0.1).abs() < 1e-12);
    // same heading as the input
    assert!((atan2(c) - atan2(v)).abs() < 1e-12);
}
