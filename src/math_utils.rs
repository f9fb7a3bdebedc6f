/// Mathematical utilities for curve evaluation and point calculations
use euclid::default::Point2D;

/// Calculate quadratic Bezier point at parameter t
pub fn quadratic_point<T>(p0: (T, T), p1: (T, T), p2: (T, T), t: T) -> (T, T)
where
    T: num_traits::Float,
{
    let u = T::one() - t;
    let two = T::one() + T::one();
    let a = u * u;
    let b = two * u * t;
    let c = t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0,
        a * p0.1 + b * p1.1 + c * p2.1,
    )
}

/// Calculate distance between two points
pub fn distance<T>(p1: (T, T), p2: (T, T)) -> T
where
    T: num_traits::Float,
{
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;
    (dx * dx + dy * dy).sqrt()
}

pub fn point_distance(a: Point2D<f64>, b: Point2D<f64>) -> f64 {
    distance(a.to_tuple(), b.to_tuple())
}

pub fn midpoint(a: Point2D<f64>, b: Point2D<f64>) -> Point2D<f64> {
    a.lerp(b, 0.5)
}
