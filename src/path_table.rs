use crate::curve::QuadraticCurve;
use crate::math_utils::point_distance;
use euclid::default::Point2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub position: Point2D<f64>,
    /// Arc length from the start of the path
    pub distance: f64,
    pub t: f64,
}

/// Arc-length lookup table over a curve.
///
/// Built once from `steps + 1` uniform parameter samples; distances are the running sum of
/// the chord lengths between consecutive samples, so both `distance` and `t` never decrease.
#[derive(Debug, Clone)]
pub struct PathTable {
    samples: Vec<PathSample>,
}

impl PathTable {
    pub fn build(curve: &QuadraticCurve, steps: usize) -> Self {
        let steps = steps.max(1);
        let mut samples = Vec::with_capacity(steps + 1);
        samples.push(PathSample {
            position: curve.p0,
            distance: 0.0,
            t: 0.0,
        });

        let mut total = 0.0;
        let mut prev = curve.p0;
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let position = curve.evaluate(t);
            total += point_distance(prev, position);
            samples.push(PathSample {
                position,
                distance: total,
                t,
            });
            prev = position;
        }

        Self { samples }
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total_distance(&self) -> f64 {
        self.samples.last().map(|s| s.distance).unwrap_or(0.0)
    }

    /// First sample at or after `resume` whose distance is at least `distance`.
    ///
    /// `resume` is moved onto the returned sample so a sweep with increasing distances never
    /// rescans the start of the table. Returns `None` past the end of the path.
    pub fn position_at_distance(&self, distance: f64, resume: &mut usize) -> Option<&PathSample> {
        let start = (*resume).min(self.samples.len());
        let offset = self.samples[start..]
            .iter()
            .position(|s| s.distance >= distance)?;
        *resume = start + offset;
        self.samples.get(*resume)
    }

    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor {
            table: self,
            index: 0,
        }
    }
}

/// Forward-only walk over a [`PathTable`].
#[derive(Debug, Clone)]
pub struct PathCursor<'a> {
    table: &'a PathTable,
    index: usize,
}

impl<'a> PathCursor<'a> {
    pub fn seek(&mut self, distance: f64) -> Option<&'a PathSample> {
        let table: &'a PathTable = self.table;
        table.position_at_distance(distance, &mut self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
