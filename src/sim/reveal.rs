//! Fixed timestep path reveal
//!
//! Moves a pen along a resolved path's waypoints at a constant speed. The
//! result is already recorded by the session; this only stretches its
//! presentation over time.

use glam::Vec2;

use crate::consts::*;

/// Pen progress along a waypoint polyline
#[derive(Debug, Clone)]
pub struct RevealAnimation {
    points: Vec<Vec2>,
    /// Cumulative length at each waypoint (same length as `points`)
    lengths: Vec<f32>,
    /// Ladder units per second
    speed: f32,
    /// Distance travelled so far
    travelled: f32,
    /// Unsimulated frame time
    accumulator: f32,
}

impl RevealAnimation {
    pub fn new(points: Vec<Vec2>, speed: f32) -> Self {
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            lengths.push(total);
        }
        Self {
            points,
            lengths,
            speed,
            travelled: 0.0,
            accumulator: 0.0,
        }
    }

    /// Total polyline length
    pub fn total_length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Fraction of the path drawn, in [0, 1]
    pub fn progress(&self) -> f32 {
        let total = self.total_length();
        if total <= 0.0 {
            1.0
        } else {
            (self.travelled / total).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.travelled >= self.total_length()
    }

    /// Advance the pen by `dt` seconds and return its position
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.travelled = (self.travelled + self.speed * dt).clamp(0.0, self.total_length());
        self.pen()
    }

    /// Run whole fixed steps out of a variable frame time
    pub fn step_frame(&mut self, frame_dt: f32) -> Vec2 {
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= REVEAL_DT && substeps < MAX_SUBSTEPS {
            self.advance(REVEAL_DT);
            self.accumulator -= REVEAL_DT;
            substeps += 1;
        }
        self.pen()
    }

    /// Jump straight to the end
    pub fn skip(&mut self) {
        self.travelled = self.total_length();
        self.accumulator = 0.0;
    }

    /// Current pen position
    pub fn pen(&self) -> Vec2 {
        let Some(first) = self.points.first() else {
            return Vec2::ZERO;
        };
        let seg = self.lengths.partition_point(|&l| l <= self.travelled);
        if seg == 0 {
            return *first;
        }
        if seg >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let (a, b) = (self.points[seg - 1], self.points[seg]);
        let seg_len = self.lengths[seg] - self.lengths[seg - 1];
        if seg_len <= 0.0 {
            return b;
        }
        a.lerp(b, (self.travelled - self.lengths[seg - 1]) / seg_len)
    }

    /// Polyline drawn so far, ending at the pen
    pub fn visible_points(&self) -> Vec<Vec2> {
        let mut visible: Vec<Vec2> = self
            .points
            .iter()
            .zip(&self.lengths)
            .take_while(|&(_, &l)| l <= self.travelled)
            .map(|(p, _)| *p)
            .collect();
        let pen = self.pen();
        if visible.last() != Some(&pen) {
            visible.push(pen);
        }
        visible
    }
}
