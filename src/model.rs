use itertools::Itertools;
use rand::Rng;

use crate::distance::euclidian_distance;
use crate::initialization::uniform_points;
use crate::palette::{random_color, Color, FALLBACK_COLOR};

// Define a point in 2D space
pub type Point = [f64; 2];

// Define a cluster centroid
pub type Centroid = Point;

const NUM_POINTS_MINIMUM: usize = 100;

/// Owns the clustering state: points, their group assignments, one centroid
/// per group, and a color palette with at least one entry per group.
///
/// Assignments are deliberately stale data. Nothing here recomputes them
/// behind the caller's back except the operations documented as doing so
/// (`add_points`, `add_centroid_at`).
pub struct ClusterModel {
    width: f64,
    height: f64,
    ngroups: usize,
    points: Vec<Point>,
    groups: Vec<usize>,
    centroids: Vec<Centroid>,
    palette: Vec<Color>,
    min_points: usize,
}

impl ClusterModel {
    /// Builds a model with `npoints` points and `ngroups` centroids sampled
    /// uniformly within the viewport. The palette is extended with random
    /// colors if it holds fewer than `ngroups` entries.
    pub fn new<R: Rng>(
        width: f64,
        height: f64,
        npoints: usize,
        ngroups: usize,
        palette: Vec<Color>,
        rng: &mut R,
    ) -> Self {
        let ngroups = ngroups.max(1);
        let mut model = Self {
            width,
            height,
            ngroups,
            points: uniform_points(width, height, npoints, rng),
            groups: vec![0; npoints],
            centroids: uniform_points(width, height, ngroups, rng),
            palette,
            min_points: NUM_POINTS_MINIMUM,
        };
        while model.palette.len() < model.ngroups {
            model.palette.push(random_color(rng));
        }
        model
    }

    /// Customize the population floor that `remove_points` will not shrink below.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    /// Stored centroid sequence. The live set is the first `group_count()`
    /// entries; `remove_group` retains a tail beyond that for re-growth.
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn group_count(&self) -> usize {
        self.ngroups
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Stored assignment of the point at `idx`, with anything outside
    /// [0, ngroups) read as group 0. Stale assignments survive group
    /// removal, so lookups clamp rather than trust the raw value.
    pub fn group_of(&self, idx: usize) -> usize {
        let g = self.groups[idx];
        if g < self.ngroups {
            g
        } else {
            0
        }
    }

    /// Palette entry for `group`, falling back to white for indices with no
    /// live group behind them.
    pub fn color_of(&self, group: usize) -> Color {
        if group < self.ngroups {
            self.palette[group]
        } else {
            FALLBACK_COLOR
        }
    }

    fn closest_index(&self, p: &Point) -> usize {
        let mut best = 0;
        for k in 1..self.ngroups {
            if euclidian_distance(p, &self.centroids[k]) < euclidian_distance(p, &self.centroids[best]) {
                best = k;
            }
        }
        best
    }

    /// Nearest-centroid index for every point, scanning the live centroid
    /// set (one per group; a tail retained by `remove_group` is not a
    /// candidate). Ties go to the lowest index. Pure query; the caller
    /// decides when to commit via `reassign_groups`.
    pub fn recalculate_groups(&self) -> Vec<usize> {
        self.points.iter().map(|p| self.closest_index(p)).collect_vec()
    }

    /// Mean position of the members of each group, read from the stored
    /// assignments. Returns one centroid per group; a group with no members
    /// keeps its current centroid. Pure query; the caller decides when to
    /// commit via `update_centroids`.
    pub fn recalculate_centroids(&self) -> Vec<Centroid> {
        let mut totals = vec![[0.0, 0.0]; self.ngroups];
        let mut counts = vec![0usize; self.ngroups];

        // Loop over all points to find new average positions
        for n in 0..self.points.len() {
            let g = self.group_of(n);
            counts[g] += 1;
            totals[g][0] += self.points[n][0];
            totals[g][1] += self.points[n][1];
        }

        let mut next = self.centroids[..self.ngroups].to_vec();
        for (g, &count) in counts.iter().enumerate() {
            if count != 0 {
                next[g] = [totals[g][0] / count as f64, totals[g][1] / count as f64];
            }
        }
        next
    }

    pub fn reassign_groups(&mut self) {
        self.groups = self.recalculate_groups();
    }

    pub fn update_centroids(&mut self) {
        self.centroids = self.recalculate_centroids();
    }

    /// Replaces the point set wholesale. Assignments reset to group 0 and
    /// stay that way until the caller asks for a reassignment.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.groups = vec![0; self.points.len()];
    }

    /// Replaces the centroid set wholesale, making its length the new group
    /// count and growing the palette to match. An empty set is ignored.
    pub fn set_centroids<R: Rng>(&mut self, centroids: Vec<Centroid>, rng: &mut R) {
        if centroids.is_empty() {
            return;
        }
        self.ngroups = centroids.len();
        self.centroids = centroids;
        while self.palette.len() < self.ngroups {
            self.palette.push(random_color(rng));
        }
    }

    /// Appends points and immediately reassigns the entire set, so the new
    /// points snap to their nearest centroids right away.
    pub fn add_points(&mut self, extra: Vec<Point>) {
        self.points.extend(extra);
        self.groups.resize(self.points.len(), 0);
        self.groups = self.recalculate_groups();
    }

    /// Drops up to `count` points from the tail, never going below the
    /// population floor. Assignments of the survivors are untouched.
    pub fn remove_points(&mut self, count: usize) {
        let want = self.points.len().saturating_sub(count).max(self.min_points);
        self.points.truncate(want);
        self.groups.truncate(want);
    }

    /// Bumps the group count. The palette and centroid sequences only grow
    /// when they are shorter than the new count, so a prior removal's
    /// retained tail is reused as-is. Assignments are untouched and the new
    /// group starts empty.
    pub fn add_group<R: Rng>(&mut self, rng: &mut R) {
        self.ngroups += 1;
        if self.palette.len() < self.ngroups {
            self.palette.push(random_color(rng));
        }
        if self.centroids.len() < self.ngroups {
            let pt = uniform_points(self.width, self.height, 1, rng);
            self.centroids.push(pt[0]);
        }
    }

    /// Drops the group count, no-op at 1. The centroid and palette tails are
    /// retained for re-growth; points still assigned to the dropped group
    /// read as group 0 until the next reassignment.
    pub fn remove_group(&mut self) {
        if self.ngroups > 1 {
            self.ngroups -= 1;
        }
    }

    /// Adds a group whose centroid is placed exactly at (x, y), then
    /// reassigns every point so members snap to the new centroid.
    pub fn add_centroid_at<R: Rng>(&mut self, x: f64, y: f64, rng: &mut R) {
        self.add_group(rng);
        self.centroids[self.ngroups - 1] = [x, y];
        self.groups = self.recalculate_groups();
    }

    /// Replaces all points and centroids with fresh uniform samples, keeping
    /// both counts. Assignments reset to group 0, not recomputed.
    pub fn reseed<R: Rng>(&mut self, rng: &mut R) {
        self.points = uniform_points(self.width, self.height, self.points.len(), rng);
        self.centroids = uniform_points(self.width, self.height, self.ngroups, rng);
        self.groups = vec![0; self.points.len()];
    }

    /// Updates the viewport bounds used by every random sampling operation.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Samples `n` points uniformly within the current viewport bounds.
    pub fn random_points<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Point> {
        uniform_points(self.width, self.height, n, rng)
    }
}
