//! # Skeleton
//!
//! The ball forest a skin is swept from. Each ball is a (possibly
//! anisotropically scaled) sphere with a parent link and an ordered list of
//! children. The sweep reads the skeleton and never mutates it.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::SkeletonError;

/// Index of a ball inside its [`Skeleton`].
pub type BallId = usize;

/// A sphere positioned at a skeleton node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Sphere center.
    pub center: DVec3,
    /// Radius along x.
    pub ex: f64,
    /// Radius along y.
    pub ey: f64,
    /// Radius along z.
    pub ez: f64,
    /// Parent ball, `None` for roots.
    pub parent: Option<BallId>,
    /// Children in sweep order.
    pub children: Vec<BallId>,
}

impl Ball {
    /// Creates an unlinked ball with the same radius on every axis.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self::with_radii(center, radius, radius, radius)
    }

    /// Creates an unlinked ball with independent per-axis radii.
    pub fn with_radii(center: DVec3, ex: f64, ey: f64, ez: f64) -> Self {
        Self {
            center,
            ex,
            ey,
            ez,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Largest of the three radius axes.
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.ex.max(self.ey).max(self.ez)
    }

    /// Per-axis radii as a vector.
    #[inline]
    pub fn radii(&self) -> DVec3 {
        DVec3::new(self.ex, self.ey, self.ez)
    }

    /// Returns true if the ball has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A forest of balls stored in a flat arena.
///
/// # Example
///
/// ```rust
/// use bmesh::Skeleton;
/// use glam::DVec3;
///
/// let mut skeleton = Skeleton::new();
/// let root = skeleton.add_ball(DVec3::ZERO, 1.0, None).unwrap();
/// let tip = skeleton.add_ball(DVec3::new(0.0, 4.0, 0.0), 0.5, Some(root)).unwrap();
/// assert_eq!(skeleton.ball(root).children, vec![tip]);
/// assert_eq!(skeleton.roots().collect::<Vec<_>>(), vec![root]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    balls: Vec<Ball>,
}

impl Skeleton {
    /// Creates an empty skeleton.
    pub fn new() -> Self {
        Self { balls: Vec::new() }
    }

    /// Wraps an existing ball list without checking it.
    ///
    /// Use [`Skeleton::validate`] before sweeping balls that did not come
    /// from [`Skeleton::add_ball`].
    pub fn from_balls(balls: Vec<Ball>) -> Self {
        Self { balls }
    }

    /// Adds a ball and links it under `parent`.
    pub fn add_ball(
        &mut self,
        center: DVec3,
        radius: f64,
        parent: Option<BallId>,
    ) -> Result<BallId, SkeletonError> {
        self.push_ball(Ball::new(center, radius), parent)
    }

    /// Adds a prepared ball and links it under `parent`.
    ///
    /// Any parent or children already set on `ball` are replaced.
    pub fn push_ball(
        &mut self,
        mut ball: Ball,
        parent: Option<BallId>,
    ) -> Result<BallId, SkeletonError> {
        let id = self.balls.len();
        if let Some(parent) = parent {
            if parent >= id {
                return Err(SkeletonError::DanglingParent { ball: id, parent });
            }
            self.balls[parent].children.push(id);
        }
        ball.parent = parent;
        ball.children.clear();
        self.balls.push(ball);
        Ok(id)
    }

    /// Returns the ball with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn ball(&self, id: BallId) -> &Ball {
        &self.balls[id]
    }

    /// Returns the ball with the given id, if present.
    #[inline]
    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.get(id)
    }

    /// Mutable access for editors adjusting centers and radii.
    pub fn ball_mut(&mut self, id: BallId) -> Result<&mut Ball, SkeletonError> {
        self.balls.get_mut(id).ok_or(SkeletonError::UnknownBall(id))
    }

    /// Returns all balls.
    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Returns the number of balls.
    #[inline]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    /// Returns true if the skeleton has no balls.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Iterates over the ids of all root balls in index order.
    pub fn roots(&self) -> impl Iterator<Item = BallId> + '_ {
        self.balls
            .iter()
            .enumerate()
            .filter(|(_, ball)| ball.is_root())
            .map(|(id, _)| id)
    }

    /// Checks the structural invariants the sweep relies on.
    ///
    /// Checks:
    /// - Every parent link points at an existing ball that lists the child
    /// - Every listed child points back at its parent
    /// - Parent links never form a cycle
    /// - Every radius axis is positive
    pub fn validate(&self) -> Result<(), SkeletonError> {
        let count = self.balls.len();

        for (id, ball) in self.balls.iter().enumerate() {
            if !(ball.ex > 0.0 && ball.ey > 0.0 && ball.ez > 0.0) {
                return Err(SkeletonError::NonPositiveRadius(id));
            }

            if let Some(parent) = ball.parent {
                if parent >= count {
                    return Err(SkeletonError::DanglingParent { ball: id, parent });
                }
                if !self.balls[parent].children.contains(&id) {
                    return Err(SkeletonError::MissingChildLink { ball: id, parent });
                }
            }

            for &child in &ball.children {
                let actual = self
                    .balls
                    .get(child)
                    .ok_or(SkeletonError::UnknownBall(child))?
                    .parent;
                if actual != Some(id) {
                    return Err(SkeletonError::ForeignChild {
                        parent: id,
                        child,
                        actual,
                    });
                }
            }
        }

        // A walk longer than the ball count must have revisited a ball.
        for id in 0..count {
            let mut current = self.balls[id].parent;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if steps > count {
                    return Err(SkeletonError::Cycle(id));
                }
                current = self.balls[parent].parent;
            }
        }

        Ok(())
    }
}
