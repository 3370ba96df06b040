use glam::Vec3;

/// Larger caps grow the buffer on demand
const PREALLOCATED_STEPS: usize = 1024;

/// Append-only history of recorded positions, capped at `max_steps`
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: Vec<Vec3>,
    max_steps: usize,
}

impl Trajectory {
    pub fn new(max_steps: usize) -> Self {
        Self {
            points: Vec::with_capacity(max_steps.min(PREALLOCATED_STEPS)),
            max_steps,
        }
    }

    /// Record a position. Returns false (and records nothing) once full.
    pub fn push(&mut self, position: Vec3) -> bool {
        if self.is_full() {
            return false;
        }
        self.points.push(position);
        true
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.max_steps
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_cap() {
        let mut trajectory = Trajectory::new(2);
        assert!(trajectory.push(Vec3::X));
        assert!(trajectory.push(Vec3::Y));
        assert!(!trajectory.push(Vec3::Z));
        assert_eq!(trajectory.points(), &[Vec3::X, Vec3::Y]);
        assert!(trajectory.is_full());
    }

    #[test]
    fn huge_cap_does_not_preallocate() {
        let mut trajectory = Trajectory::new(usize::MAX);
        assert!(trajectory.push(Vec3::ONE));
        assert_eq!(trajectory.max_steps(), usize::MAX);
        assert!(!trajectory.is_full());
    }

    #[test]
    fn zero_capacity_is_full_from_the_start() {
        let mut trajectory = Trajectory::new(0);
        assert!(trajectory.is_full());
        assert!(!trajectory.push(Vec3::ONE));
        assert!(trajectory.is_empty());
    }
}
