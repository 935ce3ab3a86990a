//! Difficulty levels and the search settings they map to.

/// Empty-cell count at or below which the endgame solver drops the depth cap.
pub const ENDGAME_EMPTIES: u32 = 12;

/// Search settings derived from a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: u8,
    /// Deepest iterative-deepening iteration outside the endgame
    pub max_depth: u8,
    /// Chance of playing a uniformly random legal move instead of searching
    pub error_probability: f64,
    /// Add the mobility term to the evaluation
    pub use_mobility: bool,
    /// Search to the end of the game once few empties remain
    pub use_endgame_solver: bool,
}

impl Difficulty {
    pub fn from_level(level: u8) -> Self {
        let lvl = i32::from(level);
        Self {
            level,
            max_depth: (lvl * 2).clamp(2, 12) as u8,
            error_probability: f64::from((5 - lvl).max(0)) * 0.1,
            use_mobility: level >= 3,
            use_endgame_solver: level >= 5,
        }
    }

    /// Depth cap for the position: uncapped (enough plies to reach the end of
    /// the game, passes included) when the endgame solver applies.
    pub fn depth_for(&self, empties: u32) -> u8 {
        if self.use_endgame_solver && empties <= ENDGAME_EMPTIES {
            (empties * 2).max(2) as u8
        } else {
            self.max_depth
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_level(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_table() {
        let d = Difficulty::from_level(1);
        assert_eq!(d.max_depth, 2);
        assert!((d.error_probability - 0.4).abs() < 1e-9);
        assert!(!d.use_mobility);
        assert!(!d.use_endgame_solver);

        let d = Difficulty::from_level(3);
        assert_eq!(d.max_depth, 6);
        assert!((d.error_probability - 0.2).abs() < 1e-9);
        assert!(d.use_mobility);
        assert!(!d.use_endgame_solver);

        let d = Difficulty::from_level(5);
        assert_eq!(d.max_depth, 10);
        assert_eq!(d.error_probability, 0.0);
        assert!(d.use_endgame_solver);
    }

    #[test]
    fn test_depth_is_clamped() {
        assert_eq!(Difficulty::from_level(0).max_depth, 2);
        assert_eq!(Difficulty::from_level(6).max_depth, 12);
        assert_eq!(Difficulty::from_level(200).max_depth, 12);
        assert_eq!(Difficulty::from_level(0).error_probability, 0.5);
        assert_eq!(Difficulty::from_level(9).error_probability, 0.0);
    }

    #[test]
    fn test_endgame_removes_depth_cap() {
        let hard = Difficulty::from_level(5);
        assert_eq!(hard.depth_for(30), 10);
        assert_eq!(hard.depth_for(12), 24);
        assert_eq!(hard.depth_for(3), 6);

        let medium = Difficulty::from_level(4);
        assert_eq!(medium.depth_for(5), 8);
    }
}
