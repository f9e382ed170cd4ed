#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid max level: {0}, must be greater than 0")]
    InvalidMaxLevel(usize),

    #[error("Invalid promotion probability: {0}, must be in (0, 1)")]
    InvalidProbability(f64),

    #[error("Level out of range: {level}, current level is {current}")]
    LevelOutOfRange { level: usize, current: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn check_max_level(max_level: usize) -> Result<()> {
    if max_level == 0 {
        return Err(Error::InvalidMaxLevel(max_level));
    }
    Ok(())
}

pub(crate) fn check_probability(p: f64) -> Result<()> {
    // NaN fails both comparisons
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::InvalidProbability(p));
    }
    Ok(())
}
