#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Skip list: {0}")]
    SkipList(#[from] skiprank_skiplist::Error),

    #[error("Nothing to rank")]
    EmptyInput,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
