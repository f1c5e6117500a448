/// Errors returned when constructing a `ShardedMap`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested shard count cannot partition the map.
    #[error("invalid configuration: shard count must be positive, got {shard_count}")]
    InvalidConfiguration { shard_count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration { shard_count: 0 };
        assert_eq!(
            err.to_string(),
            "invalid configuration: shard count must be positive, got 0"
        );
    }
}
