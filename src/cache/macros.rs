/// Wraps a fallible provider call in a [`QueryCache`](crate::cache::QueryCache) lookup.
///
/// On a hit the stored snapshot is returned without evaluating the block. On a
/// miss the block runs once, even when several callers ask for the same key at
/// the same time, and its `Ok` value is stored. Errors are returned as-is and
/// never stored.
///
/// # Arguments
/// * `$cache`: The cache instance to use for retrieval and storage.
/// * `$key`: The [`CacheKey`](crate::cache::CacheKey) for the value.
/// * `$block`: Async block producing `Result<V, E>` on a miss.
///
/// # Example
/// ```rust,ignore
/// let spots = cached!(self.cache, key, async {
///     fetch_spots().await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        $cache.get_or_try_populate($key, || $block).await
    }};
}
