/// Read-through caching of a catalog call.
///
/// Looks the key up in the cache and returns the hit. On a miss the block is awaited,
/// its value queued for a background write, and returned. A failing cache read is
/// logged and treated as a miss so the catalog stays reachable while Redis is down.
///
/// # Arguments
/// * `$cache`: a value with `get_from_cache` and `set_in_background` methods.
/// * `$key`: the `CacheKey` to read and write.
/// * `$ttl`: time-to-live in seconds for a freshly computed value.
/// * `$block`: a future producing `Result<T, E>` for the uncached value.
///
/// # Example
/// ```rust,ignore
/// let detail = cached!(self.cache, CacheKey::Details(id), DETAIL_CACHE_TTL, async move {
///     self.inner.fetch_movie_details(id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match $cache.get_from_cache(&key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                None
            }
        };

        if let Some(cached) = hit {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
