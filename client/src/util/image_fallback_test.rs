use super::*;

#[test]
fn healthy_url_resolves_remote() {
    let cache = ImageFallbackCache::default();
    assert_eq!(
        cache.resolve(Some("https://cdn.example/milk.jpg"), "Milk", None),
        ImageSource::Remote("https://cdn.example/milk.jpg".to_owned())
    );
}

#[test]
fn missing_or_blank_url_uses_icon() {
    let cache = ImageFallbackCache::default();
    assert_eq!(cache.resolve(None, "Milk", None), ImageSource::Icon("🥛"));
    assert_eq!(cache.resolve(Some("  "), "Mystery", Some("Fruit")), ImageSource::Icon("🍎"));
}

#[test]
fn failed_url_is_remembered() {
    let mut cache = ImageFallbackCache::default();
    assert!(cache.mark_failed("https://cdn.example/x.jpg"));
    assert!(!cache.mark_failed("https://cdn.example/x.jpg"));
    assert!(cache.has_failed("https://cdn.example/x.jpg"));
    assert_eq!(
        cache.resolve(Some("https://cdn.example/x.jpg"), "Tomato", None),
        ImageSource::Icon("🍅")
    );
}

#[test]
fn session_cache_is_shared_across_calls() {
    mark_failed("https://cdn.example/broken.png");
    assert_eq!(resolve(Some("https://cdn.example/broken.png"), "Zzyzx", None), ImageSource::Icon(icons::DEFAULT_ICON));
    assert_eq!(
        resolve(Some("https://cdn.example/ok.png"), "Zzyzx", None),
        ImageSource::Remote("https://cdn.example/ok.png".to_owned())
    );
}
