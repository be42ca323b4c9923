use super::*;

#[test]
fn reel_and_post_links_are_canonicalized() {
    assert_eq!(
        normalize_instagram_url("https://www.instagram.com/reel/C4abc123/?igsh=xyz"),
        Some("https://www.instagram.com/reel/C4abc123/".to_owned())
    );
    assert_eq!(
        normalize_instagram_url("instagram.com/p/Bq9/"),
        Some("https://www.instagram.com/p/Bq9/".to_owned())
    );
    assert_eq!(
        normalize_instagram_url(" http://m.instagram.com/reels/XYZ#comments "),
        Some("https://www.instagram.com/reels/XYZ/".to_owned())
    );
}

#[test]
fn non_instagram_or_profile_links_are_rejected() {
    assert_eq!(normalize_instagram_url("https://tiktok.com/@chef/video/1"), None);
    assert_eq!(normalize_instagram_url("https://www.instagram.com/chefjohn/"), None);
    assert_eq!(normalize_instagram_url("https://www.instagram.com/p/"), None);
    assert_eq!(normalize_instagram_url("not a url"), None);
}

#[test]
fn import_response_without_recipe_decodes() {
    let resp: ImportResponse = serde_json::from_value(serde_json::json!({ "error": "No recipe found" })).unwrap();
    assert_eq!(resp.recipe, None);
    assert_eq!(resp.error.as_deref(), Some("No recipe found"));
}

#[test]
fn shortcut_setup_decodes() {
    let setup: ShortcutSetup = serde_json::from_value(serde_json::json!({
        "token": "st_1",
        "installUrl": "https://www.icloud.com/shortcuts/abc"
    }))
    .unwrap();
    assert_eq!(setup.install_url, "https://www.icloud.com/shortcuts/abc");
    assert_eq!(setup.expires_at, None);
}
