//! Category and item-name icon lookup.
//!
//! Resolution order: exact item name, exact category, alias to canonical
//! category, then the longest table key that overlaps the input as a
//! substring. Anything else gets [`DEFAULT_ICON`]. Matching ignores case.

#[cfg(test)]
#[path = "icons_test.rs"]
mod icons_test;

pub const DEFAULT_ICON: &str = "🛒";

/// Inputs shorter than this only match exactly.
const MIN_SUBSTRING_LEN: usize = 3;

const ITEM_ICONS: &[(&str, &str)] = &[
    ("Apple", "🍎"),
    ("Avocado", "🥑"),
    ("Bacon", "🥓"),
    ("Banana", "🍌"),
    ("Bread", "🍞"),
    ("Broccoli", "🥦"),
    ("Butter", "🧈"),
    ("Carrot", "🥕"),
    ("Cheese", "🧀"),
    ("Cherry", "🍒"),
    ("Chicken", "🍗"),
    ("Coffee", "☕"),
    ("Corn", "🌽"),
    ("Cucumber", "🥒"),
    ("Egg", "🥚"),
    ("Garlic", "🧄"),
    ("Grapes", "🍇"),
    ("Honey", "🍯"),
    ("Lemon", "🍋"),
    ("Lettuce", "🥬"),
    ("Mango", "🥭"),
    ("Milk", "🥛"),
    ("Mushroom", "🍄"),
    ("Onion", "🧅"),
    ("Orange", "🍊"),
    ("Pasta", "🍝"),
    ("Peach", "🍑"),
    ("Pear", "🍐"),
    ("Pepper", "🫑"),
    ("Pineapple", "🍍"),
    ("Potato", "🥔"),
    ("Rice", "🍚"),
    ("Salmon", "🐟"),
    ("Shrimp", "🦐"),
    ("Steak", "🥩"),
    ("Strawberry", "🍓"),
    ("Tea", "🍵"),
    ("Tomato", "🍅"),
    ("Watermelon", "🍉"),
    ("Wine", "🍷"),
    ("Yogurt", "🥣"),
];

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Vegetables", "🥦"),
    ("Fruits", "🍎"),
    ("Dairy", "🥛"),
    ("Meat", "🥩"),
    ("Seafood", "🐟"),
    ("Bakery", "🥐"),
    ("Beverages", "🥤"),
    ("Snacks", "🍿"),
    ("Frozen", "🧊"),
    ("Pantry", "🥫"),
    ("Condiments", "🧂"),
    ("Spices", "🌶️"),
    ("Grains", "🌾"),
    ("Deli", "🥪"),
    ("Sweets", "🍫"),
    ("Household", "🧻"),
];

/// Alias → canonical category.
const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("Veggies", "Vegetables"),
    ("Veg", "Vegetables"),
    ("Produce", "Vegetables"),
    ("Fruit", "Fruits"),
    ("Milk & Eggs", "Dairy"),
    ("Meats", "Meat"),
    ("Poultry", "Meat"),
    ("Fish", "Seafood"),
    ("Baked Goods", "Bakery"),
    ("Drinks", "Beverages"),
    ("Frozen Foods", "Frozen"),
    ("Canned Goods", "Pantry"),
    ("Dry Goods", "Pantry"),
    ("Sauces", "Condiments"),
    ("Herbs", "Spices"),
    ("Herbs & Spices", "Spices"),
    ("Cereal", "Grains"),
    ("Candy", "Sweets"),
    ("Cleaning", "Household"),
];

fn exact<'a>(table: &'a [(&'a str, &'a str)], needle: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(needle))
        .map(|(_, value)| *value)
}

fn category_icon(category: &str) -> Option<&'static str> {
    exact(CATEGORY_ICONS, category).or_else(|| {
        let canonical = exact(CATEGORY_ALIASES, category)?;
        exact(CATEGORY_ICONS, canonical)
    })
}

fn substring_icon(needle: &str) -> Option<&'static str> {
    let needle = needle.to_lowercase();
    ITEM_ICONS
        .iter()
        .chain(CATEGORY_ICONS.iter())
        .filter(|(key, _)| {
            let key = key.to_lowercase();
            needle.contains(&key) || (needle.len() >= MIN_SUBSTRING_LEN && key.contains(&needle))
        })
        .max_by_key(|(key, _)| key.len())
        .map(|(_, icon)| *icon)
}

/// Resolve a single name (item or category) to an icon.
pub fn resolve_icon(name: &str) -> &'static str {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_ICON;
    }
    exact(ITEM_ICONS, name)
        .or_else(|| category_icon(name))
        .or_else(|| substring_icon(name))
        .unwrap_or(DEFAULT_ICON)
}

/// Resolve an item's icon, preferring its own name and falling back to its
/// category before the default.
pub fn resolve_item_icon(name: &str, category: Option<&str>) -> &'static str {
    let by_name = resolve_icon(name);
    if by_name != DEFAULT_ICON {
        return by_name;
    }
    category.map_or(DEFAULT_ICON, resolve_icon)
}

/// Canonical category for display grouping, resolving aliases.
pub fn canonical_category(category: &str) -> Option<&'static str> {
    let category = category.trim();
    CATEGORY_ICONS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(category))
        .map(|(key, _)| *key)
        .or_else(|| exact(CATEGORY_ALIASES, category))
}
