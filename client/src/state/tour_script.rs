//! Copy and placement for each tour step.

#[cfg(test)]
#[path = "tour_script_test.rs"]
mod tour_script_test;

use std::collections::HashMap;

use super::tour::TourStep;

/// Page a step is shown on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TourPage {
    Home,
    Inventory,
    ShoppingLists,
    ShoppingList,
    Recipes,
    Settings,
}

impl TourPage {
    /// Route to send the user to when the step lives elsewhere. Steps on a
    /// single list's page resume from the list index.
    pub fn route(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Inventory => "/inventory",
            Self::ShoppingLists | Self::ShoppingList => "/shopping-lists",
            Self::Recipes => "/recipes",
            Self::Settings => "/settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Inventory => "Inventory",
            Self::ShoppingLists | Self::ShoppingList => "Shopping lists",
            Self::Recipes => "Recipes",
            Self::Settings => "Settings",
        }
    }
}

/// How a step is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Centered card over a dimmed page.
    Modal,
    /// Callout pinned to the control named by `anchor`.
    Tooltip { anchor: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepContent {
    pub title: &'static str,
    pub body: &'static str,
    pub action_label: &'static str,
    pub page: TourPage,
    pub presentation: Presentation,
    /// Advance on a timer instead of waiting for the action button.
    pub auto_advance: bool,
}

const fn modal(title: &'static str, body: &'static str, action_label: &'static str, page: TourPage) -> StepContent {
    StepContent { title, body, action_label, page, presentation: Presentation::Modal, auto_advance: false }
}

const fn tooltip(title: &'static str, body: &'static str, page: TourPage, anchor: &'static str) -> StepContent {
    StepContent {
        title,
        body,
        action_label: "Got it",
        page,
        presentation: Presentation::Tooltip { anchor },
        auto_advance: false,
    }
}

/// Content for `step`, or `None` for the sentinels.
#[allow(clippy::too_many_lines)]
pub fn content(step: TourStep) -> Option<StepContent> {
    use TourPage::{Home, Inventory, Recipes, Settings, ShoppingList, ShoppingLists};

    let content = match step {
        TourStep::NotStarted | TourStep::Completed => return None,
        TourStep::WelcomeScreen => modal(
            "Welcome to Trackabite",
            "Track what's in your kitchen, waste less food, and turn what you have into meals. Let's take a quick tour.",
            "Start tour",
            Home,
        ),
        TourStep::GroceriesIntro => modal(
            "Your groceries, in one place",
            "Everything you buy lands in your inventory so you always know what's on hand.",
            "Next",
            Home,
        ),
        TourStep::AddGroceries => tooltip(
            "Add groceries",
            "Type items in by hand whenever you shop.",
            Home,
            "add-groceries",
        ),
        TourStep::ScanReceipt => tooltip(
            "Scan a receipt",
            "Snap a photo of your receipt and we'll pull out every item for you.",
            Home,
            "scan-receipt",
        ),
        TourStep::ReviewItems => StepContent {
            auto_advance: true,
            ..modal(
                "Review before saving",
                "Scanned items show up for a quick check. Fix names or quantities, then save them to your inventory.",
                "Next",
                Home,
            )
        },
        TourStep::InventoryIntro => modal(
            "Your inventory",
            "This is everything in your kitchen, sorted so the most urgent items come first.",
            "Next",
            Inventory,
        ),
        TourStep::ExpiryTracking => modal(
            "Never miss an expiry date",
            "Red means expired, orange means use it within a few days, and green means you're good.",
            "Next",
            Inventory,
        ),
        TourStep::ItemDetails => tooltip(
            "Item details",
            "Tap any item to see its quantity, category and expiry date.",
            Inventory,
            "inventory-item",
        ),
        TourStep::FilterInventory => tooltip(
            "Filter and search",
            "Narrow the list by category or search for something specific.",
            Inventory,
            "inventory-filter",
        ),
        TourStep::ShoppingListIntro => modal(
            "Shopping lists",
            "Plan your next trip, share lists with your household, and check items off as you go.",
            "Next",
            ShoppingLists,
        ),
        TourStep::CreateShoppingList => tooltip(
            "Create a list",
            "Start a new list for this week's shop.",
            ShoppingLists,
            "create-list",
        ),
        TourStep::AddListItem => tooltip(
            "Add items",
            "Add what you need, with an optional quantity.",
            ShoppingList,
            "add-list-item",
        ),
        TourStep::CheckOffItem => tooltip(
            "Check things off",
            "Tap an item once it's in your cart.",
            ShoppingList,
            "list-item-toggle",
        ),
        TourStep::ShareList => tooltip(
            "Shop together",
            "Share a code so others can add to and check off the same list.",
            ShoppingList,
            "share-list",
        ),
        TourStep::PurchaseToInventory => tooltip(
            "Done shopping?",
            "Move everything you checked off straight into your inventory.",
            ShoppingList,
            "purchase-to-inventory",
        ),
        TourStep::RecipesIntro => modal(
            "Recipes",
            "Save recipes you find and cook with what you already have.",
            "Next",
            Recipes,
        ),
        TourStep::ImportRecipe => tooltip(
            "Import from Instagram",
            "Paste a post or reel link and we'll extract the recipe.",
            Recipes,
            "import-recipe",
        ),
        TourStep::InstallShortcut => modal(
            "Share straight from Instagram",
            "Install the Trackabite shortcut to send recipes from the share sheet without copying links.",
            "Next",
            Recipes,
        ),
        TourStep::AiRecipesIntro => modal(
            "Recipes from your kitchen",
            "Get recipe ideas built around what's in your inventory, starting with what expires soonest.",
            "Next",
            Recipes,
        ),
        TourStep::GenerateRecipe => tooltip(
            "Generate a recipe",
            "Ask for a suggestion any time you're not sure what to cook.",
            Recipes,
            "generate-recipe",
        ),
        TourStep::SaveRecipe => tooltip(
            "Keep the good ones",
            "Save any recipe to find it again later.",
            Recipes,
            "save-recipe",
        ),
        TourStep::CloudSyncIntro => modal(
            "Back up to Google Drive",
            "Connect Google Drive to keep a copy of every saved recipe.",
            "Next",
            Settings,
        ),
        TourStep::SettingsIntro => modal(
            "Settings",
            "Manage your account, sync and notifications here.",
            "Next",
            Settings,
        ),
        TourStep::ReplayHint => tooltip(
            "Need a refresher?",
            "You can replay this tour from here at any time.",
            Settings,
            "replay-tour",
        ),
    };
    Some(content)
}

/// Tooltip anchors currently on screen, counted per step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountedAnchors(HashMap<TourStep, u32>);

impl MountedAnchors {
    pub fn mount(&mut self, step: TourStep) {
        *self.0.entry(step).or_default() += 1;
    }

    pub fn unmount(&mut self, step: TourStep) {
        if let Some(count) = self.0.get_mut(&step) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.0.remove(&step);
            }
        }
    }

    pub fn is_mounted(&self, step: TourStep) -> bool {
        self.0.contains_key(&step)
    }
}

/// What the tour modal on `page` shows for `step`.
///
/// Modal steps always render there. A tooltip step renders as a modal when
/// its anchor is not mounted (an empty inventory has no first row), so the
/// active step always has a Next and a Skip control.
pub fn modal_content(step: TourStep, page: TourPage, anchors: &MountedAnchors) -> Option<StepContent> {
    let c = content(step).filter(|c| c.page == page)?;
    match c.presentation {
        Presentation::Modal => Some(c),
        Presentation::Tooltip { .. } => (!anchors.is_mounted(step)).then_some(c),
    }
}
