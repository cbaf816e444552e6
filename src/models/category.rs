pub(crate) const FALLBACK_ICON: &str = "Label";

/// Icon names a category may be associated with.
pub(crate) const ICON_NAMES: &[&str] = &[
    "Fastfood",
    "Transport",
    "Rent",
    "Shopping",
    "Entertainment",
    "Smoking",
    "Travel",
    "School",
    "Gym",
    "Health",
    FALLBACK_ICON,
];

pub(crate) const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Entertainment", "Entertainment"),
    ("Food", "Fastfood"),
    ("Rent", "Rent"),
    ("Shopping", "Shopping"),
    ("Smoking", "Smoking"),
    ("Transport", "Transport"),
    ("Travel", "Travel"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) name: String,
    pub(crate) icon: Option<String>,
}

impl Category {
    pub(crate) fn new(name: String) -> Self {
        Self { name, icon: None }
    }

    pub(crate) fn with_icon(name: String, icon: String) -> Self {
        Self {
            name,
            icon: Some(icon),
        }
    }

    /// Icon to display, falling back to the generic label icon.
    pub(crate) fn icon_name(&self) -> &str {
        resolve_icon(self.icon.as_deref())
    }

    /// Find a category by exact name in a slice.
    pub(crate) fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.name == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Map a stored icon name to a known one. Unknown, empty or missing names
/// (orphaned categories included) resolve to [`FALLBACK_ICON`].
pub(crate) fn resolve_icon(icon: Option<&str>) -> &str {
    match icon {
        Some(name) => ICON_NAMES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(name))
            .copied()
            .unwrap_or(FALLBACK_ICON),
        None => FALLBACK_ICON,
    }
}

/// Icon for an expense's category label, looked up in the configured set.
pub(crate) fn icon_for<'a>(categories: &'a [Category], name: &str) -> &'a str {
    match Category::find_by_name(categories, name) {
        Some(cat) => cat.icon_name(),
        None => FALLBACK_ICON,
    }
}
