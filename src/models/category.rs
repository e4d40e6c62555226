use super::TransactionType;

/// Color used for categories missing from the registry.
pub const FALLBACK_COLOR: &str = "#6b7280";
/// Icon used for categories missing from the registry.
pub const FALLBACK_ICON: &str = "💰";
/// Label used when a budget references an unknown category id.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub kind: TransactionType,
}

const fn category(
    id: &'static str,
    name: &'static str,
    color: &'static str,
    icon: &'static str,
    kind: TransactionType,
) -> Category {
    Category {
        id,
        name,
        color,
        icon,
        kind,
    }
}

static CATEGORIES: [Category; 10] = [
    category("1", "Salary", "#10b981", "💼", TransactionType::Income),
    category("2", "Freelance", "#059669", "💻", TransactionType::Income),
    category("3", "Investments", "#047857", "📈", TransactionType::Income),
    category("4", "Food & Dining", "#ef4444", "🍽️", TransactionType::Expense),
    category("5", "Transportation", "#dc2626", "🚗", TransactionType::Expense),
    category("6", "Shopping", "#b91c1c", "🛍️", TransactionType::Expense),
    category("7", "Entertainment", "#991b1b", "🎬", TransactionType::Expense),
    category("8", "Bills & Utilities", "#7f1d1d", "💡", TransactionType::Expense),
    category("9", "Healthcare", "#f59e0b", "🏥", TransactionType::Expense),
    category("10", "Education", "#d97706", "📚", TransactionType::Expense),
];

impl Category {
    pub fn all() -> &'static [Category] {
        &CATEGORIES
    }

    pub fn lookup_by_id(id: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.id == id)
    }

    /// Exact name match. Transactions reference categories by this name.
    pub fn lookup_by_name(name: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.name == name)
    }

    /// Registry order, filtered to one transaction type.
    pub fn list(kind: TransactionType) -> Vec<&'static Category> {
        CATEGORIES.iter().filter(|c| c.kind == kind).collect()
    }

    /// Resolve user input: an id first, then a case-insensitive name.
    pub fn resolve(input: &str) -> Option<&'static Category> {
        let input = input.trim();
        Self::lookup_by_id(input).or_else(|| {
            CATEGORIES
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(input))
        })
    }

    pub fn color_for(name: &str) -> &'static str {
        Self::lookup_by_name(name).map_or(FALLBACK_COLOR, |c| c.color)
    }

    pub fn icon_for(name: &str) -> &'static str {
        Self::lookup_by_name(name).map_or(FALLBACK_ICON, |c| c.icon)
    }

    /// Split a leading category name off free text, e.g.
    /// `"Food & Dining lunch with Sam"` → (Food & Dining, `"lunch with Sam"`).
    /// The longest matching name wins; matching ignores ASCII case.
    pub fn split_leading(
        text: &str,
        kind: Option<TransactionType>,
    ) -> Option<(&'static Category, &str)> {
        let text = text.trim_start();
        CATEGORIES
            .iter()
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .filter_map(|c| {
                let head = text.get(..c.name.len())?;
                if !head.eq_ignore_ascii_case(c.name) {
                    return None;
                }
                let rest = &text[c.name.len()..];
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    Some((c, rest.trim_start()))
                } else {
                    None
                }
            })
            .max_by_key(|(c, _)| c.name.len())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
