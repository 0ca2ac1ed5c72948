use linkboard_shared::{CategoryId, LinkId};

/// Clickable element kinds on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    EditLink,
    DeleteLink,
    DeleteCategory,
}

impl Affordance {
    /// Attribute naming the affordance kind on a rendered element.
    pub const KIND_ATTRIBUTE: &'static str = "data-affordance";
    /// Attribute holding the id of the entity the affordance acts on.
    pub const ID_ATTRIBUTE: &'static str = "data-id";

    pub fn as_str(self) -> &'static str {
        match self {
            Affordance::EditLink => "edit-link",
            Affordance::DeleteLink => "delete-link",
            Affordance::DeleteCategory => "delete-category",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "edit-link" => Some(Affordance::EditLink),
            "delete-link" => Some(Affordance::DeleteLink),
            "delete-category" => Some(Affordance::DeleteCategory),
            _ => None,
        }
    }
}

/// What a front-end knows about one element on the path from the click
/// target up to the board container: the raw kind and id attributes, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub kind: Option<String>,
    pub id: Option<String>,
}

impl TargetDescriptor {
    pub fn untagged() -> Self {
        Self::default()
    }

    pub fn tagged(affordance: Affordance, id: i64) -> Self {
        Self {
            kind: Some(affordance.as_str().to_string()),
            id: Some(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    EditLink(LinkId),
    DeleteLink(LinkId),
    DeleteCategory(CategoryId),
    None,
}

/// Classifies a click from the descriptors of the target and its ancestors,
/// nearest first.
///
/// The nearest element carrying a known affordance decides. If that element
/// has no usable id the click is ignored rather than passed outward.
pub fn classify<'a, I>(path: I) -> Intent
where
    I: IntoIterator<Item = &'a TargetDescriptor>,
{
    for descriptor in path {
        let Some(affordance) = descriptor.kind.as_deref().and_then(Affordance::parse) else {
            continue;
        };

        let Some(id) = descriptor
            .id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
        else {
            tracing::warn!(kind = affordance.as_str(), id = ?descriptor.id, "affordance without a usable id");
            return Intent::None;
        };

        return match affordance {
            Affordance::EditLink => Intent::EditLink(id),
            Affordance::DeleteLink => Intent::DeleteLink(id),
            Affordance::DeleteCategory => Intent::DeleteCategory(id),
        };
    }

    Intent::None
}
