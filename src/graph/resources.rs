//! Normalized learning resources attached to a node.
//!
//! Four independent slots, each optional. `book` and `course` arrive either
//! as a titled link or as a bare string, so they keep both shapes.

use serde::Serialize;

/// A link with a display title. The URL may be missing when the generator
/// could not verify one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitledLink {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A book or course reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Reference {
    Titled(TitledLink),
    Text { text: String },
}

/// The resource bundle of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<TitledLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
}

impl Resources {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
            && self.book.is_none()
            && self.course.is_none()
            && self.challenge.is_none()
    }

    /// Badge glyphs for the node card, one per present slot.
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::with_capacity(4);
        if self.primary.is_some() {
            badges.push(ResourceKind::Primary.icon());
        }
        if self.book.is_some() {
            badges.push(ResourceKind::Book.icon());
        }
        if self.course.is_some() {
            badges.push(ResourceKind::Course.icon());
        }
        if self.challenge.is_some() {
            badges.push(ResourceKind::Challenge.icon());
        }
        badges
    }
}

/// Which slot a resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Primary,
    Book,
    Course,
    Challenge,
}

impl ResourceKind {
    pub fn icon(self) -> &'static str {
        match self {
            ResourceKind::Primary => "📖",
            ResourceKind::Book => "📚",
            ResourceKind::Course => "🎓",
            ResourceKind::Challenge => "💡",
        }
    }

    /// Label shown before the entry in the detail modal.
    pub fn label(self) -> Option<&'static str> {
        match self {
            ResourceKind::Primary => None,
            ResourceKind::Book => Some("Book"),
            ResourceKind::Course => Some("Course"),
            ResourceKind::Challenge => Some("Challenge"),
        }
    }
}
