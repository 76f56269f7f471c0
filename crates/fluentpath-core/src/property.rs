use crate::model::TypeDescriptor;
use serde::Serialize;
use std::{fmt, sync::Arc};

///
/// ResolvedProperty
///
/// Immutable result of resolving an accessor reference: the dot-separated
/// property path and the declared type of the final accessor.
/// Cloning shares the path allocation.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ResolvedProperty {
    path: Arc<str>,
    leaf_type: TypeDescriptor,
}

impl ResolvedProperty {
    pub(crate) fn new(path: impl Into<Arc<str>>, leaf_type: TypeDescriptor) -> Self {
        let path = path.into();
        debug_assert!(!path.is_empty(), "resolved property paths are never empty");

        Self { path, leaf_type }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn leaf_type(&self) -> TypeDescriptor {
        self.leaf_type
    }

    /// Path segments in accessor call order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

impl fmt::Display for ResolvedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.leaf_type.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;

    #[test]
    fn segments_follow_the_path() {
        let property = ResolvedProperty::new(
            "post.author.team",
            TypeDescriptor::new("app::Team", TypeKind::Entity),
        );

        assert_eq!(
            property.segments().collect::<Vec<_>>(),
            ["post", "author", "team"]
        );
        assert_eq!(property.depth(), 3);
        assert_eq!(property.to_string(), "post.author.team: app::Team");
    }
}
