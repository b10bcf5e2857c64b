//! Dependency filtering functionality

use crate::manifest::DependencyType;

/// Encapsulates dependency filtering logic based on manifest sections
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyFilter {
    exclude_dev: bool,
    exclude_peer: bool,
    exclude_optional: bool,
}

impl DependencyFilter {
    /// Create a new dependency filter
    pub fn new(exclude_dev: bool, exclude_peer: bool, exclude_optional: bool) -> Self {
        Self {
            exclude_dev,
            exclude_peer,
            exclude_optional,
        }
    }

    /// Check if dev dependencies should be included
    pub fn include_dev(&self) -> bool {
        !self.exclude_dev
    }

    /// Check if peer dependencies should be included
    pub fn include_peer(&self) -> bool {
        !self.exclude_peer
    }

    /// Check if optional dependencies should be included
    pub fn include_optional(&self) -> bool {
        !self.exclude_optional
    }

    /// Check if a dependency declared in the given section counts
    pub fn should_include(&self, dep_type: DependencyType) -> bool {
        match dep_type {
            DependencyType::Normal => true,
            DependencyType::Dev => self.include_dev(),
            DependencyType::Peer => self.include_peer(),
            DependencyType::Optional => self.include_optional(),
        }
    }
}

impl From<&crate::common::FilterArgs> for DependencyFilter {
    fn from(args: &crate::common::FilterArgs) -> Self {
        Self::new(args.exclude_dev, args.exclude_peer, args.exclude_optional)
    }
}
