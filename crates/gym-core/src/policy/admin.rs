//! Administrator allow-list

use std::collections::HashSet;

use crate::value_objects::MemberId;

/// Members with administrator privileges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminList {
    ids: HashSet<MemberId>,
}

impl AdminList {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = MemberId>,
    {
        Self {
            ids: ids.into_iter().filter(|id| !id.as_str().is_empty()).collect(),
        }
    }

    /// Build from a comma-separated list of member ids
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(',').filter_map(|s| MemberId::parse(s).ok()))
    }

    #[inline]
    pub fn is_admin(&self, id: &MemberId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
