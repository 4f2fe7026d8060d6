//! The immutable relational dataset produced by one generation pass.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::entities::{Opportunity, Partner, Project, Skill, User, Video};
use crate::error::SerializeError;

/// An entity addressable by its content-store id.
pub trait Keyed {
    /// Returns the record id.
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Keyed for $entity {
                fn key(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

keyed_by_id!(User, Skill, Project, Opportunity, Partner, Video);

/// Entities of one kind in source order, indexed by id.
///
/// Ids are unique: [`insert`](Self::insert) refuses a second entity with an
/// id already present.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Collection<T> {
    /// Appends `item`, handing it back if its id is already taken.
    pub(crate) fn insert(&mut self, item: T) -> Result<(), T> {
        if self.index.contains_key(item.key()) {
            return Err(item);
        }
        self.index.insert(item.key().to_owned(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Keeps only the entities `keep` accepts, preserving order.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.items.retain(|item| keep(item));
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.key().to_owned(), position))
            .collect();
    }

    /// Looks an entity up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).and_then(|&position| self.items.get(position))
    }

    /// Returns `true` when an entity with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

impl<T> Collection<T> {
    /// Iterates in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the entities in source order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Every decoded entity of one generation pass.
///
/// Built once by [`build_dataset`](crate::build_dataset) and read-only
/// afterwards; consumers receive it by reference. All opportunities in a
/// dataset have a resolvable project and owner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub(crate) users: Collection<User>,
    pub(crate) skills: Collection<Skill>,
    pub(crate) projects: Collection<Project>,
    pub(crate) opportunities: Collection<Opportunity>,
    pub(crate) partners: Collection<Partner>,
    pub(crate) videos: Collection<Video>,
}

impl Dataset {
    /// All users.
    #[must_use]
    pub const fn users(&self) -> &Collection<User> {
        &self.users
    }

    /// All skills, in the content store's declared order.
    #[must_use]
    pub const fn skills(&self) -> &Collection<Skill> {
        &self.skills
    }

    /// All projects, hidden ones included.
    #[must_use]
    pub const fn projects(&self) -> &Collection<Project> {
        &self.projects
    }

    /// All opportunities, drafts included.
    #[must_use]
    pub const fn opportunities(&self) -> &Collection<Opportunity> {
        &self.opportunities
    }

    /// All partners.
    #[must_use]
    pub const fn partners(&self) -> &Collection<Partner> {
        &self.partners
    }

    /// All videos.
    #[must_use]
    pub const fn videos(&self) -> &Collection<Video> {
        &self.videos
    }

    /// Total number of entities across kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
            + self.skills.len()
            + self.projects.len()
            + self.opportunities.len()
            + self.partners.len()
            + self.videos.len()
    }

    /// Returns `true` when no entity of any kind was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialises the dataset as pretty-printed JSON for page generators.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, SerializeError> {
        serde_json::to_string_pretty(self).map_err(|err| SerializeError {
            what: "dataset",
            message: err.to_string(),
        })
    }
}
