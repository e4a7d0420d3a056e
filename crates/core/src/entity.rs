//! Entity trait: identity that survives state changes.
//!
//! Widgets reconcile lists of API resources by identity, so every DTO with an
//! id implements this.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

macro_rules! impl_entity {
    ($t:ty, $id:ty) => {
        impl $crate::entity::Entity for $t {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

pub(crate) use impl_entity;
