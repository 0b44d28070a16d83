use opus_model::Entity;
use opus_types::ModelId;
use std::fmt;

/// Points in a model's lifecycle at which plugins are called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    PreStore,
    PreFetch,
    PostStore,
    PostStoreInternal,
    PostStoreExternal,
    PreDelete,
    PostDelete,
}

impl Hook {
    pub const ALL: [Hook; 7] = [
        Hook::PreStore,
        Hook::PreFetch,
        Hook::PostStore,
        Hook::PostStoreInternal,
        Hook::PostStoreExternal,
        Hook::PreDelete,
        Hook::PostDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreStore => "preStore",
            Self::PreFetch => "preFetch",
            Self::PostStore => "postStore",
            Self::PostStoreInternal => "postStoreInternal",
            Self::PostStoreExternal => "postStoreExternal",
            Self::PreDelete => "preDelete",
            Self::PostDelete => "postDelete",
        }
    }

    /// True for hooks that accept a bare id instead of the entity.
    pub fn accepts_id(&self) -> bool {
        matches!(self, Self::PostDelete)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a hook is called with.
///
/// Hooks normally receive the owning entity. After a delete the entity may no
/// longer be valid, so `PostDelete` is called with the id alone.
#[derive(Debug)]
pub enum HookTarget<'a> {
    Entity(&'a mut Entity),
    Id(ModelId),
}

impl HookTarget<'_> {
    /// Whether a state-change listener should run for this target.
    pub fn has_state_transition(&self) -> bool {
        match self {
            Self::Entity(entity) => entity.has_state_transition(),
            Self::Id(_) => false,
        }
    }
}

impl<'a> From<&'a mut Entity> for HookTarget<'a> {
    fn from(entity: &'a mut Entity) -> Self {
        Self::Entity(entity)
    }
}

impl From<ModelId> for HookTarget<'_> {
    fn from(id: ModelId) -> Self {
        Self::Id(id)
    }
}
