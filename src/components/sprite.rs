use std::sync::Arc;

use bevy_ecs::prelude::Component;

/// Opaque texture reference. The renderer decides what the key means; the
/// core only stores it, compares it and forwards it in draw commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(Arc<str>);

impl TextureHandle {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Drawable sprite covering the entity's [`Size`](super::size::Size).
/// Entities whose texture is `None` are skipped when drawing.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub texture: Option<TextureHandle>,
}

impl Sprite {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
        }
    }
}
