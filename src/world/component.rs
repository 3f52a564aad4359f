//! Component Model
//!
//! Components are typed data attached to entities; they carry no behavior.
//! Each component type has a stable `TypeTag` and a fixed-width big-endian
//! byte layout. Changing a layout requires a new tag, never an in-place
//! reinterpretation of the old one.

use serde::{Deserialize, Serialize};

use crate::core::codec;

/// Stable identifier for a component layout.
pub type TypeTag = u16;

/// A type with a stable tag and a fixed-layout byte encoding.
pub trait Component: Sized {
    /// Stable layout tag.
    const TYPE_TAG: TypeTag;

    /// Encoded width in bytes.
    const ENCODED_LEN: usize;

    /// Encode to the fixed big-endian layout.
    fn encode(&self) -> Vec<u8>;

    /// Decode from the fixed layout.
    ///
    /// Returns `None` unless `data` is exactly `ENCODED_LEN` bytes.
    fn decode(data: &[u8]) -> Option<Self>;
}

/// Position component for entities in 2D space.
///
/// Coordinates are unsigned; the movement system clamps at 0 so a position
/// can never go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl Component for Position {
    const TYPE_TAG: TypeTag = 1;
    const ENCODED_LEN: usize = 8;

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::ENCODED_LEN);
        codec::put_u32(&mut bytes, self.x);
        codec::put_u32(&mut bytes, self.y);
        bytes
    }

    fn decode(data: &[u8]) -> Option<Self> {
        if data.len() != Self::ENCODED_LEN {
            return None;
        }
        Some(Self {
            x: codec::read_u32(data, 0)?,
            y: codec::read_u32(data, 4)?,
        })
    }
}

/// Health component for entities.
///
/// `current` is clamped to `0..=maximum` by the combat system. An entity
/// with `current == 0` is dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: u32,
    /// Maximum health points; never changed by damage or healing.
    pub maximum: u32,
}

impl Health {
    /// Create a health component at full `maximum`.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }
}

impl Component for Health {
    const TYPE_TAG: TypeTag = 2;
    const ENCODED_LEN: usize = 8;

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::ENCODED_LEN);
        codec::put_u32(&mut bytes, self.current);
        codec::put_u32(&mut bytes, self.maximum);
        bytes
    }

    fn decode(data: &[u8]) -> Option<Self> {
        if data.len() != Self::ENCODED_LEN {
            return None;
        }
        Some(Self {
            current: codec::read_u32(data, 0)?,
            maximum: codec::read_u32(data, 4)?,
        })
    }
}

/// Invocation tick counter, held by the World as a resource (one instance,
/// attached to no entity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tick(pub u64);

impl Component for Tick {
    const TYPE_TAG: TypeTag = 64;
    const ENCODED_LEN: usize = 8;

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::ENCODED_LEN);
        codec::put_u64(&mut bytes, self.0);
        bytes
    }

    fn decode(data: &[u8]) -> Option<Self> {
        if data.len() != Self::ENCODED_LEN {
            return None;
        }
        Some(Self(codec::read_u64(data, 0)?))
    }
}
