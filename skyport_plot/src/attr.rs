// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot attributes: the small closed set of named values a layer carries.

use alloc::string::String;

use skyport_coords::WorldPt;

/// Names of the attributes a plot can carry.
///
/// This is intentionally a closed set rather than free-form strings: every
/// consumer in the engine matches exhaustively on the keys it understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttrKey {
    /// The original search/center position; the default recenter anchor.
    FixedTarget,
    /// The radius the layer was requested at, in degrees.
    RequestedSize,
    /// An opaque caller-supplied identity key.
    UniqueKey,
}

/// The value stored under an [`AttrKey`].
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A world position.
    World(WorldPt),
    /// A plain number.
    Number(f64),
    /// Opaque text.
    Text(String),
}

impl AttrValue {
    /// The world point held by this value, if it is one.
    #[must_use]
    pub fn as_world(&self) -> Option<WorldPt> {
        match self {
            Self::World(wp) => Some(*wp),
            _ => None,
        }
    }

    /// The number held by this value, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}
