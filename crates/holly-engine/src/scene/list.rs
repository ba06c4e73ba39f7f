use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The fixed catalog of primitive lists a frame is built from.
///
/// The numeric values are part of the wire contract: they occupy bits 26..24
/// of a compiled header's command word and index the per-list bin-size table
/// in [`InitParams`](crate::config::InitParams).
///
/// Draw order between kinds is a convention, not an invariant: the device
/// bins opaque kinds before punch-through and punch-through before
/// translucent, and callers should rely on that only for visual layering,
/// never for correctness.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum ListKind {
    /// Opaque polygons.
    OpaquePoly = 0,
    /// Opaque modifier volumes.
    OpaqueModifier = 1,
    /// Translucent polygons.
    TransPoly = 2,
    /// Translucent modifier volumes.
    TransModifier = 3,
    /// Punch-through polygons (opaque-or-discard alpha).
    PunchThruPoly = 4,
}

/// Number of list kinds in the catalog.
pub const LIST_COUNT: usize = 5;

impl ListKind {
    /// All kinds, in conventional submission order.
    pub const ALL: [ListKind; LIST_COUNT] = [
        ListKind::OpaquePoly,
        ListKind::OpaqueModifier,
        ListKind::PunchThruPoly,
        ListKind::TransPoly,
        ListKind::TransModifier,
    ];

    /// True for the two translucent kinds.
    #[inline]
    pub const fn is_translucent(self) -> bool {
        matches!(self, ListKind::TransPoly | ListKind::TransModifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        assert_eq!(u32::from(ListKind::OpaquePoly), 0);
        assert_eq!(u32::from(ListKind::OpaqueModifier), 1);
        assert_eq!(u32::from(ListKind::TransPoly), 2);
        assert_eq!(u32::from(ListKind::TransModifier), 3);
        assert_eq!(u32::from(ListKind::PunchThruPoly), 4);
    }

    #[test]
    fn round_trips_through_u32() {
        for kind in ListKind::ALL {
            assert_eq!(ListKind::try_from(u32::from(kind)).unwrap(), kind);
        }
        assert!(ListKind::try_from(5_u32).is_err());
    }

    #[test]
    fn translucency_split() {
        assert!(ListKind::TransPoly.is_translucent());
        assert!(ListKind::TransModifier.is_translucent());
        assert!(!ListKind::OpaquePoly.is_translucent());
        assert!(!ListKind::PunchThruPoly.is_translucent());
    }
}
