use euclid::default::Point2D;

/// Pointer events delivered to components.
///
/// Positions are in the receiving component's local coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    PointerClick { position: Point2D<f32> },
    PointerMove { position: Point2D<f32> },
}

impl Event {
    pub fn position(&self) -> Point2D<f32> {
        match self {
            Self::PointerClick { position } | Self::PointerMove { position } => *position,
        }
    }
}
