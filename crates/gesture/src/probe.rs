use crate::models::GestureEvent;

/// Optional platform capability: tell whether a wheel event is a horizontal scroll.
///
/// Most input layers cannot answer this. Shift + wheel is always available as
/// the baseline way to pan sideways.
pub trait HorizontalScrollProbe {
    /// `None` when the platform has no opinion about this event.
    fn is_horizontal(&self, event: &GestureEvent) -> Option<bool>;
}

/// The default probe: never knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

impl HorizontalScrollProbe for UnsupportedProbe {
    fn is_horizontal(&self, _event: &GestureEvent) -> Option<bool> {
        None
    }
}

impl<F> HorizontalScrollProbe for F
where
    F: Fn(&GestureEvent) -> Option<bool>,
{
    fn is_horizontal(&self, event: &GestureEvent) -> Option<bool> {
        self(event)
    }
}

/// Fill in `horizontal_hint` from the probe unless the event already carries one.
pub fn annotate<P: HorizontalScrollProbe + ?Sized>(probe: &P, mut event: GestureEvent) -> GestureEvent {
    if event.horizontal_hint.is_none() {
        event.horizontal_hint = probe.is_horizontal(&event);
    }
    event
}
