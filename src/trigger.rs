use embedded_hal::digital::InputPin;

/// Which level change counts as a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Falling,
    Rising,
}

/// Turns a raw start/reset line into one event per active edge.
///
/// The line is read as-is on every poll; there is no debouncing.
pub struct ResetTrigger<P> {
    pin: P,
    edge: Edge,
    last: Option<bool>,
}

impl<P, E> ResetTrigger<P>
where
    P: InputPin<Error = E>,
{
    pub fn new(pin: P, edge: Edge) -> Self {
        Self {
            pin,
            edge,
            last: None,
        }
    }

    pub fn destroy(self) -> P {
        self.pin
    }

    /// Samples the line; `true` when it just moved in the active direction.
    ///
    /// The first sample only records the idle level.
    pub fn poll(&mut self) -> Result<bool, E> {
        let high = self.pin.is_high()?;
        let fired = match (self.last, self.edge) {
            (Some(true), Edge::Falling) => !high,
            (Some(false), Edge::Rising) => high,
            _ => false,
        };
        self.last = Some(high);
        if fired {
            debug!("reset edge");
        }
        Ok(fired)
    }
}
