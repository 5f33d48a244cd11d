// Licensed under the Apache License, Version 2.0

/// Change of the sensor state between two polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Magnet arrived: one trigger
    FarToNear,
    /// Magnet left
    NearToFar,
}

/// Compares the sensor level with the previous poll. No debouncing: the wheel
/// turns slowly compared to the polling rate.
pub struct EdgeDetector {
    near: bool, // Level seen on the last poll
}

impl EdgeDetector {
    pub const fn new(near: bool) -> Self {
        Self { near }
    }

    /// Overwrites the remembered level without reporting a transition.
    pub fn reset(&mut self, near: bool) {
        self.near = near;
    }

    pub fn poll(&mut self, near: bool) -> Option<Transition> {
        if near == self.near {
            return None;
        }
        self.near = near;
        Some(if near {
            Transition::FarToNear
        } else {
            Transition::NearToFar
        })
    }

    pub fn is_near(&self) -> bool {
        self.near
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_level_reports_nothing() {
        let mut edge = EdgeDetector::new(false);
        assert_eq!(edge.poll(false), None);
        assert_eq!(edge.poll(false), None);

        let mut edge = EdgeDetector::new(true);
        assert_eq!(edge.poll(true), None);
    }

    #[test]
    fn reports_both_directions_once() {
        let mut edge = EdgeDetector::new(false);
        assert_eq!(edge.poll(true), Some(Transition::FarToNear));
        assert_eq!(edge.poll(true), None);
        assert!(edge.is_near());
        assert_eq!(edge.poll(false), Some(Transition::NearToFar));
        assert_eq!(edge.poll(false), None);
        assert!(!edge.is_near());
    }

    #[test]
    fn single_glitch_is_a_transition() {
        let mut edge = EdgeDetector::new(false);
        assert_eq!(edge.poll(true), Some(Transition::FarToNear));
        assert_eq!(edge.poll(false), Some(Transition::NearToFar));
    }

    #[test]
    fn reset_is_silent() {
        let mut edge = EdgeDetector::new(false);
        edge.reset(true);
        assert_eq!(edge.poll(true), None);
    }
}
