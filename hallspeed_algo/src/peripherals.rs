// Hardware seams of the estimators.
//
// The firmware implements these on top of the HAL, unit tests implement them with
// scripted doubles. Nothing here touches registers.

// Licensed under the Apache License, Version 2.0

/// Free-running up-counter with a hardware overflow flag.
///
/// The counter wraps to zero after `2^bits - 1` and raises the flag on every wrap.
/// The flag stays raised until `clear_overflow()` is called.
pub trait FreeRunningCounter {
    /// Starts counting from zero with a cleared overflow flag.
    fn start(&mut self);

    /// Raw counter value.
    fn count(&self) -> u16;

    /// Overflow flag state.
    fn overflow_pending(&self) -> bool;

    /// Acknowledges the overflow flag.
    fn clear_overflow(&mut self);
}

/// Digital proximity sensor.
pub trait ProximityInput {
    /// `true` while the magnet is near the sensor.
    fn is_near(&mut self) -> bool;
}

/// Single analog channel.
pub trait AnalogInput {
    /// Raw conversion result.
    fn read(&mut self) -> u16;
}
