/*!
clock.rs - Clock rates and the cycle hook.

The CPU reports how many cycles each step costs by routing the step's
work through a `CycleHook`. `CycleHook::Free` just runs the work (host
doesn't care about pacing); `CycleHook::Paced` additionally sleeps the
calling thread until the cycles' share of wall-clock time at the
configured rate has elapsed, which is enough to hold a program near
real console speed without any help from the host.
*/

use std::time::{Duration, Instant};

/// CPU clock frequency used for pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockRate {
    /// NTSC 2A03: 1.789773 MHz.
    Ntsc,
    /// PAL 2A07: 1.662607 MHz.
    Pal,
    /// Arbitrary frequency in Hz.
    Custom(f64),
}

impl ClockRate {
    pub fn hz(self) -> f64 {
        match self {
            ClockRate::Ntsc => 1_789_773.0,
            ClockRate::Pal => 1_662_607.0,
            ClockRate::Custom(hz) => hz,
        }
    }

    /// Wall-clock duration of `cycles` cycles at this rate.
    pub fn duration_for(self, cycles: u32) -> Duration {
        Duration::from_secs_f64(cycles as f64 / self.hz())
    }
}

/// Pluggable pacing around each instruction: given the cycle count and
/// the work to do, run the work and optionally block until the
/// proportional wall-clock time has passed.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleHook {
    /// Run as fast as the host allows.
    Free,
    /// Sleep out the remainder of each instruction's time slice.
    Paced(ClockRate),
}

impl CycleHook {
    pub fn run<R>(&mut self, cycles: u32, work: impl FnOnce() -> R) -> R {
        match self {
            CycleHook::Free => work(),
            CycleHook::Paced(rate) => {
                let budget = rate.duration_for(cycles);
                let started = Instant::now();
                let result = work();
                let elapsed = started.elapsed();
                if elapsed < budget {
                    std::thread::sleep(budget - elapsed);
                }
                result
            }
        }
    }
}
