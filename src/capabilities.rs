/// Host features the page controllers depend on.
///
/// Probed once at startup in the browser and built by hand in tests, so
/// every controller can be exercised with a capability present or missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub intersection_observer: bool,
    pub webgl2: bool,
    /// `prefers-reduced-motion: reduce`; read once, fixed for the session.
    pub reduced_motion: bool,
}

impl Capabilities {
    /// A fully capable host with motion allowed.
    pub const fn full() -> Self {
        Self {
            intersection_observer: true,
            webgl2: true,
            reduced_motion: false,
        }
    }

    pub const fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Whether the particle background should be attempted at all.
    pub const fn allows_particles(&self) -> bool {
        self.webgl2 && !self.reduced_motion
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}
