//! Connectivity capability consumed by callers of [`super::MoviesQuery`].

/// Answers whether the device currently has usable network connectivity.
pub trait ConnectivityProbe: Send + Sync {
    /// Return `true` when remote calls are expected to reach the network.
    fn is_online(&self) -> bool;
}

/// Probe that always returns a fixed answer.
///
/// # Examples
/// ```
/// use movies::domain::ports::{ConnectivityProbe, FixedConnectivity};
///
/// assert!(!FixedConnectivity::offline().is_online());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConnectivity(bool);

impl FixedConnectivity {
    /// Probe reporting connectivity.
    #[must_use]
    pub const fn online() -> Self {
        Self(true)
    }

    /// Probe reporting no connectivity.
    #[must_use]
    pub const fn offline() -> Self {
        Self(false)
    }
}

impl ConnectivityProbe for FixedConnectivity {
    fn is_online(&self) -> bool {
        self.0
    }
}
