//! Remote routing service seam.

use async_trait::async_trait;

use nav_core::Coordinate;

use crate::RemoteError;

/// A routing service reached over the network.
///
/// `waypoints` is the full ordered chain (start, intermediates, end);
/// `profile` is the transport profile string (`"walking"`, `"cycling"`,
/// `"driving"`).  A successful result is one geometry as an ordered list of
/// coordinates.
#[async_trait]
pub trait RemoteRouter: Send + Sync {
    async fn route(&self, waypoints: &[Coordinate], profile: &str) -> Result<Vec<Coordinate>, RemoteError>;
}

/// Remote router for deployments with no network service.  Always reports
/// [`RemoteError::Offline`].
#[derive(Copy, Clone, Debug, Default)]
pub struct OfflineOnly;

#[async_trait]
impl RemoteRouter for OfflineOnly {
    async fn route(&self, _waypoints: &[Coordinate], _profile: &str) -> Result<Vec<Coordinate>, RemoteError> {
        Err(RemoteError::Offline)
    }
}

/// Lets an application pick its remote router at runtime
/// (`RouteOrchestrator<_, Box<dyn RemoteRouter>>`).
#[async_trait]
impl<T: RemoteRouter + ?Sized> RemoteRouter for Box<T> {
    async fn route(&self, waypoints: &[Coordinate], profile: &str) -> Result<Vec<Coordinate>, RemoteError> {
        (**self).route(waypoints, profile).await
    }
}
