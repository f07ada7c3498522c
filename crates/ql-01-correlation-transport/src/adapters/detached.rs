//! Host channel for environments where the bridge does not exist.

use crate::ports::{HostChannel, HostError};
use shared_types::RequestEnvelope;

/// Reports itself unavailable and refuses every send.
///
/// Used when the UI runs outside the desktop shell (for example a plain
/// browser preview), where a different transport is in charge.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl HostChannel for DetachedHost {
    fn is_available(&self) -> bool {
        false
    }

    fn post_message(&self, _request: &RequestEnvelope) -> Result<(), HostError> {
        Err(HostError::ChannelClosed)
    }
}
