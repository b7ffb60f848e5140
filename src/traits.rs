use async_trait::async_trait;
use bitflags::bitflags;

use crate::error::Result;

/// Something that can provide the raw ICS text of a calendar year (e.g. a remote server)
#[async_trait]
pub trait IcsSource {
    /// Fetch the ICS feed of a calendar year.
    /// This is usually a network request, that can take a while, or fail.
    async fn fetch_year(&self, year: i32) -> Result<String>;
}

bitflags! {
    /// Network transports that are currently up
    pub struct Transports: u8 {
        const WIFI     = 0b0001;
        const CELLULAR = 0b0010;
        const ETHERNET = 0b0100;
    }
}

impl Transports {
    /// Whether at least one transport is usable
    pub fn is_online(&self) -> bool {
        self.intersects(Transports::WIFI | Transports::CELLULAR | Transports::ETHERNET)
    }
}

/// Tells whether the device can reach the network at all, before any download is attempted
#[async_trait]
pub trait ConnectivityProbe {
    async fn active_transports(&self) -> Transports;
}
