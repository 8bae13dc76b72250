pub mod launcher;

pub use launcher::{EthLauncherClient, MemeLauncher, SignerClient};
