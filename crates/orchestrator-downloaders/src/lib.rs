pub mod dispatcher;
pub mod qbittorrent;
pub mod streaming;

pub use dispatcher::{DownloadDispatcher, GrabRequest, GrabResponse};
pub use qbittorrent::{QBittorrentClient, QBittorrentConfig};
pub use streaming::{synthesize_strm_record, StrmRecord};
