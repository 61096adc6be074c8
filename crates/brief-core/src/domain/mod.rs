//! 도메인 모델.

pub mod series;
pub mod snapshot;

pub use series::{AlignedSeriesSet, SeriesPoint, TimeSeries};
pub use snapshot::{
    ActionBlock, Earnings, EventItem, Indicator, MacroBlock, MoodBlock, NewsItem, Overnight,
    RiskBlock, Schedule, SectorEntry, Snapshot, WatchlistEntry,
};
