/// High-impact events from the [Forex Factory] weekly calendar, via the Fair Economy CDN.
///
/// [Forex Factory]: https://www.forexfactory.com/calendar
pub mod forex_factory;

/// Date-window and impact filtering of raw calendar events.
pub mod filter;

/// The timestamped JSON artifact written at the end of a run.
pub mod snapshot;
