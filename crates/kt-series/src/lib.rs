//! kt-series: ordered time-series storage for recorded kinematics.
//!
//! A [`Series`] is an append-only sequence of time-stamped samples with
//! non-decreasing times. Vector-valued series additionally support column
//! extraction and boundary padding for spline fitting, and can be persisted
//! as JSONL for post-run inspection.

pub mod error;
pub mod series;
pub mod store;

pub use error::{SeriesError, SeriesResult};
pub use series::{Sample, Series, pad_len};
pub use store::{load_series, save_series};
