//! Core alignment engine: subtitle readers, lexical matching, time
//! interpolation/synchronization, the two DP aligners, and the bilingual
//! dictionary.
//!
//! Each subsystem is organized into its own submodule:
//! - `formats` for the sentence/document model and SRT/XML/XCES I/O
//! - `io_util` for shared gzip/BOM/control-character-tolerant file reading
//! - `dictionary` for bilingual dictionaries and per-document word frequency
//! - `lexical` for the composite anchor matcher (C3)
//! - `interpolate` for per-sentence time interpolation (C4)
//! - `sync` for the linear time-transform fitter (C5)
//! - `align` for the overlap DP aligner, best-anchor search, and the
//!   length-based projector (C6-C8)
//! - `fallback` for PATH resolution of the (unimplemented) fallback aligner

pub mod align;
pub mod dictionary;
pub mod fallback;
pub mod formats;
pub mod interpolate;
pub mod io_util;
pub mod lexical;
pub mod sync;
