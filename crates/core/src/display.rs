//! Chart display style enumerations.
//!
//! Sierra Chart number-bars study mappings carried as configuration
//! metadata. These have no effect on aggregation; they describe how a
//! renderer would present a finished footprint column.

use serde::{Deserialize, Serialize};

/// Background rendering for footprint columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum BackgroundType {
    None = 0,
    FullBackground = 1,
    VolumeProfile = 2,
}

/// Coloring method for backgrounds and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ColoringMethod {
    None = 0,
    VolumePercentage = 1,
    DominantSideAskBidVolPercentage = 6,
    DiagonalDominantSideAskBidVolPercentage = 7,
    AskBidVolDifferenceActual = 14,
}

/// Text displayed in footprint cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum NumberBarsTextType {
    NoText = 0,
    AskVolBidVolDifference = 1,
    Volume = 2,
    BidVolXAskVol = 4,
}

/// Marker style for open and close prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum CandlestickMarkerStyle {
    None = 0,
    CandlestickOutline = 6,
}
