/// Utility modules for Transformix
///
/// This module provides common utility functions used throughout the application.
pub mod pages;
pub mod postscript;

/// Page-list parsing shared by the page-selection capabilities.
pub use pages::{complement, parse_page_list, to_range_syntax};

/// PostScript escaping for the Ghostscript overlay capabilities.
pub use postscript::ps_escape;
