//! UID constants identifying this implementation in File Meta Information.

/// The implementation class UID written to `(0002,0012)` in every file this
/// library produces.
///
pub const IMPLEMENTATION_CLASS_UID: &str = "1.2.826.0.1.3680043.10.1457.1";

/// The implementation version name written to `(0002,0013)`.
///
pub const IMPLEMENTATION_VERSION_NAME: &str = "DCMPRESS_0.1";
