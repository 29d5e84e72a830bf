//! The imaging modality of a DICOM instance and the compression policy rules
//! attached to it.

use crate::compression_config::{CodecKind, QualityPreset};

/// The acquisition modality of an image, as carried in the `(0008,0060)
/// Modality` data element. Only the modalities with bespoke compression policy
/// are enumerated; everything else maps to [`Modality::Other`].
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Modality {
  /// Computed Tomography.
  Ct,

  /// Magnetic Resonance.
  Mr,

  /// Computed Radiography.
  Cr,

  /// Digital Radiography.
  Dx,

  /// Mammography. Regulatory constraints require lossless compression.
  Mg,

  /// Ultrasound.
  Us,

  /// Nuclear Medicine.
  Nm,

  /// Positron Emission Tomography.
  Pt,

  /// Slide Microscopy.
  Sm,

  /// Any other modality code.
  Other,
}

impl core::fmt::Display for Modality {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    write!(f, "{}", self.code())
  }
}

/// Maps a `(0008,0060) Modality` code string to a [`Modality`]. Matching is
/// case-insensitive and ignores surrounding whitespace.
///
pub fn modality_from_code(code: &str) -> Modality {
  match code.trim().to_ascii_uppercase().as_str() {
    "CT" => Modality::Ct,
    "MR" => Modality::Mr,
    "CR" => Modality::Cr,
    "DX" => Modality::Dx,
    "MG" => Modality::Mg,
    "US" => Modality::Us,
    "NM" => Modality::Nm,
    "PT" => Modality::Pt,
    "SM" => Modality::Sm,
    _ => Modality::Other,
  }
}

impl Modality {
  /// Returns the standard DICOM code for this modality. [`Modality::Other`]
  /// reports as `"OT"`.
  ///
  pub fn code(&self) -> &'static str {
    match self {
      Self::Ct => "CT",
      Self::Mr => "MR",
      Self::Cr => "CR",
      Self::Dx => "DX",
      Self::Mg => "MG",
      Self::Us => "US",
      Self::Nm => "NM",
      Self::Pt => "PT",
      Self::Sm => "SM",
      Self::Other => "OT",
    }
  }

  /// Returns whether this modality must only ever be compressed losslessly.
  ///
  /// Mammography falls under regulatory rules that forbid lossy compression
  /// of images used for primary interpretation.
  ///
  pub fn requires_lossless(&self) -> bool {
    matches!(self, Self::Mg)
  }

  /// Returns the codec best suited to this modality's typical pixel data.
  ///
  /// High-bit-depth cross-sectional and mammographic images favour the
  /// wavelet codec; projection radiography, ultrasound, and nuclear medicine
  /// favour the predictive codec.
  ///
  pub fn recommended_codec(&self) -> CodecKind {
    match self {
      Self::Ct | Self::Mr | Self::Mg | Self::Sm | Self::Other => {
        CodecKind::Jpeg2000
      }
      Self::Cr | Self::Dx | Self::Us | Self::Nm | Self::Pt => CodecKind::JpegLs,
    }
  }

  /// Returns the quality preset used when the caller does not choose one.
  ///
  pub fn default_preset(&self) -> QualityPreset {
    match self {
      Self::Mg => QualityPreset::Diagnostic,
      Self::Ct | Self::Mr | Self::Nm | Self::Pt => QualityPreset::HighQuality,
      Self::Cr | Self::Dx | Self::Us | Self::Sm | Self::Other => {
        QualityPreset::Standard
      }
    }
  }
}
