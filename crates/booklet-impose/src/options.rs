use crate::constants::DEFAULT_SPLIT_WIDTH_MULTIPLIER;
use crate::types::*;

/// Booklet generation configuration
///
/// Invalid values fail [`BookletOptions::new`]; the planner checks
/// `validate()` once on entry before emitting anything.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BookletOptions {
    pub paper_size: PaperSize,
    pub duplex_mode: DuplexMode,
    pub reading_order: ReadingOrder,

    /// Width ratio above which a page counts as a double-page spread
    pub split_width_multiplier: f32,

    /// Signatures to divide the booklet into
    pub num_signatures: usize,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Tabloid,
            duplex_mode: DuplexMode::Auto,
            reading_order: ReadingOrder::Western,
            split_width_multiplier: DEFAULT_SPLIT_WIDTH_MULTIPLIER,
            num_signatures: 1,
        }
    }
}

impl BookletOptions {
    pub fn new(
        paper_size: PaperSize,
        duplex_mode: DuplexMode,
        reading_order: ReadingOrder,
        split_width_multiplier: f32,
    ) -> Result<Self> {
        let options = Self {
            paper_size,
            duplex_mode,
            reading_order,
            split_width_multiplier,
            num_signatures: 1,
        };
        options.validate()?;
        Ok(options)
    }

    /// Set the signature count, re-checking the invariants.
    pub fn with_signatures(mut self, num_signatures: usize) -> Result<Self> {
        self.num_signatures = num_signatures;
        self.validate()?;
        Ok(self)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.paper_size.dimensions_pt();
        if !(width > 0.0 && height > 0.0) {
            return Err(ImposeError::InvalidOptions(format!(
                "paper size must be strictly positive, got {width}x{height} pt"
            )));
        }

        if !(self.split_width_multiplier > 1.0) {
            return Err(ImposeError::InvalidOptions(format!(
                "split width multiplier must be greater than 1.0, got {}",
                self.split_width_multiplier
            )));
        }

        if self.num_signatures < 1 {
            return Err(ImposeError::InvalidOptions(
                "number of signatures must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options, falling back to the documented defaults when the file
    /// is missing, unreadable, or invalid.
    #[cfg(feature = "serde")]
    pub async fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path).await {
            Ok(options) => options,
            Err(err) => {
                log::warn!(
                    "failed to load config from {}: {err}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::Deserialize;

    // PaperSize carries a Custom variant, so it serializes as either a
    // lowercase name or a {width_pt, height_pt} map.
    impl serde::Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                PaperSize::Tabloid => serializer.serialize_str("tabloid"),
                PaperSize::A3 => serializer.serialize_str("a3"),
                PaperSize::Letter => serializer.serialize_str("letter"),
                PaperSize::A4 => serializer.serialize_str("a4"),
                PaperSize::Legal => serializer.serialize_str("legal"),
                PaperSize::Custom {
                    width_pt,
                    height_pt,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_pt", width_pt)?;
                    s.serialize_field("height_pt", height_pt)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct PaperSizeVisitor;

            impl<'de> Visitor<'de> for PaperSizeVisitor {
                type Value = PaperSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a paper size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PaperSize, E>
                where
                    E: de::Error,
                {
                    match value {
                        "tabloid" => Ok(PaperSize::Tabloid),
                        "a3" => Ok(PaperSize::A3),
                        "letter" => Ok(PaperSize::Letter),
                        "a4" => Ok(PaperSize::A4),
                        "legal" => Ok(PaperSize::Legal),
                        _ => Err(de::Error::unknown_variant(
                            value,
                            &["tabloid", "a3", "letter", "a4", "legal", "custom"],
                        )),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<PaperSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_pt = None;
                    let mut height_pt = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_pt" => width_pt = Some(map.next_value()?),
                            "height_pt" => height_pt = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_pt, height_pt) {
                        (Some(w), Some(h)) => Ok(PaperSize::Custom {
                            width_pt: w,
                            height_pt: h,
                        }),
                        _ => Err(de::Error::missing_field("width_pt or height_pt")),
                    }
                }
            }

            deserializer.deserialize_any(PaperSizeVisitor)
        }
    }
}
