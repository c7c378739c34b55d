use crate::ConfigError;

pub const DEFAULT_CONFIG: AlignmentConfig = AlignmentConfig {
    match_score: 3,
    mismatch: -5,
    gap: -4,
    band_width: 64,
};

pub const STRICT_CONFIG: AlignmentConfig = AlignmentConfig {
    match_score: 5,
    mismatch: -4,
    gap: -8,
    band_width: 16,
};

/// Scoring and banding parameters of the graph aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Score of an identical pair. Positive.
    pub match_score: i32,
    /// Score of a substitution. Negative.
    pub mismatch: i32,
    /// Score of a single inserted or deleted base. Negative.
    pub gap: i32,
    /// Half-width of the band around the expected diagonal.
    pub band_width: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl std::fmt::Display for AlignmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Match:{}", self.match_score)?;
        writeln!(f, "Mismatch:{}", self.mismatch)?;
        writeln!(f, "Gap:{}", self.gap)?;
        write!(f, "BandWidth:{}", self.band_width)
    }
}

impl AlignmentConfig {
    pub fn new(match_score: i32, mismatch: i32, gap: i32, band_width: usize) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
            band_width,
        }
    }
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.match_score <= 0 {
            Err(ConfigError::MatchScore(self.match_score))
        } else if self.mismatch >= 0 {
            Err(ConfigError::Mismatch(self.mismatch))
        } else if self.gap >= 0 {
            Err(ConfigError::Gap(self.gap))
        } else if self.band_width == 0 {
            Err(ConfigError::BandWidth)
        } else {
            Ok(())
        }
    }
    #[inline]
    pub fn score(&self, x: u8, y: u8) -> i32 {
        if x.eq_ignore_ascii_case(&y) {
            self.match_score
        } else {
            self.mismatch
        }
    }
}
