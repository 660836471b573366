use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, Result};

pub const DEFAULT_KMER_SIZE: usize = 22;
pub const DEFAULT_SEED: u64 = 9001;
pub const DEFAULT_LINE_WIDTH: usize = 80;
pub const DEFAULT_OUTPUT: &str = "contigs.fasta";

/// Parameters of one assembly run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// FASTQ(.gz) input
    pub input: String,
    pub kmer_size: usize,
    /// FASTA(.gz) output
    pub output: String,
    /// PNG rendering of the simplified graph
    pub graph_image: Option<String>,
    /// GFA export of the simplified graph
    pub gfa: Option<String>,
    /// JSON run metadata
    pub json_metadata: Option<String>,
    /// Seed for tie-breaks between equivalent paths
    pub seed: u64,
    /// FASTA line width
    pub line_width: usize,
}

impl AssemblyConfig {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            kmer_size: DEFAULT_KMER_SIZE,
            output: DEFAULT_OUTPUT.to_string(),
            graph_image: None,
            gfa: None,
            json_metadata: None,
            seed: DEFAULT_SEED,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kmer_size < 2 {
            return Err(AssemblyError::InvalidConfig(format!(
                "k-mer size must be at least 2, got {}",
                self.kmer_size
            )));
        }
        if self.line_width == 0 {
            return Err(AssemblyError::InvalidConfig(
                "line width must be positive".to_string(),
            ));
        }
        if self.input.is_empty() {
            return Err(AssemblyError::InvalidConfig("no input file given".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssemblyConfig::new("reads.fq");
        assert_eq!(config.kmer_size, 22);
        assert_eq!(config.seed, 9001);
        assert_eq!(config.line_width, 80);
        assert_eq!(config.output, "contigs.fasta");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AssemblyConfig::new("reads.fq");
        config.kmer_size = 1;
        assert!(matches!(config.validate(), Err(AssemblyError::InvalidConfig(_))));

        let mut config = AssemblyConfig::new("reads.fq");
        config.line_width = 0;
        assert!(matches!(config.validate(), Err(AssemblyError::InvalidConfig(_))));

        assert!(AssemblyConfig::new("").validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = AssemblyConfig::new("reads.fq.gz");
        config.gfa = Some("graph.gfa".to_string());
        let json = serde_json::to_string(&config).unwrap();
        let back: AssemblyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
