use clap::{Parser, Subcommand};

use bruijn::config::{AssemblyConfig, DEFAULT_KMER_SIZE, DEFAULT_LINE_WIDTH, DEFAULT_OUTPUT, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[command(name = "bruijn", version, about = "De Bruijn graph contig assembler", long_about = None)]
pub struct Cli {
    /// Log every resolved bubble and tip
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble FASTQ reads into contigs
    Assemble {
        /// Input FASTQ(.gz) file
        #[arg(short, long)]
        input: String,

        /// K-mer size
        #[arg(short, long, default_value_t = DEFAULT_KMER_SIZE)]
        kmer_size: usize,

        /// Output FASTA(.gz) file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: String,

        /// Save the simplified graph as a PNG image
        #[arg(short = 'f', long)]
        graph_image: Option<String>,

        /// Save the simplified graph in GFA format
        #[arg(long)]
        gfa: Option<String>,

        /// Write run metadata as JSON
        #[arg(long)]
        json_metadata: Option<String>,

        /// Seed for tie-breaks between equivalent paths
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// FASTA line width
        #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
        line_width: usize,
    },

    /// Summary statistics of a contig FASTA file
    Stats {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: String,

        /// Output format: json or tsv
        #[arg(long, default_value = "json")]
        format: String,
    },
}

impl Commands {
    /// Turn `assemble` arguments into a run configuration.
    pub fn assembly_config(&self) -> Option<AssemblyConfig> {
        match self {
            Commands::Assemble {
                input,
                kmer_size,
                output,
                graph_image,
                gfa,
                json_metadata,
                seed,
                line_width,
            } => Some(AssemblyConfig {
                input: input.clone(),
                kmer_size: *kmer_size,
                output: output.clone(),
                graph_image: graph_image.clone(),
                gfa: gfa.clone(),
                json_metadata: json_metadata.clone(),
                seed: *seed,
                line_width: *line_width,
            }),
            Commands::Stats { .. } => None,
        }
    }
}
