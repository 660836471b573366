use thiserror::Error;

/// Errors raised while assembling contigs or handling assembler files
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// A caller broke the contract of a graph statistic or path selection
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two consecutive path nodes are not joined by an edge
    #[error("No edge between {from} and {to}")]
    MissingEdge { from: String, to: String },

    /// A query referenced a node that is not in the graph
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A FASTQ record was rejected by the reader
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rendering error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, AssemblyError>;
