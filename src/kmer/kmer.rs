use ahash::AHashMap;

use crate::error::Result;

pub type Kmer = String;

/// Byte offsets of every char boundary in `seq`, including the end of the string.
fn char_boundaries(seq: &str) -> Vec<usize> {
    seq.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(seq.len()))
        .collect()
}

/// Cut a read into its overlapping k-mers (sliding window, stride 1).
///
/// Windows are measured in characters, so a read shorter than `k` (or `k == 0`)
/// yields nothing.
pub fn cut_kmers(read: &str, k: usize) -> impl Iterator<Item = &str> + '_ {
    let bounds = char_boundaries(read);
    let n_chars = bounds.len() - 1;
    let windows = if k == 0 || k > n_chars { 0 } else { n_chars - k + 1 };

    (0..windows).map(move |i| &read[bounds[i]..bounds[i + k]])
}

/// Number of k-mers a read of `read_len` characters contributes.
pub fn kmers_in_read(read_len: usize, k: usize) -> usize {
    if k == 0 || k > read_len {
        0
    } else {
        read_len - k + 1
    }
}

/// Everything but the last character.
pub fn kmer_prefix(kmer: &str) -> &str {
    match kmer.char_indices().last() {
        Some((i, _)) => &kmer[..i],
        None => kmer,
    }
}

/// Everything but the first character.
pub fn kmer_suffix(kmer: &str) -> &str {
    let mut chars = kmer.chars();
    chars.next();
    chars.as_str()
}

/// K-mer occurrence table that remembers the order in which each k-mer was
/// first observed.
#[derive(Debug, Clone, Default)]
pub struct KmerCounts {
    k: usize,
    reads: usize,
    index: AHashMap<Kmer, usize>,
    entries: Vec<(Kmer, u32)>,
}

impl KmerCounts {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of reads that went through `add_read`.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of distinct k-mers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of k-mer observations across all reads.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c as u64).sum()
    }

    /// Occurrence count, 0 for unseen k-mers.
    pub fn get(&self, kmer: &str) -> u32 {
        self.index
            .get(kmer)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Record a single observation of `kmer`.
    pub fn add(&mut self, kmer: &str) {
        match self.index.get(kmer) {
            Some(&i) => {
                let count = &mut self.entries[i].1;
                *count = count.saturating_add(1);
            }
            None => {
                self.index.insert(kmer.to_string(), self.entries.len());
                self.entries.push((kmer.to_string(), 1));
            }
        }
    }

    /// Slice `read` into k-mers and record every one of them.
    pub fn add_read(&mut self, read: &str) {
        self.reads += 1;
        for kmer in cut_kmers(read, self.k) {
            self.add(kmer);
        }
    }

    /// Iterate `(kmer, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(kmer, count)| (kmer.as_str(), *count))
    }
}

/// Build the k-mer table for an in-memory collection of reads.
pub fn build_kmer_counts<I, S>(reads: I, k: usize) -> KmerCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = KmerCounts::new(k);
    for read in reads {
        counts.add_read(read.as_ref());
    }
    counts
}

/// Build the k-mer table from a fallible read source, stopping at the first error.
pub fn try_build_kmer_counts<I, S>(reads: I, k: usize) -> Result<KmerCounts>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut counts = KmerCounts::new(k);
    for read in reads {
        counts.add_read(read?.as_ref());
    }
    Ok(counts)
}
