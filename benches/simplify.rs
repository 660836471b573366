use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bruijn::{assemble_sequences, simplify_graph, DeBruijnGraph};
use bruijn::kmer::build_kmer_counts;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Sample error-bearing reads from a random reference
fn generate_reads(genome_len: usize, num_reads: usize, read_len: usize, error_rate: f64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(9001);
    let genome: Vec<char> = (0..genome_len).map(|_| BASES[rng.gen_range(0..4)]).collect();

    (0..num_reads)
        .map(|_| {
            let start = rng.gen_range(0..=genome_len - read_len);
            genome[start..start + read_len]
                .iter()
                .map(|&base| {
                    if rng.gen_bool(error_rate) {
                        BASES[rng.gen_range(0..4)]
                    } else {
                        base
                    }
                })
                .collect()
        })
        .collect()
}

fn bench_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");
    group.sample_size(10);

    for num_reads in [50, 200] {
        let reads = generate_reads(2000, num_reads, 100, 0.002);
        let counts = build_kmer_counts(&reads, 21);
        let graph = DeBruijnGraph::from_kmer_counts(&counts);

        group.bench_with_input(BenchmarkId::new("simplify_graph", num_reads), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                let mut rng = StdRng::seed_from_u64(9001);
                black_box(simplify_graph(&mut graph, &mut rng).ok())
            });
        });

        group.bench_with_input(BenchmarkId::new("assemble", num_reads), &reads, |b, reads| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(9001);
                black_box(assemble_sequences(reads, 21, &mut rng).map(|a| a.contigs.len()).ok())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_simplify);
criterion_main!(benches);
