use csv::ReaderBuilder;
use rand::Rng;
use rusty_clusters::data::coordinates::Coordinates;
use rusty_clusters::data::random::rng_from_seed;
use rusty_clusters::metrics::quality::ClusterMetrics;
use rusty_clusters::unsupervised::cluster_set::ClusterSet;
use rusty_clusters::unsupervised::params::{ClusterParams, EmptyClusterPolicy};
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

const MAX_ITERATIONS: usize = 100;
const DEFAULT_LOG_FILTER: &str = "rusty_clusters=info,test_clusters=info";

fn read_file(file_path: &str, header: bool) -> Result<Vec<Coordinates>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut points = Vec::new();

    for result in reader.records() {
        let record = result?;
        let values = record
            .iter()
            .map(|value| value.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        points.push(Coordinates::new(values));
    }

    Ok(points)
}

fn generate_blobs(per_blob: usize, seed: u64) -> Vec<Coordinates> {
    let mut rng = rng_from_seed(Some(seed));
    let blob_centers = [(0.2, 0.2), (0.5, 0.8), (0.8, 0.3)];

    blob_centers
        .iter()
        .flat_map(|&center| std::iter::repeat(center).take(per_blob))
        .map(|(x, y)| {
            Coordinates::new(vec![
                x + rng.gen_range(-0.1..0.1),
                y + rng.gen_range(-0.1..0.1),
            ])
        })
        .collect()
}

fn run(dataset: &[Coordinates], params: &ClusterParams, seed: u64) -> Result<(), Box<dyn Error>> {
    let mut rng = rng_from_seed(Some(seed));
    let mut clusters = ClusterSet::with_params(params, dataset, &mut rng)?;
    let mut previous: Option<Vec<usize>> = None;

    for iteration in 1..=MAX_ITERATIONS {
        clusters.reset();
        let assignments = clusters.assign()?;
        let reseeded = clusters.recenter_with_policy(&mut rng)?;

        if reseeded.is_empty() && previous.as_ref() == Some(&assignments) {
            info!(iteration, "assignments stable");
            break;
        }
        previous = Some(assignments);
    }

    for (index, cluster) in clusters.clusters().iter().enumerate() {
        info!(
            cluster = index,
            members = cluster.len(),
            center = ?cluster.center().values().as_slice(),
            "cluster"
        );
    }
    info!(inertia = clusters.inertia()?, "quality");
    if clusters.len() > 1 {
        info!(silhouette = clusters.mean_silhouette()?, "quality");
    }
    Ok(())
}

/// `RUST_LOG` wins when it is set and parses; otherwise both crates log at info.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    let mut args = std::env::args().skip(1);
    let dataset = match args.next() {
        Some(path) => {
            let points = read_file(&path, false)?;
            info!(path = %path, points = points.len(), "loaded dataset");
            points
        }
        None => generate_blobs(50, 7),
    };
    let num_clusters = match args.next() {
        Some(k) => k.parse::<usize>()?,
        None => 3,
    };

    let mut params = ClusterParams::new();
    params.set_num_clusters(num_clusters)?;
    params.set_empty_cluster_policy(EmptyClusterPolicy::Reseed);

    run(&dataset, &params, 1000)
}
