use kmeans2d::*;

fn main() {
    let (point_cnt, k, max_iter) = (20000, 16, 2500);

    // Generate some random data
    let points: Vec<Point<f64>> = random_points(point_cnt, 1920, 1080, &mut rand::thread_rng());

	let conf = KMeansConfig::build()
		.init_done(&|s| println!("Initialization completed, centroids: {:?}",
			s.centroids.iter().map(|c| c.key()).collect::<Vec<_>>()))
		.iteration_done(&|s, nr, new_distsum|
			println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2} | Empty clusters: {}",
				nr, s.distsum, new_distsum, s.distsum - new_distsum, s.empty_clusters))
		.abort_strategy(AbortStrategy::NoImprovement { threshold: 0.5 })
		.empty_cluster_strategy(EmptyClusterStrategy::StealFarthest)
		.floor_centroids(false)
		.build();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(points);
    let result = match kmean.kmeans_lloyd(k, max_iter, KMeans::init_kmeanplusplus, &conf) {
        Ok(lloyd) => lloyd.run(),
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };

    println!("Status: {:?}", result.status);
    println!("Centroids: {:?}", result.centroids);
    println!("Error: {}", result.distsum);
}
