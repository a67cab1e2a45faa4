use kmeans2d::*;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

const FIELD: (u32, u32) = (800, 600);
const GRID: (usize, usize) = (100, 30);
const MIN_TIME_BETWEEN_FRAMES: Duration = Duration::from_millis(500);

fn logging() {
    let start = Instant::now();
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Info)
        .format(move |buffer, record| {
            let elapsed = start.elapsed();
            writeln!(
                buffer,
                "{:02}:{:02}:{:02} - {}",
                (elapsed.as_secs() / 3600),
                (elapsed.as_secs() % 3600) / 60,
                (elapsed.as_secs() % 60),
                record.args()
            )
        })
        .init();
}

/// Draw every sample as a dot in the color of its cluster. Later samples paint over earlier ones.
fn render(snapshot: &Snapshot<'_, f64>) -> String {
    let mut cells: Vec<Option<Hsl>> = vec![None; GRID.0 * GRID.1];
    for p in snapshot.iter() {
        let col = (p.x / FIELD.0 as f64 * GRID.0 as f64) as usize;
        let row = (p.y / FIELD.1 as f64 * GRID.1 as f64) as usize;
        cells[row.min(GRID.1 - 1) * GRID.0 + col.min(GRID.0 - 1)] = Some(p.color);
    }

    let mut frame = String::from("\x1b[2J\x1b[H");
    for row in cells.chunks(GRID.0) {
        for cell in row {
            match cell {
                Some(color) => {
                    let (r, g, b) = color.to_rgb();
                    frame.push_str(&format!("\x1b[38;2;{};{};{}m●", r, g, b));
                }
                None => frame.push(' '),
            }
        }
        frame.push_str("\x1b[0m\n");
    }
    frame.push_str(&format!("iteration {}\n", snapshot.iteration()));
    frame
}

fn main() {
    logging();
    let (point_cnt, k, max_iter) = (500, 50, 20);

    let points: Vec<Point<f64>> = random_points(point_cnt, FIELD.0, FIELD.1, &mut rand::thread_rng());
    let kmean = KMeans::new(points);
    let conf = KMeansConfig::default();
    let mut lloyd = match kmean.kmeans_lloyd(k, max_iter, KMeans::init_random_sample, &conf) {
        Ok(lloyd) => lloyd,
        Err(err) => {
            log::error!("{}", err);
            return;
        }
    };

    let stdout = std::io::stdout();
    while let Some(snapshot) = lloyd.step() {
        let started = Instant::now();
        let mut out = stdout.lock();
        if out.write_all(render(&snapshot).as_bytes()).and_then(|_| out.flush()).is_err() {
            return;
        }
        drop(out);
        thread::sleep(MIN_TIME_BETWEEN_FRAMES.saturating_sub(started.elapsed()));
    }
    log::info!("Done ({:?} after {} iterations)", lloyd.status(), lloyd.state().iteration);
}
